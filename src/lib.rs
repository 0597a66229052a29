pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod server;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use db::MovieRepo;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] db::DbError),
    #[error("Server error: {0}")]
    Server(String),
}

pub async fn run() -> Result<(), ServerError> {
    let config = config::Config::from_env()?;

    let site_names: Vec<&str> = config.sites.iter().map(|s| s.name.as_str()).collect();
    info!("Sites available: {}", site_names.join(", "));

    let db: Arc<dyn MovieRepo> = if config.database_url.starts_with("memory:") {
        info!("Using in-memory movie store");
        Arc::new(db::MemoryRepository::new())
    } else {
        info!("Connecting to movie store at {}", config.database_url);
        Arc::new(db::SqliteRepository::connect(&config.database_url).await?)
    };

    let credentials = auth::CredentialStore::new(&config.auth_username, &config.auth_password)
        .map_err(|e| ServerError::Server(format!("Failed to hash credentials: {}", e)))?;

    let addr: SocketAddr = format!("{}:{}", config.listen.address, config.listen.port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid listen address: {}", e)))?;

    let tls_paths = match (&config.listen.tlscert, &config.listen.tlskey) {
        (Some(cert), Some(key)) => Some((cert.clone(), key.clone())),
        _ => None,
    };

    let state = server::AppState::new(config, db, credentials);
    let app = server::build_router(state);

    if let Some((cert_path, key_path)) = tls_paths {
        info!("Loading TLS certificate from {}", cert_path);
        info!("Loading TLS key from {}", key_path);

        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(&cert_path, &key_path)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to load TLS config: {}", e)))?;

        info!("Serving HTTPS on {}", addr);

        axum_server::bind_rustls(addr, tls_config)
            .http1_only()
            .serve(app.into_make_service())
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    } else {
        info!("Serving HTTP on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    }

    Ok(())
}
