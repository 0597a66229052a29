use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api;
use crate::auth::{self, CredentialStore};
use crate::config::Config;
use crate::db::MovieRepo;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<dyn MovieRepo>,
    pub credentials: Arc<CredentialStore>,
}

impl AppState {
    pub fn new(config: Config, db: Arc<dyn MovieRepo>, credentials: CredentialStore) -> Self {
        Self {
            config: Arc::new(config),
            db,
            credentials: Arc::new(credentials),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let movie_routes = Router::new()
        .route("/movies", get(api::handlers::list_movies))
        .route(
            "/services/:service/movies",
            get(api::handlers::list_movies_by_service),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_basic_auth,
        ));

    Router::new()
        .route("/status", get(api::handlers::status))
        .merge(movie_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
