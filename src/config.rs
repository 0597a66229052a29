use std::env;

/// The scraped source sites this server knows about. Each site's documents
/// live in a store collection named after the site with hyphens stripped.
pub const SITES_AVAILABLE: [&str; 6] = [
    "amazon",
    "colecione-classicos",
    "fam-dvd",
    "the-originals",
    "versatil",
    "video-perola",
];

const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen: ListenConfig,
    pub database_url: String,
    pub auth_username: String,
    pub auth_password: String,
    pub sites: Vec<SiteConfig>,
}

#[derive(Debug, Clone)]
pub struct ListenConfig {
    pub address: String,
    pub port: u16,
    pub tlscert: Option<String>,
    pub tlskey: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Public hyphenated name, as it appears in `/services/{service}/movies`.
    pub name: String,
    /// Store collection name (hyphens stripped).
    pub collection: String,
}

impl SiteConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            collection: name.replace('-', ""),
        }
    }
}

pub fn default_sites() -> Vec<SiteConfig> {
    SITES_AVAILABLE.iter().map(|name| SiteConfig::new(name)).collect()
}

impl Config {
    /// Read configuration from the process environment. The store URI and
    /// the basic-auth credentials are required; startup fails without them.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = require("DATABASE_URL")?;
        let auth_username = require("AUTH_USER")?;
        let auth_password = require("AUTH_PASSWORD")?;

        let address = env::var("LISTEN_ADDR").unwrap_or_else(|_| "[::]".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            listen: ListenConfig {
                address,
                port,
                tlscert: env::var("TLS_CERT").ok(),
                tlskey: env::var("TLS_KEY").ok(),
            },
            database_url,
            auth_username,
            auth_password,
            sites: default_sites(),
        })
    }

    pub fn find_site(&self, name: &str) -> Option<&SiteConfig> {
        self.sites.iter().find(|s| s.name == name)
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
