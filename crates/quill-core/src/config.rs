//! Process configuration loaded once at startup.
//!
//! Environment variables:
//!   DATABASE_URL       - Postgres connection string (required)
//!   IDENTITY_URL       - base URL of the hosted identity service (required)
//!   IDENTITY_ANON_KEY  - public API key sent with identity requests (required)
//!   BASE_URL           - absolute URL the app is served at, used as the
//!                        redirect target away from auth routes (required)
//!   HOST               - bind address (default 0.0.0.0)
//!   PORT               - bind port (default 3000)

use crate::error::{Error, Result};

/// Immutable application configuration, injected into both the identity
/// client and the datastore pool at construction time.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres connection string.
    pub database_url: String,
    /// Base URL of the identity service (no trailing slash).
    pub identity_url: String,
    /// Public API key for the identity service.
    pub identity_anon_key: String,
    /// Absolute base URL of this application (no trailing slash).
    pub base_url: String,
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

fn required(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::Config(format!("missing {}", name)))
}

fn strip_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv().ok()` before this in the binary so a local
    /// `.env` file is honored.
    pub fn from_env() -> Result<Self> {
        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| Error::Config("PORT is not a valid port number".to_string()))?;

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            identity_url: strip_slash(required("IDENTITY_URL")?),
            identity_anon_key: required("IDENTITY_ANON_KEY")?,
            base_url: strip_slash(required("BASE_URL")?),
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
        })
    }

    /// Socket address string for binding the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
