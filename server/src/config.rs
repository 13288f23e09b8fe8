//! Runtime configuration for the catalog server.
//!
//! Every setting can be passed as a flag or through its environment
//! variable; flags win. Database credentials are optional here:
//! their absence is reported by the connection manager when it is asked to
//! connect, so the in-memory store can run without them.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use axum::http::HeaderValue;
use clap::{Parser, ValueEnum};

use crate::persistence::ConnectionSettings;

const DEFAULT_DATABASE: &str = "catalogo_juegos";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "game-catalog-server",
    version,
    about = "REST backend for a game catalog with user reviews"
)]
pub struct Args {
    /// Database account name.
    #[arg(long, env = "MONGODB_USER")]
    pub db_user: Option<String>,

    /// Database account secret.
    #[arg(long, env = "MONGODB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Database host, e.g. `cluster0.example.mongodb.net`. A bare host is
    /// treated as an SRV record; a full `mongodb://` URI is used as-is.
    #[arg(long, env = "MONGODB_HOST")]
    pub db_host: Option<String>,

    #[arg(long, env = "MONGODB_DATABASE", default_value = DEFAULT_DATABASE)]
    pub db_name: String,

    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// The only origin allowed to make cross-origin requests.
    #[arg(long, env = "FRONTEND_URL", default_value = DEFAULT_FRONTEND_URL)]
    pub frontend_url: String,

    /// `development` echoes error diagnostics in 500 responses.
    #[arg(long = "env", env = "APP_ENV", value_enum, default_value_t = RunMode::Production)]
    pub mode: RunMode,

    #[arg(long, env = "CATALOG_STORE", value_enum, default_value_t = StoreKind::Mongo)]
    pub store: StoreKind,

    /// Also write logs to a daily-rolling file in this directory.
    #[arg(long, env = "CATALOG_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    #[value(alias = "dev")]
    Development,
    #[value(alias = "prod")]
    Production,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Mongo,
    Memory,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("FRONTEND_URL is not a valid origin header value: {0}")]
    InvalidOrigin(String),
    #[error("FRONTEND_URL must name one origin; `*` cannot be used with credentialed CORS")]
    WildcardOrigin,
}

impl Args {
    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            account: self.db_user.clone(),
            secret: self.db_password.clone(),
            host: self.db_host.clone(),
            database: self.db_name.clone(),
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    pub fn dev_mode(&self) -> bool {
        self.mode == RunMode::Development
    }

    pub fn allowed_origin(&self) -> Result<HeaderValue, ConfigError> {
        let origin = self.frontend_url.trim().trim_end_matches('/');
        if origin == "*" {
            return Err(ConfigError::WildcardOrigin);
        }
        HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
    }
}
