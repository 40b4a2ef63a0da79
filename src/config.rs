//! Runtime configuration: an optional TOML file layered under environment
//! variables.
//!
//! | Key | Env | Default |
//! |---|---|---|
//! | `server.host` | `CATALOG_SERVER__HOST` | `0.0.0.0` |
//! | `server.port` | `CATALOG_SERVER__PORT` | `8000` |
//! | `demo` | `CATALOG_DEMO` | `items` |
//! | `logging.level` | `CATALOG_LOGGING__LEVEL` | `info` |
//! | `logging.json` | `CATALOG_LOGGING__JSON` | `false` |
//!
//! The file path comes from `CATALOG_CONFIG` and defaults to `catalog.toml`;
//! a missing file is not an error.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;
use crate::routes::Demo;

const ENV_PREFIX: &str = "CATALOG";
const DEFAULT_CONFIG_PATH: &str = "catalog.toml";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub demo: Demo,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_owned(), port: 8000 }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, Error> {
        let ip: IpAddr = self.host.parse()
            .map_err(|_| Error::Address(format!("{}:{}", self.host, self.port)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), json: false }
    }
}

impl AppConfig {
    /// Loads from `$CATALOG_CONFIG` (or `catalog.toml`) plus `CATALOG_*`
    /// environment variables.
    pub fn load() -> Result<Self, Error> {
        let path = env::var("CATALOG_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from(&path, ENV_PREFIX)
    }

    /// Loads from `path`, if it exists, overridden by variables named
    /// `{prefix}_SECTION__KEY`.
    pub fn load_from(path: &Path, prefix: &str) -> Result<Self, Error> {
        let mut builder = config::Config::builder();

        if path.exists() {
            builder = builder.add_source(config::File::from(path.to_path_buf()));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: Self = builder.build()?.try_deserialize()?;
        if config.logging.level.trim().is_empty() {
            config.logging.level = LoggingConfig::default().level;
        }
        Ok(config)
    }
}
