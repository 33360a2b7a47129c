//! Runtime configuration.

use std::path::PathBuf;

use crate::product::contract;

/// Settings for running the inventory daemon.
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | `INVENTORY_DATA_DIR` | `./data` | Directory holding the table file |
/// | `INVENTORY_HTTP_ADDR` | `127.0.0.1:3000` | Address the HTTP transport binds |
/// | `INVENTORY_LOG` | `info` | Log filter used when `RUST_LOG` is unset |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub http_addr: String,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            http_addr: "127.0.0.1:3000".into(),
            log_filter: "info".into(),
        }
    }
}

impl Config {
    /// Load from the environment, falling back to defaults for unset variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            data_dir: lookup("INVENTORY_DATA_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            http_addr: lookup("INVENTORY_HTTP_ADDR")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.http_addr),
            log_filter: lookup("INVENTORY_LOG")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.log_filter),
        }
    }

    /// Override the data directory and bind address, keeping the rest.
    ///
    /// Mostly used by tests.
    pub fn with_overrides(data_dir: impl Into<PathBuf>, http_addr: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            http_addr: http_addr.into(),
            ..Self::from_env()
        }
    }

    /// Path of the products table file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(contract::DATABASE_NAME)
    }
}
