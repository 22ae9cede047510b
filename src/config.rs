//! Runtime configuration
//!
//! Defaults, overridden from the environment:
//! - `SQUARES_STORE`: path of the native JSON store
//! - `SQUARES_NAMESPACE`: prefix for the session slot keys
//! - `SQUARES_LOG`: log level (`error`..`trace`)

use std::path::PathBuf;

use log::LevelFilter;

use crate::session::SessionKeys;

/// Default store file, relative to the working directory
pub const DEFAULT_STORE_PATH: &str = "squares.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Where the native build keeps its slots
    pub store_path: PathBuf,
    /// Optional key prefix, lets several games share one store
    pub namespace: Option<String>,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            namespace: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Defaults plus whatever the process environment sets
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults plus overrides from `lookup`. Unparseable values are
    /// ignored with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("SQUARES_STORE").filter(|p| !p.trim().is_empty()) {
            config.store_path = PathBuf::from(path);
        }

        config.namespace = lookup("SQUARES_NAMESPACE")
            .map(|ns| ns.trim().to_string())
            .filter(|ns| !ns.is_empty());

        if let Some(level) = lookup("SQUARES_LOG") {
            match level.trim().parse::<LevelFilter>() {
                Ok(level) => config.log_level = level,
                Err(_) => log::warn!("Ignoring unknown log level {:?}", level),
            }
        }

        config
    }

    /// Slot keys for this configuration
    pub fn session_keys(&self) -> SessionKeys {
        SessionKeys::namespaced(self.namespace.as_deref())
    }
}
