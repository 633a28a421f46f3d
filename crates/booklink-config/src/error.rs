use std::{io, path::PathBuf};

use thiserror::Error;

/// Error type for booklink-config operations
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Failed to read config file {path}: {source}")]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to parse JSON config from {path}: {source}")]
  Json {
    path:   PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("Failed to parse TOML config from {path}: {source}")]
  Toml {
    path:   PathBuf,
    #[source]
    source: toml::de::Error,
  },
}
