//! YAML configuration loader.
//!
//! ```yaml
//! allowed_origins: ["https://app.example.com"]
//! allowed_origin_patterns: ['^https://[a-z]+\.example\.com$']
//! supports_credentials: true
//! allowed_methods: [get, post]
//! allowed_headers: ["*"]
//! exposed_headers: [X-Request-Id]
//! max_age: 600
//! ```

use crate::cors::Cors;
use crate::options::{CorsOptions, ValidationError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read CORS configuration from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid CORS configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub fn load_from_file(path: impl AsRef<Path>) -> Result<Cors, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

pub fn load_from_str(contents: &str) -> Result<Cors, ConfigError> {
    let options: CorsOptions = serde_yaml::from_str(contents)?;
    Ok(Cors::new(options)?)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
