use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

/// Connection settings for the remote blob-storage service.
///
/// Loaded once before the first operation and treated as immutable
/// afterwards; components receive it by value at construction instead of
/// reading shared state.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base URL of the remote service
    pub sds_url: Url,
    /// API key sent with every request
    pub api_key: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("base URL cannot carry path segments: {0}")]
    BaseUrl(Url),

    #[error("API key is not a valid header value")]
    ApiKey(#[from] reqwest::header::InvalidHeaderValue),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl Config {
    /// Load the configuration from a JSON file.
    ///
    /// A missing or malformed file is fatal to the caller; nothing in the
    /// gateway works without a remote endpoint and key.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config =
            serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Check that the base URL can be extended with path segments.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sds_url.cannot_be_a_base() {
            return Err(ConfigError::BaseUrl(self.sds_url.clone()));
        }
        Ok(())
    }
}
