use std::path::PathBuf;

use thiserror::Error;

use crate::models::PageTarget;

/// Why a single page request failed.
#[derive(Debug, Error)]
pub enum FetchCause {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
}

/// A refresh cycle was aborted because one of its pages could not be fetched.
#[derive(Debug, Error)]
#[error("failed to fetch \"{url}\": {cause}")]
pub struct FetchError {
    pub target: PageTarget,
    pub url: String,
    #[source]
    pub cause: FetchCause,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("file operation failed on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for environment variable {key}")]
    Invalid { key: &'static str, value: String },
}
