//! Error types for content loading and remote fetching

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading content collections
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("content directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("failed to parse front-matter in {}: {message}", .file.display())]
    Parse { file: PathBuf, message: String },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised by the repository fetcher
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("{url} returned {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("malformed response body: {0}")]
    Decode(#[source] reqwest::Error),
}
