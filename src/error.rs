//! Stream-level failures. Per-record and per-field problems never surface here.

use std::path::PathBuf;

/// Errors that make a whole session unreadable.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to open log {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read log stream: {0}")]
    Read(#[from] std::io::Error),
}
