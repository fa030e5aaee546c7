//! Error types for geneprop

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the graph model, the loaders and the algorithms
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied argument is outside its valid domain
    /// (empty seed list for RWR, restart outside (0,1), `k == 0`, ...)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// File could not be opened or read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Reading from an already-open source failed
    #[error("read error: {0}")]
    Read(#[from] std::io::Error),

    /// Malformed network or seed file
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },
}

impl Error {
    /// Shorthand for [`Error::InvalidArgument`]
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
