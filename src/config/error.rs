use std::path::PathBuf;
use thiserror::Error;

/// Failure to read a worker environment file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' is {size} bytes, exceeds limit of {limit} bytes", path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("'{}' is a symlink, refusing to follow", path.display())]
    Symlink { path: PathBuf },

    #[error("failed to parse '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("failed to parse '{}': {source}", path.display())]
    Dotenv {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

impl ConfigError {
    pub(crate) fn parse(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
