use std::io;
use std::path::PathBuf;

/// Errors that can occur while resolving and running a lint gate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No version-control root found above {}", anchor.display())]
    RootNotFound { anchor: PathBuf },

    #[error("Git error: {0}")]
    GitError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to launch `{program}`: {source}")]
    SpawnError {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for lintgate operations
pub type Result<T> = std::result::Result<T, Error>;
