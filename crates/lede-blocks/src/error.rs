//! Error types for block installation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for reading definitions and placing blocks.
#[derive(Debug, Error)]
pub enum InstallError {
    /// A definitions directory or file could not be read.
    #[error("failed to read block definitions at {path}: {source}")]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A definition file was not valid YAML for a block definition.
    #[error("invalid block definition {path}: {source}")]
    Parse {
        /// The offending file.
        path: PathBuf,
        /// The underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The block store rejected a placement.
    #[error("failed to save block `{id}`: {message}")]
    Store {
        /// Id of the placement that failed.
        id: String,
        /// Store-provided description of the failure.
        message: String,
    },
}
