//! Error types for h.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Model '{model}' does not exist, choose one from:\n{choices}")]
    UnknownModel { model: String, choices: String },

    #[error("Filesystem error at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Expected file \"{}\" to contain a JSON-encoded conversation with GPT.",
        path.display()
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to launch editor '{editor}'")]
    EditorSpawn {
        editor: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Editor exited with code: {0}")]
    EditorExit(String),

    #[error("{0}")]
    Remote(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
