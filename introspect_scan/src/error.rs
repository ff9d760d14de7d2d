// Error type for the introspection scan.
//
// Every failure is terminal for the run: the scan is a one-shot batch and
// never retries. I/O variants carry the offending path so the CLI can say
// which sector could not be read.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a reflection run.
#[derive(Error, Debug)]
pub enum ReflectError {
    #[error("cannot list directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("keyword '{keyword}' is not in the vocabulary")]
    UnknownKeyword { keyword: String },

    #[error("cannot parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("cannot write report: {0}")]
    Render(#[source] io::Error),
}

impl ReflectError {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        ReflectError::InvalidConfig {
            message: message.into(),
        }
    }
}
