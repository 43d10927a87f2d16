use std::path::PathBuf;

use thiserror::Error;

use crate::parser::traits::ParseError;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ProcessError {
    ProcessError::Io {
        path: path.into(),
        source,
    }
}
