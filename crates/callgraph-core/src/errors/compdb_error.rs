//! Compilation database errors.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};

/// Errors that can occur while loading `compile_commands.json`.
#[derive(Debug, thiserror::Error)]
pub enum CompdbError {
    #[error("Failed to load compilation database from '{root}' (is compile_commands.json present?)")]
    NotFound { root: PathBuf },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed compilation database {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("Invalid compile command #{index}: {message}")]
    InvalidEntry { index: usize, message: String },
}

impl ErrorCode for CompdbError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::COMPDB_NOT_FOUND,
            _ => error_code::COMPDB_ERROR,
        }
    }
}
