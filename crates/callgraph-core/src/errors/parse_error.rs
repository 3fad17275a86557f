//! Source analysis errors.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};

/// Errors raised by a source analysis adapter for one compilation unit.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Grammar unavailable: {message}")]
    GrammarUnavailable { message: String },

    #[error("Tree-sitter error parsing {path}: {message}")]
    TreeSitterError { path: PathBuf, message: String },

    #[error("Unit {path} is suspended; revive it first")]
    UnitSuspended { path: PathBuf },
}

impl ErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnitSuspended { .. } => error_code::UNIT_SUSPENDED,
            _ => error_code::PARSE_ERROR,
        }
    }
}
