//! Query errors. All of these are recovered by the query loop.

use super::error_code::{self, ErrorCode};
use super::ParseError;

/// Errors from a single interactive query.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Please specify a function definition: <filename>:<line number>:<column number>")]
    Malformed { input: String },

    #[error("failed to map '{pattern}' to a file in the project")]
    UnmappedFile { pattern: String },

    #[error("failed to map {file}:{line}:{column} to a function definition")]
    NoDefinition {
        file: String,
        line: u32,
        column: u32,
    },

    #[error("can't handle an empty symbol id")]
    EmptySymbol,

    #[error("failed to revive '{file}': {source}")]
    Revive { file: String, source: ParseError },
}

impl ErrorCode for QueryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Revive { source, .. } => source.error_code(),
            _ => error_code::QUERY_ERROR,
        }
    }
}
