//! Top-level error and process exit code mapping.

use super::error_code::{self, ErrorCode};
use super::{CallGraphError, CompdbError, ConfigError, ParseError, QueryError};
use crate::constants::{EXIT_FAILURE, EXIT_INTERNAL_BUG};

/// Errors that can escape a full run (load, ingest, merge, query loop).
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Compilation database error: {0}")]
    Compdb(#[from] CompdbError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Call graph error: {0}")]
    CallGraph(#[from] CallGraphError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CallGraph(e) if e.is_internal() => EXIT_INTERNAL_BUG,
            _ => EXIT_FAILURE,
        }
    }
}

impl ErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Compdb(e) => e.error_code(),
            Self::Parse(e) => e.error_code(),
            Self::CallGraph(e) => e.error_code(),
            Self::Query(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Io(_) => error_code::IO_ERROR,
        }
    }
}
