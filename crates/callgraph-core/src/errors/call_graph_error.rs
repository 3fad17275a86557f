//! Call graph errors.

use super::error_code::{self, ErrorCode};

/// Errors that can occur while building or traversing the call graph.
#[derive(Debug, thiserror::Error)]
pub enum CallGraphError {
    /// A symbol referenced from an edge set or a path has no entity.
    #[error("BUG: reference to non-existent symbol {symbol} ({context})")]
    MissingSymbol { symbol: String, context: &'static str },

    /// Edge sets disagree between caller and callee.
    #[error("BUG: asymmetric edge {caller} -> {callee}: {message}")]
    AsymmetricEdge {
        caller: String,
        callee: String,
        message: &'static str,
    },

    #[error("call path too deep (can only handle up to {limit} paths)")]
    PathLimitExceeded { limit: usize },

    #[error("Failed to start ingestion workers: {message}")]
    WorkerPool { message: String },
}

impl CallGraphError {
    /// True for failures that indicate a defect rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::MissingSymbol { .. } | Self::AsymmetricEdge { .. })
    }
}

impl ErrorCode for CallGraphError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingSymbol { .. } | Self::AsymmetricEdge { .. } => error_code::MISSING_SYMBOL,
            Self::PathLimitExceeded { .. } => error_code::PATH_LIMIT_EXCEEDED,
            Self::WorkerPool { .. } => error_code::CALL_GRAPH_ERROR,
        }
    }
}
