//! ErrorCode trait: stable, machine-readable codes for every error enum.

/// Every error enum implements this to expose a structured code string,
/// used in log fields and in the `[CODE] message` form printed by the CLI.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "PARSE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const COMPDB_NOT_FOUND: &str = "COMPDB_NOT_FOUND";
pub const COMPDB_ERROR: &str = "COMPDB_ERROR";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const UNIT_SUSPENDED: &str = "UNIT_SUSPENDED";
pub const CALL_GRAPH_ERROR: &str = "CALL_GRAPH_ERROR";
pub const MISSING_SYMBOL: &str = "MISSING_SYMBOL";
pub const PATH_LIMIT_EXCEEDED: &str = "PATH_LIMIT_EXCEEDED";
pub const QUERY_ERROR: &str = "QUERY_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const IO_ERROR: &str = "IO_ERROR";
