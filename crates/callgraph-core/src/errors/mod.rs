//! Error handling for callgraph.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod call_graph_error;
pub mod compdb_error;
pub mod config_error;
pub mod error_code;
pub mod parse_error;
pub mod pipeline_error;
pub mod query_error;

pub use call_graph_error::CallGraphError;
pub use compdb_error::CompdbError;
pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use parse_error::ParseError;
pub use pipeline_error::PipelineError;
pub use query_error::QueryError;
