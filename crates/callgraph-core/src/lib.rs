//! callgraph-core: shared foundations for the callgraph engine.
//!
//! - `config`: layered TOML configuration (CLI > env > project > user > defaults)
//! - `errors`: one `thiserror` enum per subsystem, aggregated by `PipelineError`
//! - `tracing`: subscriber setup and standard field names
//! - `types`: symbol and unit identifiers, collection aliases

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::CallgraphConfig;
pub use errors::{ErrorCode, PipelineError};
pub use types::{SymbolId, UnitId};
