//! Configuration system for callgraph.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod callgraph_config;
pub mod ingest_config;
pub mod query_config;

pub use callgraph_config::{CallgraphConfig, CliOverrides};
pub use ingest_config::IngestConfig;
pub use query_config::QueryConfig;
