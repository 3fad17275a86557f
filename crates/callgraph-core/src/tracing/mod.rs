//! Observability for callgraph.
//! `tracing` crate with `EnvFilter`, per-crate log levels, output on stderr.

pub mod metrics;
pub mod setup;

pub use setup::init_tracing;
