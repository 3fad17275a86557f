//! Call graph engine: entity store, parallel ingestion, merge.
//!
//! Workers each build a private `EntityStore` from a contiguous shard of
//! compile commands; after every worker has joined, the merger folds the
//! stores into one, which is read-only from then on.

pub mod ingest;
pub mod merge;
pub mod store;
pub mod types;

pub use ingest::{ingest, run_worker, shard_ranges, IngestionResult, ProcessedUnit, UnitFailure};
pub use merge::{merge, merge_into, MergeStats, MergedGraph};
pub use store::EntityStore;
pub use types::{CallGraphStats, EdgeSet, FunctionEntity};
