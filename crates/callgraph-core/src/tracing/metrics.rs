//! Structured field names used in tracing events across callgraph.
//!
//! Keeping them in one place keeps log queries stable.

/// Ingestion: number of compilation commands loaded.
pub const COMMANDS_TOTAL: &str = "commands_total";

/// Ingestion: units parsed and traversed successfully.
pub const UNITS_PARSED: &str = "units_parsed";

/// Ingestion: units skipped after a parse failure.
pub const UNITS_FAILED: &str = "units_failed";

/// Ingestion: worker count actually spawned.
pub const WORKERS_SPAWNED: &str = "workers_spawned";

/// Call Graph: graph construction time in milliseconds.
pub const CALL_GRAPH_BUILD_TIME: &str = "call_graph_build_time";

/// Merge: entities moved unchanged into the global store.
pub const ENTITIES_MOVED: &str = "entities_moved";

/// Merge: entities whose edge sets were unioned into an existing entity.
pub const ENTITIES_UNIONED: &str = "entities_unioned";

/// Merge: same symbol observed with a different display name.
pub const DISPLAY_NAME_CONFLICTS: &str = "display_name_conflicts";

/// Query: number of call paths produced.
pub const CALL_PATHS_FOUND: &str = "call_paths_found";
