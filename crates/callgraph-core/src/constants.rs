//! Shared constants for the callgraph engine.

/// Name of the compilation database expected in the project root.
pub const COMPILE_COMMANDS_FILE: &str = "compile_commands.json";

/// Name of the project-level config file.
pub const PROJECT_CONFIG_FILE: &str = "callgraph.toml";

/// Default number of ingestion workers.
pub const DEFAULT_WORKERS: usize = 10;

/// Upper bound on ingestion workers.
pub const MAX_WORKERS: usize = 64;

/// Default cap on call paths reported per query.
pub const DEFAULT_MAX_CALL_PATHS: usize = 300;

/// Default depth for following quoted `#include` directives.
pub const DEFAULT_MAX_INCLUDE_DEPTH: u32 = 8;

/// Upper bound on include-following depth.
pub const MAX_INCLUDE_DEPTH: u32 = 64;

/// Default tracing filter when `CALLGRAPH_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "callgraph=info";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "CALLGRAPH_LOG";

// ---- Process exit codes ----

/// Configuration, compilation database, or resource-cap failure.
pub const EXIT_FAILURE: i32 = 1;

/// Internal invariant violated: a referenced symbol is missing from the graph.
pub const EXIT_INTERNAL_BUG: i32 = 100;
