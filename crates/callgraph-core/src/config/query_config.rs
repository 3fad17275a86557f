//! Query configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MAX_CALL_PATHS;

/// Configuration for the interactive query layer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QueryConfig {
    /// Hard cap on call paths per query. Default: 300.
    pub max_call_paths: Option<usize>,
    /// Print every callee regardless of the filter. Default: false.
    pub show_all: Option<bool>,
    /// Substring a display name must contain to be printed in the call graph.
    /// Default: the project root as given on the command line.
    pub filter: Option<String>,
}

impl QueryConfig {
    /// Returns the effective path cap, defaulting to 300.
    pub fn effective_max_call_paths(&self) -> usize {
        self.max_call_paths.unwrap_or(DEFAULT_MAX_CALL_PATHS)
    }

    /// Returns whether the filter is bypassed, defaulting to false.
    pub fn effective_show_all(&self) -> bool {
        self.show_all.unwrap_or(false)
    }

    /// Returns the configured filter, or `project_root` when none is set.
    pub fn effective_filter(&self, project_root: &str) -> String {
        self.filter
            .clone()
            .unwrap_or_else(|| project_root.to_string())
    }
}
