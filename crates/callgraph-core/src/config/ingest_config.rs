//! Ingestion configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_INCLUDE_DEPTH, DEFAULT_WORKERS};

/// Configuration for the parallel ingestion phase.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IngestConfig {
    /// Worker pool size. Default: 10.
    pub workers: Option<usize>,
    /// Follow quoted `#include` directives when indexing declarations. Default: true.
    pub follow_includes: Option<bool>,
    /// Maximum nesting depth for followed includes. Default: 8.
    pub max_include_depth: Option<u32>,
}

impl IngestConfig {
    /// Returns the effective worker pool size, defaulting to 10.
    pub fn effective_workers(&self) -> usize {
        self.workers.unwrap_or(DEFAULT_WORKERS)
    }

    /// Returns whether includes are followed, defaulting to true.
    pub fn effective_follow_includes(&self) -> bool {
        self.follow_includes.unwrap_or(true)
    }

    /// Returns the effective include depth, defaulting to 8.
    pub fn effective_max_include_depth(&self) -> u32 {
        self.max_include_depth.unwrap_or(DEFAULT_MAX_INCLUDE_DEPTH)
    }
}
