//! Graph merger: folds per-worker stores into one global store.

use callgraph_core::tracing::metrics;
use serde::{Deserialize, Serialize};

use super::ingest::{IngestionResult, ProcessedUnit, UnitFailure};
use super::store::EntityStore;

/// Merge bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// Entities absent from the global store, moved in unchanged.
    pub entities_moved: usize,
    /// Entities already present whose edge sets were unioned.
    pub entities_unioned: usize,
    /// Unioned entities whose display name differed; the first one is kept.
    pub display_name_conflicts: usize,
}

/// The global graph plus every unit kept for queries, in worker order.
#[derive(Debug)]
pub struct MergedGraph<U> {
    pub store: EntityStore,
    pub units: Vec<ProcessedUnit<U>>,
    pub failures: Vec<UnitFailure>,
    pub stats: MergeStats,
}

/// Merge worker results in order. Worker 0's store becomes the global store;
/// every later store is drained into it.
pub fn merge<U>(results: Vec<IngestionResult<U>>) -> MergedGraph<U> {
    let mut results = results.into_iter();
    let mut graph = MergedGraph {
        store: EntityStore::new(),
        units: Vec::new(),
        failures: Vec::new(),
        stats: MergeStats::default(),
    };

    if let Some(first) = results.next() {
        graph.stats.entities_moved += first.store.len();
        graph.store = first.store;
        graph.units.extend(first.units);
        graph.failures.extend(first.failures);
    }

    for mut result in results {
        merge_into(&mut graph.store, &mut result.store, &mut graph.stats);
        graph.units.extend(result.units);
        graph.failures.extend(result.failures);
    }

    let stats = graph.store.stats();
    tracing::info!(
        functions = stats.functions,
        edges = stats.edges,
        roots = stats.roots,
        { metrics::ENTITIES_MOVED } = graph.stats.entities_moved,
        { metrics::ENTITIES_UNIONED } = graph.stats.entities_unioned,
        { metrics::DISPLAY_NAME_CONFLICTS } = graph.stats.display_name_conflicts,
        "merged call graph"
    );
    graph
}

/// Drain `other` into `global`, unioning edge sets of shared symbols.
pub fn merge_into(global: &mut EntityStore, other: &mut EntityStore, stats: &mut MergeStats) {
    for entity in other.drain() {
        match global.entry_mut(entity.symbol_id.as_str()) {
            Some(existing) => {
                if existing.display_name != entity.display_name {
                    tracing::debug!(
                        symbol = %entity.symbol_id,
                        kept = %existing.display_name,
                        dropped = %entity.display_name,
                        "display name conflict"
                    );
                    stats.display_name_conflicts += 1;
                }
                existing.calls.union(&entity.calls);
                existing.callers.union(&entity.callers);
                stats.entities_unioned += 1;
            }
            None => {
                global.insert(entity);
                stats.entities_moved += 1;
            }
        }
    }
}
