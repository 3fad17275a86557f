//! Parallel ingestion: static shards of compile commands, one worker each.

use std::ops::Range;
use std::time::Instant;

use callgraph_core::errors::{CallGraphError, ParseError};
use callgraph_core::tracing::metrics;
use callgraph_core::types::UnitId;
use rayon::prelude::*;

use super::store::EntityStore;
use crate::compdb::CompileCommand;
use crate::parsers::SourceAnalyzer;

/// A successfully ingested unit, kept (suspended) for later queries.
#[derive(Debug)]
pub struct ProcessedUnit<U> {
    /// The command's `file`, as written in the compilation database.
    pub file_name: String,
    pub unit: U,
}

/// A unit that could not be ingested. Non-fatal.
#[derive(Debug)]
pub struct UnitFailure {
    pub file_name: String,
    pub error: ParseError,
}

/// Everything one worker produced.
#[derive(Debug)]
pub struct IngestionResult<U> {
    pub worker: usize,
    pub store: EntityStore,
    pub units: Vec<ProcessedUnit<U>>,
    pub failures: Vec<UnitFailure>,
    /// Call expressions whose caller or callee did not resolve.
    pub calls_skipped: usize,
}

/// Split `total` commands into at most `pool_size` contiguous shards of
/// `ceil(total / pool_size)` commands each. Empty shards are not produced.
pub fn shard_ranges(total: usize, pool_size: usize) -> Vec<Range<usize>> {
    if total == 0 {
        return Vec::new();
    }
    let shard_size = total.div_ceil(pool_size.max(1));
    (0..total)
        .step_by(shard_size)
        .map(|start| start..(start + shard_size).min(total))
        .collect()
}

/// Ingest every command on a pool of `pool_size` workers and wait for all of
/// them. Results are returned in shard order.
pub fn ingest<A: SourceAnalyzer>(
    analyzer: &A,
    commands: &[CompileCommand],
    pool_size: usize,
) -> Result<Vec<IngestionResult<A::Unit>>, CallGraphError> {
    let shards = shard_ranges(commands.len(), pool_size);
    if shards.is_empty() {
        tracing::warn!("compilation database has no commands");
        return Ok(Vec::new());
    }

    let start = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(shards.len())
        .thread_name(|i| format!("callgraph-ingest-{i}"))
        .build()
        .map_err(|e| CallGraphError::WorkerPool {
            message: e.to_string(),
        })?;

    tracing::info!(
        { metrics::COMMANDS_TOTAL } = commands.len(),
        { metrics::WORKERS_SPAWNED } = shards.len(),
        "starting ingestion"
    );

    let results: Vec<IngestionResult<A::Unit>> = pool.install(|| {
        shards
            .par_iter()
            .enumerate()
            .map(|(worker, range)| run_worker(analyzer, worker, commands, range.clone()))
            .collect()
    });

    let parsed: usize = results.iter().map(|r| r.units.len()).sum();
    let failed: usize = results.iter().map(|r| r.failures.len()).sum();
    tracing::info!(
        { metrics::UNITS_PARSED } = parsed,
        { metrics::UNITS_FAILED } = failed,
        { metrics::CALL_GRAPH_BUILD_TIME } = start.elapsed().as_millis() as u64,
        "ingestion finished"
    );
    Ok(results)
}

/// Process one shard into a private store.
pub fn run_worker<A: SourceAnalyzer>(
    analyzer: &A,
    worker: usize,
    commands: &[CompileCommand],
    range: Range<usize>,
) -> IngestionResult<A::Unit> {
    let mut result = IngestionResult {
        worker,
        store: EntityStore::new(),
        units: Vec::with_capacity(range.len()),
        failures: Vec::new(),
        calls_skipped: 0,
    };

    for index in range {
        let command = &commands[index];
        let id = UnitId::new(index);

        let mut unit = match analyzer.parse(id, command) {
            Ok(unit) => unit,
            Err(error) => {
                tracing::warn!(worker, file = %command.file, error = %error, "failed to parse unit");
                result.failures.push(UnitFailure {
                    file_name: command.file.clone(),
                    error,
                });
                continue;
            }
        };

        let pairs = match analyzer.visit_calls(&unit) {
            Ok(pairs) => pairs,
            Err(error) => {
                tracing::warn!(worker, file = %command.file, error = %error, "failed to visit calls");
                result.failures.push(UnitFailure {
                    file_name: command.file.clone(),
                    error,
                });
                continue;
            }
        };

        let mut edges = 0usize;
        for pair in &pairs {
            match pair.resolved() {
                Some((caller, callee)) => {
                    if result.store.add_call(caller, callee, id) {
                        edges += 1;
                    }
                }
                None => result.calls_skipped += 1,
            }
        }

        analyzer.suspend(&mut unit);
        tracing::info!(worker, file = %command.file, calls = pairs.len(), new_edges = edges, "done");
        result.units.push(ProcessedUnit {
            file_name: command.file.clone(),
            unit,
        });
    }
    result
}
