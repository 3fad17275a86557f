//! Backward path enumeration from a function to the roots that reach it.

use callgraph_core::errors::CallGraphError;
use callgraph_core::types::{FxHashSet, SymbolId};

use crate::call_graph::{EntityStore, FunctionEntity};

/// Symbol ids from a root (no callers) down to the queried function.
pub type CallPath = Vec<SymbolId>;

/// Enumerate call paths from roots to `target`, walking `callers` depth-first.
///
/// One visited set covers the whole invocation, so a function already reached
/// through one branch ends any later branch that reaches it again. Each root
/// therefore appears in at most one path, and cycles terminate. Producing more
/// than `limit` paths is an error.
pub fn find_call_paths(
    store: &EntityStore,
    target: &str,
    limit: usize,
) -> Result<Vec<CallPath>, CallGraphError> {
    let start = store.get(target, "call path target")?;

    let mut paths = Vec::new();
    let mut visited: FxHashSet<&str> = FxHashSet::default();
    visited.insert(start.symbol_id.as_str());

    // Each frame is an entity on the current walk and the next caller to try.
    let mut stack: Vec<(&FunctionEntity, usize)> = vec![(start, 0)];
    if start.is_root() {
        emit(&stack, &mut paths, limit)?;
    }

    while let Some((entity, next)) = stack.last_mut() {
        let entity = *entity;
        let Some(caller_id) = entity.callers.as_slice().get(*next) else {
            stack.pop();
            continue;
        };
        *next += 1;

        if !visited.insert(caller_id.as_str()) {
            continue;
        }
        let caller = store.get(caller_id.as_str(), "call path")?;
        stack.push((caller, 0));
        if caller.is_root() {
            emit(&stack, &mut paths, limit)?;
        }
    }

    Ok(paths)
}

fn emit(
    stack: &[(&FunctionEntity, usize)],
    paths: &mut Vec<CallPath>,
    limit: usize,
) -> Result<(), CallGraphError> {
    if paths.len() >= limit {
        return Err(CallGraphError::PathLimitExceeded { limit });
    }
    paths.push(
        stack
            .iter()
            .rev()
            .map(|(entity, _)| entity.symbol_id.clone())
            .collect(),
    );
    Ok(())
}
