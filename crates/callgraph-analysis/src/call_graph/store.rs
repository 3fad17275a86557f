//! The entity store: every known function, keyed by symbol id.

use callgraph_core::errors::CallGraphError;
use callgraph_core::types::{FxHashMap, SymbolId, UnitId};

use super::types::{CallGraphStats, FunctionEntity};
use crate::parsers::Cursor;

/// Owns every `FunctionEntity`; never holds two entities for one symbol id.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entities: FxHashMap<SymbolId, FunctionEntity>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The entity for `cursor`'s symbol, created with empty edge sets and a
    /// display name from `cursor` if this is the first sighting.
    pub fn get_or_create(&mut self, cursor: &Cursor, unit: UnitId) -> &mut FunctionEntity {
        self.entities
            .entry(cursor.symbol_id.clone())
            .or_insert_with(|| {
                FunctionEntity::new(cursor.symbol_id.clone(), cursor.display_name(), unit)
            })
    }

    /// Record `caller → callee` in both edge sets, creating either endpoint as
    /// needed. Returns true if the edge was new.
    pub fn add_call(&mut self, caller: &Cursor, callee: &Cursor, unit: UnitId) -> bool {
        let caller_id = self.get_or_create(caller, unit).symbol_id.clone();
        let callee_id = self.get_or_create(callee, unit).symbol_id.clone();

        let added = self
            .entities
            .get_mut(&caller_id)
            .is_some_and(|e| e.calls.insert(callee_id.clone()));
        if let Some(callee) = self.entities.get_mut(&callee_id) {
            callee.callers.insert(caller_id);
        }
        added
    }

    pub fn find(&self, symbol: &str) -> Option<&FunctionEntity> {
        self.entities.get(symbol)
    }

    /// Lookup for traversals: a missing symbol means the store is corrupt.
    pub fn get(&self, symbol: &str, context: &'static str) -> Result<&FunctionEntity, CallGraphError> {
        self.entities
            .get(symbol)
            .ok_or_else(|| CallGraphError::MissingSymbol {
                symbol: symbol.to_string(),
                context,
            })
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entities.contains_key(symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FunctionEntity> {
        self.entities.values()
    }

    pub(crate) fn entry_mut(&mut self, symbol: &str) -> Option<&mut FunctionEntity> {
        self.entities.get_mut(symbol)
    }

    pub(crate) fn insert(&mut self, entity: FunctionEntity) {
        self.entities.insert(entity.symbol_id.clone(), entity);
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = FunctionEntity> + '_ {
        self.entities.drain().map(|(_, entity)| entity)
    }

    /// Check that every referenced id exists and every edge is recorded on
    /// both ends. Reports the first violation.
    pub fn verify_integrity(&self) -> Result<(), CallGraphError> {
        for entity in self.entities.values() {
            for callee in entity.calls.iter() {
                let target = self.get(callee.as_str(), "calls")?;
                if !target.callers.contains(entity.symbol_id.as_str()) {
                    return Err(CallGraphError::AsymmetricEdge {
                        caller: entity.symbol_id.to_string(),
                        callee: callee.to_string(),
                        message: "callee does not list caller",
                    });
                }
            }
            for caller in entity.callers.iter() {
                let source = self.get(caller.as_str(), "callers")?;
                if !source.calls.contains(entity.symbol_id.as_str()) {
                    return Err(CallGraphError::AsymmetricEdge {
                        caller: caller.to_string(),
                        callee: entity.symbol_id.to_string(),
                        message: "caller does not list callee",
                    });
                }
            }
        }
        Ok(())
    }

    pub fn stats(&self) -> CallGraphStats {
        let mut stats = CallGraphStats {
            functions: self.entities.len(),
            ..Default::default()
        };
        for entity in self.entities.values() {
            stats.edges += entity.calls.len();
            if entity.callers.is_empty() {
                stats.roots += 1;
            }
            if entity.calls.is_empty() {
                stats.leaves += 1;
            }
        }
        stats
    }
}
