//! Function entities, their edge sets, and graph statistics.

use callgraph_core::types::collections::SmallVec8;
use callgraph_core::types::{FxHashSet, SymbolId, UnitId};
use serde::{Deserialize, Serialize};

/// Insertion-ordered set of symbol ids. Traversal order follows insertion
/// order, so results are reproducible for a given ingestion order.
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    order: SmallVec8<SymbolId>,
    members: FxHashSet<SymbolId>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `id` unless already present. Returns true if it was added.
    pub fn insert(&mut self, id: SymbolId) -> bool {
        if !self.members.insert(id.clone()) {
            return false;
        }
        self.order.push(id);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[SymbolId] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolId> {
        self.order.iter()
    }

    /// Union `other` into `self`, keeping `self`'s order and appending new ids.
    /// Returns the number of ids added.
    pub fn union(&mut self, other: &EdgeSet) -> usize {
        let mut added = 0;
        for id in other.iter() {
            if self.insert(id.clone()) {
                added += 1;
            }
        }
        added
    }
}

impl PartialEq for EdgeSet {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for EdgeSet {}

impl FromIterator<SymbolId> for EdgeSet {
    fn from_iter<I: IntoIterator<Item = SymbolId>>(iter: I) -> Self {
        let mut set = EdgeSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// A function known to the call graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionEntity {
    pub symbol_id: SymbolId,
    /// `<name>:<file>:<line>`, fixed at first sighting.
    pub display_name: String,
    /// Functions this one calls.
    pub calls: EdgeSet,
    /// Functions that call this one. The transpose of `calls`.
    pub callers: EdgeSet,
    /// Unit the entity was first observed in.
    pub owning_unit: UnitId,
}

impl FunctionEntity {
    pub fn new(symbol_id: SymbolId, display_name: String, owning_unit: UnitId) -> Self {
        Self {
            symbol_id,
            display_name,
            calls: EdgeSet::new(),
            callers: EdgeSet::new(),
            owning_unit,
        }
    }

    /// No known callers: a program entry point or dead code.
    pub fn is_root(&self) -> bool {
        self.callers.is_empty()
    }
}

/// Call graph statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallGraphStats {
    pub functions: usize,
    pub edges: usize,
    pub roots: usize,
    pub leaves: usize,
}
