//! Values handed across the `SourceAnalyzer` seam.

use callgraph_core::types::SymbolId;
use serde::{Deserialize, Serialize};

/// What a cursor points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorKind {
    /// A function definition (has a body).
    Definition,
    /// A prototype or in-class method declaration.
    Declaration,
    /// A callee name at a call site.
    Reference,
}

/// A resolved reference to a function inside a parsed unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub symbol_id: SymbolId,
    /// Human-readable name, e.g. `parse(const char*, int)`.
    pub name: String,
    /// File the entity is spelled in.
    pub file: String,
    /// 1-based line of the function name.
    pub line: u32,
    /// 1-based column of the function name.
    pub column: u32,
    pub kind: CursorKind,
}

impl Cursor {
    pub fn symbol_id(&self) -> &SymbolId {
        &self.symbol_id
    }

    /// `(name, file, line)` used to build a display name.
    pub fn display_info(&self) -> (&str, &str, u32) {
        (&self.name, &self.file, self.line)
    }

    /// `<name>:<file>:<line>`.
    pub fn display_name(&self) -> String {
        let (name, file, line) = self.display_info();
        format!("{name}:{file}:{line}")
    }
}

/// One call expression: the function containing it and the function it calls.
/// Either side is `None` when the adapter could not resolve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallPair {
    pub caller: Option<Cursor>,
    pub callee: Option<Cursor>,
}

impl CallPair {
    /// Both endpoints, if both resolved.
    pub fn resolved(&self) -> Option<(&Cursor, &Cursor)> {
        Some((self.caller.as_ref()?, self.callee.as_ref()?))
    }
}

/// Whether a unit currently holds its parsed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitLifecycle {
    Active,
    Suspended,
}
