//! Identifier types and collection aliases.

pub mod collections;
pub mod identifiers;

pub use collections::{FxHashMap, FxHashSet};
pub use identifiers::{SymbolId, UnitId};
