//! The seam the call graph engine parses C and C++ through.

use callgraph_core::errors::ParseError;
use callgraph_core::types::UnitId;

use super::types::{CallPair, Cursor, UnitLifecycle};
use crate::compdb::CompileCommand;

/// Parses compilation units and resolves function references inside them.
///
/// A unit is produced `Active`. `suspend` releases its parsed state but keeps
/// the handle, `revive` restores it. Cursor-producing methods require an
/// `Active` unit and fail with `ParseError::UnitSuspended` otherwise.
pub trait SourceAnalyzer: Send + Sync {
    /// Per-unit handle. Moved between threads, never shared.
    type Unit: Send;

    /// Parse one compilation command.
    fn parse(&self, id: UnitId, command: &CompileCommand) -> Result<Self::Unit, ParseError>;

    /// Every call expression in the unit, in source order.
    fn visit_calls(&self, unit: &Self::Unit) -> Result<Vec<CallPair>, ParseError>;

    /// The cursor at a 1-based `line`/`column` in `file`, if any.
    fn resolve_location(
        &self,
        unit: &Self::Unit,
        file: &str,
        line: u32,
        column: u32,
    ) -> Result<Option<Cursor>, ParseError>;

    /// The definition `cursor` refers to, if the unit can see one.
    fn definition_of(&self, unit: &Self::Unit, cursor: &Cursor) -> Option<Cursor>;

    fn suspend(&self, unit: &mut Self::Unit);

    fn revive(&self, unit: &mut Self::Unit) -> Result<(), ParseError>;

    fn lifecycle(&self, unit: &Self::Unit) -> UnitLifecycle;
}
