//! Scoped revive/suspend pairing for parsed units.

use std::ops::Deref;

use callgraph_core::errors::ParseError;

use super::traits::SourceAnalyzer;

/// A unit revived for the lifetime of this guard; suspended again on drop.
pub struct RevivedUnit<'a, A: SourceAnalyzer> {
    analyzer: &'a A,
    unit: &'a mut A::Unit,
}

impl<'a, A: SourceAnalyzer> RevivedUnit<'a, A> {
    pub fn revive(analyzer: &'a A, unit: &'a mut A::Unit) -> Result<Self, ParseError> {
        analyzer.revive(unit)?;
        Ok(Self { analyzer, unit })
    }
}

impl<A: SourceAnalyzer> Deref for RevivedUnit<'_, A> {
    type Target = A::Unit;

    fn deref(&self) -> &A::Unit {
        &*self.unit
    }
}

impl<A: SourceAnalyzer> Drop for RevivedUnit<'_, A> {
    fn drop(&mut self) {
        self.analyzer.suspend(self.unit);
    }
}
