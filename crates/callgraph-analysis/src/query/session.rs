//! The query loop over a merged graph.

use std::io::{BufRead, Write};

use callgraph_core::config::QueryConfig;
use callgraph_core::errors::{ErrorCode, PipelineError, QueryError};
use callgraph_core::tracing::metrics;
use callgraph_core::types::SymbolId;

use super::input::{parse_query, Location};
use crate::call_graph::{EntityStore, ProcessedUnit};
use crate::graph::{find_call_paths, print_call_graph};
use crate::parsers::{RevivedUnit, SourceAnalyzer};

const PROMPT: &str = "> ";

/// Output knobs for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Substring a display name must contain to be printed in a call graph.
    pub filter: String,
    pub show_all: bool,
    pub max_call_paths: usize,
}

impl QueryOptions {
    /// Options from config; the filter defaults to `project_root` as given.
    pub fn from_config(config: &QueryConfig, project_root: &str) -> Self {
        Self {
            filter: config.effective_filter(project_root),
            show_all: config.effective_show_all(),
            max_call_paths: config.effective_max_call_paths(),
        }
    }
}

/// Answers location queries against a frozen store.
pub struct QuerySession<'a, A: SourceAnalyzer> {
    analyzer: &'a A,
    store: &'a EntityStore,
    units: &'a mut [ProcessedUnit<A::Unit>],
    options: QueryOptions,
}

impl<'a, A: SourceAnalyzer> QuerySession<'a, A> {
    pub fn new(
        analyzer: &'a A,
        store: &'a EntityStore,
        units: &'a mut [ProcessedUnit<A::Unit>],
        options: QueryOptions,
    ) -> Self {
        Self {
            analyzer,
            store,
            units,
            options,
        }
    }

    /// Prompt, read, answer until end of input. Query errors are printed and
    /// the loop continues; anything else ends the session.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<(), PipelineError> {
        let mut buf = Vec::new();
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                return Ok(());
            }
            let line = String::from_utf8_lossy(&buf);

            match self.answer(&line, out) {
                Ok(()) => {}
                Err(PipelineError::Query(e)) => {
                    tracing::debug!(code = e.error_code(), error = %e, "query not answered");
                    writeln!(out, "{e}")?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Answer one query line.
    pub fn answer<W: Write>(&mut self, line: &str, out: &mut W) -> Result<(), PipelineError> {
        let location = parse_query(line)?;
        let symbol = self.resolve(&location, out)?;
        writeln!(out, "symbol of specified cursor: {symbol}")?;

        let Some(entity) = self.store.find(symbol.as_str()) else {
            writeln!(out, "This function doesn't seem to be used in the project")?;
            return Ok(());
        };

        let paths = find_call_paths(self.store, symbol.as_str(), self.options.max_call_paths)?;
        tracing::debug!(symbol = %symbol, { metrics::CALL_PATHS_FOUND } = paths.len(), "call paths");
        for (n, path) in paths.iter().enumerate() {
            writeln!(out, "----path {}----", n + 1)?;
            for (depth, id) in path.iter().enumerate() {
                let step = self.store.get(id.as_str(), "call path entry")?;
                writeln!(out, "{:width$}{}", "", step.display_name, width = depth * 2)?;
            }
        }

        writeln!(out, "----call graph rooted at {}----", entity.display_name)?;
        print_call_graph(
            self.store,
            symbol.as_str(),
            &self.options.filter,
            self.options.show_all,
            out,
        )
    }

    /// Map a location to the symbol of the function defined there. The unit
    /// is revived only for the duration of this call.
    fn resolve<W: Write>(&mut self, location: &Location, out: &mut W) -> Result<SymbolId, PipelineError> {
        let analyzer = self.analyzer;
        let processed = self
            .units
            .iter_mut()
            .find(|u| u.file_name.contains(location.file.as_str()))
            .ok_or_else(|| QueryError::UnmappedFile {
                pattern: location.file.clone(),
            })?;
        let file_name = processed.file_name.clone();
        writeln!(out, "mapped '{}' to '{}'", location.file, file_name)?;

        let revive_error = |source| QueryError::Revive {
            file: file_name.clone(),
            source,
        };
        let unit = RevivedUnit::revive(analyzer, &mut processed.unit).map_err(revive_error)?;
        let definition = analyzer
            .resolve_location(&unit, &file_name, location.line, location.column)
            .map_err(revive_error)?
            .and_then(|cursor| analyzer.definition_of(&unit, &cursor));
        drop(unit);

        let definition = definition.ok_or_else(|| QueryError::NoDefinition {
            file: file_name.clone(),
            line: location.line,
            column: location.column,
        })?;
        if definition.symbol_id.is_empty() {
            return Err(QueryError::EmptySymbol.into());
        }
        Ok(definition.symbol_id)
    }
}
