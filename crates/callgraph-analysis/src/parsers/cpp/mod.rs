//! C/C++ source analysis on tree-sitter-cpp.
//!
//! A unit is the main file of one compile command plus the quoted headers it
//! includes. Symbols are identified by qualified name (and parameter types in
//! C++), so the same function seen from different units gets the same id.

mod calls;
mod index;
mod locate;
mod names;
mod source;

use std::path::{Path, PathBuf};

use callgraph_core::config::IngestConfig;
use callgraph_core::constants::DEFAULT_MAX_INCLUDE_DEPTH;
use callgraph_core::errors::ParseError;
use callgraph_core::types::UnitId;

use self::index::DeclIndex;
use self::source::{load_sources, IncludePolicy, SourceFile};
use super::language::Language;
use super::traits::SourceAnalyzer;
use super::types::{CallPair, Cursor, CursorKind, UnitLifecycle};
use crate::compdb::CompileCommand;

/// Include-following knobs for [`CppAnalyzer`].
#[derive(Debug, Clone, Copy)]
pub struct CppAnalyzerOptions {
    pub follow_includes: bool,
    pub max_include_depth: u32,
}

impl Default for CppAnalyzerOptions {
    fn default() -> Self {
        Self {
            follow_includes: true,
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }
}

impl From<&IngestConfig> for CppAnalyzerOptions {
    fn from(config: &IngestConfig) -> Self {
        Self {
            follow_includes: config.effective_follow_includes(),
            max_include_depth: config.effective_max_include_depth(),
        }
    }
}

/// The tree-sitter backed [`SourceAnalyzer`].
#[derive(Debug, Clone, Default)]
pub struct CppAnalyzer {
    options: CppAnalyzerOptions,
}

impl CppAnalyzer {
    pub fn new(options: CppAnalyzerOptions) -> Self {
        Self { options }
    }

    fn policy(&self) -> IncludePolicy {
        IncludePolicy {
            follow: self.options.follow_includes,
            max_depth: self.options.max_include_depth,
        }
    }

    fn load(&self, unit: &CppUnit) -> Result<ParsedUnit, ParseError> {
        let files = load_sources(&unit.main_path, &unit.include_dirs, self.policy())?;
        let index = DeclIndex::build(&files, unit.language);
        Ok(ParsedUnit { files, index })
    }
}

struct ParsedUnit {
    files: Vec<SourceFile>,
    index: DeclIndex,
}

/// Handle for one parsed compile command.
pub struct CppUnit {
    id: UnitId,
    main_path: PathBuf,
    /// The command's working directory; relative query file names resolve here.
    directory: PathBuf,
    include_dirs: Vec<PathBuf>,
    language: Language,
    parsed: Option<ParsedUnit>,
}

impl CppUnit {
    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn main_path(&self) -> &Path {
        &self.main_path
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Number of files parsed for this unit; zero while suspended.
    pub fn file_count(&self) -> usize {
        self.parsed.as_ref().map_or(0, |p| p.files.len())
    }

    fn active(&self) -> Result<&ParsedUnit, ParseError> {
        self.parsed.as_ref().ok_or_else(|| ParseError::UnitSuspended {
            path: self.main_path.clone(),
        })
    }
}

impl std::fmt::Debug for CppUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CppUnit")
            .field("id", &self.id)
            .field("main_path", &self.main_path)
            .field("language", &self.language)
            .field("files", &self.file_count())
            .finish()
    }
}

impl SourceAnalyzer for CppAnalyzer {
    type Unit = CppUnit;

    fn parse(&self, id: UnitId, command: &CompileCommand) -> Result<CppUnit, ParseError> {
        let mut unit = CppUnit {
            id,
            main_path: command.source_path(),
            directory: command.directory.clone(),
            include_dirs: command.include_dirs(),
            language: command.language(),
            parsed: None,
        };
        let parsed = self.load(&unit)?;
        tracing::debug!(
            unit = %id,
            file = %unit.main_path.display(),
            language = %unit.language,
            files = parsed.files.len(),
            functions = parsed.index.len(),
            "parsed unit"
        );
        unit.parsed = Some(parsed);
        Ok(unit)
    }

    fn visit_calls(&self, unit: &CppUnit) -> Result<Vec<CallPair>, ParseError> {
        let parsed = unit.active()?;
        Ok(calls::collect_calls(&parsed.files, &parsed.index))
    }

    fn resolve_location(
        &self,
        unit: &CppUnit,
        file: &str,
        line: u32,
        column: u32,
    ) -> Result<Option<Cursor>, ParseError> {
        let parsed = unit.active()?;
        let Some(file_idx) = locate::find_file(&parsed.files, file, &unit.directory) else {
            return Ok(None);
        };
        Ok(locate::cursor_at(&parsed.files, &parsed.index, file_idx, line, column))
    }

    fn definition_of(&self, unit: &CppUnit, cursor: &Cursor) -> Option<Cursor> {
        if cursor.kind == CursorKind::Definition {
            return Some(cursor.clone());
        }
        let parsed = unit.parsed.as_ref()?;
        let idx = parsed.index.definition(&cursor.symbol_id)?;
        Some(parsed.index.cursor(idx, &parsed.files, CursorKind::Definition))
    }

    fn suspend(&self, unit: &mut CppUnit) {
        unit.parsed = None;
    }

    fn revive(&self, unit: &mut CppUnit) -> Result<(), ParseError> {
        if unit.parsed.is_none() {
            unit.parsed = Some(self.load(unit)?);
        }
        Ok(())
    }

    fn lifecycle(&self, unit: &CppUnit) -> UnitLifecycle {
        if unit.parsed.is_some() {
            UnitLifecycle::Active
        } else {
            UnitLifecycle::Suspended
        }
    }
}
