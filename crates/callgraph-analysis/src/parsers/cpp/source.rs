//! Reading and parsing the files that make up one unit.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use callgraph_core::errors::ParseError;
use callgraph_core::types::FxHashSet;
use tree_sitter::{Node, Parser, Tree};

use super::names::text;
use crate::compdb::normalize_path;
use crate::parsers::error_tolerant::count_errors;

thread_local! {
    static CPP_PARSER: RefCell<Option<Parser>> = const { RefCell::new(None) };
}

/// Run `f` with this thread's C/C++ parser, creating it on first use.
fn with_parser<R>(f: impl FnOnce(&mut Parser) -> R) -> Result<R, ParseError> {
    CPP_PARSER.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            let mut parser = Parser::new();
            parser
                .set_language(&tree_sitter_cpp::LANGUAGE.into())
                .map_err(|e| ParseError::GrammarUnavailable {
                    message: e.to_string(),
                })?;
            *slot = Some(parser);
        }
        match slot.as_mut() {
            Some(parser) => Ok(f(parser)),
            None => Err(ParseError::GrammarUnavailable {
                message: "parser slot empty".to_string(),
            }),
        }
    })
}

/// One parsed file: the main source or a followed header.
pub(crate) struct SourceFile {
    pub path: String,
    pub source: String,
    pub tree: Tree,
}

impl SourceFile {
    pub fn bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }
}

/// How far to chase `#include "..."`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IncludePolicy {
    pub follow: bool,
    pub max_depth: u32,
}

/// Parse `main` and, per `policy`, every quoted include reachable from it.
/// The main file comes first; headers follow in discovery order, each once.
pub(crate) fn load_sources(
    main: &Path,
    include_dirs: &[PathBuf],
    policy: IncludePolicy,
) -> Result<Vec<SourceFile>, ParseError> {
    let source = std::fs::read_to_string(main).map_err(|source| ParseError::SourceUnreadable {
        path: main.to_path_buf(),
        source,
    })?;
    let main_file = parse_file(main, source)?;

    let mut files = vec![main_file];
    if !policy.follow {
        return Ok(files);
    }

    let mut seen: FxHashSet<PathBuf> = FxHashSet::default();
    seen.insert(main.to_path_buf());

    let mut worklist = vec![(0usize, 1u32)];
    while let Some((index, depth)) = worklist.pop() {
        if depth > policy.max_depth {
            continue;
        }
        let including = PathBuf::from(&files[index].path);
        let includes = quoted_includes(&files[index]);

        for spec in includes {
            let Some(header) = find_header(&including, &spec, include_dirs) else {
                tracing::debug!(include = %spec, from = %including.display(), "include not found");
                continue;
            };
            if !seen.insert(header.clone()) {
                continue;
            }
            let source = match std::fs::read_to_string(&header) {
                Ok(s) => s,
                Err(e) => {
                    tracing::debug!(path = %header.display(), error = %e, "skipping unreadable header");
                    continue;
                }
            };
            match parse_file(&header, source) {
                Ok(file) => {
                    files.push(file);
                    worklist.push((files.len() - 1, depth + 1));
                }
                Err(e) => tracing::debug!(path = %header.display(), error = %e, "skipping header"),
            }
        }
    }
    Ok(files)
}

fn parse_file(path: &Path, source: String) -> Result<SourceFile, ParseError> {
    let tree = with_parser(|parser| parser.parse(&source, None))?.ok_or_else(|| {
        ParseError::TreeSitterError {
            path: path.to_path_buf(),
            message: "parser returned no tree".to_string(),
        }
    })?;

    let errors = count_errors(tree.root_node());
    if errors > 0 {
        tracing::debug!(path = %path.display(), errors, "syntax errors tolerated");
    }

    Ok(SourceFile {
        path: path.display().to_string(),
        source,
        tree,
    })
}

/// `"header.h"` include specs in a file, including ones under `#if` blocks.
fn quoted_includes(file: &SourceFile) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack = vec![file.root()];
    while let Some(node) = stack.pop() {
        if node.kind() == "preproc_include" {
            if let Some(path) = node.child_by_field_name("path") {
                if path.kind() == "string_literal" {
                    let spec = text(path, file.bytes()).trim_matches('"');
                    if !spec.is_empty() {
                        out.push(spec.to_string());
                    }
                }
            }
            continue;
        }
        if node.kind() == "translation_unit"
            || node.kind().starts_with("preproc_")
            || node.kind() == "linkage_specification"
            || node.kind() == "declaration_list"
            || node.kind() == "namespace_definition"
        {
            let mut cursor = node.walk();
            let children: Vec<Node> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }
    out
}

/// Search the including file's directory, then the command's include dirs.
fn find_header(including: &Path, spec: &str, include_dirs: &[PathBuf]) -> Option<PathBuf> {
    let local = including.parent().map(|dir| dir.join(spec));
    local
        .into_iter()
        .chain(include_dirs.iter().map(|dir| dir.join(spec)))
        .map(|p| normalize_path(&p))
        .find(|p| p.is_file())
}
