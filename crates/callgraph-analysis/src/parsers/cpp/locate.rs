//! Mapping a `file:line:column` position to a function cursor.

use std::path::Path;

use tree_sitter::{Node, Point};

use super::calls::{call_target, enclosing_definition};
use super::index::DeclIndex;
use super::source::SourceFile;
use crate::compdb::normalize_path;
use crate::parsers::types::{Cursor, CursorKind};

/// Index of the parsed file `file` names. `file` is first resolved against
/// `directory` the way compile commands are, so `./a.c` and `../src/a.c`
/// find their unit. Failing that, the first file whose path ends with `file`.
pub(crate) fn find_file(files: &[SourceFile], file: &str, directory: &Path) -> Option<usize> {
    let anchored = normalize_path(&directory.join(file));
    files
        .iter()
        .position(|f| Path::new(&f.path) == anchored)
        .or_else(|| files.iter().position(|f| f.path == file))
        .or_else(|| {
            files
                .iter()
                .position(|f| Path::new(&f.path).ends_with(Path::new(file)))
        })
}

fn contains(node: Node, point: Point) -> bool {
    let start = node.start_position();
    let end = node.end_position();
    (start.row, start.column) <= (point.row, point.column)
        && (point.row, point.column) <= (end.row, end.column)
}

/// The cursor at a 1-based position. A callee name inside a call yields a
/// reference to the called function; anywhere else inside a function
/// definition or prototype yields that function.
pub(crate) fn cursor_at(
    files: &[SourceFile],
    index: &DeclIndex,
    file: usize,
    line: u32,
    column: u32,
) -> Option<Cursor> {
    let source_file = &files[file];
    let point = Point {
        row: line.saturating_sub(1) as usize,
        column: column.saturating_sub(1) as usize,
    };
    let root = source_file.root();
    if !contains(root, point) {
        return None;
    }
    let mut current = root.descendant_for_point_range(point, point);

    while let Some(node) = current {
        match node.kind() {
            "call_expression" => {
                let in_callee = node
                    .child_by_field_name("function")
                    .is_some_and(|f| contains(f, point));
                if in_callee {
                    let caller = enclosing_definition(index, file, node).map(|c| index.get(c));
                    let target = call_target(node, source_file.bytes())?;
                    let callee = index.resolve_call(&target, caller)?;
                    let mut cursor = index.cursor(callee, files, CursorKind::Reference);
                    let site = node.start_position();
                    cursor.file = source_file.path.clone();
                    cursor.line = site.row as u32 + 1;
                    cursor.column = site.column as u32 + 1;
                    return Some(cursor);
                }
            }
            "function_definition" => {
                let idx = index.at_node(file, node.start_byte())?;
                return Some(index.cursor(idx, files, CursorKind::Definition));
            }
            "declaration" | "field_declaration" => {
                if let Some(idx) = index.at_node(file, node.start_byte()) {
                    return Some(index.cursor(idx, files, CursorKind::Declaration));
                }
            }
            _ => {}
        }
        current = node.parent();
    }
    None
}
