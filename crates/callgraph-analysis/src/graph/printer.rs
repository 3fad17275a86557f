//! Forward call-graph printing with cycle collapsing and path filtering.

use std::io::Write;

use callgraph_core::errors::{CallGraphError, PipelineError};
use callgraph_core::types::FxHashSet;

use crate::call_graph::EntityStore;

/// One line of printer output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintedLine {
    pub depth: usize,
    pub display_name: String,
    /// The function was already expanded earlier in this print.
    pub recursive: bool,
}

/// Walk `calls` depth-first from `root` and produce the lines to print.
///
/// A function is expanded on first reach only; later reaches print it once
/// more marked recursive. Unless `show_all` is set, a function is printed only
/// if its display name contains `filter`, and only printed functions push
/// their callees one level deeper.
pub fn render_call_graph(
    store: &EntityStore,
    root: &str,
    filter: &str,
    show_all: bool,
) -> Result<Vec<PrintedLine>, CallGraphError> {
    let mut lines = Vec::new();
    let mut visited: FxHashSet<&str> = FxHashSet::default();
    let mut stack: Vec<(&str, usize)> = vec![(root, 0)];

    while let Some((symbol, depth)) = stack.pop() {
        let entity = store.get(symbol, "call graph")?;
        let shown = show_all || entity.display_name.contains(filter);
        let first_reach = visited.insert(entity.symbol_id.as_str());

        if shown {
            lines.push(PrintedLine {
                depth,
                display_name: entity.display_name.clone(),
                recursive: !first_reach,
            });
        }
        if !first_reach {
            continue;
        }

        let child_depth = if show_all || shown { depth + 1 } else { depth };
        stack.extend(
            entity
                .calls
                .as_slice()
                .iter()
                .rev()
                .map(|callee| (callee.as_str(), child_depth)),
        );
    }
    Ok(lines)
}

/// Write lines indented two spaces per level.
pub fn write_lines<W: Write>(lines: &[PrintedLine], out: &mut W) -> std::io::Result<()> {
    for line in lines {
        write!(out, "{:width$}{}", "", line.display_name, width = line.depth * 2)?;
        if line.recursive {
            write!(out, " (recursive)")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Render and write the call graph rooted at `root`.
pub fn print_call_graph<W: Write>(
    store: &EntityStore,
    root: &str,
    filter: &str,
    show_all: bool,
    out: &mut W,
) -> Result<(), PipelineError> {
    let lines = render_call_graph(store, root, filter, show_all)?;
    write_lines(&lines, out)?;
    Ok(())
}
