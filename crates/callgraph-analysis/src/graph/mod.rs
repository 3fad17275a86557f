//! Traversals over a merged `EntityStore`.

pub mod paths;
pub mod printer;

pub use paths::{find_call_paths, CallPath};
pub use printer::{print_call_graph, render_call_graph, write_lines, PrintedLine};
