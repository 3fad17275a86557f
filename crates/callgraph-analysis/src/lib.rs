//! callgraph-analysis: the call graph engine.
//!
//! - `compdb`: loads `compile_commands.json`
//! - `parsers`: the `SourceAnalyzer` seam and its tree-sitter C/C++ implementation
//! - `call_graph`: entity store, parallel ingestion, merge
//! - `graph`: backward path enumeration and forward call-graph printing
//! - `query`: the interactive `<file>:<line>:<column>` loop

pub mod call_graph;
pub mod compdb;
pub mod graph;
pub mod parsers;
pub mod query;

pub use call_graph::{EntityStore, FunctionEntity};
pub use compdb::{CompilationDatabase, CompileCommand};
pub use parsers::{CppAnalyzer, SourceAnalyzer};
pub use query::QuerySession;
