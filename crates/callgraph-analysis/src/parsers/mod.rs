//! Source analysis seam and its tree-sitter C/C++ implementation.

pub mod cpp;
pub mod error_tolerant;
pub mod language;
pub mod lifecycle;
pub mod traits;
pub mod types;

pub use cpp::{CppAnalyzer, CppAnalyzerOptions, CppUnit};
pub use language::Language;
pub use lifecycle::RevivedUnit;
pub use traits::SourceAnalyzer;
pub use types::{CallPair, Cursor, CursorKind, UnitLifecycle};
