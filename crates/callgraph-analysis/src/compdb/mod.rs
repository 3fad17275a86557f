//! Compilation database adapter: `compile_commands.json` → ordered command list.

pub mod args;
pub mod loader;
pub mod types;

pub use loader::load;
pub use types::{normalize_path, CompilationDatabase, CompileCommand};
