//! Hash and inline-vector aliases shared by the graph crates.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// Inline storage for edge lists; most functions call or are called by few others.
pub type SmallVec8<T> = SmallVec<[T; 8]>;
