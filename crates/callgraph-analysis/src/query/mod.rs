//! Interactive queries: `<file>:<line>:<column>` in, call paths and call graph out.

pub mod input;
pub mod session;

pub use input::{parse_query, Location};
pub use session::{QueryOptions, QuerySession};
