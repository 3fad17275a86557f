//! C or C++: decides how symbol ids are spelled for a unit.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    C,
    Cpp,
}

impl Language {
    /// Dialect named by a `-x` driver argument.
    pub fn from_driver_flag(value: &str) -> Option<Language> {
        match value {
            "c" | "c-header" | "cpp-output" => Some(Language::C),
            "c++" | "c++-header" | "c++-cpp-output" => Some(Language::Cpp),
            _ => None,
        }
    }

    /// Dialect implied by a source file's extension. `.h` counts as C.
    pub fn from_path(path: &Path) -> Option<Language> {
        let ext = path.extension()?.to_str()?;
        if matches!(ext, "c" | "h" | "i") {
            return Some(Language::C);
        }
        let cpp = matches!(
            ext,
            "cpp" | "cc" | "cxx" | "c++" | "C" | "cp" | "hpp" | "hxx" | "hh" | "ii" | "ipp" | "tcc"
        );
        cpp.then_some(Language::Cpp)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::C => "c",
            Language::Cpp => "c++",
        })
    }
}
