//! Compile command types.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::parsers::Language;

/// One entry of the compilation database, with its argument vector already split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileCommand {
    /// Working directory of the compiler invocation.
    pub directory: PathBuf,
    /// The source file exactly as written in the database.
    pub file: String,
    /// Full argument vector, compiler first.
    pub arguments: Vec<String>,
    pub output: Option<String>,
}

impl CompileCommand {
    /// The main source file, resolved against `directory`.
    pub fn source_path(&self) -> PathBuf {
        normalize_path(&self.directory.join(&self.file))
    }

    /// Directories named by `-I`, `-iquote` and `-isystem`, resolved against
    /// `directory`, in command-line order.
    pub fn include_dirs(&self) -> Vec<PathBuf> {
        const FLAGS: [&str; 3] = ["-I", "-iquote", "-isystem"];

        let mut dirs = Vec::new();
        let mut args = self.arguments.iter();
        while let Some(arg) = args.next() {
            let Some(flag) = FLAGS.iter().find(|f| arg.starts_with(**f)) else {
                continue;
            };
            let value = if arg.len() == flag.len() {
                match args.next() {
                    Some(next) => next.as_str(),
                    None => break,
                }
            } else {
                &arg[flag.len()..]
            };
            if value.is_empty() {
                continue;
            }
            dirs.push(normalize_path(&self.directory.join(value)));
        }
        dirs
    }

    /// Source language: an explicit `-x c`/`-x c++` wins, then the file extension.
    /// Unknown extensions are treated as C++.
    pub fn language(&self) -> Language {
        let mut args = self.arguments.iter();
        while let Some(arg) = args.next() {
            let value = match arg.strip_prefix("-x") {
                Some("") => args.next().map(String::as_str),
                other => other,
            };
            if let Some(language) = value.and_then(Language::from_driver_flag) {
                return language;
            }
        }
        Language::from_path(Path::new(&self.file)).unwrap_or(Language::Cpp)
    }
}

/// The loaded database: project root plus commands in file order.
#[derive(Debug, Clone, Default)]
pub struct CompilationDatabase {
    pub root: PathBuf,
    pub commands: Vec<CompileCommand>,
}

impl CompilationDatabase {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding normal component. Does not touch the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(args: &[&str]) -> CompileCommand {
        CompileCommand {
            directory: PathBuf::from("/work/build"),
            file: "../src/main.c".to_string(),
            arguments: args.iter().map(|s| s.to_string()).collect(),
            output: None,
        }
    }

    #[test]
    fn normalize_folds_dots() {
        assert_eq!(normalize_path(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize_path(Path::new("../x")), PathBuf::from("../x"));
        assert_eq!(normalize_path(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(normalize_path(Path::new("a/..")), PathBuf::from("."));
    }

    #[test]
    fn source_path_is_resolved_against_directory() {
        assert_eq!(command(&["cc"]).source_path(), PathBuf::from("/work/src/main.c"));
    }

    #[test]
    fn include_dirs_cover_joined_and_separate_forms() {
        let cmd = command(&[
            "cc", "-Iinclude", "-I", "/opt/inc", "-iquote", "q", "-isystem/sys", "-DX", "-c",
            "../src/main.c",
        ]);
        assert_eq!(
            cmd.include_dirs(),
            vec![
                PathBuf::from("/work/build/include"),
                PathBuf::from("/opt/inc"),
                PathBuf::from("/work/build/q"),
                PathBuf::from("/sys"),
            ]
        );
    }

    #[test]
    fn language_prefers_explicit_flag() {
        assert_eq!(command(&["cc"]).language(), Language::C);
        assert_eq!(command(&["cc", "-x", "c++"]).language(), Language::Cpp);
        let mut cpp = command(&["c++"]);
        cpp.file = "a.cc".into();
        assert_eq!(cpp.language(), Language::Cpp);
        cpp.file = "a.unknown".into();
        assert_eq!(cpp.language(), Language::Cpp);
    }
}
