//! Reads `<root>/compile_commands.json`.

use std::path::{Path, PathBuf};

use callgraph_core::constants::COMPILE_COMMANDS_FILE;
use callgraph_core::errors::CompdbError;
use serde::Deserialize;

use super::args::split_command;
use super::types::{CompilationDatabase, CompileCommand};

#[derive(Debug, Deserialize)]
struct RawEntry {
    directory: String,
    file: String,
    #[serde(default)]
    arguments: Option<Vec<String>>,
    #[serde(default)]
    command: Option<String>,
    #[serde(default)]
    output: Option<String>,
}

/// Load the compilation database for the project rooted at `root`.
pub fn load(root: &Path) -> Result<CompilationDatabase, CompdbError> {
    let path = root.join(COMPILE_COMMANDS_FILE);
    if !path.is_file() {
        return Err(CompdbError::NotFound {
            root: root.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(&path).map_err(|source| CompdbError::Io {
        path: path.clone(),
        source,
    })?;

    let commands = parse_commands(&path, &text)?;
    tracing::info!(
        path = %path.display(),
        commands = commands.len(),
        "loaded compilation database"
    );

    Ok(CompilationDatabase {
        root: root.to_path_buf(),
        commands,
    })
}

/// Parse the JSON text of a compilation database. `path` is used in errors only.
pub fn parse_commands(path: &Path, text: &str) -> Result<Vec<CompileCommand>, CompdbError> {
    let raw: Vec<RawEntry> = serde_json::from_str(text).map_err(|e| CompdbError::Malformed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    raw.into_iter()
        .enumerate()
        .map(|(index, entry)| convert(index, entry))
        .collect()
}

fn convert(index: usize, entry: RawEntry) -> Result<CompileCommand, CompdbError> {
    let arguments = match (entry.arguments, entry.command) {
        (Some(args), _) if !args.is_empty() => args,
        (_, Some(command)) => split_command(&command)
            .map_err(|message| CompdbError::InvalidEntry { index, message })?,
        _ => {
            return Err(CompdbError::InvalidEntry {
                index,
                message: "entry has neither 'arguments' nor 'command'".to_string(),
            })
        }
    };
    if entry.file.is_empty() {
        return Err(CompdbError::InvalidEntry {
            index,
            message: "empty 'file'".to_string(),
        });
    }

    Ok(CompileCommand {
        directory: PathBuf::from(entry.directory),
        file: entry.file,
        arguments,
        output: entry.output,
    })
}
