//! Top-level callgraph configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{IngestConfig, QueryConfig};
use crate::constants::{MAX_INCLUDE_DEPTH, MAX_WORKERS, PROJECT_CONFIG_FILE};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`CALLGRAPH_*`)
/// 3. Project config (`callgraph.toml` in the project root)
/// 4. User config (`~/.callgraph/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CallgraphConfig {
    pub ingest: IngestConfig,
    pub query: QueryConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub workers: Option<usize>,
    pub max_call_paths: Option<usize>,
    pub show_all: Option<bool>,
    pub filter: Option<String>,
}

impl CallgraphConfig {
    /// Load configuration for the project rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &CallgraphConfig) -> Result<(), ConfigError> {
        if let Some(workers) = config.ingest.workers {
            if workers == 0 || workers > MAX_WORKERS {
                return Err(ConfigError::ValidationFailed {
                    field: "ingest.workers".to_string(),
                    message: format!("must be between 1 and {MAX_WORKERS}"),
                });
            }
        }
        if let Some(depth) = config.ingest.max_include_depth {
            if depth > MAX_INCLUDE_DEPTH {
                return Err(ConfigError::ValidationFailed {
                    field: "ingest.max_include_depth".to_string(),
                    message: format!("must be at most {MAX_INCLUDE_DEPTH}"),
                });
            }
        }
        if config.query.max_call_paths == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "query.max_call_paths".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".callgraph").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut CallgraphConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let file_config: CallgraphConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Overlay `upper` on `base`: every value `upper` sets wins.
    fn merge(base: &mut CallgraphConfig, upper: &CallgraphConfig) {
        let ingest = &mut base.ingest;
        overlay(&mut ingest.workers, &upper.ingest.workers);
        overlay(&mut ingest.follow_includes, &upper.ingest.follow_includes);
        overlay(&mut ingest.max_include_depth, &upper.ingest.max_include_depth);

        let query = &mut base.query;
        overlay(&mut query.max_call_paths, &upper.query.max_call_paths);
        overlay(&mut query.show_all, &upper.query.show_all);
        overlay(&mut query.filter, &upper.query.filter);
    }

    /// `CALLGRAPH_<SECTION>_<KEY>` variables. Values that do not parse are ignored.
    fn apply_env_overrides(config: &mut CallgraphConfig) {
        let env = CallgraphConfig {
            ingest: IngestConfig {
                workers: env_value("CALLGRAPH_INGEST_WORKERS"),
                follow_includes: env_value("CALLGRAPH_INGEST_FOLLOW_INCLUDES"),
                max_include_depth: env_value("CALLGRAPH_INGEST_MAX_INCLUDE_DEPTH"),
            },
            query: QueryConfig {
                max_call_paths: env_value("CALLGRAPH_QUERY_MAX_CALL_PATHS"),
                show_all: env_value("CALLGRAPH_QUERY_SHOW_ALL"),
                filter: std::env::var("CALLGRAPH_QUERY_FILTER").ok(),
            },
        };
        Self::merge(config, &env);
    }

    fn apply_cli_overrides(config: &mut CallgraphConfig, cli: &CliOverrides) {
        overlay(&mut config.ingest.workers, &cli.workers);
        overlay(&mut config.query.max_call_paths, &cli.max_call_paths);
        overlay(&mut config.query.show_all, &cli.show_all);
        overlay(&mut config.query.filter, &cli.filter);
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn overlay<T: Clone>(slot: &mut Option<T>, upper: &Option<T>) {
    if upper.is_some() {
        slot.clone_from(upper);
    }
}

fn env_value<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok()?.parse().ok()
}

/// `$HOME`, or `%USERPROFILE%` on Windows.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
