use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::model::config::BoardConfig;

/// Config file looked up in the current directory when no path is given
pub const CONFIG_FILE_NAME: &str = "taskboard.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Read and parse a config file. Missing keys take their defaults.
pub fn load_config(path: &Path) -> Result<BoardConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: BoardConfig = toml::from_str(&text)?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Config for this run: the explicit path if one was given (it must exist),
/// else `taskboard.toml` in `dir` if present, else defaults.
pub fn resolve_config(explicit: Option<&Path>, dir: &Path) -> Result<BoardConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let candidate = dir.join(CONFIG_FILE_NAME);
    if candidate.is_file() {
        return load_config(&candidate);
    }
    debug!("no config file; using defaults");
    Ok(BoardConfig::default())
}
