use serde::{Deserialize, Serialize};

use super::column::Column;

/// Configuration from taskboard.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub board: BoardInfo,
    #[serde(default)]
    pub seed: SeedConfig,
    /// Starting columns when the sample data is off. Empty means the four
    /// default columns.
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub ids: IdConfig,
    #[serde(default)]
    pub user: UserConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardInfo {
    #[serde(default = "default_board_name")]
    pub name: String,
}

impl Default for BoardInfo {
    fn default() -> Self {
        BoardInfo {
            name: default_board_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Load the built-in sample tasks and team at startup
    #[serde(default = "default_true")]
    pub sample_data: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        SeedConfig { sample_data: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdConfig {
    /// Length of generated ids (base-36 characters)
    #[serde(default = "default_id_length")]
    pub length: usize,
}

impl Default for IdConfig {
    fn default() -> Self {
        IdConfig {
            length: default_id_length(),
        }
    }
}

/// The person using the board; author of comments and uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default = "default_user_id")]
    pub id: String,
    #[serde(default = "default_user_name")]
    pub name: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        UserConfig {
            id: default_user_id(),
            name: default_user_name(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_board_name() -> String {
    "Project Board".to_string()
}

pub const DEFAULT_ID_LENGTH: usize = 7;
pub const MIN_ID_LENGTH: usize = 4;

fn default_id_length() -> usize {
    DEFAULT_ID_LENGTH
}

fn default_user_id() -> String {
    "current-user-id".to_string()
}

fn default_user_name() -> String {
    "You".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: BoardConfig = toml::from_str("").unwrap();
        assert_eq!(config.board.name, "Project Board");
        assert!(config.seed.sample_data);
        assert!(config.columns.is_empty());
        assert_eq!(config.ids.length, DEFAULT_ID_LENGTH);
        assert_eq!(config.user.id, "current-user-id");
    }

    #[test]
    fn test_partial_sections() {
        let config: BoardConfig = toml::from_str(
            r#"[seed]
sample_data = false

[user]
name = "Ada"

[[columns]]
id = "todo"
title = "Backlog"
icon = "star"
"#,
        )
        .unwrap();
        assert!(!config.seed.sample_data);
        assert_eq!(config.user.name, "Ada");
        assert_eq!(config.user.id, "current-user-id");
        assert_eq!(config.columns.len(), 1);
        assert_eq!(config.columns[0].title, "Backlog");
    }
}
