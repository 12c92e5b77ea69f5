//! Configuration management for the autoformat engine
//!
//! Handles loading, saving, and validating configuration. Configuration is
//! stored as JSON in the user's configuration directory; a missing file
//! means defaults.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier following reverse-DNS convention
pub const APP_ID: &str = "com.cosmic.Notebook";

/// Name of the configuration file inside the configuration directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Deepest list nesting reachable with Tab
pub const DEFAULT_MAX_LIST_DEPTH: usize = 4;

/// Maximum undo history entries
pub const MAX_UNDO_HISTORY: usize = 1000;

/// Session storage slot holding the last saved plain text
pub const DEFAULT_STORAGE_KEY: &str = "Text";

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Editing behaviour
    pub editor: EditorConfig,

    /// Session persistence
    pub session: SessionConfig,

    /// Class names handed to the renderer
    pub presentation: PresentationConfig,
}

impl Config {
    /// Load configuration from the default location or return defaults
    pub fn load() -> ConfigResult<Self> {
        let path = Self::config_dir()?.join(CONFIG_FILE_NAME);
        Self::load_from(&path)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            log::debug!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Config =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults on any error
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load configuration, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> ConfigResult<()> {
        let path = Self::config_dir()?.join(CONFIG_FILE_NAME);
        self.save_to(&path)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigError::SaveError(e.to_string()))
    }

    /// Check that every value is usable
    pub fn validate(&self) -> ConfigResult<()> {
        if self.editor.max_list_depth == 0 {
            return Err(ConfigError::InvalidValue {
                key: "editor.max_list_depth".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.editor.max_undo_history == 0 {
            return Err(ConfigError::InvalidValue {
                key: "editor.max_undo_history".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.session.storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "session.storage_key".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Get the configuration directory path
    pub fn config_dir() -> ConfigResult<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_ID))
            .ok_or(ConfigError::DirectoryError)
    }
}

/// Editor-specific configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Rewrite trigger sequences as they are typed
    pub autoformat: bool,

    /// Deepest list nesting reachable with Tab
    pub max_list_depth: usize,

    /// Maximum undo history entries
    pub max_undo_history: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            autoformat: true,
            max_list_depth: DEFAULT_MAX_LIST_DEPTH,
            max_undo_history: MAX_UNDO_HISTORY,
        }
    }
}

/// Session persistence configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Storage slot for the saved plain text
    pub storage_key: String,

    /// Explicit session store file; `None` uses the data directory
    pub store_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            store_path: None,
        }
    }
}

/// Class names used by the presentation policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Class applied to the editing surface
    pub editor_class: String,

    /// Extra class that hides the placeholder
    pub hide_placeholder_class: String,

    /// Class for blockquote blocks
    pub blockquote_class: String,

    /// Placeholder text shown in an empty document
    pub placeholder: String,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            editor_class: "RichEditor-editor".to_string(),
            hide_placeholder_class: "RichEditor-hidePlaceholder".to_string(),
            blockquote_class: "RichEditor-blockquote".to_string(),
            placeholder: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.editor.autoformat);
        assert_eq!(config.editor.max_list_depth, 4);
        assert_eq!(config.session.storage_key, "Text");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"editor": {"max_list_depth": 2}}"#).unwrap();
        assert_eq!(config.editor.max_list_depth, 2);
        assert_eq!(config.editor.max_undo_history, MAX_UNDO_HISTORY);
        assert_eq!(config.presentation.blockquote_class, "RichEditor-blockquote");
    }

    #[test]
    fn test_validate_rejects_zero_depth() {
        let mut config = Config::default();
        config.editor.max_list_depth = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        config.editor.autoformat = false;
        config.session.storage_key = "Draft".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(!loaded.editor.autoformat);
        assert_eq!(loaded.session.storage_key, "Draft");
    }

    #[test]
    fn test_load_reads_config_json() {
        let path = Config::config_dir().map(|dir| dir.join(CONFIG_FILE_NAME));
        if let Ok(path) = path {
            assert!(path.ends_with("com.cosmic.Notebook/config.json"));
        }
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseError(_))
        ));
    }
}
