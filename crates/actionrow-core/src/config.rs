//! Configuration types.
//!
//! Every value has a default matching the agent ticket overview, so an
//! absent config file is not an error. Overrides live in
//! `<config dir>/actionrow/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Runtime configuration of the action row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ActionRowConfig {
    /// Prefix of every follow-up URL, e.g. "index.pl?".
    pub baselink: String,

    /// Endpoint handling remote calls.
    pub cgi_handle: String,

    /// Bulk action settings.
    pub bulk: BulkConfig,

    /// Lock notice dialog settings.
    pub dialog: DialogConfig,
}

impl Default for ActionRowConfig {
    fn default() -> Self {
        Self {
            baselink: "index.pl?".to_string(),
            cgi_handle: "index.pl".to_string(),
            bulk: BulkConfig::default(),
            dialog: DialogConfig::default(),
        }
    }
}

/// Bulk action configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BulkConfig {
    /// Server action that handles the follow-up surface and lock check.
    pub action: String,

    /// Sub-action of the lock check.
    pub subaction: String,

    /// Query parameter name carrying one item id.
    pub item_parameter: String,

    /// Popup slot the follow-up surface opens in.
    pub popup_type: String,
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            action: "AgentTicketBulk".to_string(),
            subaction: "AJAXIgnoreLockedTicketIDs".to_string(),
            item_parameter: "TicketID".to_string(),
            popup_type: "TicketAction".to_string(),
        }
    }
}

/// Lock notice dialog configuration.
///
/// Labels are untranslated source strings; the dialog presenter localizes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DialogConfig {
    pub title: String,
    pub close_label: String,
    pub height: String,
    pub position: String,
    pub body_width: String,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            title: "Cannot proceed".to_string(),
            close_label: "Close this dialog".to_string(),
            height: "150px".to_string(),
            position: "Center".to_string(),
            body_width: "400px".to_string(),
        }
    }
}

impl ActionRowConfig {
    /// Parse configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Load the user's configuration, falling back to defaults when the
    /// config directory or file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        match config_dir() {
            Some(dir) => Self::load_from(&dir),
            None => Ok(Self::default()),
        }
    }

    /// Load `config.toml` from `dir`, or defaults when it is absent.
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            Self::from_file(&path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

const CONFIG_FILE: &str = "config.toml";

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("actionrow"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ActionRowConfig::default();
        assert_eq!(config.baselink, "index.pl?");
        assert_eq!(config.bulk.action, "AgentTicketBulk");
        assert_eq!(config.bulk.popup_type, "TicketAction");
        assert_eq!(config.dialog.title, "Cannot proceed");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ActionRowConfig::from_toml_str(
            r#"
            baselink = "/otrs/index.pl?"

            [bulk]
            popup_type = "Bulk"
            "#,
        )
        .unwrap();

        assert_eq!(config.baselink, "/otrs/index.pl?");
        assert_eq!(config.cgi_handle, "index.pl");
        assert_eq!(config.bulk.popup_type, "Bulk");
        assert_eq!(config.bulk.item_parameter, "TicketID");
        assert_eq!(config.dialog, DialogConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let result = ActionRowConfig::from_toml_str("baselink = [");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cgi_handle = \"/cgi/index.pl\"").unwrap();

        let config = ActionRowConfig::from_file(file.path()).unwrap();
        assert_eq!(config.cgi_handle, "/cgi/index.pl");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ActionRowConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_from_dir_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ActionRowConfig::load_from(dir.path()).unwrap();
        assert_eq!(config, ActionRowConfig::default());
    }

    #[test]
    fn test_load_from_dir_with_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "[dialog]\ntitle = \"Locked\"\n",
        )
        .unwrap();

        let config = ActionRowConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.dialog.title, "Locked");
        assert_eq!(config.baselink, "index.pl?");
    }

    #[test]
    fn test_config_dir_is_namespaced() {
        if let Some(dir) = config_dir() {
            assert!(dir.ends_with("actionrow"));
        }
    }
}
