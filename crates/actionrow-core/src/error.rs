//! Error types for the action row.

use thiserror::Error;

/// Errors raised while normalizing action data.
#[derive(Debug, Error)]
pub enum ActionRowError {
    /// Serialized action payload is not a valid descriptor list.
    #[error("Invalid action payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// Two descriptors attached to one item share an id.
    #[error("Duplicate action id '{0}'")]
    DuplicateActionId(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ActionRowError::DuplicateActionId("Edit".to_string());
        assert_eq!(err.to_string(), "Duplicate action id 'Edit'");
    }

    #[test]
    fn test_payload_error_from_json() {
        let json_err = serde_json::from_str::<Vec<u8>>("nope").unwrap_err();
        let err: ActionRowError = json_err.into();
        assert!(err.to_string().starts_with("Invalid action payload"));
    }
}
