//! Action descriptor types.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ActionRowError;

/// One entry that can appear in the action row for a selected item.
///
/// Field names on the wire follow the page generator (`ID`, `HTML`, `Link`,
/// `Target`, `PopupType`); lowercase spellings are accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    /// Element id of the rendered entry. Unique within one action row.
    #[serde(rename = "ID", alias = "id")]
    pub id: String,

    /// Markup fragment rendered for this action. Opaque, never parsed.
    #[serde(rename = "HTML", alias = "html", default)]
    pub html: String,

    /// Target URL for plain navigation.
    #[serde(rename = "Link", alias = "link", default)]
    pub link: String,

    /// When non-empty the entry carries its own navigation and gets no href.
    #[serde(
        rename = "Target",
        alias = "target",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub target: Option<String>,

    /// Opens a popup of this type at `link` instead of navigating.
    #[serde(
        rename = "PopupType",
        alias = "popup_type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub popup_type: Option<String>,
}

impl ActionDescriptor {
    /// Create a plain link descriptor.
    pub fn new(id: impl Into<String>, html: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            html: html.into(),
            link: link.into(),
            target: None,
            popup_type: None,
        }
    }

    /// Set the target.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set the popup type.
    pub fn with_popup_type(mut self, popup_type: impl Into<String>) -> Self {
        self.popup_type = Some(popup_type.into());
        self
    }

    /// Whether the rendered entry should get `link` as its href.
    pub fn is_plain_link(&self) -> bool {
        self.target.as_deref().map_or(true, str::is_empty)
    }

    /// Popup type, ignoring empty values.
    pub fn popup(&self) -> Option<&str> {
        self.popup_type.as_deref().filter(|p| !p.is_empty())
    }
}

/// Descriptor list as supplied by the surrounding page.
///
/// The page either hands over typed descriptors or the JSON text it
/// generated. [`ActionPayload::into_descriptors`] is the single place where
/// the two forms are unified.
#[derive(Debug, Clone)]
pub enum ActionPayload {
    Parsed(Vec<ActionDescriptor>),
    Serialized(String),
}

impl ActionPayload {
    /// Normalize into a typed descriptor list.
    ///
    /// Fails if the text form does not parse or if two descriptors share an id.
    pub fn into_descriptors(self) -> Result<Vec<ActionDescriptor>, ActionRowError> {
        let descriptors = match self {
            ActionPayload::Parsed(descriptors) => descriptors,
            ActionPayload::Serialized(text) => serde_json::from_str(&text)?,
        };

        let mut seen = HashSet::new();
        for descriptor in &descriptors {
            if !seen.insert(descriptor.id.as_str()) {
                return Err(ActionRowError::DuplicateActionId(descriptor.id.clone()));
            }
        }

        Ok(descriptors)
    }
}

impl From<Vec<ActionDescriptor>> for ActionPayload {
    fn from(descriptors: Vec<ActionDescriptor>) -> Self {
        ActionPayload::Parsed(descriptors)
    }
}

impl From<String> for ActionPayload {
    fn from(text: String) -> Self {
        ActionPayload::Serialized(text)
    }
}

impl From<&str> for ActionPayload {
    fn from(text: &str) -> Self {
        ActionPayload::Serialized(text.to_string())
    }
}
