//! Overview view modes.

use serde::{Deserialize, Serialize};

/// Rendering density of the ticket overview.
///
/// Resolved once when the page initializes and passed explicitly to every
/// component that depends on it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// Table layout. Fallback when no other overview container exists.
    #[default]
    Small,
    /// Preview list layout.
    Medium,
    /// Full list layout.
    Large,
}

impl ViewMode {
    /// Id of the overview container that marks this mode, if any.
    pub fn container_id(self) -> Option<&'static str> {
        match self {
            ViewMode::Small => None,
            ViewMode::Medium => Some("TicketOverviewMedium"),
            ViewMode::Large => Some("TicketOverviewLarge"),
        }
    }

    /// Id of the "list is empty" marker rendered in this mode, if any.
    pub fn empty_marker_id(self) -> Option<&'static str> {
        match self {
            ViewMode::Small => None,
            ViewMode::Medium => Some("EmptyMessageMedium"),
            ViewMode::Large => Some("EmptyMessageLarge"),
        }
    }

    /// Selector matching the item checkboxes of this mode.
    pub fn checkbox_selector(self) -> &'static str {
        match self {
            ViewMode::Small => r#"ul.Overview table td input[type="checkbox"][name=TicketID]"#,
            ViewMode::Medium | ViewMode::Large => {
                r#"ul.Overview input[type="checkbox"][name=TicketID]"#
            }
        }
    }

    /// Whether an empty list hides the select-all control in this mode.
    pub fn hides_select_all_when_empty(self) -> bool {
        self.empty_marker_id().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_has_no_markers() {
        assert_eq!(ViewMode::Small.container_id(), None);
        assert_eq!(ViewMode::Small.empty_marker_id(), None);
        assert!(!ViewMode::Small.hides_select_all_when_empty());
    }

    #[test]
    fn test_list_modes_share_selector() {
        assert_eq!(
            ViewMode::Medium.checkbox_selector(),
            ViewMode::Large.checkbox_selector()
        );
        assert_ne!(
            ViewMode::Small.checkbox_selector(),
            ViewMode::Medium.checkbox_selector()
        );
        assert!(ViewMode::Small.checkbox_selector().contains("table td"));
    }

    #[test]
    fn test_marker_ids() {
        assert_eq!(ViewMode::Medium.container_id(), Some("TicketOverviewMedium"));
        assert_eq!(ViewMode::Large.empty_marker_id(), Some("EmptyMessageLarge"));
    }
}
