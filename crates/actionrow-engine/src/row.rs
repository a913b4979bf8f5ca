//! The action row container.

use crate::collaborators::PopupOpener;

/// Popup bound to a rendered entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupBinding {
    pub link: String,
    pub popup_type: String,
}

/// One entry of the action row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowEntry {
    pub id: String,
    pub html: String,
    /// Anchor href. `None` when the markup carries its own navigation.
    pub href: Option<String>,
    pub popup: Option<PopupBinding>,
    /// Never removed by reconciliation.
    pub always_present: bool,
}

impl RowEntry {
    /// Fixed entry that survives every reconciliation pass.
    pub fn always_present(id: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            html: html.into(),
            href: None,
            popup: None,
            always_present: true,
        }
    }
}

/// Result of clicking an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryClick {
    /// Popup opened, default navigation suppressed.
    Popup,
    /// Plain link, the caller navigates.
    Navigate(String),
    /// Entry exists but has no href.
    NoHref,
    NotFound,
}

/// Entries plus the bulk action control.
#[derive(Debug, Clone, Default)]
pub struct ActionRow {
    entries: Vec<RowEntry>,
    bulk_enabled: bool,
}

impl ActionRow {
    /// Empty row with bulk action inactive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fixed entry.
    pub fn with_always_present(mut self, id: impl Into<String>, html: impl Into<String>) -> Self {
        self.entries.push(RowEntry::always_present(id, html));
        self
    }

    pub fn entries(&self) -> &[RowEntry] {
        &self.entries
    }

    pub fn entry(&self, id: &str) -> Option<&RowEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries rendered from action descriptors, in render order.
    pub fn variable_entries(&self) -> impl Iterator<Item = &RowEntry> {
        self.entries.iter().filter(|e| !e.always_present)
    }

    pub fn entry_ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }

    pub fn bulk_enabled(&self) -> bool {
        self.bulk_enabled
    }

    pub fn set_bulk_enabled(&mut self, enabled: bool) {
        self.bulk_enabled = enabled;
    }

    /// Drop every entry that is not always present.
    pub fn clear_variable(&mut self) {
        self.entries.retain(|e| e.always_present);
    }

    /// Append an entry. Refused when its id is already in the row.
    pub fn append(&mut self, entry: RowEntry) -> bool {
        if self.entry(&entry.id).is_some() {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Click the entry with the given id.
    ///
    /// A popup binding wins over the href: the popup opens and navigation
    /// is suppressed.
    pub fn click(&self, id: &str, popups: &dyn PopupOpener) -> EntryClick {
        let Some(entry) = self.entry(id) else {
            return EntryClick::NotFound;
        };

        if let Some(popup) = &entry.popup {
            popups.open(&popup.link, &popup.popup_type);
            return EntryClick::Popup;
        }

        match &entry.href {
            Some(href) => EntryClick::Navigate(href.clone()),
            None => EntryClick::NoHref,
        }
    }
}
