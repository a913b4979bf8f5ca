//! Checkbox state of the ticket overview.
//!
//! An `Overview` holds the item checkboxes matched by the active view
//! mode's selector plus the page-level select-all control.

use actionrow_core::ItemId;

/// Checkbox of one overview item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCheckbox {
    /// Row the checkbox belongs to.
    pub item: ItemId,
    /// Submitted value (the ticket id).
    pub value: String,
    pub checked: bool,
}

impl ItemCheckbox {
    /// Unchecked checkbox whose value equals the item id.
    pub fn new(item: impl Into<ItemId>) -> Self {
        let item = item.into();
        let value = item.as_str().to_string();
        Self {
            item,
            value,
            checked: false,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

/// The "select all" control.
///
/// Hiding keeps the control in place, so `checked` stays readable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectAllControl {
    pub checked: bool,
    pub hidden: bool,
}

/// Item checkboxes of the active view plus the select-all control.
#[derive(Debug, Clone, Default)]
pub struct Overview {
    items: Vec<ItemCheckbox>,
    select_all: SelectAllControl,
}

impl Overview {
    pub fn new(items: Vec<ItemCheckbox>) -> Self {
        Self {
            items,
            select_all: SelectAllControl::default(),
        }
    }

    /// Overview of unchecked items whose values equal their ids.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ItemId>,
    {
        Self::new(ids.into_iter().map(ItemCheckbox::new).collect())
    }

    pub fn items(&self) -> &[ItemCheckbox] {
        &self.items
    }

    pub fn select_all(&self) -> SelectAllControl {
        self.select_all
    }

    /// Whether `item` resolves to exactly one checkbox.
    pub fn resolves(&self, item: &ItemId) -> bool {
        self.items.iter().filter(|c| &c.item == item).count() == 1
    }

    /// Checked checkboxes, in page order.
    pub fn checked(&self) -> impl Iterator<Item = &ItemCheckbox> {
        self.items.iter().filter(|c| c.checked)
    }

    pub fn checked_count(&self) -> usize {
        self.checked().count()
    }

    /// Set one item's checkbox. Returns false if the item is unknown.
    pub fn set_checked(&mut self, item: &ItemId, checked: bool) -> bool {
        let mut found = false;
        for checkbox in self.items.iter_mut().filter(|c| &c.item == item) {
            checkbox.checked = checked;
            found = true;
        }
        found
    }

    /// Set the select-all control and every item checkbox to `checked`.
    pub fn set_all(&mut self, checked: bool) {
        self.select_all.checked = checked;
        for checkbox in &mut self.items {
            checkbox.checked = checked;
        }
    }

    /// Check the select-all control iff every item is checked.
    pub fn sync_select_all(&mut self) {
        self.select_all.checked =
            !self.items.is_empty() && self.items.iter().all(|c| c.checked);
    }

    pub fn hide_select_all(&mut self) {
        self.select_all.hidden = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_exactly_one() {
        let overview = Overview::new(vec![
            ItemCheckbox::new("1"),
            ItemCheckbox::new("2"),
            ItemCheckbox::new("2"),
        ]);
        assert!(overview.resolves(&"1".into()));
        assert!(!overview.resolves(&"2".into()));
        assert!(!overview.resolves(&"3".into()));
    }

    #[test]
    fn test_set_checked() {
        let mut overview = Overview::from_ids(["A", "B", "C"]);
        assert!(overview.set_checked(&"B".into(), true));
        assert!(!overview.set_checked(&"Z".into(), true));

        let checked: Vec<_> = overview.checked().map(|c| c.value.as_str()).collect();
        assert_eq!(checked, vec!["B"]);
    }

    #[test]
    fn test_sync_select_all() {
        let mut overview = Overview::from_ids(["A", "B"]);
        overview.set_checked(&"A".into(), true);
        overview.sync_select_all();
        assert!(!overview.select_all().checked);

        overview.set_checked(&"B".into(), true);
        overview.sync_select_all();
        assert!(overview.select_all().checked);

        let mut empty = Overview::default();
        empty.sync_select_all();
        assert!(!empty.select_all().checked);
    }

    #[test]
    fn test_hidden_select_all_stays_readable() {
        let mut overview = Overview::from_ids(["A"]);
        overview.set_all(true);
        overview.hide_select_all();

        let control = overview.select_all();
        assert!(control.hidden);
        assert!(control.checked);
        assert_eq!(overview.checked_count(), 1);
    }

    #[test]
    fn test_custom_value() {
        let checkbox = ItemCheckbox::new("row-7").with_value("7");
        assert_eq!(checkbox.item.as_str(), "row-7");
        assert_eq!(checkbox.value, "7");
    }
}
