//! Selection reconciliation.
//!
//! Derives the action row content and the bulk action state from the
//! current selection.
//!
//! ## Policies
//!
//! ```text
//! checked == 0                       -> Empty     clear, bulk off
//! checked == 1 && !select_all        -> Singular  render item actions, bulk on
//! checked >= 2 || select_all checked -> Plural    clear, bulk on
//! ```
//!
//! Per-item actions only make sense for one concrete item. A single checked
//! item reached through select-all counts as Plural.

use std::sync::Arc;

use actionrow_core::{ActionDescriptor, ItemId};

use crate::hooks::PostRenderHooks;
use crate::overview::Overview;
use crate::registry::ActionRegistry;
use crate::row::{ActionRow, PopupBinding, RowEntry};

/// Classification of the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionRegime {
    /// Nothing checked.
    Empty,
    /// Exactly one concrete item checked.
    Singular(ItemId),
    /// Several items checked, or everything via select-all.
    Plural(usize),
}

impl SelectionRegime {
    /// Classify the checked subset of `overview`.
    pub fn classify(overview: &Overview) -> Self {
        let mut checked = overview.checked();
        match (checked.next(), checked.next()) {
            (None, _) => SelectionRegime::Empty,
            (Some(only), None) if !overview.select_all().checked => {
                SelectionRegime::Singular(only.item.clone())
            }
            _ => SelectionRegime::Plural(overview.checked_count()),
        }
    }

    /// Whether the bulk action is available in this regime.
    pub fn enables_bulk(&self) -> bool {
        !matches!(self, SelectionRegime::Empty)
    }
}

/// Rebuilds the action row on every selection change.
pub struct SelectionReconciler {
    registry: Arc<ActionRegistry>,
    hooks: Arc<PostRenderHooks>,
}

impl SelectionReconciler {
    pub fn new(registry: Arc<ActionRegistry>, hooks: Arc<PostRenderHooks>) -> Self {
        Self { registry, hooks }
    }

    pub fn registry(&self) -> &Arc<ActionRegistry> {
        &self.registry
    }

    pub fn hooks(&self) -> &Arc<PostRenderHooks> {
        &self.hooks
    }

    /// Reconcile `row` with the selection in `overview`.
    ///
    /// `clicked` is the checkbox that changed. It is not necessarily the
    /// checked one: unchecking one of two items leaves the other selected.
    pub fn update_action_row(
        &self,
        clicked: &ItemId,
        overview: &Overview,
        row: &mut ActionRow,
    ) -> SelectionRegime {
        let regime = SelectionRegime::classify(overview);
        tracing::debug!("Selection changed by '{}': {:?}", clicked, regime);

        row.clear_variable();
        row.set_bulk_enabled(regime.enables_bulk());

        if let SelectionRegime::Singular(item) = &regime {
            self.render_item_actions(item, row);
        }

        regime
    }

    fn render_item_actions(&self, item: &ItemId, row: &mut ActionRow) {
        let Some(descriptors) = self.registry.actions_for(item) else {
            tracing::debug!("No actions attached to item '{}'", item);
            return;
        };

        let mut rendered = 0;
        for descriptor in &descriptors {
            if descriptor.html.is_empty() {
                continue;
            }
            if row.append(render_entry(descriptor)) {
                rendered += 1;
            } else {
                tracing::warn!(
                    "Action id '{}' of item '{}' already in the action row, skipped",
                    descriptor.id,
                    item
                );
            }
        }

        // Hooks only follow markup that actually landed in the row.
        if rendered > 0 {
            self.hooks.run(row, item);
        }
    }
}

fn render_entry(descriptor: &ActionDescriptor) -> RowEntry {
    RowEntry {
        id: descriptor.id.clone(),
        html: descriptor.html.clone(),
        href: descriptor
            .is_plain_link()
            .then(|| descriptor.link.clone()),
        popup: descriptor.popup().map(|popup_type| PopupBinding {
            link: descriptor.link.clone(),
            popup_type: popup_type.to_string(),
        }),
        always_present: false,
    }
}
