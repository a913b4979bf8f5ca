//! Action Registry
//!
//! Stores the action descriptors the page attached to each overview item.

use parking_lot::RwLock;
use std::collections::HashMap;

use actionrow_core::{ActionDescriptor, ActionPayload, ItemId};

use crate::error::EngineResult;
use crate::overview::Overview;

/// Maps item ids to their action descriptors.
///
/// Written once per item while the page renders, read on every
/// reconciliation pass afterwards.
pub struct ActionRegistry {
    actions: RwLock<HashMap<ItemId, Vec<ActionDescriptor>>>,
}

impl ActionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            actions: RwLock::new(HashMap::new()),
        }
    }

    /// Normalize `payload` and attach it to `item`, replacing any earlier list.
    ///
    /// Returns the number of attached descriptors.
    pub fn attach(&self, item: ItemId, payload: ActionPayload) -> EngineResult<usize> {
        let descriptors = payload.into_descriptors()?;
        let count = descriptors.len();
        tracing::debug!("Attached {} actions to item '{}'", count, item);
        self.actions.write().insert(item, descriptors);
        Ok(count)
    }

    /// Attach actions to an item of `overview`.
    ///
    /// Never fails towards the caller: an item that does not resolve to
    /// exactly one checkbox, or a payload that cannot be normalized, is
    /// logged and nothing is attached. Returns whether anything was attached.
    pub fn add_actions(&self, overview: &Overview, item: &ItemId, payload: ActionPayload) -> bool {
        if !overview.resolves(item) {
            tracing::warn!(
                "Element for item '{}' does not exist or is not unique, actions not attached",
                item
            );
            return false;
        }

        match self.attach(item.clone(), payload) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("No valid action data for item '{}': {}", item, e);
                false
            }
        }
    }

    /// Descriptors attached to `item`, in attachment order.
    pub fn actions_for(&self, item: &ItemId) -> Option<Vec<ActionDescriptor>> {
        self.actions.read().get(item).cloned()
    }

    /// Number of items with attached actions.
    pub fn len(&self) -> usize {
        self.actions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.read().is_empty()
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
