//! Post-render hooks.
//!
//! Pages sometimes need to re-initialize a widget that lives inside freshly
//! rendered action markup (a queue selector, for instance). Instead of the
//! reconciler knowing about such widgets, the page registers a hook that
//! runs after every single-item render.
//!
//! ## Execution Order
//!
//! Hooks run in registration order. A removed hook never runs again.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use actionrow_core::ItemId;

use crate::row::ActionRow;

/// Global counter for generating unique hook IDs.
static HOOK_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a unique hook ID.
fn generate_hook_id() -> String {
    let id = HOOK_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("hook:{}", id)
}

/// Callback run after the per-item actions of `item` were rendered into the row.
pub type PostRenderHook = Box<dyn Fn(&ActionRow, &ItemId) + Send + Sync>;

struct HookEntry {
    id: String,
    hook: PostRenderHook,
}

/// Registry of post-render hooks.
pub struct PostRenderHooks {
    hooks: RwLock<Vec<HookEntry>>,
}

impl PostRenderHooks {
    /// Create a new empty hook registry.
    pub fn new() -> Self {
        Self {
            hooks: RwLock::new(Vec::new()),
        }
    }

    /// Register a hook. Returns its ID for later removal.
    pub fn add<F>(&self, hook: F) -> String
    where
        F: Fn(&ActionRow, &ItemId) + Send + Sync + 'static,
    {
        let id = generate_hook_id();
        self.hooks.write().push(HookEntry {
            id: id.clone(),
            hook: Box::new(hook),
        });
        tracing::debug!("Added post-render hook (id: {})", id);
        id
    }

    /// Remove a hook by ID.
    ///
    /// Returns true if the hook was found and removed.
    pub fn remove(&self, id: &str) -> bool {
        let mut hooks = self.hooks.write();
        if let Some(pos) = hooks.iter().position(|h| h.id == id) {
            hooks.remove(pos);
            tracing::debug!("Removed post-render hook (id: {})", id);
            return true;
        }
        false
    }

    /// Run every hook in registration order.
    pub fn run(&self, row: &ActionRow, item: &ItemId) {
        for entry in self.hooks.read().iter() {
            (entry.hook)(row, item);
        }
    }

    pub fn len(&self) -> usize {
        self.hooks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.read().is_empty()
    }
}

impl Default for PostRenderHooks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_add_and_remove() {
        let hooks = PostRenderHooks::new();

        let id1 = hooks.add(|_, _| {});
        let id2 = hooks.add(|_, _| {});
        assert!(id1.starts_with("hook:"));
        assert_ne!(id1, id2);
        assert_eq!(hooks.len(), 2);

        assert!(hooks.remove(&id1));
        assert_eq!(hooks.len(), 1);

        // Removing again should return false
        assert!(!hooks.remove(&id1));
    }

    #[test]
    fn test_run_order() {
        let hooks = PostRenderHooks::new();
        let calls = Arc::new(Mutex::new(Vec::new()));

        let c = calls.clone();
        hooks.add(move |_, item| c.lock().push(format!("first:{}", item)));
        let c = calls.clone();
        hooks.add(move |_, item| c.lock().push(format!("second:{}", item)));

        hooks.run(&ActionRow::new(), &"42".into());

        assert_eq!(*calls.lock(), vec!["first:42", "second:42"]);
    }

    #[test]
    fn test_hook_sees_row() {
        let hooks = PostRenderHooks::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s = seen.clone();
        hooks.add(move |row, _| *s.lock() = row.entry_ids());

        let row = ActionRow::new().with_always_present("BulkAction", "<li/>");
        hooks.run(&row, &"1".into());

        assert_eq!(*seen.lock(), vec!["BulkAction"]);
    }
}
