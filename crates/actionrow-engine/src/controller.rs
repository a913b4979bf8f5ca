//! Action row controller.
//!
//! Wires page input events to the registry, reconciler and bulk trigger.
//!
//! ## Reactive State
//!
//! Every mutation of the row broadcasts an [`ActionRowSnapshot`] through a
//! `tokio::sync::watch` channel. Renderers subscribe and redraw from the
//! snapshot; they never poke at the row directly.

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::watch;

use actionrow_core::{ActionPayload, ActionRowConfig, ItemId, ViewMode};

use crate::bulk::{BulkOutcome, BulkTrigger, SessionInfo};
use crate::collaborators::{DialogPresenter, LockChecker, PageProbe, PopupOpener};
use crate::error::EngineResult;
use crate::hooks::PostRenderHooks;
use crate::overview::Overview;
use crate::reconcile::{SelectionReconciler, SelectionRegime};
use crate::registry::ActionRegistry;
use crate::row::{ActionRow, EntryClick, RowEntry};
use crate::view::resolve_view_mode;

/// External collaborators the controller talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub lock_checker: Arc<dyn LockChecker>,
    pub popups: Arc<dyn PopupOpener>,
    pub dialogs: Arc<dyn DialogPresenter>,
}

/// Visible state of the action row after a mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionRowSnapshot {
    pub entries: Vec<RowEntry>,
    pub bulk_enabled: bool,
    /// `None` until the first reconciliation pass.
    pub regime: Option<SelectionRegime>,
    pub select_all_checked: bool,
    pub select_all_hidden: bool,
}

/// Controls the action row above one ticket overview.
pub struct ActionRowController {
    view_mode: ViewMode,
    overview: Overview,
    row: ActionRow,
    reconciler: SelectionReconciler,
    bulk: BulkTrigger,
    popups: Arc<dyn PopupOpener>,
    regime: Option<SelectionRegime>,
    tx: watch::Sender<ActionRowSnapshot>,
}

impl ActionRowController {
    /// Initialize the controller for a freshly rendered page.
    ///
    /// Resolves the view mode once. `overview` must hold the checkboxes
    /// matched by that mode's [`ViewMode::checkbox_selector`].
    pub fn new(
        config: ActionRowConfig,
        session: SessionInfo,
        probe: &dyn PageProbe,
        mut overview: Overview,
        row: ActionRow,
        collaborators: Collaborators,
    ) -> Self {
        let resolved = resolve_view_mode(probe);
        if resolved.hide_select_all {
            overview.hide_select_all();
        }

        let reconciler = SelectionReconciler::new(
            Arc::new(ActionRegistry::new()),
            Arc::new(PostRenderHooks::new()),
        );
        let bulk = BulkTrigger::new(
            config,
            session,
            collaborators.lock_checker,
            collaborators.popups.clone(),
            collaborators.dialogs,
        );

        let (tx, _rx) = watch::channel(ActionRowSnapshot::default());
        let controller = Self {
            view_mode: resolved.mode,
            overview,
            row,
            reconciler,
            bulk,
            popups: collaborators.popups,
            regime: None,
            tx,
        };
        controller.broadcast();
        controller
    }

    /// Subscribe to row changes. Clone the receiver for each subscriber.
    pub fn subscribe(&self) -> watch::Receiver<ActionRowSnapshot> {
        self.tx.subscribe()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn overview(&self) -> &Overview {
        &self.overview
    }

    pub fn row(&self) -> &ActionRow {
        &self.row
    }

    pub fn registry(&self) -> &Arc<ActionRegistry> {
        self.reconciler.registry()
    }

    pub fn hooks(&self) -> &Arc<PostRenderHooks> {
        self.reconciler.hooks()
    }

    /// Attach the actions of one overview item. See [`ActionRegistry::add_actions`].
    pub fn add_actions(&self, item: impl Into<ItemId>, payload: impl Into<ActionPayload>) -> bool {
        self.registry()
            .add_actions(&self.overview, &item.into(), payload.into())
    }

    /// An item checkbox changed.
    pub fn toggle_item(&mut self, item: impl Into<ItemId>, checked: bool) -> SelectionRegime {
        let item = item.into();
        if !self.overview.set_checked(&item, checked) {
            tracing::warn!("Toggled unknown item '{}'", item);
        }
        // Select-all drops before the pass on uncheck, but is only raised
        // after it on check.
        if !checked {
            self.overview.sync_select_all();
        }
        let regime = self.reconcile(&item);
        self.overview.sync_select_all();
        self.broadcast();
        regime
    }

    /// The select-all control changed.
    ///
    /// Every item checkbox follows, and each one's change handling runs.
    pub fn toggle_select_all(&mut self, checked: bool) -> Option<SelectionRegime> {
        self.overview.set_all(checked);

        let items: Vec<ItemId> = self
            .overview
            .items()
            .iter()
            .map(|c| c.item.clone())
            .collect();
        for item in &items {
            self.reconcile(item);
        }
        self.broadcast();
        self.regime.clone()
    }

    /// Click a rendered entry of the row.
    pub fn click_entry(&self, id: &str) -> EntryClick {
        self.row.click(id, self.popups.as_ref())
    }

    /// The bulk action control was pressed.
    ///
    /// The returned future owns everything it needs, so checkbox changes
    /// can be handled while the lock check is pending.
    pub fn invoke_bulk_action(&self) -> BoxFuture<'static, EngineResult<BulkOutcome>> {
        self.bulk.invoke(&self.row, &self.overview)
    }

    fn reconcile(&mut self, clicked: &ItemId) -> SelectionRegime {
        let regime = self
            .reconciler
            .update_action_row(clicked, &self.overview, &mut self.row);
        self.regime = Some(regime.clone());
        regime
    }

    fn broadcast(&self) {
        let select_all = self.overview.select_all();
        self.tx.send_replace(ActionRowSnapshot {
            entries: self.row.entries().to_vec(),
            bulk_enabled: self.row.bulk_enabled(),
            regime: self.regime.clone(),
            select_all_checked: select_all.checked,
            select_all_hidden: select_all.hidden,
        });
    }
}
