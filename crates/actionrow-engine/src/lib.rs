//! Action row engine for the ticket overview.
//!
//! This crate provides the behavior above the ticket list:
//! - Per-item action registry
//! - Selection reconciliation (Empty / Singular / Plural)
//! - Post-render hooks for page specific widgets
//! - View mode resolution
//! - Lock-checked bulk action trigger
//! - A controller broadcasting row snapshots

pub mod bulk;
pub mod collaborators;
pub mod controller;
pub mod error;
pub mod hooks;
pub mod overview;
pub mod reconcile;
pub mod registry;
pub mod row;
pub mod view;

// Re-export commonly used types
pub use bulk::{serialize_session, BulkOutcome, BulkTrigger, SessionInfo};
pub use collaborators::{
    DialogAction, DialogCommand, DialogHandle, DialogPresenter, DialogSpec, LockCheckRequest,
    LockCheckResponse, LockChecker, PageProbe, PopupOpener, TransportError,
};
pub use controller::{ActionRowController, ActionRowSnapshot, Collaborators};
pub use error::{EngineError, EngineResult};
pub use hooks::{PostRenderHook, PostRenderHooks};
pub use overview::{ItemCheckbox, Overview, SelectAllControl};
pub use reconcile::{SelectionReconciler, SelectionRegime};
pub use registry::ActionRegistry;
pub use row::{ActionRow, EntryClick, PopupBinding, RowEntry};
pub use view::{resolve_view_mode, ResolvedView};

// Re-export actionrow_core types for convenience
pub use actionrow_core::{ActionDescriptor, ActionPayload, ActionRowConfig, ItemId, ViewMode};
