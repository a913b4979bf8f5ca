//! Seams to the surrounding page.
//!
//! The engine never touches a document, a network connection or a window
//! directly. Everything it needs from the outside goes through the traits
//! below, which keeps the reconciliation and bulk logic testable without a
//! browser.

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Page Probe
// =============================================================================

/// Answers which elements exist in the page.
#[cfg_attr(test, mockall::automock)]
pub trait PageProbe {
    /// Whether an element with the given id is present.
    fn contains(&self, element_id: &str) -> bool;
}

// =============================================================================
// Lock Check
// =============================================================================

/// Request of the lock-check remote call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockCheckRequest {
    /// Endpoint the call is sent to. Not part of the payload.
    #[serde(skip)]
    pub endpoint: String,

    #[serde(rename = "Action")]
    pub action: String,

    #[serde(rename = "Subaction")]
    pub subaction: String,

    /// JSON encoded, semicolon terminated list of item ids.
    #[serde(rename = "TicketIDs")]
    pub ticket_ids: String,
}

/// Response of the lock-check remote call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockCheckResponse {
    /// Empty when nothing is locked, otherwise a readable list of the
    /// excluded items and why.
    #[serde(rename = "Message", alias = "message", default)]
    pub message: String,
}

impl LockCheckResponse {
    pub fn clear() -> Self {
        Self::default()
    }

    pub fn locked(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn is_clear(&self) -> bool {
        self.message.is_empty()
    }
}

/// Failure of the transport carrying the lock check.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Issues lock-check calls.
///
/// Request framing, headers and session tokens are the implementor's
/// business. The returned future is awaited exactly once per bulk press.
pub trait LockChecker: Send + Sync {
    fn check_locks(
        &self,
        request: LockCheckRequest,
    ) -> BoxFuture<'static, Result<LockCheckResponse, TransportError>>;
}

// =============================================================================
// Popups
// =============================================================================

/// Opens popup windows.
#[cfg_attr(test, mockall::automock)]
pub trait PopupOpener: Send + Sync {
    /// Open `url` in the popup slot identified by `popup_type`, reusing the
    /// slot if it is already open.
    fn open(&self, url: &str, popup_type: &str);
}

// =============================================================================
// Dialogs
// =============================================================================

/// Handle of a shown dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogHandle(pub u64);

/// What a dialog button does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogCommand {
    Close,
}

/// A dialog button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogAction {
    pub label: String,
    pub command: DialogCommand,
}

impl DialogAction {
    pub fn close(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            command: DialogCommand::Close,
        }
    }

    /// Run the button's command against the dialog it belongs to.
    pub fn invoke(&self, presenter: &dyn DialogPresenter, handle: DialogHandle) {
        match self.command {
            DialogCommand::Close => presenter.close(handle),
        }
    }
}

/// Everything needed to show a modal notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogSpec {
    pub body: String,
    pub title: String,
    pub height: String,
    pub position: String,
    pub modal: bool,
    pub actions: Vec<DialogAction>,
}

/// Shows and closes modal dialogs.
#[cfg_attr(test, mockall::automock)]
pub trait DialogPresenter: Send + Sync {
    fn show(&self, spec: DialogSpec) -> DialogHandle;

    fn close(&self, handle: DialogHandle);
}

// =============================================================================
// Test Doubles
// =============================================================================
