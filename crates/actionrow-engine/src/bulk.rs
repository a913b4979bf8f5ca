//! Bulk action trigger.
//!
//! A bulk press never navigates directly. The selected items are first sent
//! to a lock check; only when nothing is locked does the follow-up surface
//! open in its popup slot.
//!
//! ## Invocation Flow
//!
//! ```text
//! press
//!   │
//!   ▼
//! bulk inactive? ──yes──► Inactive (no effect)
//!   │ no
//!   ▼
//! collect checked ids, build URL, issue lock check   (synchronous)
//!   │
//!   ▼
//! await response ──transport error──► Err
//!   │
//!   ├── message non-empty ──► dialog, Blocked
//!   └── message empty ──────► popup, Opened
//! ```
//!
//! Everything before the await happens at press time, so the returned
//! future borrows nothing and the selection may change while it is pending.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;

use actionrow_core::{ActionRowConfig, DialogConfig};

use crate::collaborators::{
    DialogAction, DialogPresenter, DialogSpec, LockCheckRequest, LockChecker, PopupOpener,
};
use crate::error::{EngineError, EngineResult};
use crate::overview::Overview;
use crate::row::ActionRow;

// =============================================================================
// Session Context
// =============================================================================

/// Session key/value pairs carried into the follow-up URL, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionInfo(Vec<(String, String)>);

impl SessionInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((key.into(), value.into()));
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SessionInfo {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Serialize session data as `;key=value` segments, percent-encoding both sides.
pub fn serialize_session(session: &SessionInfo) -> String {
    session
        .0
        .iter()
        .map(|(key, value)| {
            format!(
                ";{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect()
}

// =============================================================================
// Selection Encodings
// =============================================================================

/// Checked item values in the two forms a bulk press needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BulkSelection {
    /// `TicketID=1;TicketID=2;`
    pub(crate) url_form: String,
    /// `1;2;`
    pub(crate) raw_form: String,
}

impl BulkSelection {
    pub(crate) fn collect(overview: &Overview, parameter: &str) -> Self {
        let mut url_form = String::new();
        let mut raw_form = String::new();
        for checkbox in overview.checked() {
            url_form.push_str(&format!("{}={};", parameter, checkbox.value));
            raw_form.push_str(&format!("{};", checkbox.value));
        }
        Self { url_form, raw_form }
    }
}

// =============================================================================
// Outcome
// =============================================================================

/// What a bulk press ended in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkOutcome {
    /// Bulk action was inactive at press time.
    Inactive,
    /// Some items are locked; the notice was shown.
    Blocked { message: String },
    /// Follow-up surface opened at `url`.
    Opened { url: String },
}

// =============================================================================
// Bulk Trigger
// =============================================================================

/// Guards the bulk action behind the remote lock check.
///
/// Every press issues its own lock check and acts on its own response.
/// Overlapping presses are neither coalesced nor cancelled.
pub struct BulkTrigger {
    config: ActionRowConfig,
    session: SessionInfo,
    lock_checker: Arc<dyn LockChecker>,
    popups: Arc<dyn PopupOpener>,
    dialogs: Arc<dyn DialogPresenter>,
    /// Press counter, for log correlation only.
    presses: AtomicU64,
}

impl BulkTrigger {
    pub fn new(
        config: ActionRowConfig,
        session: SessionInfo,
        lock_checker: Arc<dyn LockChecker>,
        popups: Arc<dyn PopupOpener>,
        dialogs: Arc<dyn DialogPresenter>,
    ) -> Self {
        Self {
            config,
            session,
            lock_checker,
            popups,
            dialogs,
            presses: AtomicU64::new(0),
        }
    }

    /// URL of the follow-up multi-item surface for `selection`.
    pub(crate) fn follow_up_url(&self, selection: &BulkSelection) -> String {
        format!(
            "{}Action={};{}{}",
            self.config.baselink,
            self.config.bulk.action,
            selection.url_form,
            serialize_session(&self.session)
        )
    }

    /// Handle a press of the bulk action control.
    ///
    /// The selection is read and the lock check issued before this returns.
    /// Default navigation is always suppressed; all navigation goes through
    /// the popup opener. A failing transport is returned to the caller
    /// without showing anything.
    pub fn invoke(
        &self,
        row: &ActionRow,
        overview: &Overview,
    ) -> BoxFuture<'static, EngineResult<BulkOutcome>> {
        if !row.bulk_enabled() {
            tracing::debug!("Bulk action pressed while inactive, ignoring");
            return Box::pin(async { EngineResult::Ok(BulkOutcome::Inactive) });
        }

        let selection = BulkSelection::collect(overview, &self.config.bulk.item_parameter);
        let url = self.follow_up_url(&selection);
        let request = LockCheckRequest {
            endpoint: self.config.cgi_handle.clone(),
            action: self.config.bulk.action.clone(),
            subaction: self.config.bulk.subaction.clone(),
            ticket_ids: serde_json::Value::String(selection.raw_form).to_string(),
        };

        let press = self.presses.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!("Bulk press {}: checking locks", press);
        let lock_check = self.lock_checker.check_locks(request);

        let popups = Arc::clone(&self.popups);
        let dialogs = Arc::clone(&self.dialogs);
        let popup_type = self.config.bulk.popup_type.clone();
        let dialog = self.config.dialog.clone();

        Box::pin(async move {
            let response = match lock_check.await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!("Bulk press {}: lock check failed: {}", press, e);
                    return Err(EngineError::Transport(e));
                }
            };

            if response.is_clear() {
                tracing::info!("Bulk press {}: no locked items, opening popup", press);
                popups.open(&url, &popup_type);
                Ok(BulkOutcome::Opened { url })
            } else {
                tracing::info!("Bulk press {}: blocked by locked items", press);
                dialogs.show(lock_notice(&dialog, &response.message));
                Ok(BulkOutcome::Blocked {
                    message: response.message,
                })
            }
        })
    }
}

/// Modal notice listing the locked items, with a single close button.
fn lock_notice(config: &DialogConfig, message: &str) -> DialogSpec {
    DialogSpec {
        body: format!("<p style=\"width:{};\">{}</p>", config.body_width, message),
        title: config.title.clone(),
        height: config.height.clone(),
        position: config.position.clone(),
        modal: true,
        actions: vec![DialogAction::close(config.close_label.clone())],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::testing::ScriptedLockChecker;
    use crate::collaborators::{
        DialogCommand, DialogHandle, LockCheckResponse, MockDialogPresenter, MockPopupOpener,
        TransportError,
    };

    fn selected(ids: &[&str]) -> (ActionRow, Overview) {
        let mut overview = Overview::from_ids(["1", "2", "3"]);
        for id in ids {
            overview.set_checked(&(*id).into(), true);
        }
        let mut row = ActionRow::new().with_always_present("BulkAction", "<li/>");
        row.set_bulk_enabled(!ids.is_empty());
        (row, overview)
    }

    fn trigger(
        checker: Arc<ScriptedLockChecker>,
        popups: MockPopupOpener,
        dialogs: MockDialogPresenter,
    ) -> BulkTrigger {
        BulkTrigger::new(
            ActionRowConfig::default(),
            SessionInfo::new().with("OTRSAgentInterface", "abc 123"),
            checker,
            Arc::new(popups),
            Arc::new(dialogs),
        )
    }

    #[test]
    fn test_serialize_session() {
        let session: SessionInfo = [("Session ID", "a&b"), ("ChallengeToken", "xyz")]
            .into_iter()
            .collect();
        assert_eq!(
            serialize_session(&session),
            ";Session%20ID=a%26b;ChallengeToken=xyz"
        );
        assert_eq!(serialize_session(&SessionInfo::new()), "");
    }

    #[test]
    fn test_selection_encodings() {
        let (_, overview) = selected(&["1", "3"]);
        let selection = BulkSelection::collect(&overview, "TicketID");
        assert_eq!(selection.url_form, "TicketID=1;TicketID=3;");
        assert_eq!(selection.raw_form, "1;3;");
    }

    #[test]
    fn test_lock_notice() {
        let spec = lock_notice(&DialogConfig::default(), "Ticket 2 is locked.");
        assert_eq!(spec.body, "<p style=\"width:400px;\">Ticket 2 is locked.</p>");
        assert_eq!(spec.title, "Cannot proceed");
        assert!(spec.modal);
        assert_eq!(spec.actions.len(), 1);
        assert_eq!(spec.actions[0].command, DialogCommand::Close);
    }

    #[tokio::test]
    async fn test_inactive_press_has_no_effect() {
        let checker = Arc::new(ScriptedLockChecker::new());
        let trigger = trigger(
            checker.clone(),
            MockPopupOpener::new(),
            MockDialogPresenter::new(),
        );
        let (row, overview) = selected(&[]);

        let outcome = trigger.invoke(&row, &overview).await.unwrap();

        assert_eq!(outcome, BulkOutcome::Inactive);
        assert_eq!(checker.request_count(), 0);
    }

    #[tokio::test]
    async fn test_inactive_is_rechecked_at_press_time() {
        let checker = Arc::new(ScriptedLockChecker::new());
        let trigger = trigger(
            checker.clone(),
            MockPopupOpener::new(),
            MockDialogPresenter::new(),
        );
        // Items are checked but the row was reconciled to inactive.
        let (mut row, overview) = selected(&["1"]);
        row.set_bulk_enabled(false);

        let outcome = trigger.invoke(&row, &overview).await.unwrap();

        assert_eq!(outcome, BulkOutcome::Inactive);
        assert_eq!(checker.request_count(), 0);
    }

    #[tokio::test]
    async fn test_lock_conflict_shows_notice() {
        let checker = Arc::new(
            ScriptedLockChecker::new().reply(Ok(LockCheckResponse::locked(
                "Ticket 2 is locked by another agent.",
            ))),
        );
        let mut dialogs = MockDialogPresenter::new();
        dialogs
            .expect_show()
            .withf(|spec| spec.body.contains("Ticket 2 is locked by another agent."))
            .times(1)
            .return_const(DialogHandle(1));
        let mut popups = MockPopupOpener::new();
        popups.expect_open().never();
        let trigger = trigger(checker.clone(), popups, dialogs);
        let (row, overview) = selected(&["1", "2"]);

        let outcome = trigger.invoke(&row, &overview).await.unwrap();

        assert_eq!(
            outcome,
            BulkOutcome::Blocked {
                message: "Ticket 2 is locked by another agent.".to_string()
            }
        );
        let requests = checker.requests.lock();
        assert_eq!(requests[0].endpoint, "index.pl");
        assert_eq!(requests[0].action, "AgentTicketBulk");
        assert_eq!(requests[0].subaction, "AJAXIgnoreLockedTicketIDs");
        assert_eq!(requests[0].ticket_ids, "\"1;2;\"");
    }

    #[tokio::test]
    async fn test_lock_clear_opens_popup() {
        let checker = Arc::new(ScriptedLockChecker::new().reply(Ok(LockCheckResponse::clear())));
        let mut popups = MockPopupOpener::new();
        popups
            .expect_open()
            .withf(|url, popup_type| {
                url.contains("TicketID=1;TicketID=2;") && popup_type == "TicketAction"
            })
            .times(1)
            .return_const(());
        let mut dialogs = MockDialogPresenter::new();
        dialogs.expect_show().never();
        let trigger = trigger(checker, popups, dialogs);
        let (row, overview) = selected(&["1", "2"]);

        let outcome = trigger.invoke(&row, &overview).await.unwrap();

        assert_eq!(
            outcome,
            BulkOutcome::Opened {
                url: "index.pl?Action=AgentTicketBulk;TicketID=1;TicketID=2;;OTRSAgentInterface=abc%20123"
                    .to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let checker = Arc::new(
            ScriptedLockChecker::new().reply(Err(TransportError::new("connection reset"))),
        );
        let mut popups = MockPopupOpener::new();
        popups.expect_open().never();
        let mut dialogs = MockDialogPresenter::new();
        dialogs.expect_show().never();
        let trigger = trigger(checker, popups, dialogs);
        let (row, overview) = selected(&["1"]);

        let result = trigger.invoke(&row, &overview).await;

        assert!(matches!(result, Err(EngineError::Transport(_))));
    }

    #[tokio::test]
    async fn test_overlapping_presses_act_independently() {
        let checker = Arc::new(ScriptedLockChecker::new());
        let first = checker.deferred();
        let second = checker.deferred();
        let mut popups = MockPopupOpener::new();
        popups
            .expect_open()
            .withf(|url, _| url.contains("TicketID=1;TicketID=2;"))
            .times(1)
            .return_const(());
        let mut dialogs = MockDialogPresenter::new();
        dialogs.expect_show().never();
        let trigger = trigger(checker.clone(), popups, dialogs);
        let (row, overview) = selected(&["1", "2"]);

        let a = trigger.invoke(&row, &overview);
        let b = trigger.invoke(&row, &overview);
        assert_eq!(checker.request_count(), 2);

        // The later press fails before the earlier one answers.
        let _ = second.send(Err(TransportError::new("reset")));
        let _ = first.send(Ok(LockCheckResponse::clear()));
        let (a, b) = futures::join!(a, b);

        assert!(matches!(a.unwrap(), BulkOutcome::Opened { .. }));
        assert!(matches!(b, Err(EngineError::Transport(_))));
    }

    #[tokio::test]
    async fn test_selection_is_captured_at_press_time() {
        let checker = Arc::new(ScriptedLockChecker::new());
        let reply = checker.deferred();
        let mut popups = MockPopupOpener::new();
        popups
            .expect_open()
            .withf(|url, _| url.contains("TicketID=1;TicketID=2;"))
            .times(1)
            .return_const(());
        let trigger = trigger(checker.clone(), popups, MockDialogPresenter::new());
        let (row, mut overview) = selected(&["1", "2"]);

        let pending = trigger.invoke(&row, &overview);
        overview.set_checked(&"2".into(), false);
        let _ = reply.send(Ok(LockCheckResponse::clear()));

        assert!(matches!(pending.await.unwrap(), BulkOutcome::Opened { .. }));
        assert_eq!(checker.requests.lock()[0].ticket_ids, "\"1;2;\"");
    }
}
