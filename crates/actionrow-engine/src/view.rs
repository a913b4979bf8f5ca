//! View mode resolution.

use actionrow_core::ViewMode;

use crate::collaborators::PageProbe;

/// Outcome of resolving the view mode at page initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedView {
    pub mode: ViewMode,
    /// The list is empty and the select-all control must be hidden.
    pub hide_select_all: bool,
}

/// Determine the active view mode.
///
/// Medium wins over Large when both containers are present; Small is the
/// fallback. The result is meant to be computed once and handed to every
/// component that needs it.
pub fn resolve_view_mode(probe: &dyn PageProbe) -> ResolvedView {
    let mode = [ViewMode::Medium, ViewMode::Large]
        .into_iter()
        .find(|mode| mode.container_id().is_some_and(|id| probe.contains(id)))
        .unwrap_or(ViewMode::Small);

    let hide_select_all = mode
        .empty_marker_id()
        .is_some_and(|marker| probe.contains(marker));

    tracing::debug!(
        "Resolved view mode {:?} (hide select all: {})",
        mode,
        hide_select_all
    );

    ResolvedView {
        mode,
        hide_select_all,
    }
}
