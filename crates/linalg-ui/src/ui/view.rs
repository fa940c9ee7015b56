//! Incremental projection bookkeeping
//!
//! A host that mirrors [`UiState`] onto a real document keeps a
//! [`ViewCursor`] so each sync touches only what changed: toasts already on
//! screen keep their nodes (and their running animations), and the result
//! area is scrolled once per rendered result.

use super::toast::{Notification, NotificationPhase};
use super::UiState;

/// Notification changes since the previous sync
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ToastChanges<'a> {
    /// Ids that are no longer live
    pub removed: Vec<u64>,
    /// Ids already shown that have started leaving
    pub leaving: Vec<u64>,
    /// Notifications not shown yet, oldest first
    pub added: Vec<&'a Notification>,
}

impl ToastChanges<'_> {
    /// True when the shown toasts are already current
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.leaving.is_empty() && self.added.is_empty()
    }
}

/// What a host last projected
#[derive(Debug, Default, Clone)]
pub struct ViewCursor {
    scrolls_seen: usize,
    shown: Vec<(u64, NotificationPhase)>,
}

impl ViewCursor {
    /// Fresh cursor; nothing projected yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True once per batch of new scroll requests
    pub fn take_scroll(&mut self, ui: &UiState) -> bool {
        let requested = ui.scroll_requests();
        let pending = requested > self.scrolls_seen;
        self.scrolls_seen = requested;
        pending
    }

    /// Diffs the live notifications against the ones last shown, by id
    pub fn toast_changes<'a>(&mut self, ui: &'a UiState) -> ToastChanges<'a> {
        let live = ui.notifications();
        let mut changes = ToastChanges::default();

        for &(id, _) in &self.shown {
            if !live.iter().any(|n| n.id == id) {
                changes.removed.push(id);
            }
        }
        for n in live.iter() {
            match self.shown.iter().find(|(id, _)| *id == n.id) {
                None => changes.added.push(n),
                Some(&(_, phase)) if phase != n.phase && n.phase == NotificationPhase::Leaving => {
                    changes.leaving.push(n.id);
                }
                Some(_) => {}
            }
        }

        self.shown = live.iter().map(|n| (n.id, n.phase)).collect();
        changes
    }
}
