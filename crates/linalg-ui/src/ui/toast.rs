//! Transient notifications
//!
//! A notification is visible for a fixed time, then leaves; it is dropped
//! once its exit animation has run. Nothing is deduplicated or capped.

use serde::Serialize;
use std::time::Duration;

/// Presentation tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Success styling
    Success,
    /// Error styling
    Error,
}

impl NotificationKind {
    /// CSS class suffix
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPhase {
    /// On screen
    Visible,
    /// Exit animation running
    Leaving,
}

/// A single notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Monotonic id
    pub id: u64,
    /// Text shown
    pub message: String,
    /// Success or error
    pub kind: NotificationKind,
    /// Logical time of creation
    #[serde(skip)]
    pub created_at: Duration,
    /// Current phase
    pub phase: NotificationPhase,
}

/// Ordered set of live notifications
#[derive(Debug, Clone)]
pub struct NotificationStack {
    items: Vec<Notification>,
    next_id: u64,
    visible_for: Duration,
    exit_for: Duration,
}

impl NotificationStack {
    /// Creates an empty stack with the given timings
    #[must_use]
    pub fn new(visible_for: Duration, exit_for: Duration) -> Self {
        Self {
            items: Vec::new(),
            next_id: 0,
            visible_for,
            exit_for,
        }
    }

    /// Adds a notification, returning its id
    pub fn push(&mut self, message: &str, kind: NotificationKind, now: Duration) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notification {
            id,
            message: message.to_string(),
            kind,
            created_at: now,
            phase: NotificationPhase::Visible,
        });
        id
    }

    /// Moves notifications through their phases at logical time `now`
    pub fn advance(&mut self, now: Duration) {
        let visible_for = self.visible_for;
        let gone_after = visible_for + self.exit_for;
        self.items
            .retain(|n| now.saturating_sub(n.created_at) < gone_after);
        for n in &mut self.items {
            if now.saturating_sub(n.created_at) >= visible_for {
                n.phase = NotificationPhase::Leaving;
            }
        }
    }

    /// Live notifications, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    /// Most recent notification
    #[must_use]
    pub fn last(&self) -> Option<&Notification> {
        self.items.last()
    }

    /// Number of live notifications
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing is shown
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Truncates to `max_chars` characters, appending an ellipsis when cut
#[must_use]
pub fn truncate_message(message: &str, max_chars: usize) -> String {
    if message.chars().count() > max_chars {
        let mut cut: String = message.chars().take(max_chars).collect();
        cut.push('…');
        cut
    } else {
        message.to_string()
    }
}
