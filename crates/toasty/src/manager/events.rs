//! Observable coordinator state and lifecycle events.

use serde::Serialize;

use crate::toast::types::ToastId;

/// Lifecycle phase of the current toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing on screen.
    Idle,
    /// Entry transition running.
    Presenting,
    /// Fully shown, dismissal timer armed.
    DismissPending,
    /// Exit transition running.
    Dismissing,
}

/// Point-in-time view of the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ManagerSnapshot {
    pub phase: Phase,
    pub current: Option<ToastId>,
    pub queued: usize,
}

/// Lifecycle notifications, see [`ToastManager::subscribe`](super::ToastManager::subscribe).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ToastEvent {
    /// Attached to its surface, entry transition started.
    Presenting { id: ToastId },
    /// Entry finished; display time started.
    Shown { id: ToastId },
    /// Exit transition started.
    Dismissing { id: ToastId },
    /// Exit finished and the element was detached.
    Dismissed { id: ToastId },
    /// Torn down without an exit transition.
    Preempted { id: ToastId },
    /// Queued toasts thrown away by an immediate submission.
    Discarded { count: usize },
    /// Skipped because no surface could be resolved.
    Dropped { id: ToastId, reason: String },
    /// Queue empty after `id` was dismissed; its drain callback ran.
    Drained { id: ToastId },
}

impl ToastEvent {
    /// Toast the event is about, if any.
    pub fn id(&self) -> Option<ToastId> {
        match self {
            Self::Presenting { id }
            | Self::Shown { id }
            | Self::Dismissing { id }
            | Self::Dismissed { id }
            | Self::Preempted { id }
            | Self::Dropped { id, .. }
            | Self::Drained { id } => Some(*id),
            Self::Discarded { .. } => None,
        }
    }
}
