//! A fully resolved toast request as held by the queue and the coordinator.

use std::sync::{Arc, Weak};
use std::time::Duration;

use super::CompletionHandler;
use super::types::{Position, ToastContent, ToastDuration, ToastId, ToastStyle};
use crate::surface::HostSurface;

/// Immutable description of one toast presentation.
///
/// Built by [`Toast::show`](super::Toast::show) once configuration defaults
/// have been applied. Only the drain callback can be taken out of it, which
/// is what makes that callback fire at most once.
pub struct ToastRequest {
    id: ToastId,
    content: ToastContent,
    style: ToastStyle,
    duration: ToastDuration,
    position: Position,
    host: Option<Weak<dyn HostSurface>>,
    on_all_dismissed: Option<CompletionHandler>,
}

impl ToastRequest {
    pub(crate) fn new(
        content: ToastContent,
        style: ToastStyle,
        duration: ToastDuration,
        position: Position,
        host: Option<Weak<dyn HostSurface>>,
        on_all_dismissed: Option<CompletionHandler>,
    ) -> Self {
        Self {
            id: ToastId::next(),
            content,
            style,
            duration,
            position,
            host,
            on_all_dismissed,
        }
    }

    pub fn id(&self) -> ToastId {
        self.id
    }

    pub fn content(&self) -> &ToastContent {
        &self.content
    }

    pub fn style(&self) -> ToastStyle {
        self.style
    }

    pub fn duration(&self) -> ToastDuration {
        self.duration
    }

    /// Time on screen between entry and exit transitions.
    pub fn display_time(&self) -> Duration {
        self.duration.length()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Whether the caller named a host instead of the shared overlay.
    pub fn has_host(&self) -> bool {
        self.host.is_some()
    }

    /// Upgrade the host reference. `None` inside `Some` means the host is gone.
    pub(crate) fn host(&self) -> Option<Option<Arc<dyn HostSurface>>> {
        self.host.as_ref().map(Weak::upgrade)
    }

    pub(crate) fn take_on_all_dismissed(&mut self) -> Option<CompletionHandler> {
        self.on_all_dismissed.take()
    }
}

impl std::fmt::Debug for ToastRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastRequest")
            .field("id", &self.id)
            .field("content", &self.content)
            .field("style", &self.style)
            .field("duration", &self.duration)
            .field("position", &self.position)
            .field("has_host", &self.host.is_some())
            .field("has_callback", &self.on_all_dismissed.is_some())
            .finish()
    }
}
