//! Caller-facing toast construction and presentation options.

pub mod request;
pub mod types;

use std::sync::{Arc, Weak};

use crate::manager::{self, ToastManager};
use crate::surface::HostSurface;
use crate::{Result, ToastError};

pub use request::ToastRequest;
use types::{Position, ShowMode, ToastContent, ToastDuration, ToastId, ToastStyle};

/// Callback run when the queue drains after a toast is dismissed.
pub type CompletionHandler = Box<dyn FnOnce() + Send + 'static>;

/// Create a toast for `content`, rendered into `host` or, when `None`, into
/// the shared overlay surface.
pub fn create_toast(
    content: impl Into<ToastContent>,
    host: Option<&Arc<dyn HostSurface>>,
    style: ToastStyle,
) -> Toast {
    Toast {
        content: content.into(),
        style,
        host: host.map(Arc::downgrade),
    }
}

/// A toast that can be shown any number of times.
///
/// Holds only a weak reference to its host: dropping the host before the
/// toast reaches the front of the queue makes the manager skip it.
#[derive(Clone)]
pub struct Toast {
    content: ToastContent,
    style: ToastStyle,
    host: Option<Weak<dyn HostSurface>>,
}

impl Toast {
    /// A toast for the shared overlay surface.
    pub fn new(content: impl Into<ToastContent>, style: ToastStyle) -> Self {
        create_toast(content, None, style)
    }

    /// Render into `host` instead of the shared overlay.
    pub fn with_host<S: HostSurface + 'static>(mut self, host: &Arc<S>) -> Self {
        let host: Weak<S> = Arc::downgrade(host);
        self.host = Some(host);
        self
    }

    pub fn content(&self) -> &ToastContent {
        &self.content
    }

    pub fn style(&self) -> ToastStyle {
        self.style
    }

    /// Show through the process-wide manager installed with
    /// [`install_shared`](crate::install_shared).
    pub fn show(&self, options: ShowOptions) -> Result<ToastId> {
        let manager = manager::shared().ok_or(ToastError::NotInitialized)?;
        self.show_on(&manager, options)
    }

    /// Show through a specific manager.
    ///
    /// Fails only for an invalid custom duration or a closed manager;
    /// problems found later (for example a vanished host) drop the toast
    /// silently.
    pub fn show_on(&self, manager: &ToastManager, options: ShowOptions) -> Result<ToastId> {
        let config = manager.config();
        let duration = options.duration.unwrap_or(config.default_duration);
        duration.validate()?;

        let request = ToastRequest::new(
            self.content.clone(),
            self.style,
            duration,
            options.position.unwrap_or(config.default_position),
            self.host.clone(),
            options.on_all_dismissed,
        );
        let id = request.id();
        manager.submit(request, options.mode.unwrap_or(config.default_mode))?;
        Ok(id)
    }
}

impl std::fmt::Debug for Toast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toast")
            .field("content", &self.content)
            .field("style", &self.style)
            .field("has_host", &self.host.is_some())
            .finish()
    }
}

/// Presentation options for [`Toast::show`].
///
/// Unset fields fall back to the manager's [`ToastConfig`](crate::ToastConfig)
/// (immediate mode, short duration and top position out of the box).
#[derive(Default)]
pub struct ShowOptions {
    pub mode: Option<ShowMode>,
    pub duration: Option<ToastDuration>,
    pub position: Option<Position>,
    on_all_dismissed: Option<CompletionHandler>,
}

impl ShowOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the admission mode.
    pub fn with_mode(mut self, mode: ShowMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Builder: set the display duration.
    pub fn with_duration(mut self, duration: ToastDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Builder: set the anchor edge.
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Builder: run `handler` when all toasts have been dismissed.
    ///
    /// **This is not a per-toast completion.** The handler runs only if the
    /// queue is empty at the moment *this* toast finishes its exit
    /// transition. If another toast is still waiting, or this toast is
    /// pre-empted or cleared by an immediate submission, the handler is
    /// dropped without running.
    pub fn on_all_dismissed(mut self, handler: impl FnOnce() + Send + 'static) -> Self {
        self.on_all_dismissed = Some(Box::new(handler));
        self
    }
}

impl std::fmt::Debug for ShowOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShowOptions")
            .field("mode", &self.mode)
            .field("duration", &self.duration)
            .field("position", &self.position)
            .field("has_callback", &self.on_all_dismissed.is_some())
            .finish()
    }
}
