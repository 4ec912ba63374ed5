//! Transient in-app notification ("toast") presentation.
//!
//! Serializes toast requests through a single coordinator, animates each
//! toast in and out of a host surface, and fires drain callbacks once the
//! queue empties. Rendering is left to the host through [`HostSurface`].
//!
//! ```ignore
//! use toasty::{ShowMode, ShowOptions, ToastConfig, ToastDuration, ToastManager, ToastStyle};
//!
//! let manager = ToastManager::start(ToastConfig::default(), overlays);
//! toasty::install_shared(manager);
//!
//! toasty::create_toast("Saved", None, ToastStyle::Success)
//!     .show(ShowOptions::new().with_mode(ShowMode::Queued).with_duration(ToastDuration::Long))?;
//! ```

pub mod animator;
pub mod config;
pub mod manager;
pub mod queue;
pub mod surface;
pub mod timer;
pub mod toast;

#[cfg(test)]
mod testing;

pub use config::ToastConfig;
pub use manager::{
    Coordinator, ManagerSnapshot, Phase, ToastEvent, ToastManager, close_shared, install_shared,
    shared,
};
pub use surface::{
    Frame, HostSurface, NoOverlay, OverlayOptions, OverlayProvider, Size, SurfaceBounds,
    ToastElement,
};
pub use toast::types::{
    Position, Segment, ShowMode, StylePalette, ToastContent, ToastDuration, ToastId, ToastStyle,
};
pub use toast::{CompletionHandler, ShowOptions, Toast, create_toast};

/// Errors reported by the toast system.
#[derive(Debug, thiserror::Error)]
pub enum ToastError {
    #[error("Invalid toast duration: {0} seconds (must be positive and finite)")]
    InvalidDuration(f64),

    #[error("No surface available: {0}")]
    SurfaceUnavailable(String),

    #[error("Toast manager not initialized")]
    NotInitialized,

    #[error("Toast manager is closed")]
    ManagerClosed,

    #[error("Invalid setting {key}: {reason}")]
    InvalidSetting { key: String, reason: String },
}

/// Result type alias for toast operations.
pub type Result<T> = std::result::Result<T, ToastError>;
