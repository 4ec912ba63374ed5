//! Host surfaces toasts render into, and resolution of which one to use.
//!
//! The rendering itself belongs to the host: the core hands it a
//! [`ToastElement`] to attach, then moves it around with
//! [`HostSurface::set_frame`] and finally removes it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::toast::ToastRequest;
use crate::toast::types::{Position, StylePalette, ToastContent, ToastId, ToastStyle};
use crate::{Result, ToastError};

/// Width and height in host points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Rectangle in host coordinates, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Linear interpolation; `t` is clamped to `0.0..=1.0`.
    pub fn lerp(&self, to: &Frame, t: f32) -> Frame {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Frame {
            x: mix(self.x, to.x),
            y: mix(self.y, to.y),
            width: mix(self.width, to.width),
            height: mix(self.height, to.height),
        }
    }
}

/// Size of a host plus the insets content must stay clear of.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceBounds {
    pub width: f32,
    pub height: f32,
    pub safe_top: f32,
    pub safe_bottom: f32,
}

/// What the host needs to render one toast.
#[derive(Debug, Clone)]
pub struct ToastElement {
    pub id: ToastId,
    pub content: ToastContent,
    pub style: ToastStyle,
    pub palette: StylePalette,
    pub position: Position,
    /// Widest the toast may be laid out.
    pub max_width: f32,
}

impl ToastElement {
    pub(crate) fn for_request(request: &ToastRequest, max_width: f32) -> Self {
        Self {
            id: request.id(),
            content: request.content().clone(),
            style: request.style(),
            palette: request.style().palette(),
            position: request.position(),
            max_width,
        }
    }
}

/// A view a toast can be presented in.
///
/// Calls arrive from the manager's coordinator task only, one at a time.
pub trait HostSurface: Send + Sync {
    /// Whether the surface is still part of a live view hierarchy.
    fn is_live(&self) -> bool {
        true
    }

    fn bounds(&self) -> SurfaceBounds;

    /// Render and add the element, returning its laid-out size.
    fn attach(&self, element: &ToastElement) -> Size;

    fn set_frame(&self, id: ToastId, frame: Frame);

    /// Remove the element. Unknown ids are ignored.
    fn detach(&self, id: ToastId);
}

/// How the fallback overlay must be configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayOptions {
    /// Sit above all normal application content.
    pub above_content: bool,
    /// Let taps that miss every toast reach the content underneath.
    pub pass_through: bool,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            above_content: true,
            pass_through: true,
        }
    }
}

/// Builds the shared overlay used by toasts without an explicit host.
pub trait OverlayProvider: Send + Sync {
    /// `None` when there is no foreground context to build it in.
    fn create_overlay(&self, options: &OverlayOptions) -> Option<Arc<dyn HostSurface>>;
}

/// Provider for hosts that only ever present into explicit surfaces.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOverlay;

impl OverlayProvider for NoOverlay {
    fn create_overlay(&self, _options: &OverlayOptions) -> Option<Arc<dyn HostSurface>> {
        None
    }
}

/// Picks the surface for each request, caching the shared overlay.
pub struct SurfaceResolver {
    provider: Arc<dyn OverlayProvider>,
    options: OverlayOptions,
    overlay: Option<Arc<dyn HostSurface>>,
}

impl SurfaceResolver {
    pub fn new(provider: Arc<dyn OverlayProvider>, options: OverlayOptions) -> Self {
        Self {
            provider,
            options,
            overlay: None,
        }
    }

    pub fn resolve(&mut self, request: &ToastRequest) -> Result<Arc<dyn HostSurface>> {
        match request.host() {
            Some(Some(host)) if host.is_live() => Ok(host),
            Some(Some(_)) => Err(ToastError::SurfaceUnavailable(
                "host is no longer in a live view hierarchy".into(),
            )),
            Some(None) => Err(ToastError::SurfaceUnavailable("host was dropped".into())),
            None => self.overlay(),
        }
    }

    /// The cached overlay, rebuilt if it has gone stale.
    fn overlay(&mut self) -> Result<Arc<dyn HostSurface>> {
        if let Some(overlay) = &self.overlay {
            if overlay.is_live() {
                return Ok(overlay.clone());
            }
            tracing::debug!("Cached overlay surface is no longer live, rebuilding");
            self.overlay = None;
        }

        let overlay = self
            .provider
            .create_overlay(&self.options)
            .ok_or_else(|| {
                ToastError::SurfaceUnavailable("no foreground context for overlay".into())
            })?;
        tracing::info!("Created shared toast overlay surface");
        self.overlay = Some(overlay.clone());
        Ok(overlay)
    }
}

impl std::fmt::Debug for SurfaceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceResolver")
            .field("options", &self.options)
            .field("has_overlay", &self.overlay.is_some())
            .finish()
    }
}
