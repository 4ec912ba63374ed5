//! A host surface that renders toasts as log lines.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use toasty::{
    Frame, HostSurface, OverlayOptions, OverlayProvider, Size, SurfaceBounds, ToastElement,
    ToastId,
};

/// Logical screen of a typical phone, in points.
const SCREEN: SurfaceBounds = SurfaceBounds {
    width: 390.0,
    height: 844.0,
    safe_top: 47.0,
    safe_bottom: 34.0,
};

const CHAR_WIDTH: f32 = 8.0;
const LINE_HEIGHT: f32 = 20.0;

/// Pretends to lay out and draw toasts; logs what a real renderer would do.
#[derive(Debug)]
pub struct ConsoleSurface {
    name: &'static str,
    /// Last frame per attached toast, used to log only resting positions.
    attached: Mutex<HashMap<ToastId, (Size, Frame)>>,
}

impl ConsoleSurface {
    pub fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            attached: Mutex::new(HashMap::new()),
        })
    }

    /// Rough text layout: fixed-width glyphs wrapped at `max_width`, plus
    /// the palette padding.
    fn measure(element: &ToastElement) -> Size {
        let (pad_v, pad_h) = element.palette.padding;
        let text_width = element.content.plain_text().chars().count() as f32 * CHAR_WIDTH;
        let line_width = (element.max_width - 2.0 * pad_h).max(CHAR_WIDTH);
        let lines = (text_width / line_width).ceil().max(1.0);
        Size::new(
            (text_width.min(line_width) + 2.0 * pad_h).min(element.max_width),
            lines * LINE_HEIGHT + 2.0 * pad_v,
        )
    }
}

impl HostSurface for ConsoleSurface {
    fn bounds(&self) -> SurfaceBounds {
        SCREEN
    }

    fn attach(&self, element: &ToastElement) -> Size {
        let size = Self::measure(element);
        tracing::info!(
            surface = self.name,
            id = %element.id,
            style = ?element.style,
            background = %format!("#{:06X}", element.palette.background),
            text = %element.content.plain_text(),
            width = size.width,
            height = size.height,
            "attach"
        );
        if let Ok(mut attached) = self.attached.lock() {
            attached.insert(element.id, (size, Frame::default()));
        }
        size
    }

    fn set_frame(&self, id: ToastId, frame: Frame) {
        if let Ok(mut attached) = self.attached.lock() {
            if let Some(entry) = attached.get_mut(&id) {
                entry.1 = frame;
            }
        }
        tracing::trace!(surface = self.name, id = %id, y = frame.y, "frame");
    }

    fn detach(&self, id: ToastId) {
        let last = self
            .attached
            .lock()
            .ok()
            .and_then(|mut attached| attached.remove(&id));
        match last {
            Some((_, frame)) => {
                tracing::info!(surface = self.name, id = %id, last_y = frame.y, "detach")
            }
            None => tracing::debug!(surface = self.name, id = %id, "detach of unknown toast"),
        }
    }
}

/// Builds a [`ConsoleSurface`] standing in for a window-level overlay.
#[derive(Debug, Default)]
pub struct ConsoleOverlay;

impl OverlayProvider for ConsoleOverlay {
    fn create_overlay(&self, options: &OverlayOptions) -> Option<Arc<dyn HostSurface>> {
        tracing::info!(
            above_content = options.above_content,
            pass_through = options.pass_through,
            "Creating console overlay"
        );
        Some(ConsoleSurface::new("overlay"))
    }
}
