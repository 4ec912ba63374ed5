//! Test doubles shared by the unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::surface::{
    Frame, HostSurface, OverlayOptions, OverlayProvider, Size, SurfaceBounds, ToastElement,
};
use crate::toast::ToastRequest;
use crate::toast::types::{Position, ToastDuration, ToastId, ToastStyle};

pub(crate) const BOUNDS: SurfaceBounds = SurfaceBounds {
    width: 390.0,
    height: 844.0,
    safe_top: 47.0,
    safe_bottom: 34.0,
};

pub(crate) const TOAST_SIZE: Size = Size {
    width: 300.0,
    height: 44.0,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SurfaceCall {
    Attach(ToastId),
    Frame(ToastId, Frame),
    Detach(ToastId),
}

/// Surface that records every call made to it.
#[derive(Debug)]
pub(crate) struct RecordingSurface {
    live: AtomicBool,
    calls: Mutex<Vec<SurfaceCall>>,
}

impl RecordingSurface {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            live: AtomicBool::new(true),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn set_live(&self, live: bool) {
        self.live.store(live, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Attach and detach calls only, in order.
    pub(crate) fn lifecycle(&self) -> Vec<SurfaceCall> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, SurfaceCall::Frame(..)))
            .collect()
    }

    pub(crate) fn attached(&self) -> Vec<ToastId> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                SurfaceCall::Attach(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn detach_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Detach(_)))
            .count()
    }

    pub(crate) fn frames(&self, id: ToastId) -> Vec<Frame> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                SurfaceCall::Frame(fid, frame) if fid == id => Some(frame),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl HostSurface for RecordingSurface {
    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    fn bounds(&self) -> SurfaceBounds {
        BOUNDS
    }

    fn attach(&self, element: &ToastElement) -> Size {
        self.record(SurfaceCall::Attach(element.id));
        TOAST_SIZE
    }

    fn set_frame(&self, id: ToastId, frame: Frame) {
        self.record(SurfaceCall::Frame(id, frame));
    }

    fn detach(&self, id: ToastId) {
        self.record(SurfaceCall::Detach(id));
    }
}

/// Overlay provider that hands out fresh recording surfaces and counts them.
#[derive(Debug, Default)]
pub(crate) struct CountingOverlay {
    created: AtomicUsize,
    surfaces: Mutex<Vec<Arc<RecordingSurface>>>,
    last_options: Mutex<Option<OverlayOptions>>,
}

impl CountingOverlay {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub(crate) fn last(&self) -> Option<Arc<RecordingSurface>> {
        self.surfaces.lock().unwrap().last().cloned()
    }

    pub(crate) fn last_options(&self) -> Option<OverlayOptions> {
        *self.last_options.lock().unwrap()
    }
}

impl OverlayProvider for CountingOverlay {
    fn create_overlay(&self, options: &OverlayOptions) -> Option<Arc<dyn HostSurface>> {
        self.created.fetch_add(1, Ordering::SeqCst);
        *self.last_options.lock().unwrap() = Some(*options);
        let surface = RecordingSurface::new();
        self.surfaces.lock().unwrap().push(surface.clone());
        Some(surface)
    }
}

fn build(text: &str, host: Option<Weak<dyn HostSurface>>) -> ToastRequest {
    ToastRequest::new(
        text.into(),
        ToastStyle::Info,
        ToastDuration::Short,
        Position::Top,
        host,
        None,
    )
}

pub(crate) fn request(text: &str) -> ToastRequest {
    build(text, None)
}

pub(crate) fn request_on(text: &str, host: &Arc<RecordingSurface>) -> ToastRequest {
    let weak: Weak<RecordingSurface> = Arc::downgrade(host);
    build(text, Some(weak))
}

pub(crate) fn request_with_callback(
    text: &str,
    callback: impl FnOnce() + Send + 'static,
) -> ToastRequest {
    ToastRequest::new(
        text.into(),
        ToastStyle::Info,
        ToastDuration::Short,
        Position::Top,
        None,
        Some(Box::new(callback)),
    )
}
