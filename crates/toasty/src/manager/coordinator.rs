//! The single task that owns the queue, the current toast and every surface
//! call.
//!
//! Public handles talk to it over an unbounded channel; timers and the
//! animator report back into the same loop, so state is never touched from
//! two places at once.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::Instant;

use crate::animator::{
    PresentationAnimator, TransitionKind, max_toast_width, offscreen_frame, resting_frame,
};
use crate::config::ToastConfig;
use crate::queue::ToastQueue;
use crate::surface::{Frame, HostSurface, OverlayProvider, SurfaceResolver, ToastElement};
use crate::timer::{ScheduledAction, schedule_after};
use crate::toast::ToastRequest;
use crate::toast::types::{ShowMode, ToastId};

use super::events::{ManagerSnapshot, Phase, ToastEvent};

pub(crate) enum Command {
    Submit {
        request: ToastRequest,
        mode: ShowMode,
    },
    Dismiss,
    DismissTimerFired(ToastId),
    Snapshot(oneshot::Sender<ManagerSnapshot>),
    Shutdown(oneshot::Sender<()>),
}

enum Step {
    Command(Option<Command>),
    Frame,
}

struct ActiveToast {
    request: ToastRequest,
    surface: Arc<dyn HostSurface>,
    phase: Phase,
    resting: Frame,
    offscreen: Frame,
    /// Explicit dismiss that arrived during the entry transition.
    dismiss_requested: bool,
}

/// State machine behind a [`ToastManager`](super::ToastManager).
///
/// Obtained from [`ToastManager::new`](super::ToastManager::new) for hosts
/// that spawn it themselves; [`run`](Self::run) must be polled inside a tokio
/// runtime (timers and frames use tokio time) for the manager to make
/// progress.
pub struct Coordinator {
    config: Arc<ToastConfig>,
    rx: mpsc::UnboundedReceiver<Command>,
    /// Weak so that dropping every handle still ends the loop.
    tx: mpsc::WeakUnboundedSender<Command>,
    events: broadcast::Sender<ToastEvent>,
    queue: ToastQueue,
    resolver: SurfaceResolver,
    animator: PresentationAnimator,
    current: Option<ActiveToast>,
    pending_dismissal: Option<ScheduledAction>,
}

impl Coordinator {
    pub(crate) fn new(
        config: Arc<ToastConfig>,
        overlays: Arc<dyn OverlayProvider>,
        rx: mpsc::UnboundedReceiver<Command>,
        tx: mpsc::WeakUnboundedSender<Command>,
        events: broadcast::Sender<ToastEvent>,
    ) -> Self {
        Self {
            resolver: SurfaceResolver::new(overlays, config.overlay),
            animator: PresentationAnimator::new(config.transition, config.frame_interval),
            config,
            rx,
            tx,
            events,
            queue: ToastQueue::new(),
            current: None,
            pending_dismissal: None,
        }
    }

    /// Process commands and animation frames until shut down or every
    /// handle is dropped.
    pub async fn run(mut self) {
        tracing::info!(
            margin = self.config.margin,
            transition_ms = self.config.transition.as_millis() as u64,
            "Toast coordinator started"
        );

        loop {
            let step = tokio::select! {
                command = self.rx.recv() => Step::Command(command),
                _ = self.animator.tick(), if self.animator.is_running() => Step::Frame,
            };

            match step {
                Step::Command(Some(command)) => {
                    if self.handle(command).is_break() {
                        break;
                    }
                }
                Step::Command(None) => {
                    self.teardown();
                    break;
                }
                Step::Frame => self.on_frame(),
            }
        }

        tracing::info!("Toast coordinator stopped");
    }

    fn handle(&mut self, command: Command) -> ControlFlow<()> {
        match command {
            Command::Submit { request, mode } => self.submit(request, mode),
            Command::Dismiss => self.dismiss(),
            Command::DismissTimerFired(id) => self.on_dismiss_timer_fired(id),
            Command::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
            Command::Shutdown(reply) => {
                self.rx.close();
                self.teardown();
                let _ = reply.send(());
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn submit(&mut self, request: ToastRequest, mode: ShowMode) {
        tracing::debug!(id = %request.id(), ?mode, "Toast submitted");

        if mode == ShowMode::Immediate {
            self.hard_clear();
            let discarded = self.queue.clear();
            if discarded > 0 {
                tracing::debug!(count = discarded, "Discarded queued toasts");
                self.emit(ToastEvent::Discarded { count: discarded });
            }
        }

        self.queue.enqueue(request);
        self.advance();
    }

    /// Tear down the current toast at once: no exit transition, no drain
    /// callback.
    fn hard_clear(&mut self) {
        self.cancel_pending_dismissal();
        self.animator.cancel();
        if let Some(active) = self.current.take() {
            let id = active.request.id();
            active.surface.detach(id);
            tracing::debug!(id = %id, "Toast preempted");
            self.emit(ToastEvent::Preempted { id });
        }
    }

    /// Present the next presentable request if nothing is on screen.
    /// Requests whose surface cannot be resolved are dropped.
    fn advance(&mut self) {
        if self.current.is_some() {
            return;
        }

        while let Some(request) = self.queue.dequeue() {
            match self.resolver.resolve(&request) {
                Ok(surface) => {
                    self.present(request, surface);
                    return;
                }
                Err(e) => {
                    let id = request.id();
                    tracing::warn!(id = %id, error = %e, "Dropping toast");
                    self.emit(ToastEvent::Dropped {
                        id,
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    fn present(&mut self, request: ToastRequest, surface: Arc<dyn HostSurface>) {
        let id = request.id();
        let margin = self.config.margin;
        let bounds = surface.bounds();

        let element = ToastElement::for_request(&request, max_toast_width(&bounds, margin));
        let size = surface.attach(&element);
        let resting = resting_frame(&bounds, size, request.position(), margin);
        let offscreen = offscreen_frame(&bounds, size, request.position(), margin);

        tracing::info!(
            id = %id,
            text = %request.content().plain_text(),
            style = ?request.style(),
            position = ?request.position(),
            duration = ?request.duration(),
            explicit_host = request.has_host(),
            "Presenting toast"
        );
        self.animator.play_entry(surface.clone(), id, offscreen, resting);
        self.current = Some(ActiveToast {
            request,
            surface,
            phase: Phase::Presenting,
            resting,
            offscreen,
            dismiss_requested: false,
        });
        self.emit(ToastEvent::Presenting { id });
    }

    fn on_frame(&mut self) {
        let Some(done) = self.animator.step(Instant::now()) else {
            return;
        };
        match done.kind {
            TransitionKind::Entry => self.on_show_complete(done.id),
            TransitionKind::Exit => self.on_exit_complete(done.id),
        }
    }

    fn on_show_complete(&mut self, id: ToastId) {
        let Some(active) = self
            .current
            .as_mut()
            .filter(|a| a.request.id() == id && a.phase == Phase::Presenting)
        else {
            return;
        };

        if active.dismiss_requested {
            self.begin_exit();
            return;
        }

        active.phase = Phase::DismissPending;
        let display_time = active.request.display_time();
        self.arm_dismissal(id, display_time);
        self.emit(ToastEvent::Shown { id });
    }

    fn arm_dismissal(&mut self, id: ToastId, after: Duration) {
        self.cancel_pending_dismissal();
        let tx = self.tx.clone();
        self.pending_dismissal = Some(schedule_after(after, move || {
            if let Some(tx) = tx.upgrade() {
                let _ = tx.send(Command::DismissTimerFired(id));
            }
        }));
        tracing::debug!(id = %id, after_ms = after.as_millis() as u64, "Dismissal scheduled");
    }

    fn cancel_pending_dismissal(&mut self) {
        if let Some(action) = self.pending_dismissal.take() {
            action.cancel();
        }
    }

    fn on_dismiss_timer_fired(&mut self, id: ToastId) {
        match &self.current {
            Some(active) if active.request.id() == id && active.phase == Phase::DismissPending => {}
            _ => {
                tracing::debug!(id = %id, "Ignoring stale dismissal timer");
                return;
            }
        }
        self.pending_dismissal = None;
        self.begin_exit();
    }

    fn dismiss(&mut self) {
        let Some(active) = self.current.as_mut() else {
            return;
        };
        let phase = active.phase;
        match phase {
            Phase::Presenting => {
                tracing::debug!(
                    id = %active.request.id(),
                    "Dismiss deferred until entry completes"
                );
                active.dismiss_requested = true;
            }
            Phase::DismissPending => {
                self.cancel_pending_dismissal();
                self.begin_exit();
            }
            Phase::Dismissing | Phase::Idle => {}
        }
    }

    fn begin_exit(&mut self) {
        let Some(active) = self.current.as_mut() else {
            return;
        };
        let id = active.request.id();
        active.phase = Phase::Dismissing;
        self.animator.play_exit(active.surface.clone(), id, active.resting, active.offscreen);
        tracing::debug!(id = %id, "Dismissing toast");
        self.emit(ToastEvent::Dismissing { id });
    }

    fn on_exit_complete(&mut self, id: ToastId) {
        let Some(active) = self
            .current
            .take_if(|a| a.request.id() == id && a.phase == Phase::Dismissing)
        else {
            return;
        };
        self.cancel_pending_dismissal();
        tracing::info!(id = %id, "Toast dismissed");
        self.emit(ToastEvent::Dismissed { id });
        self.on_advance_cycle_complete(active.request);
    }

    /// Run the finished toast's drain callback if nothing else is waiting,
    /// then move on.
    fn on_advance_cycle_complete(&mut self, mut finished: ToastRequest) {
        if self.queue.is_empty() && self.current.is_none() {
            if let Some(callback) = finished.take_on_all_dismissed() {
                callback();
            }
            self.emit(ToastEvent::Drained { id: finished.id() });
        }
        self.advance();
    }

    fn snapshot(&self) -> ManagerSnapshot {
        ManagerSnapshot {
            phase: self.current.as_ref().map_or(Phase::Idle, |a| a.phase),
            current: self.current.as_ref().map(|a| a.request.id()),
            queued: self.queue.len(),
        }
    }

    fn teardown(&mut self) {
        self.hard_clear();
        let dropped = self.queue.clear();
        if dropped > 0 {
            tracing::info!(count = dropped, "Dropped queued toasts on shutdown");
        }
    }

    fn emit(&self, event: ToastEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("snapshot", &self.snapshot())
            .field("animator", &self.animator)
            .field("resolver", &self.resolver)
            .finish()
    }
}
