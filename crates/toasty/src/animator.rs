//! Entry and exit transitions for the toast currently on screen.
//!
//! The animator does not spawn anything: the coordinator polls
//! [`PresentationAnimator::tick`] in its own loop and calls
//! [`PresentationAnimator::step`], so every surface call stays on the
//! coordination task.

use std::future::pending;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval};

use crate::surface::{Frame, HostSurface, Size, SurfaceBounds};
use crate::toast::types::{Position, ToastId};

/// Default length of both entry and exit transitions.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(300);

/// Default time between animation frames (~60 Hz).
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Widest a toast may be inside `bounds` with `margin` on both sides.
pub fn max_toast_width(bounds: &SurfaceBounds, margin: f32) -> f32 {
    (bounds.width - 2.0 * margin).max(0.0)
}

/// Where the toast rests while shown: horizontally centred, at least
/// `margin` from the leading/trailing edges, `margin` away from the safe
/// area of the anchored edge.
pub fn resting_frame(bounds: &SurfaceBounds, size: Size, position: Position, margin: f32) -> Frame {
    let width = size.width.min(max_toast_width(bounds, margin));
    let x = (bounds.width - width) / 2.0;
    let y = match position {
        Position::Top => bounds.safe_top + margin,
        Position::Bottom => bounds.height - bounds.safe_bottom - margin - size.height,
    };
    Frame::new(x, y, width, size.height)
}

/// Same as [`resting_frame`] but pushed fully past the anchored edge.
pub fn offscreen_frame(
    bounds: &SurfaceBounds,
    size: Size,
    position: Position,
    margin: f32,
) -> Frame {
    let resting = resting_frame(bounds, size, position, margin);
    let y = match position {
        Position::Top => -size.height,
        Position::Bottom => bounds.height,
    };
    Frame { y, ..resting }
}

/// Cubic ease-in-out over `0.0..=1.0`.
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Entry,
    Exit,
}

/// Reported once when a transition reaches its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionDone {
    pub kind: TransitionKind,
    pub id: ToastId,
}

struct Transition {
    kind: TransitionKind,
    id: ToastId,
    surface: Arc<dyn HostSurface>,
    from: Frame,
    to: Frame,
    started: Instant,
}

/// Drives at most one transition at a time.
pub struct PresentationAnimator {
    duration: Duration,
    frame_interval: Duration,
    transition: Option<Transition>,
    ticker: Option<Interval>,
}

impl PresentationAnimator {
    pub fn new(duration: Duration, frame_interval: Duration) -> Self {
        Self {
            duration,
            frame_interval: frame_interval.max(Duration::from_millis(1)),
            transition: None,
            ticker: None,
        }
    }

    /// Slide a freshly attached element from `from` (off-screen) to `to`.
    pub fn play_entry(
        &mut self,
        surface: Arc<dyn HostSurface>,
        id: ToastId,
        from: Frame,
        to: Frame,
    ) {
        self.start(TransitionKind::Entry, surface, id, from, to);
    }

    /// Slide the element back out; it is detached when the transition ends.
    pub fn play_exit(
        &mut self,
        surface: Arc<dyn HostSurface>,
        id: ToastId,
        from: Frame,
        to: Frame,
    ) {
        self.start(TransitionKind::Exit, surface, id, from, to);
    }

    fn start(
        &mut self,
        kind: TransitionKind,
        surface: Arc<dyn HostSurface>,
        id: ToastId,
        from: Frame,
        to: Frame,
    ) {
        if let Some(previous) = self.cancel() {
            tracing::warn!(id = %previous, "Transition replaced before completion");
        }
        tracing::debug!(id = %id, ?kind, "Transition started");

        if surface.is_live() {
            surface.set_frame(id, from);
        }
        let mut ticker = interval(self.frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.transition = Some(Transition {
            kind,
            id,
            surface,
            from,
            to,
            started: Instant::now(),
        });
        self.ticker = Some(ticker);
    }

    pub fn is_running(&self) -> bool {
        self.transition.is_some()
    }

    /// Kind and toast of the running transition.
    pub fn current(&self) -> Option<(TransitionKind, ToastId)> {
        self.transition.as_ref().map(|t| (t.kind, t.id))
    }

    /// Abandon the running transition without reporting completion.
    pub fn cancel(&mut self) -> Option<ToastId> {
        self.ticker = None;
        self.transition.take().map(|t| t.id)
    }

    /// Wait for the next frame. Never resolves while idle.
    pub async fn tick(&mut self) {
        match self.ticker.as_mut() {
            Some(ticker) => {
                ticker.tick().await;
            }
            None => pending::<()>().await,
        }
    }

    /// Apply the frame for `now`. Returns the completion exactly once, on the
    /// step that reaches the end. A surface that is no longer live completes
    /// immediately without further frames.
    pub fn step(&mut self, now: Instant) -> Option<TransitionDone> {
        let transition = self.transition.as_ref()?;

        let finished = if transition.surface.is_live() {
            let progress = if self.duration.is_zero() {
                1.0
            } else {
                now.saturating_duration_since(transition.started).as_secs_f32()
                    / self.duration.as_secs_f32()
            };
            let frame = transition.from.lerp(&transition.to, ease_in_out(progress));
            transition.surface.set_frame(transition.id, frame);
            progress >= 1.0
        } else {
            tracing::debug!(id = %transition.id, "Surface gone mid-transition");
            true
        };

        if !finished {
            return None;
        }

        self.ticker = None;
        let transition = self.transition.take()?;
        if transition.kind == TransitionKind::Exit {
            transition.surface.detach(transition.id);
        }
        tracing::debug!(id = %transition.id, kind = ?transition.kind, "Transition finished");
        Some(TransitionDone {
            kind: transition.kind,
            id: transition.id,
        })
    }
}

impl std::fmt::Debug for PresentationAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentationAnimator")
            .field("duration", &self.duration)
            .field("frame_interval", &self.frame_interval)
            .field("current", &self.current())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{BOUNDS, RecordingSurface, SurfaceCall, TOAST_SIZE};

    const MARGIN: f32 = 20.0;

    #[test]
    fn test_top_frames() {
        let rest = resting_frame(&BOUNDS, TOAST_SIZE, Position::Top, MARGIN);
        assert_eq!(rest, Frame::new(45.0, 67.0, 300.0, 44.0));

        let off = offscreen_frame(&BOUNDS, TOAST_SIZE, Position::Top, MARGIN);
        assert_eq!(off.y, -44.0);
        assert_eq!(off.x, rest.x);
    }

    #[test]
    fn test_bottom_frames() {
        let rest = resting_frame(&BOUNDS, TOAST_SIZE, Position::Bottom, MARGIN);
        assert_eq!(rest.y, 844.0 - 34.0 - 20.0 - 44.0);

        let off = offscreen_frame(&BOUNDS, TOAST_SIZE, Position::Bottom, MARGIN);
        assert_eq!(off.y, 844.0);
    }

    #[test]
    fn test_wide_toast_is_inset_by_margin() {
        let rest = resting_frame(&BOUNDS, Size::new(1000.0, 60.0), Position::Top, MARGIN);
        assert_eq!(rest.x, MARGIN);
        assert_eq!(rest.width, 390.0 - 2.0 * MARGIN);
    }

    #[test]
    fn test_ease_endpoints_and_monotonic() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert_eq!(ease_in_out(3.0), 1.0);
        let mut last = 0.0;
        for i in 1..=20 {
            let v = ease_in_out(i as f32 / 20.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_completes_exactly_once() {
        let surface = RecordingSurface::new();
        let id = ToastId::next();
        let from = offscreen_frame(&BOUNDS, TOAST_SIZE, Position::Top, MARGIN);
        let to = resting_frame(&BOUNDS, TOAST_SIZE, Position::Top, MARGIN);

        let mut animator = PresentationAnimator::new(DEFAULT_TRANSITION, DEFAULT_FRAME_INTERVAL);
        let start = Instant::now();
        animator.play_entry(surface.clone(), id, from, to);
        assert_eq!(animator.current(), Some((TransitionKind::Entry, id)));

        assert_eq!(animator.step(start + Duration::from_millis(150)), None);
        let done = animator.step(start + Duration::from_millis(300));
        assert_eq!(
            done,
            Some(TransitionDone {
                kind: TransitionKind::Entry,
                id
            })
        );
        assert_eq!(animator.step(start + Duration::from_millis(400)), None);
        assert!(!animator.is_running());

        let frames = surface.frames(id);
        assert_eq!(frames.first(), Some(&from));
        assert_eq!(frames.last(), Some(&to));
        assert_eq!(surface.detach_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exit_detaches_on_completion() {
        let surface = RecordingSurface::new();
        let id = ToastId::next();
        let rest = resting_frame(&BOUNDS, TOAST_SIZE, Position::Bottom, MARGIN);
        let off = offscreen_frame(&BOUNDS, TOAST_SIZE, Position::Bottom, MARGIN);

        let mut animator = PresentationAnimator::new(DEFAULT_TRANSITION, DEFAULT_FRAME_INTERVAL);
        let start = Instant::now();
        animator.play_exit(surface.clone(), id, rest, off);

        let done = animator.step(start + Duration::from_millis(301)).unwrap();
        assert_eq!(done.kind, TransitionKind::Exit);
        assert_eq!(surface.calls().last(), Some(&SurfaceCall::Detach(id)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dead_surface_completes_without_frames() {
        let surface = RecordingSurface::new();
        let id = ToastId::next();
        let frame = Frame::default();

        let mut animator = PresentationAnimator::new(DEFAULT_TRANSITION, DEFAULT_FRAME_INTERVAL);
        animator.play_entry(surface.clone(), id, frame, frame);
        surface.set_live(false);

        let done = animator.step(Instant::now());
        assert_eq!(done.map(|d| d.id), Some(id));
        assert_eq!(surface.frames(id).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_suppresses_completion() {
        let surface = RecordingSurface::new();
        let id = ToastId::next();

        let mut animator = PresentationAnimator::new(DEFAULT_TRANSITION, DEFAULT_FRAME_INTERVAL);
        let start = Instant::now();
        animator.play_entry(surface, id, Frame::default(), Frame::default());

        assert_eq!(animator.cancel(), Some(id));
        assert_eq!(animator.step(start + Duration::from_secs(1)), None);
        assert_eq!(animator.cancel(), None);
    }
}
