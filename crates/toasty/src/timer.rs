//! Cancellable delayed actions.

use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

/// Handle to an action scheduled with [`schedule_after`].
///
/// Dropping the handle does not cancel the action.
#[derive(Debug, Clone)]
pub struct ScheduledAction {
    token: CancellationToken,
}

impl ScheduledAction {
    /// Prevent the action from running. Safe to call repeatedly, and a no-op
    /// once the action has already run.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Returns `true` when cancelled before `duration` elapsed.
async fn sleep_or_cancel(token: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        _ = token.cancelled() => true,
        _ = sleep(duration) => false,
    }
}

/// Run `action` on the current tokio runtime after `duration`, unless
/// cancelled first.
pub fn schedule_after<F>(duration: Duration, action: F) -> ScheduledAction
where
    F: FnOnce() + Send + 'static,
{
    let token = CancellationToken::new();
    let task_token = token.clone();
    tokio::spawn(async move {
        if sleep_or_cancel(&task_token, duration).await {
            return;
        }
        action();
    });
    ScheduledAction { token }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = count.clone();
        (count, move || {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_action_runs_after_duration() {
        let (count, action) = counter();
        let _handle = schedule_after(Duration::from_secs(2), action);

        sleep(Duration::from_millis(1900)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_fire_prevents_action() {
        let (count, action) = counter();
        let handle = schedule_after(Duration::from_secs(2), action);

        sleep(Duration::from_secs(1)).await;
        handle.cancel();
        assert!(handle.is_cancelled());

        sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_twice_is_noop() {
        let (count, action) = counter();
        let handle = schedule_after(Duration::from_secs(1), action);

        handle.cancel();
        handle.cancel();

        sleep(Duration::from_secs(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_fire_is_noop() {
        let (count, action) = counter();
        let handle = schedule_after(Duration::from_secs(1), action);

        sleep(Duration::from_secs(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        handle.cancel();
        handle.cancel();
        sleep(Duration::from_secs(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
