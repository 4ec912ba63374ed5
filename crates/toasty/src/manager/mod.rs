//! Manager handle and the process-wide shared instance.
//!
//! [`ToastManager`] is a cheap clonable handle; the work happens in a
//! [`Coordinator`] task that owns all presentation state.

mod coordinator;
mod events;


use std::sync::{Arc, LazyLock, RwLock};

use tokio::sync::{broadcast, mpsc, oneshot};

use crate::config::ToastConfig;
use crate::surface::OverlayProvider;
use crate::toast::ToastRequest;
use crate::toast::types::ShowMode;
use crate::{Result, ToastError};

use coordinator::Command;
pub use coordinator::Coordinator;
pub use events::{ManagerSnapshot, Phase, ToastEvent};

const EVENT_CAPACITY: usize = 64;

static SHARED: LazyLock<RwLock<Option<ToastManager>>> = LazyLock::new(|| RwLock::new(None));

/// Handle to a running toast coordinator.
#[derive(Clone)]
pub struct ToastManager {
    tx: mpsc::UnboundedSender<Command>,
    events: broadcast::Sender<ToastEvent>,
    config: Arc<ToastConfig>,
}

impl ToastManager {
    /// Spawn the coordinator on the current tokio runtime.
    pub fn start(config: ToastConfig, overlays: Arc<dyn OverlayProvider>) -> Self {
        let (manager, coordinator) = Self::new(config, overlays);
        tokio::spawn(coordinator.run());
        tracing::info!("Toast manager started");
        manager
    }

    /// Build a handle and its coordinator without spawning, for hosts that
    /// spawn the coordinator themselves. It must still run inside a tokio
    /// runtime: it spawns timer tasks and uses tokio time.
    pub fn new(config: ToastConfig, overlays: Arc<dyn OverlayProvider>) -> (Self, Coordinator) {
        let config = Arc::new(config);
        let (tx, rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let coordinator =
            Coordinator::new(config.clone(), overlays, rx, tx.downgrade(), events.clone());
        (Self { tx, events, config }, coordinator)
    }

    pub fn config(&self) -> &ToastConfig {
        &self.config
    }

    pub(crate) fn submit(&self, request: ToastRequest, mode: ShowMode) -> Result<()> {
        self.send(Command::Submit { request, mode })
    }

    /// Start dismissing the current toast ahead of its timer.
    ///
    /// During the entry transition the exit starts once entry completes.
    /// No-op when nothing is shown or the toast is already leaving.
    pub fn dismiss(&self) -> Result<()> {
        self.send(Command::Dismiss)
    }

    pub async fn snapshot(&self) -> Result<ManagerSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot(reply))?;
        rx.await.map_err(|_| ToastError::ManagerClosed)
    }

    /// Receive lifecycle events. Slow receivers lose the oldest events.
    pub fn subscribe(&self) -> broadcast::Receiver<ToastEvent> {
        self.events.subscribe()
    }

    /// Tear down the current toast, drop everything queued and stop the
    /// coordinator. Drain callbacks do not run. Idempotent.
    pub async fn shutdown(&self) {
        let (reply, rx) = oneshot::channel();
        if self.send(Command::Shutdown(reply)).is_ok() {
            let _ = rx.await;
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    fn send(&self, command: Command) -> Result<()> {
        self.tx.send(command).map_err(|_| ToastError::ManagerClosed)
    }
}

impl std::fmt::Debug for ToastManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastManager")
            .field("config", &self.config)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Make `manager` the process-wide instance used by
/// [`Toast::show`](crate::Toast::show). Returns the one it replaces.
pub fn install_shared(manager: ToastManager) -> Option<ToastManager> {
    let Ok(mut slot) = SHARED.write() else {
        tracing::error!("Shared toast manager lock poisoned");
        return None;
    };
    slot.replace(manager)
}

/// The process-wide instance, if installed.
pub fn shared() -> Option<ToastManager> {
    SHARED.read().ok()?.clone()
}

/// Uninstall the process-wide instance. The coordinator keeps running until
/// its last handle is dropped or it is shut down.
pub fn close_shared() -> Option<ToastManager> {
    SHARED.write().ok()?.take()
}
