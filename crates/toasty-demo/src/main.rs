mod console;

use std::sync::Arc;

use tokio::sync::{broadcast, oneshot};
use tracing_subscriber::EnvFilter;

use toasty::{
    Position, Segment, ShowMode, ShowOptions, Toast, ToastConfig, ToastDuration, ToastEvent,
    ToastManager, ToastStyle, create_toast,
};

use console::{ConsoleOverlay, ConsoleSurface};

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Print every lifecycle event as one JSON line on stdout.
async fn print_events(mut rx: broadcast::Receiver<ToastEvent>) {
    loop {
        match rx.recv().await {
            Ok(event) => match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!("Failed to serialize event: {e}"),
            },
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Event printer lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Queue a mixed batch behind whatever is showing. The returned host must
/// outlive its toast or that toast is dropped.
fn queue_batch(
    manager: &ToastManager,
    done: oneshot::Sender<()>,
) -> anyhow::Result<Arc<ConsoleSurface>> {
    let settings = ConsoleSurface::new("settings-screen");

    let queued = || ShowOptions::new().with_mode(ShowMode::Queued);

    Toast::new("Profile saved", ToastStyle::Success)
        .with_host(&settings)
        .show_on(manager, queued().with_position(Position::Bottom))?;

    Toast::new(
        vec![
            Segment::Bold("Upload failed: ".into()),
            Segment::Colored {
                text: "network unreachable".into(),
                rgb: 0xFFD0D0,
            },
        ],
        ToastStyle::Error,
    )
    .show_on(manager, queued().with_duration(ToastDuration::Average))?;

    // Only the last one can see an empty queue after its exit.
    create_toast("All caught up", None, ToastStyle::Info).show_on(
        manager,
        queued()
            .with_duration(ToastDuration::custom(1.5)?)
            .on_all_dismissed(move || {
                let _ = done.send(());
            }),
    )?;

    Ok(settings)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    load_dotenv();
    let config = ToastConfig::load(|key| std::env::var(key).ok());
    tracing::info!(?config, "Toast configuration loaded");

    let manager = ToastManager::start(config, Arc::new(ConsoleOverlay));
    toasty::install_shared(manager.clone());
    let printer = tokio::spawn(print_events(manager.subscribe()));

    create_toast("Hello World!", None, ToastStyle::Info).show(ShowOptions::default())?;

    let (done_tx, done_rx) = oneshot::channel();
    let _settings = queue_batch(&manager, done_tx)?;

    tokio::select! {
        _ = done_rx => tracing::info!("All toasts dismissed"),
        _ = tokio::signal::ctrl_c() => tracing::info!("Interrupted"),
    }

    let snapshot = manager.snapshot().await.ok();
    tracing::info!(?snapshot, "Shutting down");
    manager.shutdown().await;
    toasty::close_shared();
    drop(manager);
    printer.abort();

    Ok(())
}
