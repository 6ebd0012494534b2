use std::fs;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;

/// Log to `<data_dir>/typer/typer.log`; stdout belongs to the terminal UI.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`. Hold the returned guard
/// until exit so buffered lines are flushed.
pub fn init_file_logging() -> Option<WorkerGuard> {
    let log_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("typer");
    fs::create_dir_all(&log_dir).ok()?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "typer.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;
    Some(guard)
}

/// While the alternate screen is up, panics (including ones caught around
/// subscriber callbacks) go to the log instead of stderr.
pub fn route_panics_to_log() {
    std::panic::set_hook(Box::new(|info| {
        tracing::error!(target: "typer::panic", %info, "panic");
    }));
}

/// Put the default stderr panic hook back.
pub fn restore_panic_output() {
    drop(std::panic::take_hook());
}
