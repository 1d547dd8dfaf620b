//! shibuya-view binary entrypoint kept minimal. The full runtime lives in `app`.

mod args;

use std::fmt;
use std::sync::OnceLock;

use clap::Parser;
use shibuya_view::app::StartupError;
use shibuya_view::{app, config};

struct ViewerTimer;

impl tracing_subscriber::fmt::time::FormatTime for ViewerTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S");
        write!(w, "{ts}")
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

fn env_filter(level: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
}

/// What: Initialize tracing to `~/.config/shibuya-view/logs/shibuya-view.log`, falling back
/// to stderr when the file cannot be opened.
fn init_logging(level: &str) {
    let mut log_path = config::logs_dir();
    log_path.push("shibuya-view.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(ViewerTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(ViewerTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

/// What: Log a failed run once.
///
/// Details:
/// - `StartupError` was already logged where it was detected, so it only gets a debug line
fn report_run_error(err: &(dyn std::error::Error + Send + Sync + 'static)) {
    if err.downcast_ref::<StartupError>().is_some() {
        tracing::debug!(error = %err, "startup aborted");
    } else {
        tracing::error!(error = %err, "Application error");
    }
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = args::Args::parse();
    init_logging(&args::determine_log_level(&cli));

    let options = args::run_options(&cli);
    tracing::info!(headless = options.headless, "shibuya-view starting");
    let code = match app::run(options).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            report_run_error(err.as_ref());
            eprintln!("shibuya-view: {err}");
            std::process::ExitCode::FAILURE
        }
    };
    tracing::info!("shibuya-view exited");
    code
}
