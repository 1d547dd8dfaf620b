use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config;
use crate::i18n::Language;
use crate::logic::ViewController;
use crate::viewport::SimulatedViewport;

use super::terminal::{restore_terminal, setup_terminal};

mod background;
mod event_loop;
pub mod init;

use background::{Channels, spawn_event_thread, spawn_tick_worker, spawn_translation_load};
use event_loop::run_event_loop;
use init::{check_access_token, initialize_app_state, resolve_translation_source};

pub use init::StartupError;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Options for one run, usually taken from the command line.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Skip terminal setup and the input thread.
    pub headless: bool,
    /// Translation document path or URL; overrides `settings.conf`.
    pub translations: Option<String>,
    /// Active language; overrides `settings.conf`.
    pub language: Option<Language>,
    /// Exit after this many viewport ticks.
    pub max_ticks: Option<u64>,
}

/// What: Run the Shibuya scene viewer end-to-end: check the access token, build state,
/// start the viewport, load translations in the background, drive the event loop and
/// restore the terminal on exit.
///
/// Inputs:
/// - `options`: Headless flag and command-line overrides
///
/// Output:
/// - `Ok(())` when the UI exits cleanly; `Err` on a missing token or terminal failure
///
/// Details:
/// - A missing token stops the run before any event wiring or viewport creation
/// - The translation load is one-shot; a failure only logs and the labels keep their
///   markup text
/// - Headless runs never touch the terminal; `max_ticks` bounds them
///
/// # Errors
/// - `StartupError::MissingAccessToken` when no token is configured
/// - Terminal setup or drawing errors
pub async fn run(options: RunOptions) -> Result<()> {
    let settings = config::settings();
    check_access_token(&settings)?;

    let app = initialize_app_state(&settings, options.language);
    let mut controller = ViewController::new(app, SimulatedViewport::shibuya());

    let headless = options.headless;
    if !headless {
        setup_terminal()?;
    }
    let mut terminal = if headless {
        None
    } else {
        Some(Terminal::new(CrosstermBackend::new(std::io::stdout()))?)
    };

    let mut channels = Channels::new();
    spawn_event_thread(
        headless,
        channels.event_tx.clone(),
        channels.event_thread_cancelled.clone(),
    );
    spawn_tick_worker(channels.tick_tx.clone(), settings.tick_ms);
    match resolve_translation_source(options.translations.as_deref(), &settings) {
        Some(source) => spawn_translation_load(source, channels.translations_tx.clone()),
        None => tracing::warn!("no translation document found; showing markup labels"),
    }

    run_event_loop(&mut terminal, &mut controller, &mut channels, options.max_ticks).await;

    channels
        .event_thread_cancelled
        .store(true, std::sync::atomic::Ordering::Relaxed);
    if !headless {
        restore_terminal()?;
    }
    tracing::info!(
        frames = controller.state().frame_count,
        language = %controller.state().view.active_language,
        "viewer stopped"
    );
    Ok(())
}
