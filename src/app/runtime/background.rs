use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::event::Event as CEvent;
use tokio::{sync::mpsc, time::Duration};

use crate::i18n::{LoadError, TranslationSource, TranslationTable, load_translations};

/// Outcome of the one-shot translation load.
pub type TranslationResult = Result<TranslationTable, LoadError>;

/// What: Channel definitions for runtime communication.
///
/// Details:
/// - The event loop owns every receiver; workers only hold senders
pub struct Channels {
    /// Terminal events from the reader thread.
    pub event_tx: mpsc::UnboundedSender<CEvent>,
    /// Receiving side of `event_tx`.
    pub event_rx: mpsc::UnboundedReceiver<CEvent>,
    /// Tells the reader thread to stop.
    pub event_thread_cancelled: Arc<AtomicBool>,
    /// Viewport frame ticks.
    pub tick_tx: mpsc::UnboundedSender<()>,
    /// Receiving side of `tick_tx`.
    pub tick_rx: mpsc::UnboundedReceiver<()>,
    /// Result of the translation load.
    pub translations_tx: mpsc::UnboundedSender<TranslationResult>,
    /// Receiving side of `translations_tx`.
    pub translations_rx: mpsc::UnboundedReceiver<TranslationResult>,
}

impl Channels {
    /// What: Create all channels used for runtime communication.
    pub fn new() -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<CEvent>();
        let (tick_tx, tick_rx) = mpsc::unbounded_channel::<()>();
        let (translations_tx, translations_rx) = mpsc::unbounded_channel::<TranslationResult>();
        Self {
            event_tx,
            event_rx,
            event_thread_cancelled: Arc::new(AtomicBool::new(false)),
            tick_tx,
            tick_rx,
            translations_tx,
            translations_rx,
        }
    }
}

impl Default for Channels {
    fn default() -> Self {
        Self::new()
    }
}

/// What: Spawn the viewport tick worker.
///
/// Inputs:
/// - `tick_tx`: Channel sender for tick events
/// - `tick_ms`: Interval between ticks
///
/// Details:
/// - Missed ticks are skipped rather than bursted
/// - Stops when the event loop drops its receiver
pub fn spawn_tick_worker(tick_tx: mpsc::UnboundedSender<()>, tick_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(tick_ms));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if tick_tx.send(()).is_err() {
                break;
            }
        }
    });
}

/// What: Spawn the one-shot translation load.
///
/// Inputs:
/// - `source`: File or URL to load
/// - `translations_tx`: Channel receiving the outcome
///
/// Details:
/// - No retry and no timeout; a failure is reported once
pub fn spawn_translation_load(
    source: TranslationSource,
    translations_tx: mpsc::UnboundedSender<TranslationResult>,
) {
    tokio::spawn(async move {
        tracing::info!(source = %source, "loading translations");
        let result = load_translations(&source).await;
        let _ = translations_tx.send(result);
    });
}

/// What: Spawn event reading thread for terminal input.
///
/// Inputs:
/// - `headless`: When `true`, no thread is spawned
/// - `event_tx`: Channel sender for terminal events
/// - `event_thread_cancelled`: Flag checked between polls
///
/// Details:
/// - Polls with a 50ms timeout so cancellation is noticed promptly
pub fn spawn_event_thread(
    headless: bool,
    event_tx: mpsc::UnboundedSender<CEvent>,
    event_thread_cancelled: Arc<AtomicBool>,
) {
    if headless {
        return;
    }
    std::thread::spawn(move || {
        while !event_thread_cancelled.load(Ordering::Relaxed) {
            match crossterm::event::poll(std::time::Duration::from_millis(50)) {
                Ok(true) => match crossterm::event::read() {
                    Ok(ev) => {
                        if event_thread_cancelled.load(Ordering::Relaxed)
                            || event_tx.send(ev).is_err()
                        {
                            break;
                        }
                    }
                    // transient read errors
                    Err(_) => {}
                },
                Ok(false) | Err(_) => {}
            }
        }
    });
}
