use std::io::Stdout;

use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::select;

use crate::logic::ViewController;
use crate::ui::ui;
use crate::viewport::SceneViewport;

use super::background::{Channels, TranslationResult};

/// What: Install a loaded table or report the failure.
///
/// Details:
/// - A failure leaves the table empty; labels keep their markup text
pub fn handle_translations<V: SceneViewport>(
    controller: &mut ViewController<V>,
    result: TranslationResult,
) {
    match result {
        Ok(table) => {
            let updated = controller.install_translations(table);
            tracing::info!(updated, "translations applied");
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to load translations");
        }
    }
}

/// What: Process one channel message.
///
/// Output: `true` if the event loop should exit, `false` to continue
async fn process_channel_messages<V: SceneViewport>(
    controller: &mut ViewController<V>,
    channels: &mut Channels,
    max_ticks: Option<u64>,
) -> bool {
    select! {
        Some(ev) = channels.event_rx.recv() => {
            crate::events::handle_event(ev, controller)
        }
        Some(result) = channels.translations_rx.recv() => {
            handle_translations(controller, result);
            false
        }
        Some(()) = channels.tick_rx.recv() => {
            controller.tick();
            max_ticks.is_some_and(|max| controller.state().frame_count >= max)
        }
        else => true
    }
}

/// What: Run the main event loop, rendering a frame before every message.
///
/// Inputs:
/// - `terminal`: Optional terminal for rendering (None in headless mode)
/// - `controller`: Controller owning state and viewport
/// - `channels`: Communication channels for background workers
/// - `max_ticks`: Exit after this many ticks (headless runs)
pub async fn run_event_loop<V: SceneViewport>(
    terminal: &mut Option<Terminal<CrosstermBackend<Stdout>>>,
    controller: &mut ViewController<V>,
    channels: &mut Channels,
    max_ticks: Option<u64>,
) {
    loop {
        if let Some(t) = terminal.as_mut()
            && let Err(err) = t.draw(|f| ui(f, controller))
        {
            tracing::warn!(error = %err, "frame draw failed");
        }

        if process_channel_messages(controller, channels, max_ticks).await {
            break;
        }
    }
}
