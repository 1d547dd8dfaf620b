//! Event handling layer: routes terminal key and mouse events to the controller.

use crossterm::event::{Event as CEvent, KeyEventKind};

use crate::logic::{KeyOutcome, ViewController};
use crate::viewport::SceneViewport;

mod mouse;

pub use mouse::{DOUBLE_CLICK_WINDOW, handle_mouse_event, handle_mouse_event_at};

/// Dispatch a single terminal event to the controller.
///
/// Returns `true` to signal the application should exit; otherwise `false`.
pub fn handle_event<V: SceneViewport>(ev: CEvent, controller: &mut ViewController<V>) -> bool {
    match ev {
        CEvent::Key(ke) => {
            if ke.kind != KeyEventKind::Press {
                return false;
            }
            controller.handle_key(ke.code, ke.modifiers) == KeyOutcome::Exit
        }
        CEvent::Mouse(m) => handle_mouse_event(m, controller),
        _ => false,
    }
}
