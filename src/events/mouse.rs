use std::time::{Duration, Instant};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::logic::ViewController;
use crate::viewport::SceneViewport;

/// Two left clicks on the same cell within this window form a double click.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// What: Handle a single mouse event.
///
/// Inputs:
/// - `m`: Mouse event including position and button
/// - `controller`: Controller whose state and viewport are updated
///
/// Output:
/// - `false` (mouse input never exits)
pub fn handle_mouse_event<V: SceneViewport>(
    m: MouseEvent,
    controller: &mut ViewController<V>,
) -> bool {
    handle_mouse_event_at(m, controller, Instant::now())
}

/// What: Handle a mouse event as if it happened at `now`.
///
/// Details:
/// - Left clicks on a control-bar button press it
/// - Left clicks inside the scene run the click handler; a second click on the
///   same cell within [`DOUBLE_CLICK_WINDOW`] also runs the double-click handler
/// - Everything else is ignored
pub fn handle_mouse_event_at<V: SceneViewport>(
    m: MouseEvent,
    controller: &mut ViewController<V>,
    now: Instant,
) -> bool {
    if !matches!(m.kind, MouseEventKind::Down(MouseButton::Left)) {
        return false;
    }
    let (mx, my) = (m.column, m.row);

    if let Some(button) = controller.state().button_at(mx, my) {
        tracing::debug!(button = button.0, "button clicked");
        controller.press_button(button);
        return false;
    }

    let Some(position) = controller.state().scene_position(mx, my) else {
        return false;
    };
    controller.click(position);

    let is_double = controller
        .state()
        .last_click
        .is_some_and(|(at, pos)| pos == position && now.duration_since(at) <= DOUBLE_CLICK_WINDOW);
    if is_double {
        controller.double_click(position);
        controller.state_mut().last_click = None;
    } else {
        controller.state_mut().last_click = Some((now, position));
    }
    false
}
