//! Terminal rendering with ratatui.
//!
//! The frame is laid out as: title line, control bar, then the scene beside a
//! column of panels (telemetry, clicked coordinates, building info), and a key
//! hint at the bottom. Rendering records the button and scene rectangles in
//! `AppState` so mouse clicks can be mapped back.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
};

use crate::logic::ViewController;
use crate::viewport::SceneViewport;

mod controls;
mod hint;
mod palette;
mod panels;
mod scene;

pub use hint::help_hint;
pub use palette::{Theme, theme};
pub use panels::info_lines;

/// Width of the panel column as a percentage of the frame.
const PANEL_COLUMN_PCT: u16 = 32;

/// What: Draw one frame and push the recorded scene size to the viewport.
///
/// Inputs:
/// - `f`: Frame to render into
/// - `controller`: Controller holding state and viewport
pub fn ui<V: SceneViewport>(f: &mut Frame, controller: &mut ViewController<V>) {
    let marks = controller.viewport().overlay();
    let th = theme();
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(th.base)), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let app = controller.state_mut();
    controls::render_title(f, app, rows[0]);
    controls::render_controls(f, app, rows[1]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(100 - PANEL_COLUMN_PCT),
            Constraint::Percentage(PANEL_COLUMN_PCT),
        ])
        .split(rows[2]);
    scene::render_scene(f, app, middle[0], &marks);
    render_panel_column(f, app, middle[1]);

    hint::render_help_hint(f, app, rows[3]);

    controller.sync_viewport_size();
}

fn render_panel_column(f: &mut Frame, app: &crate::state::AppState, area: Rect) {
    let telemetry_h = panels::TELEMETRY_HEIGHT.min(area.height);
    panels::render_telemetry(f, app, Rect::new(area.x, area.y, area.width, telemetry_h));

    let rest = Rect::new(
        area.x,
        area.y + telemetry_h,
        area.width,
        area.height - telemetry_h,
    );
    let used = panels::render_clicked_coords(f, app, rest);
    let info_area = Rect::new(rest.x, rest.y + used, rest.width, rest.height - used);
    panels::render_info(f, app, info_area);
}
