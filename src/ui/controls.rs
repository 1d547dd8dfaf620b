use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use crate::i18n::Language;
use crate::state::{AppState, ElementId};
use crate::ui::palette::theme;

/// Gap between buttons, in cells.
const BUTTON_GAP: u16 = 1;

/// What: Render the title line.
pub fn render_title(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    let line = Line::from(vec![
        Span::styled(
            app.elements.text(ElementId::TITLE).to_string(),
            Style::default().fg(th.mauve).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  [{}]", app.view.active_language.code()),
            Style::default().fg(th.overlay1),
        ),
    ]);
    f.render_widget(Paragraph::new(line).style(Style::default().bg(th.base)), area);
}

/// What: Render the control bar and record the clickable rectangle of every button.
///
/// Inputs:
/// - `f`: Frame to render into
/// - `app`: State holding button texts; `button_rects` is rewritten
/// - `area`: One-line target area
///
/// Details:
/// - Widths come from the displayed text, so wide Japanese glyphs get two cells
/// - The active language button and the running rotation get an accent colour
/// - Buttons that do not fit are neither drawn nor recorded
pub fn render_controls(f: &mut Frame, app: &mut AppState, area: Rect) {
    let th = theme();
    app.button_rects.clear();
    let mut x = area.x;
    let right = area.x.saturating_add(area.width);

    for id in ElementId::BUTTONS {
        let label = format!(" {} ", app.elements.text(id));
        let width = u16::try_from(label.width()).unwrap_or(u16::MAX);
        if x.saturating_add(width) > right {
            break;
        }
        let active = match id {
            ElementId::LANG_EN => app.view.active_language == Language::En,
            ElementId::LANG_JA => app.view.active_language == Language::Ja,
            ElementId::ROTATION_TOGGLE => app.view.is_rotating,
            _ => app.view.is_map_view,
        };
        let accent = if id == ElementId::ROTATION_TOGGLE {
            th.green
        } else {
            th.sapphire
        };
        let style = if active {
            Style::default()
                .fg(th.crust)
                .bg(accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(th.text).bg(th.surface2)
        };
        let rect = Rect::new(x, area.y, width, 1);
        f.render_widget(Paragraph::new(Span::styled(label, style)), rect);
        app.button_rects.push((id, rect));
        x = x.saturating_add(width).saturating_add(BUTTON_GAP);
    }
}
