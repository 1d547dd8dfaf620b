use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::i18n;
use crate::state::{AppState, HighlightColor, ViewMode};
use crate::ui::palette::theme;
use crate::viewport::OverlayMark;

/// Glyph used for building footprints.
const FOOTPRINT: &str = "█";

/// What: Render the scene area with the viewport's overlay marks.
///
/// Inputs:
/// - `f`: Frame to render into
/// - `app`: State; `viewport_rect` is set to the inner scene area
/// - `area`: Target rectangle including the border
/// - `marks`: Marks reported by the viewport, relative to the inner area
///
/// Details:
/// - Marks are clipped to the inner area
/// - Selected buildings are drawn yellow and bold
pub fn render_scene(f: &mut Frame, app: &mut AppState, area: Rect, marks: &[OverlayMark]) {
    let th = theme();
    let title_key = match app.view.view_mode() {
        ViewMode::Globe3d => "scene-3d-title",
        ViewMode::Map => "scene-map-title",
    };
    let block = Block::default()
        .title(Span::styled(
            i18n::t(app, title_key),
            Style::default().fg(th.overlay1),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.surface2))
        .style(Style::default().bg(th.base));
    let inner = block.inner(area);
    f.render_widget(block, area);
    app.viewport_rect = inner;

    let right = inner.x.saturating_add(inner.width);
    for mark in marks {
        if mark.origin.y >= inner.height || mark.origin.x >= inner.width {
            continue;
        }
        let x = inner.x + mark.origin.x;
        let width = mark.width.min(right - x);
        let style = match mark.color {
            HighlightColor::Yellow => Style::default().fg(th.yellow).add_modifier(Modifier::BOLD),
            HighlightColor::White => Style::default().fg(th.white),
        };
        let rect = Rect::new(x, inner.y + mark.origin.y, width, 1);
        let glyphs = FOOTPRINT.repeat(usize::from(width));
        f.render_widget(Paragraph::new(Span::styled(glyphs, style)), rect);
    }

    if inner.width > 0 && inner.height > 0 {
        let center = Rect::new(inner.x + inner.width / 2, inner.y + inner.height / 2, 1, 1);
        f.render_widget(
            Paragraph::new(Span::styled("+", Style::default().fg(th.subtext0))),
            center,
        );
    }
}
