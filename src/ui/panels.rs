//! Side panels: camera telemetry, clicked coordinates and the building info box.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::i18n;
use crate::state::{AppState, ElementId};
use crate::ui::palette::theme;
use crate::viewport::FeatureInfo;

/// Placeholder shown before the first telemetry refresh.
const NO_VALUE: &str = "-";

fn panel_block(title: String) -> Block<'static> {
    let th = theme();
    Block::default()
        .title(Span::styled(title, Style::default().fg(th.overlay1)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.surface2))
        .style(Style::default().bg(th.base))
}

fn field(label: &str, value: &str) -> Line<'static> {
    let th = theme();
    Line::from(vec![
        Span::styled(
            format!("{label}: "),
            Style::default().fg(th.sapphire).add_modifier(Modifier::BOLD),
        ),
        Span::styled(value.to_string(), Style::default().fg(th.text)),
    ])
}

/// Height of the telemetry panel including borders.
pub const TELEMETRY_HEIGHT: u16 = 7;

/// What: Render the camera telemetry panel.
pub fn render_telemetry(f: &mut Frame, app: &AppState, area: Rect) {
    let labels = [
        ElementId::STATUS_LAT_LABEL,
        ElementId::STATUS_LON_LABEL,
        ElementId::STATUS_ALT_LABEL,
        ElementId::STATUS_HDG_LABEL,
        ElementId::STATUS_PITCH_LABEL,
    ];
    let values: [&str; 5] = app.telemetry.as_ref().map_or([NO_VALUE; 5], |t| {
        [
            t.latitude.as_str(),
            t.longitude.as_str(),
            t.altitude.as_str(),
            t.heading.as_str(),
            t.pitch.as_str(),
        ]
    });
    let lines: Vec<Line> = labels
        .iter()
        .zip(values)
        .map(|(id, value)| field(app.elements.text(*id), value))
        .collect();
    let block = panel_block(app.elements.text(ElementId::STATUS_TITLE).to_string());
    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// What: Render the clicked-coordinates panel when a click has reported a position.
///
/// Output:
/// - Rows consumed (0 when the panel is hidden)
pub fn render_clicked_coords(f: &mut Frame, app: &AppState, area: Rect) -> u16 {
    let Some(coords) = app.clicked_coords.as_deref() else {
        return 0;
    };
    let th = theme();
    let height = area.height.min(3);
    let block = panel_block(app.elements.text(ElementId::CLICKED_COORDS_TITLE).to_string());
    f.render_widget(
        Paragraph::new(Span::styled(coords.to_string(), Style::default().fg(th.text)))
            .block(block),
        Rect::new(area.x, area.y, area.width, height),
    );
    height
}

/// What: Build the info box lines with localized field labels.
#[must_use]
pub fn info_lines(app: &AppState, info: &FeatureInfo) -> Vec<Line<'static>> {
    let th = theme();
    let mut lines = vec![
        field(&i18n::t(app, "info-id"), &info.id),
        field(&i18n::t(app, "info-height"), &info.height),
        field(&i18n::t(app, "info-usage"), &info.usage),
        field(&i18n::t(app, "info-class"), &info.class),
    ];
    if !info.extras.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("{}:", i18n::t(app, "info-properties")),
            Style::default().fg(th.sapphire).add_modifier(Modifier::BOLD),
        )));
        for (name, value) in &info.extras {
            lines.push(Line::from(Span::styled(
                format!("  {name}: {value}"),
                Style::default().fg(th.subtext0),
            )));
        }
    }
    lines
}

/// What: Render the building info box for the current selection.
pub fn render_info(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(info) = app.info.as_ref() else {
        return;
    };
    if area.height < 3 {
        return;
    }
    let block = panel_block(i18n::t(app, "info-title"));
    f.render_widget(
        Paragraph::new(info_lines(app, info))
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}
