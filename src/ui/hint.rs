//! Key hint line built from the active key bindings.

use ratatui::{Frame, layout::Rect, style::Style, text::Span, widgets::Paragraph};

use crate::i18n;
use crate::state::AppState;
use crate::ui::palette::theme;

/// Separator between hint entries.
const ENTRY_GAP: &str = "  ";

/// What: Compose the key hint for the current bindings and language.
///
/// Inputs:
/// - `app`: State holding the key map, the store and the active language
///
/// Output:
/// - Entries such as `V: view` joined by two spaces; chords of one action joined by `/`
///
/// Details:
/// - Actions without any chord are left out
#[must_use]
pub fn help_hint(app: &AppState) -> String {
    app.keymap
        .bindings()
        .iter()
        .filter(|(_, chords)| !chords.is_empty())
        .map(|(action, chords)| {
            let keys: Vec<String> = chords.iter().map(crate::config::KeyChord::label).collect();
            format!("{}: {}", keys.join("/"), i18n::t(app, action.hint_key()))
        })
        .collect::<Vec<_>>()
        .join(ENTRY_GAP)
}

/// What: Render the key hint line.
pub fn render_help_hint(f: &mut Frame, app: &AppState, area: Rect) {
    f.render_widget(
        Paragraph::new(Span::styled(
            help_hint(app),
            Style::default().fg(theme().subtext0),
        )),
        area,
    );
}
