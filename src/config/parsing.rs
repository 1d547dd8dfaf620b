use crossterm::event::{KeyCode, KeyModifiers};

use super::types::KeyChord;

/// What: Parse a single key identifier (e.g., "F5", "Esc", "?", "r") into a [`KeyCode`].
///
/// Inputs:
/// - `s`: Raw key token from a configuration string.
///
/// Output:
/// - `Some(KeyCode)` on success; `None` when the input token is unsupported.
///
/// Details:
/// - Supports function keys, navigation keys, and single printable characters.
/// - Normalizes character keys to lowercase for consistent matching.
pub(crate) fn parse_key_identifier(s: &str) -> Option<KeyCode> {
    let t = s.trim();
    if let Some(num) = t
        .strip_prefix(['F', 'f'])
        .and_then(|x| x.parse::<u8>().ok())
    {
        return Some(KeyCode::F(num));
    }
    match t.to_ascii_uppercase().as_str() {
        "ESC" => Some(KeyCode::Esc),
        "ENTER" | "RETURN" => Some(KeyCode::Enter),
        "TAB" => Some(KeyCode::Tab),
        "BACKSPACE" => Some(KeyCode::Backspace),
        "DELETE" | "DEL" => Some(KeyCode::Delete),
        "HOME" => Some(KeyCode::Home),
        "END" => Some(KeyCode::End),
        "UP" | "ARROWUP" => Some(KeyCode::Up),
        "DOWN" | "ARROWDOWN" => Some(KeyCode::Down),
        "LEFT" | "ARROWLEFT" => Some(KeyCode::Left),
        "RIGHT" | "ARROWRIGHT" => Some(KeyCode::Right),
        "SPACE" => Some(KeyCode::Char(' ')),
        _ => {
            // Single visible character, e.g. "?" or "r"; normalize to lowercase
            let mut chars = t.chars();
            if let (Some(ch), None) = (chars.next(), chars.next()) {
                Some(KeyCode::Char(ch.to_ascii_lowercase()))
            } else {
                None
            }
        }
    }
}

/// What: Parse a full key chord such as "Ctrl+C" or "h" into a [`KeyChord`].
///
/// Inputs:
/// - `chord`: Modifiers and a key token joined by `+`.
///
/// Output:
/// - `Some(KeyChord)` when parsing succeeds; `None` on invalid modifier/key combinations.
///
/// Details:
/// - Recognizes Ctrl/Alt/Shift modifiers in any case.
pub(crate) fn parse_key_chord(chord: &str) -> Option<KeyChord> {
    let mut mods = KeyModifiers::empty();
    let mut key_part: Option<String> = None;
    for part in chord.split('+') {
        let p = part.trim();
        if p.is_empty() {
            continue;
        }
        match p.to_ascii_uppercase().as_str() {
            "CTRL" | "CONTROL" => mods |= KeyModifiers::CONTROL,
            "ALT" => mods |= KeyModifiers::ALT,
            "SHIFT" => mods |= KeyModifiers::SHIFT,
            _ => key_part = Some(p.to_string()),
        }
    }
    let code = parse_key_identifier(key_part.as_deref().unwrap_or(""))?;
    Some(KeyChord { code, mods })
}

/// What: Check whether a settings line carries no entry.
///
/// Details:
/// - Skips blank lines and lines starting with `#`, `//`, or `;`
pub(crate) fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Split a `key = value` line on the first `=`.
///
/// Output:
/// - `Some((key, value))` with both sides trimmed; `None` when there is no `=` or the key is blank
pub(crate) fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.trim().split_once('=')?;
    let key = key.trim();
    (!key.is_empty()).then_some((key, value.trim()))
}

/// What: Parse a boolean setting value.
///
/// Output:
/// - `Some(bool)` for true/false, yes/no, on/off, 1/0 (any case); `None` otherwise.
pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// What: Strip a trailing inline comment from a setting value.
///
/// Inputs:
/// - `s`: Raw value text after the `=`.
///
/// Output:
/// - Trimmed value without a trailing `# ...` or `// ...` comment.
///
/// Details:
/// - A comment marker only counts at the start or after whitespace, so URLs
///   (`https://...`) and fragments (`file.json#v2`) survive.
pub(crate) fn strip_inline_comment(s: &str) -> &str {
    let bytes = s.as_bytes();
    let cut = (0..bytes.len()).find(|&i| {
        let at_boundary = i == 0 || bytes[i - 1].is_ascii_whitespace();
        at_boundary && (bytes[i] == b'#' || s[i..].starts_with("//"))
    });
    cut.map_or(s, |i| &s[..i]).trim()
}
