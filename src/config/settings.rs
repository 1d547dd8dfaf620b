use std::env;
use std::fs;

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::config::parsing::{
    parse_bool, parse_key_chord, parse_key_value, skip_comment_or_empty, strip_inline_comment,
};
use crate::config::paths::resolve_settings_config_path;
use crate::config::types::{KeyChord, LanguagePreference, Settings, TICK_MS_RANGE};

/// Environment variable that supplies or overrides the access token.
pub const ION_TOKEN_ENV: &str = "SHIBUYA_VIEW_ION_TOKEN";

/// What: Load user settings from `settings.conf` under HOME/XDG, then apply the environment.
///
/// Output:
/// - A `Settings` value; falls back to `Settings::default()` when the file is missing.
///
/// Details:
/// - A non-empty `SHIBUYA_VIEW_ION_TOKEN` wins over the file's `ion_token`.
#[must_use]
pub fn settings() -> Settings {
    let mut out = match resolve_settings_config_path() {
        Some(path) => match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(path = %path.display(), bytes = content.len(), "[Config] Loaded settings.conf");
                parse_settings(&content)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "[Config] settings.conf unreadable, using defaults");
                Settings::default()
            }
        },
        None => {
            debug!("[Config] no settings.conf found, using defaults");
            Settings::default()
        }
    };
    if let Ok(token) = env::var(ION_TOKEN_ENV)
        && !token.trim().is_empty()
    {
        out.ion_token = Some(Zeroizing::new(token.trim().to_string()));
    }
    out
}

/// What: Assign a parsed key chord to a keymap field, replacing any existing bindings.
fn assign_keybind(chord: Option<KeyChord>, target: &mut Vec<KeyChord>) {
    if let Some(ch) = chord {
        *target = vec![ch];
    }
}

/// What: Apply a `keybind_*` entry.
///
/// Output:
/// - `true` if the key named a known binding.
fn apply_keybind(key: &str, chord: Option<KeyChord>, settings: &mut Settings) -> bool {
    let keymap = &mut settings.keymap;
    let target = match key {
        "keybind_home" | "keybind_reset_view" => &mut keymap.home,
        "keybind_toggle_rotation" | "keybind_rotation" => &mut keymap.toggle_rotation,
        "keybind_clear_selection" | "keybind_clear" => &mut keymap.clear_selection,
        "keybind_lang_en" | "keybind_english" => &mut keymap.lang_en,
        "keybind_lang_ja" | "keybind_japanese" => &mut keymap.lang_ja,
        "keybind_toggle_view_mode" | "keybind_view_mode" => &mut keymap.toggle_view_mode,
        "keybind_exit" | "keybind_quit" => &mut keymap.exit,
        _ => return false,
    };
    assign_keybind(chord, target);
    true
}

/// What: Parse settings.conf content into a `Settings` value.
///
/// Inputs:
/// - `content`: Content of the settings file.
///
/// Output:
/// - Parsed settings; unknown keys and invalid values keep the defaults.
///
/// Details:
/// - Keys are normalized (lowercase, `.`/`-`/space become `_`).
/// - Inline `#`/`//` comments after whitespace are stripped from values.
/// - `tick_ms` is clamped to a sane range.
#[must_use]
pub fn parse_settings(content: &str) -> Settings {
    let mut settings = Settings::default();
    for line in content.lines() {
        if skip_comment_or_empty(line) {
            continue;
        }
        let Some((raw_key, val_raw)) = parse_key_value(line) else {
            continue;
        };
        let key = raw_key.to_lowercase().replace(['.', '-', ' '], "_");
        let val = strip_inline_comment(val_raw);
        match key.as_str() {
            "ion_token" | "access_token" => {
                if !val.is_empty() {
                    settings.ion_token = Some(Zeroizing::new(val.to_string()));
                }
            }
            "translations" | "translations_url" | "translations_path" => {
                if !val.is_empty() {
                    settings.translations = Some(val.to_string());
                }
            }
            "language" | "lang" => match LanguagePreference::from_config_value(val) {
                Some(pref) => settings.language = pref,
                None => warn!(value = %val, "[Config] unsupported language, keeping default"),
            },
            "feature_info" => {
                if let Some(v) = parse_bool(val) {
                    settings.features.feature_info = v;
                }
            }
            "double_click_fly_to" => {
                if let Some(v) = parse_bool(val) {
                    settings.features.double_click_fly_to = v;
                }
            }
            "keyboard_shortcuts" => {
                if let Some(v) = parse_bool(val) {
                    settings.features.keyboard_shortcuts = v;
                }
            }
            "shortcuts_require_map_view" => {
                if let Some(v) = parse_bool(val) {
                    settings.features.shortcuts_require_map_view = v;
                }
            }
            "tick_ms" | "tick_interval_ms" => {
                if let Ok(v) = val.parse::<u64>() {
                    settings.tick_ms = v.clamp(TICK_MS_RANGE.0, TICK_MS_RANGE.1);
                }
            }
            k if k.starts_with("keybind_") => {
                if !apply_keybind(k, parse_key_chord(val), &mut settings) {
                    debug!(key = %k, "[Config] unknown keybind");
                }
            }
            other => debug!(key = %other, "[Config] ignoring unknown setting"),
        }
    }
    settings
}
