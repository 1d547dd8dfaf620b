use std::fmt;

use crossterm::event::{KeyCode, KeyModifiers};
use zeroize::Zeroizing;

use crate::i18n::Language;

/// A single keyboard chord (modifiers + key).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// Key code; characters are stored lowercase.
    pub code: KeyCode,
    /// Required modifiers.
    pub mods: KeyModifiers,
}

impl KeyChord {
    /// What: Build a chord from a character without modifiers.
    #[must_use]
    pub const fn plain(ch: char) -> Self {
        Self {
            code: KeyCode::Char(ch),
            mods: KeyModifiers::NONE,
        }
    }

    /// What: Build a chord from a character with Ctrl held.
    #[must_use]
    pub const fn ctrl(ch: char) -> Self {
        Self {
            code: KeyCode::Char(ch),
            mods: KeyModifiers::CONTROL,
        }
    }

    /// What: Check whether a pressed key matches this chord.
    ///
    /// Details:
    /// - Character keys compare case-insensitively and ignore Shift, since terminals
    ///   report `H` as Shift+`H`
    #[must_use]
    pub fn matches(&self, code: KeyCode, mods: KeyModifiers) -> bool {
        match (self.code, code) {
            (KeyCode::Char(want), KeyCode::Char(got)) => {
                want == got.to_ascii_lowercase()
                    && self.mods.difference(KeyModifiers::SHIFT)
                        == mods.difference(KeyModifiers::SHIFT)
            }
            (want, got) => want == got && self.mods == mods,
        }
    }

    /// Return a short display label such as "Ctrl+C", "F1" or "H".
    #[must_use]
    pub fn label(&self) -> String {
        let mut parts: Vec<&'static str> = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl");
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt");
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift");
        }
        let key = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(ch) => ch.to_ascii_uppercase().to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            _ => "?".to_string(),
        };
        if parts.is_empty() {
            key
        } else {
            format!("{}+{}", parts.join("+"), key)
        }
    }
}

/// Actions reachable from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Fly back to the home view.
    Home,
    /// Start or stop the camera orbit.
    ToggleRotation,
    /// Drop the selection, the info box and any highlight.
    ClearSelection,
    /// Switch to English.
    LanguageEn,
    /// Switch to Japanese.
    LanguageJa,
    /// Flip between 3D and map view.
    ToggleViewMode,
    /// Leave the application.
    Exit,
}

impl KeyAction {
    /// Label key naming the action in the key hint line.
    #[must_use]
    pub const fn hint_key(self) -> &'static str {
        match self {
            Self::Home => "hint-home",
            Self::ToggleRotation => "hint-rotate",
            Self::ClearSelection => "hint-clear",
            Self::LanguageEn => "hint-english",
            Self::LanguageJa => "hint-japanese",
            Self::ToggleViewMode => "hint-view",
            Self::Exit => "hint-quit",
        }
    }
}

/// Application key bindings.
/// Each action can have multiple chords.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMap {
    /// Home view.
    pub home: Vec<KeyChord>,
    /// Rotation toggle.
    pub toggle_rotation: Vec<KeyChord>,
    /// Clear selection.
    pub clear_selection: Vec<KeyChord>,
    /// English.
    pub lang_en: Vec<KeyChord>,
    /// Japanese.
    pub lang_ja: Vec<KeyChord>,
    /// 3D/map toggle.
    pub toggle_view_mode: Vec<KeyChord>,
    /// Quit.
    pub exit: Vec<KeyChord>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            home: vec![KeyChord::plain('h')],
            toggle_rotation: vec![KeyChord::plain('r')],
            clear_selection: vec![KeyChord::plain('c')],
            lang_en: vec![KeyChord::plain('e')],
            lang_ja: vec![KeyChord::plain('j')],
            toggle_view_mode: vec![KeyChord::plain('v')],
            exit: vec![KeyChord::plain('q'), KeyChord::ctrl('c')],
        }
    }
}

impl KeyMap {
    /// What: Resolve a key press to the action bound to it.
    ///
    /// Inputs:
    /// - `code`: Pressed key
    /// - `mods`: Modifiers held
    ///
    /// Output:
    /// - The first bound action, checking exit first so `Ctrl+C` never clears the selection
    #[must_use]
    pub fn action_for(&self, code: KeyCode, mods: KeyModifiers) -> Option<KeyAction> {
        let table: [(&[KeyChord], KeyAction); 7] = [
            (&self.exit, KeyAction::Exit),
            (&self.home, KeyAction::Home),
            (&self.toggle_rotation, KeyAction::ToggleRotation),
            (&self.clear_selection, KeyAction::ClearSelection),
            (&self.lang_en, KeyAction::LanguageEn),
            (&self.lang_ja, KeyAction::LanguageJa),
            (&self.toggle_view_mode, KeyAction::ToggleViewMode),
        ];
        table
            .iter()
            .find(|(chords, _)| chords.iter().any(|c| c.matches(code, mods)))
            .map(|(_, action)| *action)
    }

    /// What: List every action with its chords in the order the key hint shows them.
    ///
    /// Output:
    /// - Language keys first, then view, rotation, home, clear and exit
    #[must_use]
    pub fn bindings(&self) -> [(KeyAction, &[KeyChord]); 7] {
        [
            (KeyAction::LanguageEn, &self.lang_en),
            (KeyAction::LanguageJa, &self.lang_ja),
            (KeyAction::ToggleViewMode, &self.toggle_view_mode),
            (KeyAction::ToggleRotation, &self.toggle_rotation),
            (KeyAction::Home, &self.home),
            (KeyAction::ClearSelection, &self.clear_selection),
            (KeyAction::Exit, &self.exit),
        ]
    }
}

/// Optional behaviours that differ between deployments of the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct FeatureSet {
    /// Single clicks select buildings and fill the info box.
    pub feature_info: bool,
    /// Double clicks fly the camera to the building under the pointer.
    pub double_click_fly_to: bool,
    /// The `h`/`r`/`c` shortcuts are active.
    pub keyboard_shortcuts: bool,
    /// The shortcuts only fire while the map view is active.
    pub shortcuts_require_map_view: bool,
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self {
            feature_info: true,
            double_click_fly_to: true,
            keyboard_shortcuts: true,
            shortcuts_require_map_view: true,
        }
    }
}

/// How the initial language is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LanguagePreference {
    /// Derive from the locale environment, English when nothing matches.
    Auto,
    /// Always start with this language.
    Fixed(Language),
    /// English, the markup language.
    #[default]
    Default,
}

impl LanguagePreference {
    /// What: Parse a `language` setting value (`auto`, `en`, `ja`, ...).
    #[must_use]
    pub fn from_config_value(value: &str) -> Option<Self> {
        let v = value.trim();
        if v.eq_ignore_ascii_case("auto") {
            return Some(Self::Auto);
        }
        Language::from_code(v).map(Self::Fixed)
    }

    /// What: Resolve the preference to a concrete language.
    #[must_use]
    pub fn resolve(self) -> Language {
        match self {
            Self::Auto => crate::i18n::detect_system_language().unwrap_or_default(),
            Self::Fixed(language) => language,
            Self::Default => Language::default(),
        }
    }
}

/// User-configurable application settings parsed from `settings.conf`.
#[derive(Clone)]
pub struct Settings {
    /// Access token for the tile/terrain service.
    pub ion_token: Option<Zeroizing<String>>,
    /// Translation document override (path or http(s) URL).
    pub translations: Option<String>,
    /// Initial language.
    pub language: LanguagePreference,
    /// Optional behaviours.
    pub features: FeatureSet,
    /// Viewport tick interval in milliseconds.
    pub tick_ms: u64,
    /// Keyboard bindings.
    pub keymap: KeyMap,
}

/// Default viewport tick interval in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 50;
/// Bounds applied to `tick_ms`.
pub const TICK_MS_RANGE: (u64, u64) = (10, 1000);

impl Default for Settings {
    fn default() -> Self {
        Self {
            ion_token: None,
            translations: None,
            language: LanguagePreference::default(),
            features: FeatureSet::default(),
            tick_ms: DEFAULT_TICK_MS,
            keymap: KeyMap::default(),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field(
                "ion_token",
                &self.ion_token.as_ref().map(|_| "<redacted>"),
            )
            .field("translations", &self.translations)
            .field("language", &self.language)
            .field("features", &self.features)
            .field("tick_ms", &self.tick_ms)
            .field("keymap", &self.keymap)
            .finish()
    }
}
