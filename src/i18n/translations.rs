//! Translation table and lookup utilities.

use std::collections::HashMap;

use super::language::Language;

/// Translation map for one language: label key -> display string.
pub type TranslationMap = HashMap<String, String>;

/// Built-in English label text, i.e. what the surrounding markup shows before
/// any translation document has been applied.
pub const DEFAULT_LABELS: &[(&str, &str)] = &[
    ("title", "Shibuya 3D City Model"),
    ("lang-en-label", "English"),
    ("lang-ja-label", "日本語"),
    ("3d-view-label", "3D View"),
    ("map-view-label", "Map View"),
    ("stop-rotation-label", "Stop Rotation"),
    ("start-rotation-label", "Start Rotation"),
    ("scene-3d-title", "Scene (3D)"),
    ("scene-map-title", "Scene (Map)"),
    ("status-title", "Camera"),
    ("status-lat-label", "Latitude"),
    ("status-lon-label", "Longitude"),
    ("status-alt-label", "Altitude"),
    ("status-hdg-label", "Heading"),
    ("status-pitch-label", "Pitch"),
    ("clicked-coords-title", "Clicked Coordinates"),
    ("info-title", "Building Information"),
    ("info-id", "ID"),
    ("info-height", "Height"),
    ("info-usage", "Usage"),
    ("info-class", "Class"),
    ("info-properties", "Properties"),
    ("hint-english", "English"),
    ("hint-japanese", "Japanese"),
    ("hint-view", "view"),
    ("hint-rotate", "rotate"),
    ("hint-home", "home"),
    ("hint-clear", "clear"),
    ("hint-quit", "quit"),
];

/// What: Look up the built-in English text for a label key.
///
/// Inputs:
/// - `key`: Label key (e.g., "title")
///
/// Output:
/// - `Some(&str)` with the markup default, or `None` for unknown keys
#[must_use]
pub fn default_label(key: &str) -> Option<&'static str> {
    DEFAULT_LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, text)| *text)
}

/// Language code -> translation map, as loaded from the translation document.
///
/// Immutable once installed; a reload replaces the whole table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranslationTable {
    languages: HashMap<String, TranslationMap>,
}

impl TranslationTable {
    /// What: Create an empty table (the state before loading or after a failed load).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Build a table from per-language maps.
    ///
    /// Inputs:
    /// - `languages`: Iterator of (language code, translation map) pairs
    ///
    /// Output:
    /// - `TranslationTable` containing the given languages
    pub fn from_languages<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = (S, TranslationMap)>,
        S: Into<String>,
    {
        Self {
            languages: languages
                .into_iter()
                .map(|(code, map)| (code.into(), map))
                .collect(),
        }
    }

    /// What: Insert or overwrite a single entry (used while building a table).
    pub fn insert(&mut self, language: &str, key: &str, text: &str) {
        self.languages
            .entry(language.to_string())
            .or_default()
            .insert(key.to_string(), text.to_string());
    }

    /// What: Check whether no language has been loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// What: Count the loaded languages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// What: Check whether the table has an entry map for a language code.
    #[must_use]
    pub fn has_language(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    /// What: List the loaded language codes in sorted order.
    #[must_use]
    pub fn language_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// What: Look up `table[language][key]`.
    ///
    /// Inputs:
    /// - `language`: Language code (e.g., "ja")
    /// - `key`: Label key
    ///
    /// Output:
    /// - `Some(&str)` when both the language and the key exist
    ///
    /// Details:
    /// - An empty string counts as missing so that blank entries never wipe existing text
    #[must_use]
    pub fn lookup(&self, language: &str, key: &str) -> Option<&str> {
        self.languages
            .get(language)
            .and_then(|map| map.get(key))
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    /// What: Look up a key for a supported language.
    #[must_use]
    pub fn get(&self, language: Language, key: &str) -> Option<&str> {
        self.lookup(language.code(), key)
    }
}

/// What: Look up translation with fallback to English and then to the built-in markup text.
///
/// Inputs:
/// - `key`: Label key
/// - `language`: Active language
/// - `table`: Loaded translation table (may be empty)
///
/// Output:
/// - Translated string, or the key itself when nothing knows it
///
/// Details:
/// - Tries the active language, then English, then `DEFAULT_LABELS`
/// - Missing keys are only logged at debug level to avoid spam
pub fn translate_with_fallback(key: &str, language: Language, table: &TranslationTable) -> String {
    if let Some(text) = table.get(language, key) {
        return text.to_string();
    }

    if language != Language::En
        && let Some(text) = table.get(Language::En, key)
    {
        tracing::debug!(
            "Translation key '{}' not found for '{}', using English",
            key,
            language
        );
        return text.to_string();
    }

    if let Some(text) = default_label(key) {
        return text.to_string();
    }

    tracing::debug!("Missing translation key: '{}'. Returning key as-is.", key);
    key.to_string()
}
