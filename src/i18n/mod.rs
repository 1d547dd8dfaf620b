//! Internationalization (i18n) module for shibuya-view.
//!
//! This module provides the translation table, its loader, the supported
//! languages and the localization store that relabels UI elements.
//!
//! # Overview
//!
//! - **Translation Loading**: Reads one JSON document, from a file or a single HTTP GET
//! - **Language Switching**: `LocalizationStore::apply_language` relabels every bound element
//! - **Relabeling**: `LocalizationStore::relabel` rebinds one element after a toggle
//! - **Language Detection**: `language = auto` picks English or Japanese from `LANG` and friends
//!
//! # Translation Document
//!
//! ```json
//! {
//!   "en": { "stop-rotation-label": "Stop Rotation" },
//!   "ja": { "stop-rotation-label": "回転停止" }
//! }
//! ```
//!
//! Nested objects are flattened into dot-notation keys.
//!
//! # Error Handling
//!
//! - A failed load is logged and leaves the table empty; labels keep their markup text
//! - Missing keys and unsupported languages are silent no-ops

mod language;
mod loader;
mod store;
pub mod translations;

pub use language::{Language, detect_system_language};
pub use loader::{
    LoadError, TranslationSource, fetch_translation_url, load_translation_file, load_translations,
    parse_translation_json,
};
pub use store::LocalizationStore;
pub use translations::{TranslationMap, TranslationTable, translate_with_fallback};

use std::path::PathBuf;

use crate::state::AppState;

/// What: Find the bundled translation document in development and installed locations.
///
/// Output:
/// - `Some(PathBuf)` pointing to the first existing file found, or `None` if not found
///
/// Details:
/// - Tries locations in order:
///   1. Development location: `CARGO_MANIFEST_DIR/config/translations.json`
///   2. Installed location: `/usr/share/shibuya-view/translations.json`
pub fn find_translations_file() -> Option<PathBuf> {
    let dev_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("config")
        .join("translations.json");
    if dev_path.is_file() {
        return Some(dev_path);
    }

    let installed_path = PathBuf::from("/usr/share/shibuya-view/translations.json");
    if installed_path.is_file() {
        return Some(installed_path);
    }

    None
}

/// What: Get a translation for a key in the active language of `AppState`.
///
/// Inputs:
/// - `app`: `AppState` holding the store and the active language
/// - `key`: Label key (e.g., "info-height")
///
/// Output:
/// - Translated string, or the key itself if nothing knows it
pub fn t(app: &AppState, key: &str) -> String {
    app.store.t(app.view.active_language, key)
}

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// What: Provide a process-wide mutex to serialize environment-mutating tests in this module.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: The bundled document has every built-in label in English and Japanese.
    ///
    /// Inputs:
    /// - `config/translations.json`.
    ///
    /// Output:
    /// - Every `DEFAULT_LABELS` key present for `en` and `ja`.
    fn bundled_translations_cover_both_languages() {
        let path = find_translations_file().expect("bundled translations.json should exist");
        let table = load_translation_file(&path).expect("bundled translations should parse");
        for (key, _) in translations::DEFAULT_LABELS {
            for lang in Language::ALL {
                assert!(
                    table.get(lang, key).is_some(),
                    "key '{key}' missing for '{lang}'"
                );
            }
        }
    }
}
