//! Localization store: owns the translation table and applies it to UI elements.

use crate::i18n::language::Language;
use crate::i18n::translations::{TranslationTable, translate_with_fallback};
use crate::state::{ElementRegistry, UiElement, ViewState};

/// Holds the loaded translation table and resolves label keys against it.
///
/// The active language lives in [`ViewState`]; every operation that depends
/// on it takes the state explicitly.
#[derive(Clone, Debug, Default)]
pub struct LocalizationStore {
    table: TranslationTable,
}

impl LocalizationStore {
    /// What: Create a store with an empty table (nothing loaded yet).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Create a store around an already loaded table.
    #[must_use]
    pub const fn with_table(table: TranslationTable) -> Self {
        Self { table }
    }

    /// What: Check whether a non-empty table has been installed.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        !self.table.is_empty()
    }

    /// What: Borrow the installed table.
    #[must_use]
    pub const fn table(&self) -> &TranslationTable {
        &self.table
    }

    /// What: Replace the table wholesale (initial load or re-fetch).
    pub fn replace_table(&mut self, table: TranslationTable) {
        tracing::info!(
            languages = ?table.language_codes(),
            "translation table installed"
        );
        self.table = table;
    }

    /// What: Switch the active language and relabel every bound element.
    ///
    /// Inputs:
    /// - `code`: Requested language code (e.g., "ja")
    /// - `view`: View state whose `active_language` is updated
    /// - `elements`: Registry of UI elements to relabel
    ///
    /// Output:
    /// - Number of elements whose text was set
    ///
    /// Details:
    /// - Unsupported codes are a no-op for every element and leave the active language unchanged
    /// - Elements whose key has no entry for the language keep their current text
    /// - With an empty table only the active language changes
    pub fn apply_language(
        &self,
        code: &str,
        view: &mut ViewState,
        elements: &mut ElementRegistry,
    ) -> usize {
        let Some(language) = Language::from_code(code) else {
            tracing::debug!(code = %code, "ignoring unsupported language code");
            return 0;
        };
        self.apply(language, view, elements)
    }

    /// What: Typed variant of [`Self::apply_language`].
    pub fn apply(
        &self,
        language: Language,
        view: &mut ViewState,
        elements: &mut ElementRegistry,
    ) -> usize {
        view.active_language = language;
        let mut updated = 0;
        for element in elements.iter_mut() {
            if self.resolve_into(language, element) {
                updated += 1;
            }
        }
        tracing::debug!(
            language = %language,
            updated,
            total = elements.len(),
            "applied language"
        );
        updated
    }

    /// What: Bind a new label key to an element and resolve it for the active language only.
    ///
    /// Inputs:
    /// - `language`: Currently active language
    /// - `element`: Element to relabel
    /// - `new_key`: Label key describing the element's new state
    ///
    /// Output:
    /// - `true` when the text was updated, `false` when the key did not resolve
    ///
    /// Details:
    /// - The key is reassigned even when the lookup misses, so a later
    ///   `apply_language` picks it up
    pub fn relabel(&self, language: Language, element: &mut UiElement, new_key: &str) -> bool {
        element.key = Some(new_key.to_string());
        self.resolve_into(language, element)
    }

    /// What: Translate a key for panel text that is not bound to an element.
    ///
    /// Details:
    /// - Falls back to English, then to the built-in markup text, then to the key itself
    #[must_use]
    pub fn t(&self, language: Language, key: &str) -> String {
        translate_with_fallback(key, language, &self.table)
    }

    fn resolve_into(&self, language: Language, element: &mut UiElement) -> bool {
        let Some(key) = element.key.as_deref() else {
            return false;
        };
        match self.table.get(language, key) {
            Some(text) => {
                element.text = text.to_string();
                true
            }
            None => false,
        }
    }
}
