//! Supported UI languages and system language detection.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Languages the UI can be switched between.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Language {
    /// English (`en`), the language of the built-in markup.
    #[default]
    En,
    /// Japanese (`ja`).
    Ja,
}

impl Language {
    /// Every supported language in display order.
    pub const ALL: [Self; 2] = [Self::En, Self::Ja];

    /// What: Return the table code for this language.
    ///
    /// Output:
    /// - Two-letter code used as the top-level key of the translation document
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ja => "ja",
        }
    }

    /// What: Resolve a language code (e.g., "ja", "ja-JP", "ja_JP.UTF-8") to a `Language`.
    ///
    /// Inputs:
    /// - `code`: Raw language or locale code
    ///
    /// Output:
    /// - `Some(Language)` when the primary subtag is supported, otherwise `None`
    ///
    /// Details:
    /// - Region and encoding suffixes are ignored; matching is case-insensitive
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = parse_locale_string(code)?;
        match primary.as_str() {
            "en" => Some(Self::En),
            "ja" => Some(Self::Ja),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("Unsupported language code: '{s}'"))
    }
}

/// What: Detect the UI language from locale environment variables.
///
/// Output:
/// - `Some(Language)` for the first supported locale found, otherwise `None`
///
/// Details:
/// - Checks `LC_ALL`, `LC_MESSAGES` and `LANG` in that order
/// - A set but unsupported variable does not stop the search
pub fn detect_system_language() -> Option<Language> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var_name| env::var(var_name).ok())
        .find_map(|value| Language::from_code(&value))
}

/// What: Reduce a locale string to its lowercase primary language subtag.
///
/// Inputs:
/// - `locale_str`: Locale like "ja_JP.UTF-8", "en-US" or "ja"
///
/// Output:
/// - `Some("ja")`-style primary subtag, or `None` for empty or malformed input
fn parse_locale_string(locale_str: &str) -> Option<String> {
    let trimmed = locale_str.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Strip encoding and modifier ("ja_JP.UTF-8@euro" -> "ja_JP")
    let locale_part = trimmed.split(['.', '@']).next()?;
    let primary = locale_part.split(['_', '-']).next()?;

    if primary.is_empty() || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(primary.to_ascii_lowercase())
}
