use std::fmt;

use crate::config::Settings;
use crate::i18n::{self, Language, TranslationSource};
use crate::state::AppState;

/// What: Fatal configuration problems detected before the UI starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupError {
    /// No access token in `settings.conf` or `SHIBUYA_VIEW_ION_TOKEN`.
    MissingAccessToken,
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAccessToken => write!(
                f,
                "access token not found; set ion_token in settings.conf or {}",
                crate::config::ION_TOKEN_ENV
            ),
        }
    }
}

impl std::error::Error for StartupError {}

/// What: Verify that the settings carry an access token.
///
/// Output:
/// - `Err(StartupError::MissingAccessToken)` after logging one error line
///
/// # Errors
/// - Returns `StartupError::MissingAccessToken` when the token is absent or blank
pub fn check_access_token(settings: &Settings) -> Result<(), StartupError> {
    match settings.ion_token.as_deref() {
        Some(token) if !token.trim().is_empty() => {
            tracing::debug!(len = token.len(), "access token configured");
            Ok(())
        }
        _ => {
            let err = StartupError::MissingAccessToken;
            tracing::error!(error = %err, "cannot start the scene viewport");
            Err(err)
        }
    }
}

/// What: Build the initial application state from settings and CLI overrides.
///
/// Inputs:
/// - `settings`: Parsed settings
/// - `language_override`: `--language` value, wins over the settings preference
///
/// Output:
/// - `AppState` with default markup text and the chosen active language
///
/// Details:
/// - No translation is applied yet; labels switch once the table arrives
pub fn initialize_app_state(settings: &Settings, language_override: Option<Language>) -> AppState {
    let mut app = AppState {
        features: settings.features,
        keymap: settings.keymap.clone(),
        ..AppState::default()
    };
    app.view.active_language = language_override.unwrap_or_else(|| settings.language.resolve());
    tracing::info!(
        language = %app.view.active_language,
        features = ?app.features,
        "application state initialized"
    );
    app
}

/// What: Pick the translation document to load.
///
/// Inputs:
/// - `cli`: `--translations` value
/// - `settings`: Parsed settings (`translations` key)
///
/// Output:
/// - The first configured location, else the bundled file, else `None`
pub fn resolve_translation_source(cli: Option<&str>, settings: &Settings) -> Option<TranslationSource> {
    if let Some(location) = cli.or(settings.translations.as_deref())
        && !location.trim().is_empty()
    {
        return Some(TranslationSource::parse(location));
    }
    i18n::find_translations_file().map(TranslationSource::File)
}
