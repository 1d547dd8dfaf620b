//! User configuration for shibuya-view.
//!
//! Settings live in `~/.config/shibuya-view/settings.conf` (or under
//! `$XDG_CONFIG_HOME`) as `key = value` lines. The access token may also come
//! from the `SHIBUYA_VIEW_ION_TOKEN` environment variable.

/// Configuration parsing utilities.
mod parsing;
/// Path resolution for config directories.
mod paths;
/// Settings loading.
mod settings;
/// Settings type definitions.
mod types;

pub use paths::{config_dir, logs_dir};
pub use settings::{ION_TOKEN_ENV, parse_settings, settings};
pub use types::{
    DEFAULT_TICK_MS, FeatureSet, KeyAction, KeyChord, KeyMap, LanguagePreference, Settings,
};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// What: Provide a process-wide mutex to serialize environment-mutating tests in this module.
///
/// Details:
/// - Callers should lock the mutex to guard environment-variable or disk state changes.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
