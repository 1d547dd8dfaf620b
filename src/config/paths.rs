use std::env;
use std::fs;
use std::path::PathBuf;

/// Directory name used under `~/.config` and `$XDG_CONFIG_HOME`.
const APP_DIR: &str = "shibuya-view";
/// Settings file name inside the app directory.
const SETTINGS_FILE: &str = "settings.conf";

fn non_empty_var(name: &str) -> Option<PathBuf> {
    env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// App directories in lookup order: `$HOME/.config/shibuya-view`, then
/// `$XDG_CONFIG_HOME/shibuya-view`.
fn app_dir_candidates() -> Vec<PathBuf> {
    let home = non_empty_var("HOME").map(|h| h.join(".config").join(APP_DIR));
    let xdg = non_empty_var("XDG_CONFIG_HOME").map(|x| x.join(APP_DIR));
    home.into_iter().chain(xdg).collect()
}

/// Find an existing `settings.conf`, HOME first.
pub(crate) fn resolve_settings_config_path() -> Option<PathBuf> {
    app_dir_candidates()
        .into_iter()
        .map(|dir| dir.join(SETTINGS_FILE))
        .find(|p| p.is_file())
}

/// What: Return the app config directory, creating it when needed.
///
/// Details:
/// - The first candidate that can be created wins; `./.config/shibuya-view` otherwise
pub fn config_dir() -> PathBuf {
    app_dir_candidates()
        .into_iter()
        .find(|dir| fs::create_dir_all(dir).is_ok())
        .unwrap_or_else(|| PathBuf::from(".config").join(APP_DIR))
}

/// Logs directory under the config directory (ensured to exist).
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    if let Err(err) = fs::create_dir_all(&dir) {
        tracing::debug!(path = %dir.display(), error = %err, "[Config] cannot create logs dir");
    }
    dir
}
