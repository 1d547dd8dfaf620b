//! Shared utilities for argument processing.

use shibuya_view::app::RunOptions;
use shibuya_view::config::LanguagePreference;
use shibuya_view::i18n::Language;

use crate::args::Args;

/// What: Determine the log level based on command-line arguments.
///
/// Details:
/// - Verbose flag overrides `log_level`
pub fn determine_log_level(args: &Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Resolve `--language` into a concrete language.
///
/// Output:
/// - `None` when the flag is absent or not a supported code (a warning is logged)
pub fn language_override(args: &Args) -> Option<Language> {
    let raw = args.language.as_deref()?;
    let Some(pref) = LanguagePreference::from_config_value(raw) else {
        tracing::warn!(language = raw, "unsupported --language value; ignoring");
        return None;
    };
    Some(pref.resolve())
}

/// What: Build runtime options from parsed arguments.
pub fn run_options(args: &Args) -> RunOptions {
    RunOptions {
        headless: args.headless,
        translations: args.translations.clone(),
        language: language_override(args),
        max_ticks: args.max_ticks,
    }
}
