#![cfg(test)]
// End-to-end runtime smoke tests (headless)
// - Point HOME and XDG_CONFIG_HOME at an empty temp dir so no user settings leak in.
// - Provide the access token through the environment.
// - Run with `headless` and a tick limit so the loop ends on its own.

use std::sync::OnceLock;
use std::time::Duration;

use shibuya_view::app::{RunOptions, StartupError, run};
use shibuya_view::config::ION_TOKEN_ENV;
use shibuya_view::i18n::Language;

static ENV_LOCK: OnceLock<tokio::sync::Mutex<()>> = OnceLock::new();

fn env_lock() -> &'static tokio::sync::Mutex<()> {
    ENV_LOCK.get_or_init(|| tokio::sync::Mutex::new(()))
}

fn isolate_config(dir: &tempfile::TempDir) {
    unsafe {
        std::env::set_var("HOME", dir.path());
        std::env::set_var("XDG_CONFIG_HOME", dir.path().join(".config"));
    }
}

#[tokio::test(flavor = "multi_thread")]
/// What: A headless run stops once the tick limit is reached.
///
/// Inputs:
/// - Temp `HOME` with a token and `--max-ticks`.
///
/// Output:
/// - `run` returns `Ok`.
async fn runtime_smoke_headless_runs_to_tick_limit() {
    let _guard = env_lock().lock().await;
    let dir = tempfile::tempdir().expect("tempdir");
    isolate_config(&dir);
    unsafe {
        std::env::set_var(ION_TOKEN_ENV, "smoke-test-token");
    }

    let options = RunOptions {
        headless: true,
        translations: None,
        language: Some(Language::Ja),
        max_ticks: Some(3),
    };
    let result = tokio::time::timeout(Duration::from_secs(5), run(options))
        .await
        .expect("headless run finishes within the tick limit");
    if let Err(e) = result {
        panic!("app::run returned error: {e}");
    }
}

#[tokio::test(flavor = "multi_thread")]
/// What: A run with no token fails with `MissingAccessToken`.
async fn runtime_without_token_fails_before_starting() {
    let _guard = env_lock().lock().await;
    let dir = tempfile::tempdir().expect("tempdir");
    isolate_config(&dir);
    unsafe {
        std::env::remove_var(ION_TOKEN_ENV);
    }

    let options = RunOptions {
        headless: true,
        max_ticks: Some(1),
        ..RunOptions::default()
    };
    let err = run(options).await.expect_err("missing token is fatal");
    assert_eq!(
        err.downcast_ref::<StartupError>(),
        Some(&StartupError::MissingAccessToken)
    );
}
