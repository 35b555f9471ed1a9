//! Config-driven runner E2E tests.

use safe_result::prelude::*;
use safe_result::{
    ENV_CAPTURE_PANICS, ENV_FALSY_RESULTS, ENV_LOG_FAILURES, ErrorEnvelope, FalsyPolicy,
    RunnerConfig, RunnerEnv, load_runner_config_from_sources,
};
use std::collections::BTreeMap;
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        self.0
            .lock()
            .map(|buffer| String::from_utf8_lossy(&buffer).into_owned())
            .unwrap_or_default()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_env_filter("safe_result=debug")
        .with_ansi(false)
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}

fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

async fn ready<T>(value: T) -> Result<T, io::Error> {
    Ok(value)
}

#[tokio::test]
async fn accept_policy_from_toml_keeps_falsy_values() -> Result<(), ErrorEnvelope> {
    let config = load_runner_config_from_sources(
        Some("version = 1\nfalsyResults = \"accept\"\n"),
        &RunnerEnv::default(),
    )?;
    let runner = SafeRunner::new(config);

    let zero = runner.run_checked(ready(0_u32), |_| true).await;
    let empty = runner.run_checked(ready(String::new()), String::is_empty).await;

    assert_eq!(zero.result(), Some(&0));
    assert_eq!(empty.result().map(String::as_str), Some(""));
    Ok(())
}

#[tokio::test]
async fn default_policy_rejects_falsy_values() -> Result<(), ErrorEnvelope> {
    let config = load_runner_config_from_sources(None, &RunnerEnv::default())?;
    let envelope = SafeRunner::new(config)
        .run_checked(ready(0_u32), |_| true)
        .await;

    assert!(envelope.result().is_none());
    assert!(envelope.error().is_some_and(SafeError::is_type_mismatch));
    Ok(())
}

#[tokio::test]
async fn env_overrides_file_policy() -> Result<(), ErrorEnvelope> {
    let overrides = RunnerEnv::from_map(&env(&[(ENV_FALSY_RESULTS, "reject")]))?;
    let config =
        load_runner_config_from_sources(Some("falsyResults = \"accept\"\n"), &overrides)?;

    assert_eq!(config.falsy_results, FalsyPolicy::Reject);
    let envelope = SafeRunner::new(config)
        .run_checked(ready(false), |_| true)
        .await;
    assert!(envelope.error().is_some_and(SafeError::is_type_mismatch));
    Ok(())
}

#[tokio::test]
async fn invalid_env_value_is_a_config_error() {
    let error = RunnerEnv::from_map(&env(&[(ENV_CAPTURE_PANICS, "sometimes")]))
        .map_err(ErrorEnvelope::from)
        .err();

    assert_eq!(
        error.and_then(|error| error.code).map(|code| code.to_string()),
        Some("config:invalid_env_bool".to_string())
    );
}

#[tokio::test]
async fn unknown_config_keys_are_rejected() {
    let error = load_runner_config_from_sources(Some("retries = 3\n"), &RunnerEnv::default()).err();
    assert!(error.is_some());
}

#[tokio::test(flavor = "current_thread")]
async fn failures_are_traced_when_enabled() {
    let (logs, _guard) = capture_logs();

    let mismatch = safe_with(ready(5_u8), |value| *value > 10).await;
    let failed = safe(async { Err::<u8, _>(io::Error::other("backend down")) }).await;

    assert!(mismatch.is_err());
    assert!(failed.is_err());
    let output = logs.contents();
    assert!(output.contains("safe.type_mismatch"), "missing mismatch event: {output}");
    assert!(output.contains("safe.operation_failed"), "missing failure event: {output}");
    assert!(output.contains("backend down"), "missing error text: {output}");
}

#[tokio::test(flavor = "current_thread")]
async fn failures_are_silent_when_logging_disabled() -> Result<(), ErrorEnvelope> {
    let (logs, _guard) = capture_logs();
    let overrides = RunnerEnv::from_map(&env(&[(ENV_LOG_FAILURES, "off")]))?;
    let runner = SafeRunner::new(load_runner_config_from_sources(None, &overrides)?);

    let envelope = runner.run_checked(ready(5_u8), |value| *value > 10).await;

    assert!(envelope.is_err());
    assert_eq!(logs.contents(), "");
    Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn successes_are_not_traced() {
    let (logs, _guard) = capture_logs();

    let envelope = safe_with(ready(7_u8), |value| *value == 7).await;

    assert_eq!(envelope.result(), Some(&7));
    assert_eq!(logs.contents(), "");
}

#[tokio::test]
#[allow(clippy::panic, reason = "exercises panic capture toggled by config")]
async fn capture_panics_setting_is_honoured() {
    let capturing = SafeRunner::new(RunnerConfig::default());
    let envelope = capturing
        .run_checked(ready(1_u8), |_| panic!("shape check exploded"))
        .await;

    assert_eq!(
        envelope.error().map(SafeError::message).as_deref(),
        Some("shape check exploded")
    );
}
