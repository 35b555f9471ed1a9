//! Environment variable parsing and env-to-config merging.
//!
//! Env parsing is strict: a variable that is present but empty or malformed
//! fails fast instead of silently falling back to the default.

use crate::schema::{FalsyPolicy, RunnerConfig};
use safe_result_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::fmt;

/// Env var: convert panics into envelope errors.
pub const ENV_CAPTURE_PANICS: &str = "SAFE_RESULT_CAPTURE_PANICS";
/// Env var: falsy-value policy (`reject` / `accept`).
pub const ENV_FALSY_RESULTS: &str = "SAFE_RESULT_FALSY_RESULTS";
/// Env var: emit tracing events for failures.
pub const ENV_LOG_FAILURES: &str = "SAFE_RESULT_LOG_FAILURES";

const ALL_ENV_VARS: [&str; 3] = [ENV_CAPTURE_PANICS, ENV_FALSY_RESULTS, ENV_LOG_FAILURES];

/// Parsed env overrides; `None` leaves the config value untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunnerEnv {
    /// Override for `capturePanics`.
    pub capture_panics: Option<bool>,
    /// Override for `falsyResults`.
    pub falsy_results: Option<FalsyPolicy>,
    /// Override for `logFailures`.
    pub log_failures: Option<bool>,
}

impl RunnerEnv {
    /// Parse overrides from an explicit map (tests, embedding hosts).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            capture_panics: parse_optional_bool(map, ENV_CAPTURE_PANICS)?,
            falsy_results: parse_optional_falsy_policy(map, ENV_FALSY_RESULTS)?,
            log_failures: parse_optional_bool(map, ENV_LOG_FAILURES)?,
        })
    }

    /// Parse overrides from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in ALL_ENV_VARS {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }
        Self::from_map(&map)
    }

    /// Returns true when no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.capture_panics.is_none() && self.falsy_results.is_none() && self.log_failures.is_none()
    }
}

/// Apply env overrides on top of a config and validate the result.
pub fn apply_env_overrides(
    mut config: RunnerConfig,
    env: &RunnerEnv,
) -> Result<RunnerConfig, ErrorEnvelope> {
    if let Some(capture_panics) = env.capture_panics {
        config.capture_panics = capture_panics;
    }
    if let Some(policy) = env.falsy_results {
        config.falsy_results = policy;
    }
    if let Some(log_failures) = env.log_failures {
        config.log_failures = log_failures;
    }
    config.validate()
}

/// Validation failures when parsing env variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Boolean env var had an invalid value.
    InvalidBool {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Enum env var had an invalid value.
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidBool { .. } => ErrorCode::new("config", "invalid_env_bool"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidBool { var, .. } => write!(formatter, "{var} must be a boolean"),
            Self::InvalidEnum { var, .. } => write!(formatter, "{var} has an unsupported value"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidBool { var, value } | EnvParseError::InvalidEnum { var, value } => {
                envelope
                    .with_metadata("env_var", var)
                    .with_metadata("value", value)
            },
        }
    }
}

fn parse_optional_bool(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<bool>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(EnvParseError::InvalidBool {
            var,
            value: raw.clone(),
        }),
    }
}

fn parse_optional_falsy_policy(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<FalsyPolicy>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    FalsyPolicy::parse(raw)
        .map(Some)
        .ok_or_else(|| EnvParseError::InvalidEnum {
            var,
            value: raw.clone(),
        })
}
