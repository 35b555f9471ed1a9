//! Runner configuration schema, defaults, and validation.
//!
//! - Deserialization uses `serde` (JSON or TOML).
//! - Validation is manual and returns `ErrorEnvelope`s in the `config` namespace.

use safe_result_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current supported configuration schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// How the runner treats falsy values that passed their predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FalsyPolicy {
    /// Report falsy values (`0`, `""`, `false`, `None`, ...) as type mismatches,
    /// even when the predicate accepted them.
    #[default]
    Reject,
    /// Trust the predicate alone.
    Accept,
}

impl FalsyPolicy {
    /// Parse the wire name (`reject` / `accept`), case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "reject" => Some(Self::Reject),
            "accept" => Some(Self::Accept),
            _ => None,
        }
    }

    /// Returns true when falsy values are rejected.
    #[must_use]
    pub const fn rejects_falsy(self) -> bool {
        matches!(self, Self::Reject)
    }
}

impl fmt::Display for FalsyPolicy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => formatter.write_str("reject"),
            Self::Accept => formatter.write_str("accept"),
        }
    }
}

/// Settings for a `SafeRunner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct RunnerConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Convert panics inside the operation or predicate into envelope errors.
    pub capture_panics: bool,
    /// Falsy-value handling on the predicate path.
    pub falsy_results: FalsyPolicy,
    /// Emit `tracing` events for failed outcomes.
    pub log_failures: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            capture_panics: true,
            falsy_results: FalsyPolicy::Reject,
            log_failures: true,
        }
    }
}

impl RunnerConfig {
    /// Set panic capture.
    #[must_use]
    pub const fn with_capture_panics(mut self, capture_panics: bool) -> Self {
        self.capture_panics = capture_panics;
        self
    }

    /// Set the falsy-value policy.
    #[must_use]
    pub const fn with_falsy_results(mut self, policy: FalsyPolicy) -> Self {
        self.falsy_results = policy;
        self
    }

    /// Set failure logging.
    #[must_use]
    pub const fn with_log_failures(mut self, log_failures: bool) -> Self {
        self.log_failures = log_failures;
        self
    }

    /// Validate the config.
    pub fn validate(self) -> Result<Self, ErrorEnvelope> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ErrorEnvelope::expected(
                ErrorCode::new("config", "unsupported_version"),
                format!(
                    "unsupported config version {}; expected {CURRENT_CONFIG_VERSION}",
                    self.version
                ),
            )
            .with_metadata("version", self.version.to_string()));
        }
        Ok(self)
    }
}

/// Parse a runner config from a JSON string, applying validation.
pub fn parse_runner_config_json(input: &str) -> Result<RunnerConfig, ErrorEnvelope> {
    let config: RunnerConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;

    config.validate()
}

/// Parse a runner config from a TOML string, applying validation.
pub fn parse_runner_config_toml(input: &str) -> Result<RunnerConfig, ErrorEnvelope> {
    let config: RunnerConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;

    config.validate()
}
