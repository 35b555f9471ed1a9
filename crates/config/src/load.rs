//! Config loading helpers (env + file).
//!
//! Precedence (highest wins):
//! - env overrides (`RunnerEnv`)
//! - config file content (JSON or TOML)
//! - defaults (`RunnerConfig::default()`)

use crate::env::{RunnerEnv, apply_env_overrides};
use crate::schema::{RunnerConfig, parse_runner_config_json, parse_runner_config_toml};
use safe_result_shared::{ErrorCode, ErrorEnvelope};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

/// Load the runner config from in-memory sources.
pub fn load_runner_config_from_sources(
    config_toml: Option<&str>,
    env: &RunnerEnv,
) -> Result<RunnerConfig, ErrorEnvelope> {
    let config = match config_toml {
        None => RunnerConfig::default(),
        Some(input) => parse_runner_config_toml(input)?,
    };

    apply_env_overrides(config, env)
}

/// Load the runner config from an optional file path.
pub fn load_runner_config_from_path(
    config_path: Option<&Path>,
    env: &RunnerEnv,
) -> Result<RunnerConfig, ErrorEnvelope> {
    let config = match config_path {
        None => RunnerConfig::default(),
        Some(path) => {
            let config_text = read_config_file(path)?;
            match detect_config_format(path)? {
                ConfigFormat::Json => parse_runner_config_json(&config_text)?,
                ConfigFormat::Toml => parse_runner_config_toml(&config_text)?,
            }
        },
    };

    let config = apply_env_overrides(config, env)?;
    tracing::debug!(
        path = ?config_path,
        capture_panics = config.capture_panics,
        falsy_results = %config.falsy_results,
        log_failures = config.log_failures,
        "runner config loaded"
    );
    Ok(config)
}

/// Load the runner config from the process env and an optional file path.
pub fn load_runner_config_std_env(config_path: Option<&Path>) -> Result<RunnerConfig, ErrorEnvelope> {
    let env = RunnerEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    load_runner_config_from_path(config_path, &env)
}

/// Serialize the config as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(config: &RunnerConfig) -> Result<String, ErrorEnvelope> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            Some(ErrorCode::new("config", "serialize_toml")),
            format!("failed to serialize config TOML: {error}"),
        )
    })?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "config_file_permission_denied")
            },
            _ => ErrorCode::new("config", "config_file_io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read config file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}

fn detect_config_format(path: &Path) -> Result<ConfigFormat, ErrorEnvelope> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("toml") => Ok(ConfigFormat::Toml),
        Some("json") => Ok(ConfigFormat::Json),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported config format; use .toml or .json",
        )
        .with_metadata("extension", other.to_string())),
    }
}
