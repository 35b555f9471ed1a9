//! # safe-result-config
//!
//! Runner configuration schema, validation, and loading.
//! This crate depends on `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (env + file).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use env::{
    ENV_CAPTURE_PANICS, ENV_FALSY_RESULTS, ENV_LOG_FAILURES, EnvParseError, RunnerEnv,
    apply_env_overrides,
};
pub use load::{
    load_runner_config_from_path, load_runner_config_from_sources, load_runner_config_std_env,
    to_pretty_toml,
};
pub use schema::{
    CURRENT_CONFIG_VERSION, FalsyPolicy, RunnerConfig, parse_runner_config_json,
    parse_runner_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
