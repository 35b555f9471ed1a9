//! # safe-result
//!
//! Await fallible futures into a uniform `{ result, error }` envelope, and
//! assert a value's shape at runtime in a single line.
//!
//! ```
//! use safe_result::prelude::*;
//!
//! # async fn demo() {
//! let envelope = safe(async { Ok::<_, std::io::Error>(vec![1, 2, 3]) }).await;
//! match envelope.as_result() {
//!     Ok(values) => assert_eq!(values.len(), 3),
//!     Err(error) => eprintln!("failed: {}", error.message()),
//! }
//!
//! let checked = is_type(7_u8, |value| *value < 10);
//! assert!(checked.error().is_none());
//! # }
//! ```
//!
//! This crate depends on `core`, `config`, and `shared`.

use std::path::Path;

pub use safe_result_config::{
    ENV_CAPTURE_PANICS, ENV_FALSY_RESULTS, ENV_LOG_FAILURES, EnvParseError, FalsyPolicy,
    RunnerConfig, RunnerEnv, load_runner_config_from_path, load_runner_config_from_sources,
    load_runner_config_std_env, parse_runner_config_json, parse_runner_config_toml,
    to_pretty_toml,
};
pub use safe_result_core::{SafeFutureExt, SafeRunner, Truthy, is_type, safe, safe_with};
pub use safe_result_shared::{
    Envelope, ErrorCode, ErrorEnvelope, ErrorKind, IntoEnvelope, PanicError, SafeError,
    TYPE_MISMATCH_MESSAGE, TypeMismatchError,
};

/// Everything needed for everyday use.
pub mod prelude {
    pub use safe_result_core::{SafeFutureExt, SafeRunner, Truthy, is_type, safe, safe_with};
    pub use safe_result_shared::{Envelope, IntoEnvelope, SafeError};
}

/// Build a runner from the process env and an optional config file.
pub fn runner_from_std_env(config_path: Option<&Path>) -> Result<SafeRunner, ErrorEnvelope> {
    load_runner_config_std_env(config_path).map(SafeRunner::new)
}

/// Returns the facade crate version.
#[must_use]
pub const fn facade_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
