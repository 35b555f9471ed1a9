//! # safe-result-core
//!
//! Type checker and safe runner.
//!
//! - [`is_type`] - run a predicate against a value, get an [`Envelope`] back
//! - [`safe`] / [`safe_with`] - await a fallible future, get an [`Envelope`] back
//! - [`SafeRunner`] - the same, with a [`RunnerConfig`]
//!
//! ```
//! use safe_result_core::{safe, safe_with};
//!
//! # async fn demo() {
//! let envelope = safe(async { "42".parse::<u32>() }).await;
//! assert_eq!(envelope.result(), Some(&42));
//!
//! let envelope = safe_with(async { "42".parse::<u32>() }, |value| *value > 100).await;
//! assert!(envelope.error().is_some_and(|error| error.is_type_mismatch()));
//! # }
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod runner;
pub mod truthy;
pub mod type_check;

pub use runner::{SafeFutureExt, SafeRunner, safe, safe_with};
pub use safe_result_config::{FalsyPolicy, RunnerConfig};
pub use safe_result_shared::{Envelope, SafeError};
pub use truthy::Truthy;
pub use type_check::is_type;

/// Returns the core crate version.
#[must_use]
pub const fn core_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
