//! # safe-result-shared
//!
//! Result envelope and error types shared by the safe-result workspace.
//!
//! This crate provides the foundational types every other crate returns:
//!
//! - [`Envelope`] - the `{ result, error }` pair
//! - [`SafeError`] - operation failure, type mismatch, or captured panic
//! - [`ErrorEnvelope`] - flattened, serializable error report
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Unrepresentable invalid states** - An envelope never holds both slots
//! 3. **Serde-compatible** - Envelopes and errors serialize to plain JSON

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod result;

pub use errors::{
    ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata, PanicError, SafeError,
    TYPE_MISMATCH_MESSAGE, TypeMismatchError, classify_error, os_error_code,
};
pub use result::{Envelope, IntoEnvelope};

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
