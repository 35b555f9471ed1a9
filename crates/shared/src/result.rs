//! The `{ result, error }` envelope.

use crate::errors::SafeError;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::convert::Infallible;

/// Uniform success/error value produced by the type checker and the runner.
///
/// Exactly one of [`result`](Self::result) and [`error`](Self::error) is
/// populated; the envelope stores a single `Result` so the other state is
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Envelope<T, E = Infallible> {
    outcome: Result<T, SafeError<E>>,
}

impl<T, E> Envelope<T, E> {
    /// Envelope holding a value.
    pub const fn success(value: T) -> Self {
        Self { outcome: Ok(value) }
    }

    /// Envelope holding an error.
    pub const fn failure(error: SafeError<E>) -> Self {
        Self {
            outcome: Err(error),
        }
    }

    /// The value, when no error occurred.
    #[must_use]
    pub fn result(&self) -> Option<&T> {
        self.outcome.as_ref().ok()
    }

    /// The error, when one occurred.
    #[must_use]
    pub fn error(&self) -> Option<&SafeError<E>> {
        self.outcome.as_ref().err()
    }

    /// Returns true when the envelope holds a value.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Returns true when the envelope holds an error.
    #[must_use]
    pub const fn is_err(&self) -> bool {
        self.outcome.is_err()
    }

    /// Borrow as a standard `Result`.
    pub fn as_result(&self) -> Result<&T, &SafeError<E>> {
        self.outcome.as_ref()
    }

    /// Convert into a standard `Result` so `?` can be used.
    pub fn into_result(self) -> Result<T, SafeError<E>> {
        self.outcome
    }

    /// Split into the two optional slots.
    pub fn into_parts(self) -> (Option<T>, Option<SafeError<E>>) {
        match self.outcome {
            Ok(value) => (Some(value), None),
            Err(error) => (None, Some(error)),
        }
    }

    /// Map the value, preserving the error.
    pub fn map<U, F>(self, op: F) -> Envelope<U, E>
    where
        F: FnOnce(T) -> U,
    {
        Envelope {
            outcome: self.outcome.map(op),
        }
    }

    /// Reinterpret an envelope whose error cannot be an operation failure.
    pub fn widen(envelope: Envelope<T, Infallible>) -> Self {
        match envelope.outcome {
            Ok(value) => Self::success(value),
            Err(SafeError::TypeMismatch(mismatch)) => {
                Self::failure(SafeError::TypeMismatch(mismatch))
            },
            Err(SafeError::Panicked(panic)) => Self::failure(SafeError::Panicked(panic)),
            Err(SafeError::Operation(never)) => match never {},
        }
    }
}

impl<T, E> From<Result<T, SafeError<E>>> for Envelope<T, E> {
    fn from(outcome: Result<T, SafeError<E>>) -> Self {
        Self { outcome }
    }
}

impl<T, E> From<Envelope<T, E>> for Result<T, SafeError<E>> {
    fn from(envelope: Envelope<T, E>) -> Self {
        envelope.outcome
    }
}

impl<T, E> Serialize for Envelope<T, E>
where
    T: Serialize,
    E: std::error::Error + 'static,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Envelope", 2)?;
        state.serialize_field("result", &self.result())?;
        state.serialize_field("error", &self.error())?;
        state.end()
    }
}

/// Lift a plain `Result` into an envelope, tagging its error as an operation
/// failure.
pub trait IntoEnvelope<T, E> {
    /// Wrap `Ok` as success and `Err` as [`SafeError::Operation`].
    fn into_envelope(self) -> Envelope<T, E>;
}

impl<T, E> IntoEnvelope<T, E> for Result<T, E> {
    fn into_envelope(self) -> Envelope<T, E> {
        Envelope {
            outcome: self.map_err(SafeError::Operation),
        }
    }
}
