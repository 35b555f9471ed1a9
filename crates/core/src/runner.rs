//! Await a fallible future and normalize every outcome into an [`Envelope`].
//!
//! The whole await-then-check sequence runs inside one guarded region: an
//! `Err` from the operation, a rejected predicate, and a panic from either all
//! come back as the envelope's `error`. Nothing is re-raised.

use crate::truthy::Truthy;
use crate::type_check::is_type;
use futures_util::FutureExt;
use safe_result_config::RunnerConfig;
use safe_result_shared::{Envelope, PanicError, SafeError, TypeMismatchError};
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;

/// Configured runner. Cheap to copy; holds no state besides its config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SafeRunner {
    config: RunnerConfig,
}

impl SafeRunner {
    /// Create a runner with the given config.
    #[must_use]
    pub const fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Active config.
    #[must_use]
    pub const fn config(&self) -> RunnerConfig {
        self.config
    }

    /// Await `operation` without a type check.
    ///
    /// `Ok(v)` becomes a success holding `v` (falsy values included);
    /// `Err(e)` becomes [`SafeError::Operation`] holding `e` untouched.
    pub async fn run<T, E, F>(self, operation: F) -> Envelope<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let envelope = self
            .guard(async move {
                match operation.await {
                    Ok(value) => Envelope::success(value),
                    Err(error) => Envelope::failure(SafeError::Operation(error)),
                }
            })
            .await;
        self.trace_failure(&envelope);
        envelope
    }

    /// Await `operation`, then check the value with `predicate`.
    ///
    /// The predicate is skipped when the operation fails and otherwise runs
    /// once. With the default [`FalsyPolicy::Reject`](safe_result_config::FalsyPolicy::Reject),
    /// a value that passes the predicate but is falsy (`0`, `""`, `false`,
    /// `None`, ...) is still reported as a type mismatch.
    pub async fn run_checked<T, E, F, P>(self, operation: F, predicate: P) -> Envelope<T, E>
    where
        F: Future<Output = Result<T, E>>,
        P: FnOnce(&T) -> bool,
        T: Truthy,
        E: fmt::Display,
    {
        let rejects_falsy = self.config.falsy_results.rejects_falsy();
        let envelope = self
            .guard(async move {
                let value = match operation.await {
                    Ok(value) => value,
                    Err(error) => return Envelope::failure(SafeError::Operation(error)),
                };

                match is_type(value, predicate).into_result() {
                    Ok(value) if !rejects_falsy || value.is_truthy() => Envelope::success(value),
                    Ok(_) => Envelope::failure(SafeError::TypeMismatch(TypeMismatchError::of::<T>())),
                    Err(error) => Envelope::widen(Envelope::failure(error)),
                }
            })
            .await;
        self.trace_failure(&envelope);
        envelope
    }

    async fn guard<T, E, G>(self, sequence: G) -> Envelope<T, E>
    where
        G: Future<Output = Envelope<T, E>>,
    {
        if !self.config.capture_panics {
            return sequence.await;
        }

        match AssertUnwindSafe(sequence).catch_unwind().await {
            Ok(envelope) => envelope,
            Err(payload) => Envelope::failure(SafeError::Panicked(PanicError::from_payload(&*payload))),
        }
    }

    fn trace_failure<T, E: fmt::Display>(self, envelope: &Envelope<T, E>) {
        if !self.config.log_failures {
            return;
        }
        let Some(error) = envelope.error() else {
            return;
        };

        let value_type = std::any::type_name::<T>();
        match error {
            SafeError::Operation(error) => tracing::debug!(
                target: "safe_result",
                event = "safe.operation_failed",
                value_type,
                error = %error,
                "awaited operation failed"
            ),
            SafeError::TypeMismatch(_) => tracing::debug!(
                target: "safe_result",
                event = "safe.type_mismatch",
                value_type,
                "value did not pass type check"
            ),
            SafeError::Panicked(panic) => tracing::warn!(
                target: "safe_result",
                event = "safe.panicked",
                value_type,
                panic = panic.message(),
                "operation or predicate panicked"
            ),
        }
    }
}

/// Await `operation` with the default runner, without a type check.
pub async fn safe<T, E, F>(operation: F) -> Envelope<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    SafeRunner::default().run(operation).await
}

/// Await `operation` with the default runner and check the value with `predicate`.
pub async fn safe_with<T, E, F, P>(operation: F, predicate: P) -> Envelope<T, E>
where
    F: Future<Output = Result<T, E>>,
    P: FnOnce(&T) -> bool,
    T: Truthy,
    E: fmt::Display,
{
    SafeRunner::default().run_checked(operation, predicate).await
}

/// Method-call form of [`safe`] and [`safe_with`] for any fallible future.
pub trait SafeFutureExt<T, E>: Future<Output = Result<T, E>> + Sized {
    /// See [`safe`].
    fn safe(self) -> impl Future<Output = Envelope<T, E>>
    where
        E: fmt::Display,
    {
        safe(self)
    }

    /// See [`safe_with`].
    fn safe_with<P>(self, predicate: P) -> impl Future<Output = Envelope<T, E>>
    where
        P: FnOnce(&T) -> bool,
        T: Truthy,
        E: fmt::Display,
    {
        safe_with(self, predicate)
    }
}

impl<T, E, F> SafeFutureExt<T, E> for F where F: Future<Output = Result<T, E>> {}
