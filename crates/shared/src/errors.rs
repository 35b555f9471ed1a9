//! Error types carried in the `error` slot of an [`Envelope`](crate::Envelope).

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::{any::Any, fmt, io};
use thiserror::Error;

/// Metadata attached to errors for diagnostics.
pub type ErrorMetadata = BTreeMap<String, String>;

/// Fixed message reported when a value fails its predicate.
pub const TYPE_MISMATCH_MESSAGE: &str = "Given object did not pass type check.";

const LOOKUP_FAILURE_PREFIX: &str = "failed to lookup address information";

/// High-level classification of error origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// Expected failures (type mismatches, bad configuration).
    Expected,
    /// Invariant violations (panics inside the guarded region).
    Invariant,
    /// Unexpected failures (the awaited operation itself failed).
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected => formatter.write_str("expected"),
            Self::Invariant => formatter.write_str("invariant"),
            Self::Unexpected => formatter.write_str("unexpected"),
        }
    }
}

/// Stable error code with namespace and identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode {
    namespace: String,
    code: String,
}

impl ErrorCode {
    /// Create a new error code with a namespace and code.
    pub fn new(namespace: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            code: code.into(),
        }
    }

    /// Value failed its type predicate.
    pub fn type_mismatch() -> Self {
        Self::new("safe", "type_mismatch")
    }

    /// Operation or predicate panicked.
    pub fn panicked() -> Self {
        Self::new("safe", "panicked")
    }

    /// Host name could not be resolved.
    pub fn not_found_host() -> Self {
        Self::os("ENOTFOUND")
    }

    /// OS-level error code (POSIX-style name).
    pub fn os(code: impl Into<String>) -> Self {
        Self::new("os", code)
    }

    /// Returns the namespace portion.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the code identifier.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.namespace, self.code)
    }
}

/// Flattened, serializable view of a [`SafeError`] or a config failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Error kind describing the origin category.
    pub kind: ErrorKind,
    /// Stable error code, when one is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    /// Human-readable error message.
    pub message: String,
    /// Additional diagnostic metadata.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: ErrorMetadata,
}

impl ErrorEnvelope {
    /// Create an expected error.
    pub fn expected(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Expected,
            code: Some(code),
            message: message.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Create an invariant error.
    pub fn invariant(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Invariant,
            code: Some(code),
            message: message.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Create an unexpected error; the code is optional since foreign errors
    /// rarely carry one.
    pub fn unexpected(code: Option<ErrorCode>, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Unexpected,
            code,
            message: message.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a single metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(formatter, "{} {code}: {}", self.kind, self.message),
            None => write!(formatter, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for ErrorEnvelope {}

/// A value was rejected by its type predicate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Given object did not pass type check.")]
pub struct TypeMismatchError {
    value_type: &'static str,
}

impl TypeMismatchError {
    /// Record a mismatch for a value of type `T`.
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        Self {
            value_type: std::any::type_name::<T>(),
        }
    }

    /// Type name of the rejected value.
    #[must_use]
    pub const fn value_type(&self) -> &'static str {
        self.value_type
    }
}

/// A panic captured inside the guarded region.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("panicked: {message}")]
pub struct PanicError {
    message: String,
}

impl PanicError {
    /// Build from a `catch_unwind` payload.
    #[must_use]
    pub fn from_payload(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        Self { message }
    }

    /// Panic message, or a placeholder for non-string payloads.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error slot of an envelope.
///
/// `E` is the awaited operation's own error type and is never rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SafeError<E> {
    /// The awaited operation resolved to `Err`.
    Operation(E),
    /// The value did not pass its predicate.
    TypeMismatch(TypeMismatchError),
    /// The operation or the predicate panicked.
    Panicked(PanicError),
}

impl<E: fmt::Display> fmt::Display for SafeError<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operation(error) => fmt::Display::fmt(error, formatter),
            Self::TypeMismatch(mismatch) => fmt::Display::fmt(mismatch, formatter),
            Self::Panicked(panic) => fmt::Display::fmt(panic, formatter),
        }
    }
}

impl<E> std::error::Error for SafeError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Operation(error) => error.source(),
            Self::TypeMismatch(_) | Self::Panicked(_) => None,
        }
    }
}

impl<E> SafeError<E> {
    /// Returns true if this is a type-check failure.
    #[must_use]
    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch(_))
    }

    /// Returns true if the operation itself failed.
    #[must_use]
    pub const fn is_operation(&self) -> bool {
        matches!(self, Self::Operation(_))
    }

    /// Borrow the operation error, if that is what failed.
    #[must_use]
    pub const fn operation(&self) -> Option<&E> {
        match self {
            Self::Operation(error) => Some(error),
            _ => None,
        }
    }

    /// Consume into the operation error, if that is what failed.
    pub fn into_operation(self) -> Option<E> {
        match self {
            Self::Operation(error) => Some(error),
            _ => None,
        }
    }

    /// Origin category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Operation(_) => ErrorKind::Unexpected,
            Self::TypeMismatch(_) => ErrorKind::Expected,
            Self::Panicked(_) => ErrorKind::Invariant,
        }
    }
}

impl<E: fmt::Display> SafeError<E> {
    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Operation(error) => error.to_string(),
            Self::TypeMismatch(_) => TYPE_MISMATCH_MESSAGE.to_string(),
            Self::Panicked(panic) => panic.message().to_string(),
        }
    }
}

impl<E> SafeError<E>
where
    E: std::error::Error + 'static,
{
    /// Stable code for this error.
    ///
    /// Operation errors only carry a code when an `io::Error` sits somewhere in
    /// their source chain.
    #[must_use]
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Operation(error) => classify_error(error),
            Self::TypeMismatch(_) => Some(ErrorCode::type_mismatch()),
            Self::Panicked(_) => Some(ErrorCode::panicked()),
        }
    }

    /// Flatten into a serializable report.
    #[must_use]
    pub fn to_envelope(&self) -> ErrorEnvelope {
        match self {
            Self::Operation(error) => ErrorEnvelope::unexpected(self.code(), error.to_string()),
            Self::TypeMismatch(mismatch) => {
                ErrorEnvelope::expected(ErrorCode::type_mismatch(), TYPE_MISMATCH_MESSAGE)
                    .with_metadata("value_type", mismatch.value_type())
            },
            Self::Panicked(panic) => ErrorEnvelope::invariant(ErrorCode::panicked(), panic.message()),
        }
    }
}

impl<E> Serialize for SafeError<E>
where
    E: std::error::Error + 'static,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_envelope().serialize(serializer)
    }
}

/// Derive an OS-style code from the first `io::Error` in the source chain.
pub fn classify_error(error: &(dyn std::error::Error + 'static)) -> Option<ErrorCode> {
    find_io_error(error).and_then(os_error_code).map(ErrorCode::os)
}

fn find_io_error<'a>(error: &'a (dyn std::error::Error + 'static)) -> Option<&'a io::Error> {
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(error);

    while let Some(candidate) = current {
        if let Some(io_error) = candidate.downcast_ref::<io::Error>() {
            return Some(io_error);
        }
        current = candidate.source();
    }

    None
}

/// Map an `io::Error` to its POSIX-style name.
///
/// Resolver failures surface as uncategorized errors whose message starts with
/// the libstd lookup prefix; those become `ENOTFOUND`.
pub fn os_error_code(error: &io::Error) -> Option<&'static str> {
    if error.to_string().starts_with(LOOKUP_FAILURE_PREFIX) {
        return Some("ENOTFOUND");
    }

    let code = match error.kind() {
        io::ErrorKind::NotFound => "ENOENT",
        io::ErrorKind::PermissionDenied => "EACCES",
        io::ErrorKind::ConnectionRefused => "ECONNREFUSED",
        io::ErrorKind::ConnectionReset => "ECONNRESET",
        io::ErrorKind::ConnectionAborted => "ECONNABORTED",
        io::ErrorKind::NotConnected => "ENOTCONN",
        io::ErrorKind::AddrInUse => "EADDRINUSE",
        io::ErrorKind::AddrNotAvailable => "EADDRNOTAVAIL",
        io::ErrorKind::BrokenPipe => "EPIPE",
        io::ErrorKind::AlreadyExists => "EEXIST",
        io::ErrorKind::WouldBlock => "EAGAIN",
        io::ErrorKind::InvalidInput => "EINVAL",
        io::ErrorKind::TimedOut => "ETIMEDOUT",
        io::ErrorKind::Interrupted => "EINTR",
        _ => return None,
    };
    Some(code)
}
