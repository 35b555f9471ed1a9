//! Single-line runtime type assertions.

use safe_result_shared::{Envelope, SafeError, TypeMismatchError};

/// Check `value` against `predicate` and wrap the outcome in an envelope.
///
/// The predicate runs exactly once. A `false` answer becomes a
/// [`SafeError::TypeMismatch`] carrying the fixed message
/// `"Given object did not pass type check."`.
///
/// The predicate is not guarded: if it panics, the panic unwinds to the caller.
/// Use [`safe_with`](crate::safe_with) to have panics captured as well.
///
/// # Example
///
/// ```
/// use safe_result_core::is_type;
/// use serde_json::{Value, json};
///
/// fn has_id(value: &Value) -> bool {
///     value.get("id").is_some_and(Value::is_number)
/// }
///
/// let checked = is_type(json!({ "id": 1 }), has_id);
/// assert!(checked.error().is_none());
///
/// let rejected = is_type(json!({ "id": "one" }), has_id);
/// assert!(rejected.result().is_none());
/// ```
pub fn is_type<T, P>(value: T, predicate: P) -> Envelope<T>
where
    P: FnOnce(&T) -> bool,
{
    if predicate(&value) {
        Envelope::success(value)
    } else {
        Envelope::failure(SafeError::TypeMismatch(TypeMismatchError::of::<T>()))
    }
}
