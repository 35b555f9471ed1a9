//! Dynamic truthiness for values coming out of an operation.
//!
//! The runner's predicate path rejects values that are "falsy" even when the
//! predicate accepted them: zero, `NaN`, `false`, empty strings, `None`, `()`
//! and JSON `null`. Collections and structs are always truthy, matching how
//! object values behave in dynamically typed callers.
//!
//! Domain types opt in with an empty impl:
//!
//! ```
//! use safe_result_core::Truthy;
//!
//! struct Todo {
//!     id: u64,
//! }
//!
//! impl Truthy for Todo {}
//!
//! assert!(Todo { id: 0 }.is_truthy());
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// Truthiness of a value.
pub trait Truthy {
    /// Returns false for falsy values. Defaults to `true`.
    fn is_truthy(&self) -> bool {
        true
    }
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! impl_truthy_for_integers {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Truthy for $ty {
                fn is_truthy(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

impl_truthy_for_integers!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Truthy for f32 {
    fn is_truthy(&self) -> bool {
        !self.is_nan() && *self != 0.0
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        !self.is_nan() && *self != 0.0
    }
}

impl Truthy for char {}

impl Truthy for () {
    fn is_truthy(&self) -> bool {
        false
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for Cow<'_, str> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(|value| value.is_truthy())
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl<T: Truthy + ?Sized> Truthy for Box<T> {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl<T: Truthy + ?Sized> Truthy for Rc<T> {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl<T: Truthy + ?Sized> Truthy for Arc<T> {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

// Containers are objects: truthy even when empty.
impl<T> Truthy for [T] {}
impl<T, const N: usize> Truthy for [T; N] {}
impl<T> Truthy for Vec<T> {}
impl<T> Truthy for VecDeque<T> {}
impl<K, V, S> Truthy for HashMap<K, V, S> {}
impl<T, S> Truthy for HashSet<T, S> {}
impl<K, V> Truthy for BTreeMap<K, V> {}
impl<T> Truthy for BTreeSet<T> {}
impl Truthy for serde_json::Map<String, serde_json::Value> {}

impl Truthy for serde_json::Value {
    fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(value) => *value,
            Self::Number(number) => number.as_f64().is_some_and(|value| value.is_truthy()),
            Self::String(value) => !value.is_empty(),
            Self::Array(_) | Self::Object(_) => true,
        }
    }
}
