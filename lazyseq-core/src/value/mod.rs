/// Values and their canonical keys.
///
/// A sequence may carry values of mixed kinds. To compare them we map each
/// value to a [`CanonicalKey`] under an [`EquivalenceMode`]; two values are
/// considered the same exactly when their keys are equal.
mod canonical;
mod key;
mod literal;
mod value_core;

pub use canonical::Canonical;
pub use key::{CanonicalKey, EquivalenceMode, Identity};
pub use value_core::{Instance, Record, Value};
