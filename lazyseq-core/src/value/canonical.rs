use std::rc::Rc;

use ordered_float::OrderedFloat;

use crate::error;

use super::key::{CanonicalKey, EquivalenceMode};
use super::value_core::Value;

/// Anything that can be turned into a [`CanonicalKey`].
///
/// Implemented for [`Value`] and for common Rust data, so the set algebra
/// works over plain iterators of integers or strings too. Implementations
/// must be deterministic: the same value under the same mode always yields
/// the same key.
pub trait Canonical {
    fn canonical_key(&self, mode: EquivalenceMode) -> error::Result<CanonicalKey>;
}

impl Canonical for Value {
    fn canonical_key(&self, mode: EquivalenceMode) -> error::Result<CanonicalKey> {
        CanonicalKey::new(self, mode)
    }
}

impl<T: Canonical + ?Sized> Canonical for &T {
    fn canonical_key(&self, mode: EquivalenceMode) -> error::Result<CanonicalKey> {
        (**self).canonical_key(mode)
    }
}

impl<T: Canonical + ?Sized> Canonical for Rc<T> {
    fn canonical_key(&self, mode: EquivalenceMode) -> error::Result<CanonicalKey> {
        (**self).canonical_key(mode)
    }
}

impl Canonical for () {
    fn canonical_key(&self, _mode: EquivalenceMode) -> error::Result<CanonicalKey> {
        Ok(CanonicalKey::Unit)
    }
}

impl Canonical for bool {
    fn canonical_key(&self, mode: EquivalenceMode) -> error::Result<CanonicalKey> {
        Ok(CanonicalKey::boolean(*self, mode))
    }
}

macro_rules! canonical_integer {
    ($($t:ty),*) => {
        $(
            impl Canonical for $t {
                fn canonical_key(&self, _mode: EquivalenceMode) -> error::Result<CanonicalKey> {
                    // widening: every listed type fits in i128
                    Ok(CanonicalKey::Integer(*self as i128))
                }
            }
        )*
    };
}

canonical_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl Canonical for f64 {
    fn canonical_key(&self, mode: EquivalenceMode) -> error::Result<CanonicalKey> {
        CanonicalKey::float(*self, mode)
    }
}

impl Canonical for f32 {
    fn canonical_key(&self, mode: EquivalenceMode) -> error::Result<CanonicalKey> {
        CanonicalKey::float((*self).into(), mode)
    }
}

impl Canonical for OrderedFloat<f64> {
    fn canonical_key(&self, mode: EquivalenceMode) -> error::Result<CanonicalKey> {
        CanonicalKey::float(self.0, mode)
    }
}

impl Canonical for str {
    fn canonical_key(&self, mode: EquivalenceMode) -> error::Result<CanonicalKey> {
        Ok(CanonicalKey::text(&Rc::from(self), mode))
    }
}

impl Canonical for char {
    fn canonical_key(&self, mode: EquivalenceMode) -> error::Result<CanonicalKey> {
        let mut buffer = [0; 4];
        self.encode_utf8(&mut buffer).canonical_key(mode)
    }
}

impl Canonical for String {
    fn canonical_key(&self, mode: EquivalenceMode) -> error::Result<CanonicalKey> {
        self.as_str().canonical_key(mode)
    }
}

impl<T: Canonical> Canonical for Option<T> {
    fn canonical_key(&self, mode: EquivalenceMode) -> error::Result<CanonicalKey> {
        match self {
            Some(value) => value.canonical_key(mode),
            None => Ok(CanonicalKey::Unit),
        }
    }
}

impl<T: Canonical> Canonical for [T] {
    fn canonical_key(&self, mode: EquivalenceMode) -> error::Result<CanonicalKey> {
        Ok(CanonicalKey::List(
            self.iter()
                .map(|v| v.canonical_key(mode))
                .collect::<error::Result<_>>()?,
        ))
    }
}

impl<T: Canonical> Canonical for Vec<T> {
    fn canonical_key(&self, mode: EquivalenceMode) -> error::Result<CanonicalKey> {
        self.as_slice().canonical_key(mode)
    }
}

impl<T: Canonical, const N: usize> Canonical for [T; N] {
    fn canonical_key(&self, mode: EquivalenceMode) -> error::Result<CanonicalKey> {
        self.as_slice().canonical_key(mode)
    }
}
