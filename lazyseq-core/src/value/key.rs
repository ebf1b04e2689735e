use std::hash::{Hash, Hasher};
use std::rc::Rc;

use ordered_float::OrderedFloat;
use strum_macros::{Display, EnumString};

use crate::error;

use super::value_core::{Record, Value};

/// How values are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum EquivalenceMode {
    /// Type-sensitive: `1`, `1.0` and `"1"` are three different values,
    /// and object instances are only equal to themselves.
    #[default]
    Strict,
    /// Value-only: numeric text, integers, floats and booleans compare by
    /// their numeric value, and object instances compare by their fields.
    Coercive,
}

// A canonical key is constructed per value, per mode. We can use it as a
// key in a hash map or sort by it, so every operation that needs to know
// whether two values are "the same" goes through here.
//
// In strict mode each value kind maps to its own variant, so keys of
// different kinds never compare equal. In coercive mode numbers, numeric
// text and booleans all collapse onto `Integer` or `Float`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CanonicalKey {
    Unit,
    Boolean(bool),
    // wide enough for every Rust integer type, so no two integers share a key
    Integer(i128),
    Float(OrderedFloat<f64>),
    Text(Rc<str>),
    List(Rc<[CanonicalKey]>),
    Record(Rc<[(Rc<str>, CanonicalKey)]>),
    // coercively compared object instances: structural, but never equal
    // to a plain record with the same fields
    Object(Rc<[(Rc<str>, CanonicalKey)]>),
    Instance(Identity),
}

/// The identity of an object instance.
///
/// The token keeps the instance alive, so its address cannot be reused
/// by another instance while the key exists.
#[derive(Debug, Clone)]
pub struct Identity(Rc<Record>);

impl Identity {
    fn address(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Identity {}

impl PartialOrd for Identity {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identity {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.address().cmp(&other.address())
    }
}

impl Hash for Identity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl CanonicalKey {
    pub(crate) fn new(value: &Value, mode: EquivalenceMode) -> error::Result<CanonicalKey> {
        match value {
            Value::Unit => Ok(CanonicalKey::Unit),
            Value::Boolean(b) => Ok(Self::boolean(*b, mode)),
            Value::Integer(i) => Ok(CanonicalKey::Integer((*i).into())),
            Value::Float(f) => Self::float(*f, mode),
            Value::Text(s) => Ok(Self::text(s, mode)),
            Value::List(values) => Ok(CanonicalKey::List(
                values
                    .iter()
                    .map(|v| Self::new(v, mode))
                    .collect::<error::Result<_>>()?,
            )),
            Value::Record(record) => Ok(CanonicalKey::Record(Self::fields(record, mode)?)),
            Value::Object(instance) => match mode {
                EquivalenceMode::Strict => {
                    Ok(CanonicalKey::Instance(Identity(instance.shared().clone())))
                }
                EquivalenceMode::Coercive => {
                    Ok(CanonicalKey::Object(Self::fields(instance.record(), mode)?))
                }
            },
        }
    }

    pub(crate) fn boolean(b: bool, mode: EquivalenceMode) -> CanonicalKey {
        match mode {
            EquivalenceMode::Strict => CanonicalKey::Boolean(b),
            EquivalenceMode::Coercive => CanonicalKey::Integer(b.into()),
        }
    }

    pub(crate) fn float(f: f64, mode: EquivalenceMode) -> error::Result<CanonicalKey> {
        if f.is_nan() {
            return Err(error::Error::NotComparable);
        }
        match mode {
            EquivalenceMode::Strict => Ok(CanonicalKey::Float(OrderedFloat(f))),
            // floats that hold an integral value are stored as integers, so
            // that they hash the same as the equivalent integer
            EquivalenceMode::Coercive => Ok(Self::integral(f)
                .map(CanonicalKey::Integer)
                .unwrap_or(CanonicalKey::Float(OrderedFloat(f)))),
        }
    }

    pub(crate) fn text(s: &Rc<str>, mode: EquivalenceMode) -> CanonicalKey {
        match mode {
            EquivalenceMode::Strict => CanonicalKey::Text(s.clone()),
            EquivalenceMode::Coercive => {
                Self::numeric(s).unwrap_or_else(|| CanonicalKey::Text(s.clone()))
            }
        }
    }

    fn fields(
        record: &Record,
        mode: EquivalenceMode,
    ) -> error::Result<Rc<[(Rc<str>, CanonicalKey)]>> {
        record
            .fields()
            .map(|(name, value)| Ok((name.clone(), Self::new(value, mode)?)))
            .collect()
    }

    fn integral(f: f64) -> Option<i128> {
        // the upper bound is exclusive, as i128::MAX isn't representable
        if f.fract() == 0.0 && f >= i128::MIN as f64 && f < i128::MAX as f64 {
            Some(f as i128)
        } else {
            None
        }
    }

    // Text that reads as a finite number. Text like "NaN" or "inf" stays
    // text: it is not numeric in the loose sense.
    fn numeric(s: &str) -> Option<CanonicalKey> {
        if let Ok(i) = s.parse::<i128>() {
            return Some(CanonicalKey::Integer(i));
        }
        let f = s.parse::<f64>().ok().filter(|f| f.is_finite())?;
        Some(
            Self::integral(f)
                .map(CanonicalKey::Integer)
                .unwrap_or(CanonicalKey::Float(OrderedFloat(f))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Instance, Record};

    fn key(value: impl Into<Value>, mode: EquivalenceMode) -> CanonicalKey {
        CanonicalKey::new(&value.into(), mode).unwrap()
    }

    #[test]
    fn test_strict_distinguishes_types() {
        let mode = EquivalenceMode::Strict;
        assert_ne!(key(1, mode), key("1", mode));
        assert_ne!(key(1, mode), key(1.0, mode));
        assert_ne!(key(1, mode), key(true, mode));
        assert_ne!(key(Value::Unit, mode), key("", mode));
    }

    #[test]
    fn test_coercive_number_and_numeric_text() {
        let mode = EquivalenceMode::Coercive;
        assert_eq!(key(1, mode), key("1", mode));
        assert_eq!(key(1, mode), key(1.0, mode));
        assert_eq!(key(1.5, mode), key("1.5", mode));
        assert_eq!(key(1, mode), key("1.0", mode));
        assert_eq!(key(1, mode), key(true, mode));
        assert_eq!(key(0, mode), key(false, mode));
    }

    #[test]
    fn test_coercive_non_numeric_text() {
        let mode = EquivalenceMode::Coercive;
        assert_ne!(key("abc", mode), key(0, mode));
        assert_eq!(key("NaN", mode), CanonicalKey::Text("NaN".into()));
        assert_eq!(key("inf", mode), CanonicalKey::Text("inf".into()));
    }

    #[test]
    fn test_nan_is_not_comparable() {
        for mode in [EquivalenceMode::Strict, EquivalenceMode::Coercive] {
            assert_eq!(
                CanonicalKey::new(&Value::Float(f64::NAN), mode),
                Err(error::Error::NotComparable)
            );
        }
    }

    #[test]
    fn test_nan_nested_in_list_is_not_comparable() {
        let value = Value::list([Value::Integer(1), Value::Float(f64::NAN)]);
        assert_eq!(
            CanonicalKey::new(&value, EquivalenceMode::Strict),
            Err(error::Error::NotComparable)
        );
    }

    #[test]
    fn test_infinity_is_comparable() {
        let mode = EquivalenceMode::Coercive;
        assert_eq!(key(f64::INFINITY, mode), key(f64::INFINITY, mode));
        assert_ne!(key(f64::INFINITY, mode), key(f64::NEG_INFINITY, mode));
    }

    #[test]
    fn test_lists_are_structural() {
        for mode in [EquivalenceMode::Strict, EquivalenceMode::Coercive] {
            assert_eq!(key(Value::list([1, 2]), mode), key(Value::list([1, 2]), mode));
            assert_ne!(key(Value::list([1, 2]), mode), key(Value::list([2, 1]), mode));
        }
    }

    #[test]
    fn test_nested_list_coercion() {
        assert_eq!(
            key(Value::list(["1", "2"]), EquivalenceMode::Coercive),
            key(Value::list([1, 2]), EquivalenceMode::Coercive)
        );
        assert_ne!(
            key(Value::list(["1", "2"]), EquivalenceMode::Strict),
            key(Value::list([1, 2]), EquivalenceMode::Strict)
        );
    }

    #[test]
    fn test_records_are_structural() {
        let a = Record::new().with("x", 1).with("y", "a");
        let b = Record::new().with("y", "a").with("x", 1);
        for mode in [EquivalenceMode::Strict, EquivalenceMode::Coercive] {
            assert_eq!(key(a.clone(), mode), key(b.clone(), mode));
        }
    }

    #[test]
    fn test_objects_by_identity_when_strict() {
        let a = Instance::new(Record::new().with("x", 1));
        let b = Instance::new(Record::new().with("x", 1));
        let mode = EquivalenceMode::Strict;
        assert_eq!(key(a.clone(), mode), key(a.clone(), mode));
        assert_ne!(key(a, mode), key(b, mode));
    }

    #[test]
    fn test_objects_by_fields_when_coercive() {
        let a = Instance::new(Record::new().with("x", 1));
        let b = Instance::new(Record::new().with("x", "1"));
        let mode = EquivalenceMode::Coercive;
        assert_eq!(key(a, mode), key(b, mode));
    }

    #[test]
    fn test_object_never_equals_record() {
        let record = Record::new().with("x", 1);
        let object = Instance::new(record.clone());
        for mode in [EquivalenceMode::Strict, EquivalenceMode::Coercive] {
            assert_ne!(key(record.clone(), mode), key(object.clone(), mode));
        }
    }

    #[test]
    fn test_nested_objects_keep_identity_when_strict() {
        let a = Instance::new(Record::new().with("x", 1));
        let b = Instance::new(Record::new().with("x", 1));
        let mode = EquivalenceMode::Strict;

        let in_record = |instance: &Instance| Record::new().with("inner", instance.clone());
        assert_eq!(key(in_record(&a), mode), key(in_record(&a), mode));
        assert_ne!(key(in_record(&a), mode), key(in_record(&b), mode));

        let in_list =
            |instance: &Instance| Value::list([Value::Integer(0), instance.clone().into()]);
        assert_eq!(key(in_list(&a), mode), key(in_list(&a), mode));
        assert_ne!(key(in_list(&a), mode), key(in_list(&b), mode));

        let coercive = EquivalenceMode::Coercive;
        assert_eq!(key(in_record(&a), coercive), key(in_record(&b), coercive));
        assert_eq!(key(in_list(&a), coercive), key(in_list(&b), coercive));
    }

    #[test]
    fn test_coercive_unit_equals_only_unit() {
        let mode = EquivalenceMode::Coercive;
        assert_eq!(key(Value::Unit, mode), CanonicalKey::Unit);
        assert_ne!(key(Value::Unit, mode), key(false, mode));
        assert_ne!(key(Value::Unit, mode), key(0, mode));
        assert_ne!(key(Value::Unit, mode), key("", mode));
        assert_ne!(key(false, mode), key("", mode));
    }

    #[test]
    fn test_integer_text_beyond_i64() {
        let mode = EquivalenceMode::Coercive;
        assert_eq!(
            key("18446744073709551615", mode),
            CanonicalKey::Integer(u64::MAX.into())
        );
        assert_ne!(
            key("18446744073709551615", mode),
            key("18446744073709551614", mode)
        );
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!(
            "strict".parse::<EquivalenceMode>().unwrap(),
            EquivalenceMode::Strict
        );
        assert_eq!(
            "coercive".parse::<EquivalenceMode>().unwrap(),
            EquivalenceMode::Coercive
        );
        assert!("loose".parse::<EquivalenceMode>().is_err());
        assert_eq!(EquivalenceMode::Coercive.to_string(), "coercive");
    }
}
