use std::fmt;

use super::value_core::{Record, Value};

impl Value {
    /// Read a value from its literal text form.
    ///
    /// `null` is unit, `true` and `false` are booleans, anything that
    /// parses as an integer or a float is a number, and everything else is
    /// text. This is deliberately shallow: there is no syntax for lists or
    /// records.
    pub fn parse_literal(s: &str) -> Value {
        match s {
            "null" => Value::Unit,
            "true" => Value::Boolean(true),
            "false" => Value::Boolean(false),
            _ => {
                if let Ok(i) = s.parse::<i64>() {
                    Value::Integer(i)
                } else if let Some(f) = Self::float_literal(s) {
                    Value::Float(f)
                } else {
                    Value::Text(s.into())
                }
            }
        }
    }

    // Rust accepts "inf" and "NaN" as floats; as literals we only take
    // text that has at least one digit in it.
    fn float_literal(s: &str) -> Option<f64> {
        if !s.bytes().any(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse::<f64>().ok()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(v) => {
                if v.is_finite() && v.fract() == 0.0 {
                    // keep floats recognizable as floats
                    write!(f, "{:.1}", v)
                } else {
                    write!(f, "{}", v)
                }
            }
            Value::Text(s) => write!(f, "{}", s),
            Value::List(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
            Value::Record(record) => write_record(f, record),
            Value::Object(instance) => {
                write!(f, "object")?;
                write_record(f, instance.record())
            }
        }
    }
}

fn write_record(f: &mut fmt::Formatter<'_>, record: &Record) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (name, value)) in record.fields().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}: {}", name, value)?;
    }
    write!(f, "}}")
}
