// disable dead code warning for this module as not every test file uses
// every helper
#![allow(dead_code)]

use lazyseq_core::{error, Value};

/// Parse literals into values, so tests can mix kinds compactly.
pub(crate) fn values(literals: &[&str]) -> Vec<Value> {
    literals.iter().map(|s| Value::parse_literal(s)).collect()
}

/// Collect a fallible sequence, failing the test on the first error.
pub(crate) fn ok<T>(iter: impl Iterator<Item = error::Result<T>>) -> Vec<T> {
    iter.collect::<error::Result<Vec<_>>>().unwrap()
}

pub(crate) fn display(values: &[Value]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
