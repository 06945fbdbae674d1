//! Purpose: Typed extraction over resolved JSON values.
//! Exports: `FromValue`, `typed`, `typed_slice`, `typed_map`.
//! Role: Single generic coercion seam so the store does not hand-duplicate
//! one getter per primitive type.
//! Invariants: Exact-variant types (`bool`, `String`) never coerce.
//! Invariants: Numeric conversions are lossless; anything else is a
//! `TypeMismatch` carrying the requested type name and the full path.

use crate::core::error::{Error, ErrorKind};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Conversion from a dynamically typed value into a concrete target type.
///
/// `WANTED` is the name reported in `TypeMismatch` errors.
pub trait FromValue: Sized {
    const WANTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for bool {
    const WANTED: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for String {
    const WANTED: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromValue for f64 {
    const WANTED: &'static str = "float";

    // Integer-backed numbers widen to f64; every other variant is a mismatch.
    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromValue for i64 {
    const WANTED: &'static str = "int";

    fn from_value(value: &Value) -> Option<Self> {
        let number = value.as_number()?;
        if let Some(int) = number.as_i64() {
            return Some(int);
        }
        f64_exact_int(number.as_f64()?)
    }
}

impl FromValue for u64 {
    const WANTED: &'static str = "uint";

    fn from_value(value: &Value) -> Option<Self> {
        let number = value.as_number()?;
        if let Some(int) = number.as_u64() {
            return Some(int);
        }
        let exact: i64 = f64_exact_int(number.as_f64()?)?;
        u64::try_from(exact).ok()
    }
}

impl FromValue for Vec<Value> {
    const WANTED: &'static str = "array";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_array().cloned()
    }
}

impl FromValue for Map<String, Value> {
    const WANTED: &'static str = "object";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }
}

// A float converts to an integer only when the round trip is bit-exact.
fn f64_exact_int(num: f64) -> Option<i64> {
    if !num.is_finite() || num.fract() != 0.0 {
        return None;
    }
    let cast = num as i64;
    if (cast as f64).to_bits() == num.to_bits() {
        Some(cast)
    } else {
        None
    }
}

/// Convert a resolved value into `T`, or report `TypeMismatch` at `path`.
pub fn typed<T: FromValue>(value: &Value, path: &str) -> Result<T, Error> {
    T::from_value(value).ok_or_else(|| {
        Error::new(ErrorKind::TypeMismatch)
            .with_wanted(T::WANTED)
            .with_path(path)
    })
}

/// Convert every element of an array into `T`.
///
/// The first mismatched element fails with the container path plus the
/// offending index appended; the container path itself is already fully
/// resolved, so this is the one place a suffix is added to an error path.
pub fn typed_slice<T: FromValue>(value: &Value, path: &str) -> Result<Vec<T>, Error> {
    let items: &Vec<Value> = match value.as_array() {
        Some(items) => items,
        None => {
            return Err(Error::new(ErrorKind::TypeMismatch)
                .with_wanted(Vec::<Value>::WANTED)
                .with_path(path));
        }
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            T::from_value(item).ok_or_else(|| {
                Error::new(ErrorKind::TypeMismatch)
                    .with_wanted(T::WANTED)
                    .with_path(path)
                    .appended_with(&index.to_string())
            })
        })
        .collect()
}

/// Convert every value of an object into `T`; same path convention as
/// [`typed_slice`], with the offending key appended.
pub fn typed_map<T: FromValue>(value: &Value, path: &str) -> Result<BTreeMap<String, T>, Error> {
    let entries = match value.as_object() {
        Some(entries) => entries,
        None => {
            return Err(Error::new(ErrorKind::TypeMismatch)
                .with_wanted(Map::<String, Value>::WANTED)
                .with_path(path));
        }
    };
    entries
        .iter()
        .map(|(key, item)| {
            let converted = T::from_value(item).ok_or_else(|| {
                Error::new(ErrorKind::TypeMismatch)
                    .with_wanted(T::WANTED)
                    .with_path(path)
                    .appended_with(key)
            })?;
            Ok((key.clone(), converted))
        })
        .collect()
}
