//! Purpose: Recursive path lookup inside a JSON value tree.
//! Exports: `resolve`, `resolve_mut`, `parse_index`.
//! Role: Read-only descent engine shared by the store's getters and the
//! mutation path (which uses it to locate the parent container).
//! Invariants: Errors carry the full dot-joined sub-path through the failing
//! segment; each frame prefixes its consumed segment, never appends.
//! Invariants: Array indices are bounds-checked; lookups never panic.

use crate::core::error::{Error, ErrorKind};
use serde_json::Value;

/// Resolve `segments` against `target`, returning the addressed value.
///
/// An empty segment list is the identity lookup and returns `target`.
pub fn resolve<'v>(target: &'v Value, segments: &[&str]) -> Result<&'v Value, Error> {
    let Some((head, rest)) = segments.split_first() else {
        return Ok(target);
    };

    let child = match target {
        Value::Object(map) => map
            .get(*head)
            .ok_or_else(|| Error::new(ErrorKind::NoValueFound).with_path(*head))?,
        Value::Array(items) => {
            let index = parse_index(head)?;
            items
                .get(index)
                .ok_or_else(|| index_out_of_bounds(head, index, items.len()))?
        }
        // Scalars cannot be traversed further.
        _ => return Err(Error::new(ErrorKind::NoValueFound).with_path(*head)),
    };

    resolve(child, rest).map_err(|err| err.prefixed_with(head))
}

/// Mutable twin of [`resolve`]; used to locate mutation parents. Performs
/// the same checks and reports the same errors, and never modifies the tree.
pub fn resolve_mut<'v>(target: &'v mut Value, segments: &[&str]) -> Result<&'v mut Value, Error> {
    let Some((head, rest)) = segments.split_first() else {
        return Ok(target);
    };

    let child = match target {
        Value::Object(map) => map
            .get_mut(*head)
            .ok_or_else(|| Error::new(ErrorKind::NoValueFound).with_path(*head))?,
        Value::Array(items) => {
            let index = parse_index(head)?;
            let len = items.len();
            items
                .get_mut(index)
                .ok_or_else(|| index_out_of_bounds(head, index, len))?
        }
        _ => return Err(Error::new(ErrorKind::NoValueFound).with_path(*head)),
    };

    resolve_mut(child, rest).map_err(|err| err.prefixed_with(head))
}

/// Parse a path segment as a non-negative base-10 array index.
///
/// Only ASCII digits are accepted; signs, whitespace, and empty segments are
/// `NonNumericIndex`. A digit string too large for `usize` is past any
/// representable bound and reports `OutOfBounds`.
pub fn parse_index(segment: &str) -> Result<usize, Error> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::new(ErrorKind::NonNumericIndex)
            .with_path(segment)
            .with_message("array segment must be a non-negative integer"));
    }
    segment.parse::<usize>().map_err(|_| {
        Error::new(ErrorKind::OutOfBounds)
            .with_path(segment)
            .with_message("array index exceeds representable range")
    })
}

fn index_out_of_bounds(segment: &str, index: usize, len: usize) -> Error {
    Error::new(ErrorKind::OutOfBounds)
        .with_path(segment)
        .with_message(format!("index {index} out of range for array of {len}"))
}
