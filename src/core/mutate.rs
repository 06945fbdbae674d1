// Structural replacement at a resolved parent container.
// All validation happens before any write, so a failed call leaves the
// tree untouched.
use crate::core::error::{Error, ErrorKind};
use crate::core::resolve::parse_index;
use serde_json::Value;

/// Insert or replace `key` inside `parent` with `value`.
///
/// Object parents insert-or-overwrite; array parents require `key` to be an
/// in-bounds numeric index and replace the element. Scalar parents cannot
/// receive a child (`NotAContainer`; the caller fills in the parent path).
pub fn assign(parent: &mut Value, key: &str, value: Value) -> Result<(), Error> {
    match parent {
        Value::Object(map) => {
            map.insert(key.to_string(), value);
            Ok(())
        }
        Value::Array(items) => {
            let index = parse_index(key)?;
            let len = items.len();
            let slot = items.get_mut(index).ok_or_else(|| {
                Error::new(ErrorKind::OutOfBounds)
                    .with_path(key)
                    .with_message(format!("index {index} out of range for array of {len}"))
            })?;
            *slot = value;
            Ok(())
        }
        _ => Err(Error::new(ErrorKind::NotAContainer)
            .with_message("cannot set a child on a scalar value")),
    }
}
