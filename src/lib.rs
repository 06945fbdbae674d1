//! Purpose: Path-addressable store for JSON-shaped values.
//! Exports: `core` modules plus the flat re-exports used by the CLI and tests.
//! Role: Library crate backing the `dotbox` binary; usable on its own for
//! ad-hoc access into loosely structured data.
//! Invariants: The store is an explicit value with no process-wide state.
//! Invariants: Lookup and mutation errors carry the full dotted sub-path to
//! the failing segment.
pub mod core;

pub use crate::core::access::{FromValue, typed, typed_map, typed_slice};
pub use crate::core::error::{Error, ErrorKind, to_exit_code};
pub use crate::core::path::Path;
pub use crate::core::resolve::{resolve, resolve_mut};
pub use crate::core::store::Store;
