//! Purpose: Top-level mapping from root names to JSON values.
//! Exports: `Store`.
//! Role: Entry point tying path parsing, resolution, typed access, and
//! mutation together behind get/set operations.
//! Invariants: Mutations are all-or-nothing; a failed set leaves every root
//! byte-identical.
//! Invariants: Errors surfaced from lookups carry the complete
//! root-relative dotted path through the failing segment.
#![allow(clippy::result_large_err)]

use crate::core::access::{self, FromValue};
use crate::core::error::{Error, ErrorKind};
use crate::core::mutate;
use crate::core::path::{self, Path};
use crate::core::resolve::{resolve, resolve_mut};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Path-addressable container of named JSON roots.
///
/// Plain single-threaded data structure: callers sharing a store across
/// threads wrap it in their own lock.
#[derive(Clone, Debug, Default)]
pub struct Store {
    roots: BTreeMap<String, Value>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store from an initial root mapping.
    pub fn with_values(values: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self {
            roots: values.into_iter().collect(),
        }
    }

    /// Decode a JSON object of roots into a store.
    pub fn from_json(raw: &[u8]) -> Result<Self, Error> {
        let roots: BTreeMap<String, Value> = serde_json::from_slice(raw).map_err(|err| {
            Error::new(ErrorKind::Decode)
                .with_message("store payload must be a JSON object of roots")
                .with_source(err)
        })?;
        Ok(Self { roots })
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn root_names(&self) -> impl Iterator<Item = &str> {
        self.roots.keys().map(String::as_str)
    }

    /// Resolve a dotted path to the value it addresses.
    ///
    /// The first segment names a root; the rest descend through it. An
    /// absent root (or an empty path) is `NoValueFound`.
    pub fn get(&self, raw_path: &str) -> Result<&Value, Error> {
        let path = Path::parse(raw_path);
        let Some((root, rest)) = path.split_root() else {
            return Err(Error::new(ErrorKind::NoValueFound)
                .with_path(raw_path)
                .with_message("empty path names no root"));
        };
        let target = self
            .roots
            .get(root)
            .ok_or_else(|| Error::new(ErrorKind::NoValueFound).with_path(root))?;
        resolve(target, rest).map_err(|err| err.prefixed_with(root))
    }

    /// Replace or insert the value addressed by `raw_path`.
    ///
    /// A single-segment path replaces the named root wholesale. A longer
    /// path resolves the parent container and assigns the final key inside
    /// it; any failure leaves the store unmodified.
    pub fn set(&mut self, raw_path: &str, value: Value) -> Result<(), Error> {
        let path = Path::parse(raw_path);
        let Some((parent_segments, key)) = path.split_parent() else {
            return Err(Error::new(ErrorKind::Usage)
                .with_message("set requires a path naming at least a root"));
        };

        if parent_segments.is_empty() {
            self.roots.insert(key.to_string(), value);
            return Ok(());
        }

        let root = parent_segments[0];
        let descent = &parent_segments[1..];
        let target = self
            .roots
            .get_mut(root)
            .ok_or_else(|| Error::new(ErrorKind::NoValueFound).with_path(root))?;
        let parent =
            resolve_mut(target, descent).map_err(|err| err.prefixed_with(root))?;
        mutate::assign(parent, key, value)
            .map_err(|err| err.prefixed_with(&path::join(parent_segments)))
    }

    /// Decode a JSON payload and [`set`](Self::set) it. Decode failures are
    /// reported before any lookup and leave the store untouched.
    pub fn set_json(&mut self, raw_path: &str, raw_value: &[u8]) -> Result<(), Error> {
        let value: Value = serde_json::from_slice(raw_value).map_err(|err| {
            Error::new(ErrorKind::Decode)
                .with_message("invalid json payload")
                .with_path(raw_path)
                .with_source(err)
        })?;
        self.set(raw_path, value)
    }

    pub fn get_bool(&self, raw_path: &str) -> Result<bool, Error> {
        self.get_typed(raw_path)
    }

    pub fn get_string(&self, raw_path: &str) -> Result<String, Error> {
        self.get_typed(raw_path)
    }

    pub fn get_f64(&self, raw_path: &str) -> Result<f64, Error> {
        self.get_typed(raw_path)
    }

    pub fn get_i64(&self, raw_path: &str) -> Result<i64, Error> {
        self.get_typed(raw_path)
    }

    pub fn get_u64(&self, raw_path: &str) -> Result<u64, Error> {
        self.get_typed(raw_path)
    }

    /// Array at `raw_path`, elements left dynamically typed.
    pub fn get_slice(&self, raw_path: &str) -> Result<Vec<Value>, Error> {
        self.get_typed(raw_path)
    }

    /// Object at `raw_path`, values left dynamically typed.
    pub fn get_map(&self, raw_path: &str) -> Result<Map<String, Value>, Error> {
        self.get_typed(raw_path)
    }

    fn get_typed<T: FromValue>(&self, raw_path: &str) -> Result<T, Error> {
        let value = self.get(raw_path)?;
        access::typed(value, raw_path)
    }

    /// Array at `raw_path` with every element converted to `T`.
    pub fn get_typed_slice<T: FromValue>(&self, raw_path: &str) -> Result<Vec<T>, Error> {
        let value = self.get(raw_path)?;
        access::typed_slice(value, raw_path)
    }

    /// Object at `raw_path` with every value converted to `T`.
    pub fn get_typed_map<T: FromValue>(
        &self,
        raw_path: &str,
    ) -> Result<BTreeMap<String, T>, Error> {
        let value = self.get(raw_path)?;
        access::typed_map(value, raw_path)
    }

    /// Serialize the whole root mapping.
    pub fn to_json(&self) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(&self.roots).map_err(encode_error)
    }

    pub fn to_json_pretty(&self) -> Result<Vec<u8>, Error> {
        serde_json::to_vec_pretty(&self.roots).map_err(encode_error)
    }

    /// Resolve `raw_path`, then serialize just that subtree.
    pub fn value_to_json(&self, raw_path: &str) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(self.get(raw_path)?).map_err(encode_error)
    }

    pub fn value_to_json_pretty(&self, raw_path: &str) -> Result<Vec<u8>, Error> {
        serde_json::to_vec_pretty(self.get(raw_path)?).map_err(encode_error)
    }
}

fn encode_error(err: serde_json::Error) -> Error {
    Error::new(ErrorKind::Internal)
        .with_message("json encoding failed")
        .with_source(err)
}

#[cfg(test)]
mod tests {
    use super::Store;
    use crate::core::error::ErrorKind;
    use serde_json::{Value, json};

    fn album_store() -> Store {
        let mut store = Store::new();
        store
            .set_json(
                "album",
                br#"{
                    "title": "The Colour and The Shape",
                    "price": {"regular": 12.35, "member": 10.35},
                    "trackCount": 13,
                    "soldOut": true,
                    "genre": ["alternative rock", "post-grunge"],
                    "singles": [
                        {"title": "Monkey Wrench"},
                        {"title": "Everlong"}
                    ]
                }"#,
            )
            .expect("seed album");
        store
    }

    #[test]
    fn get_descends_objects_and_arrays() {
        let store = album_store();
        assert_eq!(
            store.get("album.singles.1.title").unwrap(),
            &json!("Everlong")
        );
    }

    #[test]
    fn empty_path_is_no_value_found() {
        let store = album_store();
        let err = store.get("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoValueFound);
    }

    #[test]
    fn missing_root_is_no_value_found() {
        let store = Store::new();
        let err = store.get("nope").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoValueFound);
        assert_eq!(err.path(), Some("nope"));
    }

    #[test]
    fn missing_key_error_carries_root_relative_path() {
        let store = album_store();
        let err = store.get("album.missing.more").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoValueFound);
        assert_eq!(err.path(), Some("album.missing"));
    }

    #[test]
    fn typed_getters_delegate_with_full_path() {
        let store = album_store();
        assert_eq!(store.get_bool("album.soldOut").unwrap(), true);
        assert_eq!(
            store.get_string("album.title").unwrap(),
            "The Colour and The Shape"
        );
        assert_eq!(store.get_f64("album.price.regular").unwrap(), 12.35);
        assert_eq!(store.get_i64("album.trackCount").unwrap(), 13);
        assert_eq!(store.get_u64("album.trackCount").unwrap(), 13);

        let err = store.get_bool("album.title").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.wanted(), Some("bool"));
        assert_eq!(err.path(), Some("album.title"));
    }

    #[test]
    fn container_getters_return_dynamic_elements() {
        let store = album_store();
        let genres = store.get_slice("album.genre").unwrap();
        assert_eq!(genres.len(), 2);
        let price = store.get_map("album.price").unwrap();
        assert_eq!(price.get("regular"), Some(&json!(12.35)));
    }

    #[test]
    fn typed_container_getters_convert_elements() {
        let store = album_store();
        let genres: Vec<String> = store.get_typed_slice("album.genre").unwrap();
        assert_eq!(genres, vec!["alternative rock", "post-grunge"]);
        let price = store.get_typed_map::<f64>("album.price").unwrap();
        assert_eq!(price.get("member"), Some(&10.35));

        let err = store.get_typed_slice::<bool>("album.genre").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.path(), Some("album.genre.0"));
    }

    #[test]
    fn set_single_segment_replaces_root_wholesale() {
        let mut store = album_store();
        store.set("album", json!({"fresh": true})).unwrap();
        assert_eq!(store.get("album").unwrap(), &json!({"fresh": true}));
    }

    #[test]
    fn set_inserts_new_object_key() {
        let mut store = album_store();
        store.set_json("album.label", br#""Roswell""#).unwrap();
        assert_eq!(store.get_string("album.label").unwrap(), "Roswell");
    }

    #[test]
    fn set_replaces_array_element_in_place() {
        let mut store = album_store();
        store.set_json("album.genre.1", br#""grunge""#).unwrap();
        let genres: Vec<String> = store.get_typed_slice("album.genre").unwrap();
        assert_eq!(genres[1], "grunge");
    }

    #[test]
    fn set_under_scalar_fails_and_leaves_store_intact() {
        let mut store = album_store();
        let before = store.to_json().unwrap();
        let err = store.set_json("album.title.child", b"1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotAContainer);
        assert_eq!(err.path(), Some("album.title"));
        assert_eq!(store.to_json().unwrap(), before);
    }

    #[test]
    fn set_with_bad_payload_fails_before_lookup() {
        let mut store = album_store();
        let before = store.to_json().unwrap();
        let err = store.set_json("album.title", b"{not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(store.to_json().unwrap(), before);
    }

    #[test]
    fn set_out_of_range_index_reports_full_path() {
        let mut store = album_store();
        let before = store.to_json().unwrap();
        let err = store.set_json("album.genre.9", br#""x""#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        assert_eq!(err.path(), Some("album.genre.9"));
        assert_eq!(store.to_json().unwrap(), before);
    }

    #[test]
    fn set_with_empty_path_is_usage_error() {
        let mut store = Store::new();
        let err = store.set("", json!(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn with_values_seeds_roots() {
        let store = Store::with_values([("cfg".to_string(), json!({"debug": true}))]);
        assert_eq!(store.get_bool("cfg.debug").unwrap(), true);
        assert_eq!(store.len(), 1);
        assert_eq!(store.root_names().collect::<Vec<_>>(), vec!["cfg"]);
    }

    #[test]
    fn from_json_round_trips_through_to_json() {
        let store = album_store();
        let encoded = store.to_json().unwrap();
        let reloaded = Store::from_json(&encoded).unwrap();
        assert_eq!(
            reloaded.get("album.singles.0.title").unwrap(),
            &json!("Monkey Wrench")
        );
    }

    #[test]
    fn from_json_rejects_non_object_payload() {
        let err = Store::from_json(b"[1,2,3]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn null_roots_are_real_values() {
        let store = Store::with_values([("empty".to_string(), Value::Null)]);
        assert_eq!(store.get("empty").unwrap(), &Value::Null);
        // Traversing into a null still fails like any other scalar.
        let err = store.get("empty.inner").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoValueFound);
        assert_eq!(err.path(), Some("empty.inner"));
    }

    #[test]
    fn value_to_json_serializes_subtree_only() {
        let store = album_store();
        let bytes = store.value_to_json("album.price").unwrap();
        let decoded: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded, json!({"regular": 12.35, "member": 10.35}));
    }
}
