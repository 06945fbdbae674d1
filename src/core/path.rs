// Dotted path parsing shared by lookup and mutation.
// Segments are borrowed from the input string; there is no escaping
// mechanism, so keys containing literal dots cannot be addressed.
use std::fmt;

/// Ordered sequence of path segments split from a dotted string.
///
/// The empty string parses to an empty path, which resolves to the target
/// itself.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Path<'a> {
    segments: Vec<&'a str>,
}

impl<'a> Path<'a> {
    pub fn parse(raw: &'a str) -> Self {
        if raw.is_empty() {
            return Self {
                segments: Vec::new(),
            };
        }
        Self {
            segments: raw.split('.').collect(),
        }
    }

    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Split off the root name from the rest of the path.
    pub fn split_root(&self) -> Option<(&'a str, &[&'a str])> {
        self.segments.split_first().map(|(root, rest)| (*root, rest))
    }

    /// Split the path into the parent's segments and the final key, for
    /// mutation. Empty paths have no parent.
    pub fn split_parent(&self) -> Option<(&[&'a str], &'a str)> {
        self.segments.split_last().map(|(last, parent)| (parent, *last))
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Re-join segments into a dotted path string for error reporting.
pub fn join(segments: &[&str]) -> String {
    segments.join(".")
}

#[cfg(test)]
mod tests {
    use super::{Path, join};

    #[test]
    fn empty_string_is_empty_path() {
        let path = Path::parse("");
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert!(path.split_root().is_none());
        assert!(path.split_parent().is_none());
    }

    #[test]
    fn splits_on_dots() {
        let path = Path::parse("root.items.2.title");
        assert_eq!(path.segments(), &["root", "items", "2", "title"]);
    }

    #[test]
    fn single_segment_has_empty_rest() {
        let path = Path::parse("root");
        let (root, rest) = path.split_root().unwrap();
        assert_eq!(root, "root");
        assert!(rest.is_empty());
    }

    #[test]
    fn split_parent_peels_final_key() {
        let path = Path::parse("root.a.b");
        let (parent, key) = path.split_parent().unwrap();
        assert_eq!(parent, &["root", "a"]);
        assert_eq!(key, "b");
    }

    #[test]
    fn consecutive_dots_keep_empty_segments() {
        // No escaping exists; an empty segment simply never matches a key.
        let path = Path::parse("a..b");
        assert_eq!(path.segments(), &["a", "", "b"]);
    }

    #[test]
    fn display_round_trips() {
        let path = Path::parse("root.items.2");
        assert_eq!(path.to_string(), "root.items.2");
        assert_eq!(join(path.segments()), "root.items.2");
    }
}
