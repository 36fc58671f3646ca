//! Field paths and the prefix/suffix interleave algebra.
//!
//! A [`FieldPath`] is an ordered list of object field names, addressed from
//! the root of a document (or from a cursor's position for nested calls).
//! Paths render dot-separated, so `["address", "city"]` displays as
//! `address.city`.
//!
//! The two interleave transforms insert a fixed name around every segment:
//!
//! - prefix `p` over `[a, b]` gives `[p, a, p, b]`
//! - suffix `s` over `[a, b]` gives `[a, s, b, s]`

use crate::error::{BuildError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered sequence of field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// The empty path, addressing the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from a parent name followed by nested names, the shape
    /// every `nested_*` builder call takes.
    pub fn nested(parent: &str, nested: &[&str]) -> Self {
        let mut segments = Vec::with_capacity(nested.len() + 1);
        segments.push(parent.to_string());
        segments.extend(nested.iter().map(|s| s.to_string()));
        Self { segments }
    }

    /// Parse a dot-separated path such as `address.city`.
    ///
    /// Empty segments (`a..b`, a leading or trailing dot, or an empty string)
    /// are rejected.
    ///
    /// ```
    /// use pathtree_core::FieldPath;
    ///
    /// let path = FieldPath::parse("address.city").unwrap();
    /// assert_eq!(path.segments(), ["address", "city"]);
    /// assert!(FieldPath::parse("address..city").is_err());
    /// ```
    pub fn parse(dotted: &str) -> Result<Self> {
        let path = Self {
            segments: dotted.split('.').map(str::to_string).collect(),
        };
        path.validate()?;
        Ok(path)
    }

    /// Interleave `prefix` before every segment.
    pub fn prefixed(&self, prefix: &str) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() * 2);
        for segment in &self.segments {
            segments.push(prefix.to_string());
            segments.push(segment.clone());
        }
        Self { segments }
    }

    /// Interleave `suffix` after every segment.
    pub fn suffixed(&self, suffix: &str) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() * 2);
        for segment in &self.segments {
            segments.push(segment.clone());
            segments.push(suffix.to_string());
        }
        Self { segments }
    }

    /// Append one segment in place.
    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// A new path with `other`'s segments appended.
    pub fn join(&self, other: &FieldPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// A new path with one more segment.
    pub fn child(&self, segment: &str) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Reject empty paths and empty segments.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.segments.is_empty() {
            return Err(BuildError::invalid("path must have at least one segment"));
        }
        if let Some(pos) = self.segments.iter().position(|s| s.is_empty()) {
            return Err(BuildError::invalid(format!(
                "empty field name at segment {} of `{}`",
                pos, self
            )));
        }
        Ok(())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl From<Vec<String>> for FieldPath {
    fn from(segments: Vec<String>) -> Self {
        Self { segments }
    }
}

impl From<&[&str]> for FieldPath {
    fn from(segments: &[&str]) -> Self {
        Self {
            segments: segments.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Reject an empty prefix or suffix name before it is interleaved.
pub(crate) fn validate_affix(kind: &str, affix: &str) -> Result<()> {
    if affix.is_empty() {
        return Err(BuildError::invalid(format!("{} must not be empty", kind)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_goes_before_every_segment() {
        let path = FieldPath::nested("a", &["b", "c"]).prefixed("p");
        assert_eq!(path.segments(), ["p", "a", "p", "b", "p", "c"]);
    }

    #[test]
    fn suffix_goes_after_every_segment() {
        let path = FieldPath::nested("a", &["b"]).suffixed("s");
        assert_eq!(path.segments(), ["a", "s", "b", "s"]);
    }

    #[test]
    fn single_segment_interleave() {
        let path = FieldPath::nested("a", &[]);
        assert_eq!(path.prefixed("p").to_string(), "p.a");
        assert_eq!(path.suffixed("s").to_string(), "a.s");
    }

    #[test]
    fn parse_rejects_empty_segments() {
        assert!(FieldPath::parse("").is_err());
        assert!(FieldPath::parse(".a").is_err());
        assert!(FieldPath::parse("a.").is_err());
        assert!(FieldPath::parse("a..b").is_err());
    }

    #[test]
    fn root_path_is_invalid_for_resolution() {
        let err = FieldPath::root().validate().unwrap_err();
        assert!(matches!(err, BuildError::InvalidArgument { .. }));
    }

    #[test]
    fn serializes_as_plain_array() {
        let path = FieldPath::parse("a.b").unwrap();
        assert_eq!(serde_json::to_string(&path).unwrap(), r#"["a","b"]"#);
    }
}
