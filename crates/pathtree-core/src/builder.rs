//! The tree builder and its path resolution engine.
//!
//! A [`JsonObjectBuilder`] owns one JSON object and grows it one path at a
//! time. Every call resolves a complete path from the root, reusing the
//! objects earlier calls created, so independent calls merge:
//!
//! ```
//! use pathtree_core::JsonObjectBuilder;
//! use serde_json::json;
//!
//! let mut builder = JsonObjectBuilder::new();
//! builder.nested_field("object", &["inner", "other"])?.number_value(42);
//! builder
//!     .nested_field("object", &["inner", "another"])?
//!     .string_value("Hello World!");
//!
//! assert_eq!(
//!     builder.build(),
//!     json!({"object": {"inner": {"other": 42, "another": "Hello World!"}}})
//! );
//! # Ok::<(), pathtree_core::BuildError>(())
//! ```

use crate::cursor::FieldCursor;
use crate::error::{type_name, BuildError, Result};
use crate::path::{validate_affix, FieldPath};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Builds a JSON object incrementally from field paths.
///
/// The builder hands out [`FieldCursor`]s that borrow the tree mutably, so
/// only one cursor chain can be live at a time. Calls that fail leave the
/// tree untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonObjectBuilder {
    root: Map<String, Value>,
}

impl JsonObjectBuilder {
    /// Create a builder over an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder that keeps growing an existing object. Later calls
    /// merge into `object` exactly as if earlier calls had produced it.
    pub fn from_object(object: Map<String, Value>) -> Self {
        Self { root: object }
    }

    /// Begin writing the top-level field `name`.
    pub fn field(&mut self, name: &str) -> Result<FieldCursor<'_>> {
        self.resolve(FieldPath::nested(name, &[]))
    }

    /// Begin writing the field at `[parent_name, nested_names...]`, creating
    /// any missing intermediate objects.
    pub fn nested_field(
        &mut self,
        parent_name: &str,
        nested_names: &[&str],
    ) -> Result<FieldCursor<'_>> {
        self.resolve(FieldPath::nested(parent_name, nested_names))
    }

    /// Like [`nested_field`](Self::nested_field), with `prefix` inserted
    /// before every level.
    ///
    /// ```
    /// use pathtree_core::JsonObjectBuilder;
    /// use serde_json::json;
    ///
    /// let mut builder = JsonObjectBuilder::new();
    /// builder.nested_prefixed_field("prefix", "first", &["second"])?.number_value(42);
    /// assert_eq!(
    ///     builder.build(),
    ///     json!({"prefix": {"first": {"prefix": {"second": 42}}}})
    /// );
    /// # Ok::<(), pathtree_core::BuildError>(())
    /// ```
    pub fn nested_prefixed_field(
        &mut self,
        prefix: &str,
        parent_name: &str,
        nested_names: &[&str],
    ) -> Result<FieldCursor<'_>> {
        validate_affix("prefix", prefix)?;
        self.resolve(FieldPath::nested(parent_name, nested_names).prefixed(prefix))
    }

    /// Like [`nested_field`](Self::nested_field), with `suffix` inserted
    /// after every level.
    ///
    /// ```
    /// use pathtree_core::JsonObjectBuilder;
    /// use serde_json::json;
    ///
    /// let mut builder = JsonObjectBuilder::new();
    /// builder.nested_suffixed_field("suffix", "first", &["second"])?.number_value(42);
    /// assert_eq!(
    ///     builder.build(),
    ///     json!({"first": {"suffix": {"second": {"suffix": 42}}}})
    /// );
    /// # Ok::<(), pathtree_core::BuildError>(())
    /// ```
    pub fn nested_suffixed_field(
        &mut self,
        suffix: &str,
        parent_name: &str,
        nested_names: &[&str],
    ) -> Result<FieldCursor<'_>> {
        validate_affix("suffix", suffix)?;
        self.resolve(FieldPath::nested(parent_name, nested_names).suffixed(suffix))
    }

    /// Begin writing a field chosen at call time. Exactly one of `if_fn` and
    /// `else_fn` runs, receiving the builder itself.
    pub fn if_else_condition<'a, F, G>(
        &'a mut self,
        condition: bool,
        if_fn: F,
        else_fn: G,
    ) -> Result<FieldCursor<'a>>
    where
        F: FnOnce(&'a mut Self) -> Result<FieldCursor<'a>>,
        G: FnOnce(&'a mut Self) -> Result<FieldCursor<'a>>,
    {
        if condition {
            if_fn(self)
        } else {
            else_fn(self)
        }
    }

    /// Resolve an arbitrary path from the root.
    pub fn path(&mut self, path: FieldPath) -> Result<FieldCursor<'_>> {
        self.resolve(path)
    }

    /// Snapshot of the object built so far. Calling it again without
    /// intervening writes returns an equal value.
    pub fn build(&self) -> Value {
        Value::Object(self.root.clone())
    }

    /// Consume the builder and return the object without copying it.
    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    pub fn as_object(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    fn resolve(&mut self, path: FieldPath) -> Result<FieldCursor<'_>> {
        resolve(&mut self.root, FieldPath::root(), path)
    }
}

impl From<JsonObjectBuilder> for Value {
    fn from(builder: JsonObjectBuilder) -> Self {
        builder.into_value()
    }
}

/// Walk `path` inside `object`, whose own absolute location is `base`, and
/// return a cursor at the last segment.
///
/// Every non-terminal segment must name an object: existing ones are reused,
/// missing ones are created empty. A conflict can only be met on a segment
/// that already existed, and nothing is created before it, so a failed
/// resolution never mutates the tree.
pub(crate) fn resolve<'a>(
    object: &'a mut Map<String, Value>,
    base: FieldPath,
    path: FieldPath,
) -> Result<FieldCursor<'a>> {
    if let Err(err) = path.validate() {
        debug!(base = %base, path = %path, error = %err, "rejected field path");
        return Err(err);
    }
    let Some((leaf, parents)) = path.segments().split_last() else {
        return Err(BuildError::invalid("path must have at least one segment"));
    };

    let mut location = base;
    let mut current = object;
    let mut created = 0usize;
    for segment in parents {
        location.push(segment.as_str());
        if !current.contains_key(segment) {
            created += 1;
        }
        current = match current
            .entry(segment.as_str())
            .or_insert_with(|| Value::Object(Map::new()))
        {
            Value::Object(inner) => inner,
            other => {
                let found = type_name(other);
                debug!(path = %location, found, "path type conflict");
                return Err(BuildError::conflict(location, found));
            }
        };
    }

    trace!(parent = %location, field = %leaf, created, "resolved field path");
    Ok(FieldCursor::new(current, location, leaf.clone()))
}

/// Check, without writing, that `path` could be resolved from the root of
/// `object`. With `object_leaf` set, the last segment must also be absent
/// or an object, as [`FieldCursor::object_value`] requires.
///
/// Returns the same errors [`resolve`] and `object_value` would.
pub(crate) fn check_path(
    object: &Map<String, Value>,
    path: &FieldPath,
    object_leaf: bool,
) -> Result<()> {
    path.validate()?;
    let Some((leaf, parents)) = path.segments().split_last() else {
        return Err(BuildError::invalid("path must have at least one segment"));
    };

    let mut location = FieldPath::root();
    let mut current = object;
    for segment in parents {
        location.push(segment.as_str());
        current = match current.get(segment) {
            None => return Ok(()),
            Some(Value::Object(inner)) => inner,
            Some(other) => return Err(BuildError::conflict(location, type_name(other))),
        };
    }

    match current.get(leaf) {
        Some(other) if object_leaf && !other.is_object() => {
            Err(BuildError::conflict(path.clone(), type_name(other)))
        }
        _ => Ok(()),
    }
}
