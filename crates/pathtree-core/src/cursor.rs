//! Field cursors: the step between resolving a path and writing its value.

use crate::array::ArrayCursor;
use crate::builder::resolve;
use crate::error::{type_name, BuildError, Result};
use crate::number::JsonNumber;
use crate::path::{validate_affix, FieldPath};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// A handle on one field of one object in the tree.
///
/// A cursor only knows the object that holds the field and the field's
/// name; nothing is written until a terminal method runs. Every method
/// consumes the cursor, so a new one has to be resolved for further writes.
///
/// The nesting methods treat the cursor's field as an object (creating it
/// when absent) and resolve their path relative to it:
///
/// ```
/// use pathtree_core::JsonObjectBuilder;
/// use serde_json::json;
///
/// let mut builder = JsonObjectBuilder::new();
/// builder
///     .field("user")?
///     .nested_field("address", &["city"])?
///     .string_value("Paris");
/// assert_eq!(builder.build(), json!({"user": {"address": {"city": "Paris"}}}));
/// # Ok::<(), pathtree_core::BuildError>(())
/// ```
#[derive(Debug)]
pub struct FieldCursor<'a> {
    parent: &'a mut Map<String, Value>,
    parent_path: FieldPath,
    name: String,
}

impl<'a> FieldCursor<'a> {
    pub(crate) fn new(
        parent: &'a mut Map<String, Value>,
        parent_path: FieldPath,
        name: String,
    ) -> Self {
        Self {
            parent,
            parent_path,
            name,
        }
    }

    /// Name of the field this cursor points at.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute path of the field from the document root.
    pub fn path(&self) -> FieldPath {
        self.parent_path.child(&self.name)
    }

    pub fn string_value(self, value: impl Into<String>) {
        self.write(Value::String(value.into()));
    }

    /// Write a number. Non-finite floats are written as `null`.
    pub fn number_value<N: JsonNumber>(self, value: N) {
        self.write(value.to_json());
    }

    pub fn boolean_value(self, value: bool) {
        self.write(Value::Bool(value));
    }

    pub fn null_value(self) {
        self.write(Value::Null);
    }

    /// Replace the field's value with an empty array and return a cursor for
    /// appending to it.
    pub fn array_value(self) -> ArrayCursor<'a> {
        let path = self.path();
        trace!(path = %path, "array value");
        let FieldCursor { parent, name, .. } = self;
        let items = empty_array(parent.entry(name).or_insert(Value::Null));
        ArrayCursor::new(items, path)
    }

    /// Make sure the field holds an object, creating an empty one when it is
    /// absent. An existing object is kept with its fields; any other value is
    /// a conflict, as it would be for a longer path through this field.
    pub fn object_value(self) -> Result<()> {
        let path = self.path();
        let FieldCursor { parent, name, .. } = self;
        match parent.entry(name).or_insert_with(|| Value::Object(Map::new())) {
            Value::Object(_) => Ok(()),
            other => {
                let found = type_name(other);
                debug!(path = %path, found, "path type conflict");
                Err(BuildError::conflict(path, found))
            }
        }
    }

    /// Open `name` inside this field.
    pub fn field(self, name: &str) -> Result<FieldCursor<'a>> {
        self.descend(FieldPath::nested(name, &[]))
    }

    /// Open `[parent_name, nested_names...]` inside this field.
    pub fn nested_field(
        self,
        parent_name: &str,
        nested_names: &[&str],
    ) -> Result<FieldCursor<'a>> {
        self.descend(FieldPath::nested(parent_name, nested_names))
    }

    /// Open a nested path inside this field with `prefix` before every level.
    pub fn nested_prefixed_field(
        self,
        prefix: &str,
        parent_name: &str,
        nested_names: &[&str],
    ) -> Result<FieldCursor<'a>> {
        validate_affix("prefix", prefix)?;
        self.descend(FieldPath::nested(parent_name, nested_names).prefixed(prefix))
    }

    /// Open a nested path inside this field with `suffix` after every level.
    pub fn nested_suffixed_field(
        self,
        suffix: &str,
        parent_name: &str,
        nested_names: &[&str],
    ) -> Result<FieldCursor<'a>> {
        validate_affix("suffix", suffix)?;
        self.descend(FieldPath::nested(parent_name, nested_names).suffixed(suffix))
    }

    /// Apply `if_fn` when `condition` holds; otherwise hand back this cursor
    /// untouched. `if_fn` is not called at all on the false branch.
    pub fn if_condition<F>(self, condition: bool, if_fn: F) -> Result<FieldCursor<'a>>
    where
        F: FnOnce(FieldCursor<'a>) -> Result<FieldCursor<'a>>,
    {
        if condition {
            if_fn(self)
        } else {
            Ok(self)
        }
    }

    /// Continue with `if_fn` or `else_fn` depending on `condition`.
    pub fn if_else_condition<F, G>(
        self,
        condition: bool,
        if_fn: F,
        else_fn: G,
    ) -> Result<FieldCursor<'a>>
    where
        F: FnOnce(FieldCursor<'a>) -> Result<FieldCursor<'a>>,
        G: FnOnce(FieldCursor<'a>) -> Result<FieldCursor<'a>>,
    {
        if condition {
            if_fn(self)
        } else {
            else_fn(self)
        }
    }

    fn write(self, value: Value) {
        trace!(parent = %self.parent_path, field = %self.name, "write value");
        self.parent.insert(self.name, value);
    }

    // The cursor's own field becomes the first non-terminal segment, so the
    // object-or-conflict rule applies to it like to any other level.
    fn descend(self, relative: FieldPath) -> Result<FieldCursor<'a>> {
        let path = FieldPath::nested(&self.name, &[]).join(&relative);
        resolve(self.parent, self.parent_path, path)
    }
}

/// Turn `slot` into an empty array in place and borrow its items.
fn empty_array(slot: &mut Value) -> &mut Vec<Value> {
    match slot {
        Value::Array(items) => {
            items.clear();
            items
        }
        other => {
            *other = Value::Array(Vec::new());
            empty_array(other)
        }
    }
}
