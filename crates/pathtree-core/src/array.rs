//! Array cursors: append-only population of a JSON array field.

use crate::builder::JsonObjectBuilder;
use crate::error::Result;
use crate::number::JsonNumber;
use crate::path::FieldPath;
use serde_json::{Map, Value};
use tracing::debug;

/// Appends elements to the array created by
/// [`FieldCursor::array_value`](crate::FieldCursor::array_value).
///
/// Elements are only ever appended; bulk methods keep the iteration order of
/// their input.
///
/// ```
/// use pathtree_core::JsonObjectBuilder;
/// use serde_json::json;
///
/// let mut builder = JsonObjectBuilder::new();
/// let mut tags = builder.field("tags")?.array_value();
/// tags.add_all_strings(["x", "y", "z"]).add_string("w");
/// assert_eq!(builder.build(), json!({"tags": ["x", "y", "z", "w"]}));
/// # Ok::<(), pathtree_core::BuildError>(())
/// ```
#[derive(Debug)]
pub struct ArrayCursor<'a> {
    items: &'a mut Vec<Value>,
    path: FieldPath,
}

impl<'a> ArrayCursor<'a> {
    pub(crate) fn new(items: &'a mut Vec<Value>, path: FieldPath) -> Self {
        Self { items, path }
    }

    /// Build a new object with `consumer` and append it.
    ///
    /// The consumer gets its own builder over a fresh object. If it returns
    /// an error, the half-built object is dropped and nothing is appended.
    pub fn add<F>(&mut self, consumer: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut JsonObjectBuilder) -> Result<()>,
    {
        let mut builder = JsonObjectBuilder::new();
        if let Err(err) = consumer(&mut builder) {
            debug!(
                path = %self.path,
                index = self.items.len(),
                error = %err,
                "array element consumer failed"
            );
            return Err(err);
        }
        self.items.push(builder.into_value());
        Ok(self)
    }

    /// Build a nested array with `consumer` and append it.
    ///
    /// Same contract as [`add`](Self::add): on error nothing is appended.
    pub fn add_array<F>(&mut self, consumer: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut ArrayCursor<'_>) -> Result<()>,
    {
        let mut items = Vec::new();
        let mut nested = ArrayCursor::new(&mut items, self.path.clone());
        if let Err(err) = consumer(&mut nested) {
            debug!(
                path = %self.path,
                index = self.items.len(),
                error = %err,
                "nested array consumer failed"
            );
            return Err(err);
        }
        self.items.push(Value::Array(items));
        Ok(self)
    }

    /// Append the object built so far by another builder.
    pub fn add_builder(&mut self, builder: &JsonObjectBuilder) -> &mut Self {
        self.items.push(builder.build());
        self
    }

    pub fn add_boolean(&mut self, value: bool) -> &mut Self {
        self.items.push(Value::Bool(value));
        self
    }

    /// Append a number. Non-finite floats are appended as `null`.
    pub fn add_number<N: JsonNumber>(&mut self, value: N) -> &mut Self {
        self.items.push(value.to_json());
        self
    }

    pub fn add_string(&mut self, value: impl Into<String>) -> &mut Self {
        self.items.push(Value::String(value.into()));
        self
    }

    pub fn add_null(&mut self) -> &mut Self {
        self.items.push(Value::Null);
        self
    }

    pub fn add_all_booleans<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = bool>,
    {
        self.items.extend(values.into_iter().map(Value::Bool));
        self
    }

    pub fn add_all_numbers<I, N>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = N>,
        N: JsonNumber,
    {
        self.items.extend(values.into_iter().map(JsonNumber::to_json));
        self
    }

    pub fn add_all_strings<I, S>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items.extend(values.into_iter().map(|s| Value::String(s.into())));
        self
    }

    pub fn add_all_json_objects<I>(&mut self, objects: I) -> &mut Self
    where
        I: IntoIterator<Item = Map<String, Value>>,
    {
        self.items.extend(objects.into_iter().map(Value::Object));
        self
    }

    /// Absolute path of the array field.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
