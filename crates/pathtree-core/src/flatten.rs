//! Leaf listing: the inverse view of building a tree path by path.

use crate::path::FieldPath;
use serde_json::{Map, Value};

/// List every leaf of `object` with its absolute path, in document order.
///
/// Primitives, arrays, and empty objects are leaves; non-empty objects are
/// walked. Writing each pair back through a
/// [`JsonObjectBuilder`](crate::JsonObjectBuilder) rebuilds the object.
///
/// ```
/// use pathtree_core::flatten;
/// use serde_json::json;
///
/// let value = json!({"a": {"b": 1, "c": [true]}, "d": {}});
/// let leaves: Vec<String> = flatten(value.as_object().unwrap())
///     .into_iter()
///     .map(|(path, _)| path.to_string())
///     .collect();
/// assert_eq!(leaves, ["a.b", "a.c", "d"]);
/// ```
pub fn flatten(object: &Map<String, Value>) -> Vec<(FieldPath, Value)> {
    let mut leaves = Vec::new();
    collect(object, &FieldPath::root(), &mut leaves);
    leaves
}

fn collect(object: &Map<String, Value>, base: &FieldPath, out: &mut Vec<(FieldPath, Value)>) {
    for (key, value) in object {
        let path = base.child(key);
        match value {
            Value::Object(inner) if !inner.is_empty() => collect(inner, &path, out),
            leaf => out.push((path, leaf.clone())),
        }
    }
}
