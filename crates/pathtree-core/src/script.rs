//! Path scripts: a line format that drives a [`JsonObjectBuilder`].
//!
//! Each line assigns a JSON literal to a dot-separated path:
//!
//! ```text
//! # comments and blank lines are ignored
//! name = "Alice"
//! address.city = "Paris"
//! address.zip = 75001
//! tags = ["a", "b"]
//! owner = {"id": 7, "admin": true}
//! ```
//!
//! Lines run in order against the same builder, so later lines merge into
//! what earlier lines built. Object literals are written leaf by leaf, which
//! means `owner = {"id": 7}` followed by `owner = {"admin": true}` yields
//! both fields. Arrays replace whatever the field held before. A line either
//! applies completely or, when rejected, not at all.
//!
//! Field names cannot contain `.` or `=` in this format.

use crate::array::ArrayCursor;
use crate::builder::{check_path, JsonObjectBuilder};
use crate::cursor::FieldCursor;
use crate::error::{BuildError, ScriptError};
use crate::path::{validate_affix, FieldPath};
use serde_json::{Map, Number, Value};
use tracing::debug;

/// How script paths are laid out in the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptOptions {
    /// Interleave this name before every path segment.
    pub prefix: Option<String>,
    /// Interleave this name after every path segment.
    pub suffix: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum Layout<'o> {
    Plain,
    Prefixed(&'o str),
    Suffixed(&'o str),
}

impl ScriptOptions {
    fn layout(&self) -> crate::Result<Layout<'_>> {
        match (self.prefix.as_deref(), self.suffix.as_deref()) {
            (None, None) => Ok(Layout::Plain),
            (Some(prefix), None) => {
                validate_affix("prefix", prefix)?;
                Ok(Layout::Prefixed(prefix))
            }
            (None, Some(suffix)) => {
                validate_affix("suffix", suffix)?;
                Ok(Layout::Suffixed(suffix))
            }
            (Some(_), Some(_)) => {
                Err(BuildError::invalid("prefix and suffix cannot be combined"))
            }
        }
    }
}

/// Run every line of `script` against `builder`.
///
/// Stops at the first failing line, which leaves the builder unchanged.
/// Lines before it stay applied.
///
/// # Errors
///
/// [`ScriptError::Parse`] for malformed lines or literals,
/// [`ScriptError::Build`] when the builder rejects a line (for example a
/// path that runs through a string), and [`ScriptError::Options`] when both
/// a prefix and a suffix are set.
pub fn apply_script(
    builder: &mut JsonObjectBuilder,
    script: &str,
    options: &ScriptOptions,
) -> Result<(), ScriptError> {
    let layout = options.layout().map_err(ScriptError::Options)?;

    for (idx, raw) in script.lines().enumerate() {
        let line = idx + 1;
        let Some((path, value)) = parse_line(raw, line)? else {
            continue;
        };
        assign(builder, &path, &value, layout).map_err(|source| {
            debug!(line, path = %path, error = %source, "script line rejected");
            ScriptError::Build { line, source }
        })?;
    }
    Ok(())
}

/// Build a fresh object from `script`.
///
/// ```
/// use pathtree_core::{build_script, ScriptOptions};
/// use serde_json::json;
///
/// let value = build_script("a.b = 1\na.c = true", &ScriptOptions::default()).unwrap();
/// assert_eq!(value, json!({"a": {"b": 1, "c": true}}));
/// ```
pub fn build_script(script: &str, options: &ScriptOptions) -> Result<Value, ScriptError> {
    let mut builder = JsonObjectBuilder::new();
    apply_script(&mut builder, script, options)?;
    Ok(builder.into_value())
}

/// Parse one line into a path and a literal. Blank lines and comments yield
/// `None`.
fn parse_line(raw: &str, line: usize) -> Result<Option<(FieldPath, Value)>, ScriptError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let Some((lhs, rhs)) = trimmed.split_once('=') else {
        return Err(ScriptError::Parse {
            line,
            message: format!("expected `<path> = <value>`, got `{}`", trimmed),
        });
    };

    let path =
        FieldPath::parse(lhs.trim()).map_err(|source| ScriptError::Build { line, source })?;
    let value: Value = serde_json::from_str(rhs.trim()).map_err(|e| ScriptError::Parse {
        line,
        message: format!("invalid JSON literal: {}", e),
    })?;
    Ok(Some((path, value)))
}

/// One terminal write of an assignment, at a path relative to the layout.
#[derive(Debug)]
enum Write<'v> {
    Object,
    Array(&'v [Value]),
    Primitive(&'v Value),
}

impl Layout<'_> {
    fn apply(self, path: &FieldPath) -> FieldPath {
        match self {
            Layout::Plain => path.clone(),
            Layout::Prefixed(prefix) => path.prefixed(prefix),
            Layout::Suffixed(suffix) => path.suffixed(suffix),
        }
    }
}

/// Write `value` at `path`, resolving through the builder's API for the
/// chosen layout.
///
/// Object literals expand into several writes. All of them are checked
/// against the current tree before the first one runs, so a rejected line
/// leaves the builder as it was.
fn assign(
    builder: &mut JsonObjectBuilder,
    path: &FieldPath,
    value: &Value,
    layout: Layout<'_>,
) -> crate::Result<()> {
    let mut writes = Vec::new();
    plan(path.clone(), value, &mut writes);

    for (path, write) in &writes {
        check_path(
            builder.as_object(),
            &layout.apply(path),
            matches!(write, Write::Object),
        )?;
    }

    for (path, write) in writes {
        let cursor = open(builder, &path, layout)?;
        match write {
            Write::Object => cursor.object_value()?,
            Write::Array(items) => fill(&mut cursor.array_value(), items)?,
            Write::Primitive(value) => write_primitive(cursor, value),
        }
    }
    Ok(())
}

/// Expand `value` into writes in document order. An object is opened
/// before its members, so empty literals still create the object.
fn plan<'v>(path: FieldPath, value: &'v Value, writes: &mut Vec<(FieldPath, Write<'v>)>) {
    match value {
        Value::Object(map) => {
            writes.push((path.clone(), Write::Object));
            for (key, child) in map {
                plan(path.child(key), child, writes);
            }
        }
        Value::Array(items) => writes.push((path, Write::Array(items.as_slice()))),
        primitive => writes.push((path, Write::Primitive(primitive))),
    }
}

fn open<'b>(
    builder: &'b mut JsonObjectBuilder,
    path: &FieldPath,
    layout: Layout<'_>,
) -> crate::Result<FieldCursor<'b>> {
    let names: Vec<&str> = path.segments().iter().map(String::as_str).collect();
    let Some((parent, nested)) = names.split_first() else {
        return Err(BuildError::invalid("path must have at least one segment"));
    };
    match layout {
        Layout::Plain => builder.nested_field(parent, nested),
        Layout::Prefixed(prefix) => builder.nested_prefixed_field(prefix, parent, nested),
        Layout::Suffixed(suffix) => builder.nested_suffixed_field(suffix, parent, nested),
    }
}

fn fill(array: &mut ArrayCursor<'_>, items: &[Value]) -> crate::Result<()> {
    for item in items {
        match item {
            Value::Null => array.add_null(),
            Value::Bool(b) => array.add_boolean(*b),
            Value::Number(n) => add_number(array, n),
            Value::String(s) => array.add_string(s.as_str()),
            Value::Object(map) => array.add_all_json_objects([map.clone()]),
            Value::Array(inner) => array.add_array(|nested| fill(nested, inner))?,
        };
    }
    Ok(())
}

fn write_primitive(cursor: FieldCursor<'_>, value: &Value) {
    match value {
        Value::Bool(b) => cursor.boolean_value(*b),
        Value::String(s) => cursor.string_value(s.as_str()),
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => cursor.number_value(i),
            (None, Some(u)) => cursor.number_value(u),
            _ => cursor.number_value(n.as_f64().unwrap_or(f64::NAN)),
        },
        _ => cursor.null_value(),
    }
}

fn add_number<'c, 'a>(array: &'c mut ArrayCursor<'a>, n: &Number) -> &'c mut ArrayCursor<'a> {
    match (n.as_i64(), n.as_u64()) {
        (Some(i), _) => array.add_number(i),
        (None, Some(u)) => array.add_number(u),
        _ => array.add_number(n.as_f64().unwrap_or(f64::NAN)),
    }
}

/// Render `object` as a script that rebuilds it.
///
/// Every leaf (primitive, array, or empty object) becomes one line, in
/// document order.
///
/// # Errors
///
/// Returns [`BuildError::InvalidArgument`] when a key cannot be written in
/// script syntax: empty keys, keys containing `.`, `=` or control
/// characters, keys starting with `#`, and keys with surrounding whitespace.
pub fn to_script(object: &Map<String, Value>) -> crate::Result<String> {
    let mut out = String::new();
    for (path, value) in crate::flatten::flatten(object) {
        if let Some(key) = path.segments().iter().find(|k| !is_script_key(k)) {
            return Err(BuildError::invalid(format!(
                "key `{}` cannot be expressed in script syntax",
                key
            )));
        }
        out.push_str(&format!("{} = {}\n", path, value));
    }
    Ok(out)
}

fn is_script_key(key: &str) -> bool {
    !key.is_empty()
        && !key.contains('.')
        && !key.contains('=')
        && !key.starts_with('#')
        && key.trim() == key
        && !key.chars().any(char::is_control)
}
