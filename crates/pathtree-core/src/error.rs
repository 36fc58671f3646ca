//! Error types for path resolution and tree building.

use crate::path::FieldPath;
use thiserror::Error;

/// Errors that can occur while resolving a path or writing into the tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A non-terminal path segment already holds a value that is not an object.
    /// The tree is left exactly as it was before the failing call.
    #[error("path type conflict at `{path}`: expected object, found {found}")]
    PathTypeConflict { path: FieldPath, found: &'static str },

    /// A required name was empty, or a path had no segments.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A caller-supplied closure gave up. Use [`BuildError::consumer`] to map
    /// foreign errors into the builder's error type.
    #[error("consumer failed: {message}")]
    Consumer { message: String },
}

impl BuildError {
    pub(crate) fn conflict(path: FieldPath, found: &'static str) -> Self {
        BuildError::PathTypeConflict { path, found }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        BuildError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Wrap a failure raised inside a branch function or array consumer.
    pub fn consumer(message: impl Into<String>) -> Self {
        BuildError::Consumer {
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout pathtree-core.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Errors raised while applying a path script.
#[derive(Error, Debug)]
pub enum ScriptError {
    /// The line is not of the form `<path> = <json literal>`.
    /// `line` is 1-based.
    #[error("script parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The line parsed, but the builder rejected it.
    #[error("script error at line {line}: {source}")]
    Build {
        line: usize,
        #[source]
        source: BuildError,
    },

    /// Script options were inconsistent before any line was read.
    #[error("invalid script options: {0}")]
    Options(BuildError),
}

/// JSON type name used in diagnostics.
pub(crate) fn type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
