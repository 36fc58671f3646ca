//! # pathtree-core
//!
//! Incremental JSON tree builder. Describe a document one field path at a
//! time, across as many independent calls as needed; each call merges into
//! the tree already built instead of overwriting it.
//!
//! ## Quick start
//!
//! ```rust
//! use pathtree_core::JsonObjectBuilder;
//! use serde_json::json;
//!
//! let mut builder = JsonObjectBuilder::new();
//! builder.field("name")?.string_value("Alice");
//! builder.nested_field("address", &["city"])?.string_value("Paris");
//! builder.nested_field("address", &["zip"])?.number_value(75001);
//! builder
//!     .field("tags")?
//!     .array_value()
//!     .add_all_strings(["admin", "ops"]);
//!
//! assert_eq!(
//!     builder.build(),
//!     json!({
//!         "name": "Alice",
//!         "address": {"city": "Paris", "zip": 75001},
//!         "tags": ["admin", "ops"]
//!     })
//! );
//! # Ok::<(), pathtree_core::BuildError>(())
//! ```
//!
//! ## Modules
//!
//! - [`builder`] — `JsonObjectBuilder` and path resolution
//! - [`cursor`] — `FieldCursor`, the write-or-nest step after resolution
//! - [`array`] — `ArrayCursor`, append-only array population
//! - [`path`] — `FieldPath` and the prefix/suffix interleave transforms
//! - [`script`] — line-oriented `<path> = <json>` scripts driving a builder
//! - [`flatten`] — leaf listing of an existing object
//! - [`error`] — Error types for resolution and script failures

pub mod array;
pub mod builder;
pub mod cursor;
pub mod error;
pub mod flatten;
pub mod number;
pub mod path;
pub mod script;

pub use array::ArrayCursor;
pub use builder::JsonObjectBuilder;
pub use cursor::FieldCursor;
pub use error::{BuildError, Result, ScriptError};
pub use flatten::flatten;
pub use number::JsonNumber;
pub use path::FieldPath;
pub use script::{apply_script, build_script, to_script, ScriptOptions};
