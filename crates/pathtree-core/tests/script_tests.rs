/// Script front-end tests: line parsing, literal dispatch, layouts, error
/// reporting, and the flatten/to_script inverse.
use pathtree_core::{
    apply_script, build_script, flatten, to_script, BuildError, FieldPath, JsonObjectBuilder,
    ScriptError, ScriptOptions,
};
use serde_json::json;

fn plain() -> ScriptOptions {
    ScriptOptions::default()
}

// ============================================================================
// Parsing and literals
// ============================================================================

#[test]
fn assigns_primitives_at_paths() {
    let script = r#"
        name = "Alice"
        address.city = "Paris"
        address.zip = 75001
        active = true
        nickname = null
        ratio = 0.25
    "#;
    let value = build_script(script, &plain()).unwrap();
    assert_eq!(
        value,
        json!({
            "name": "Alice",
            "address": {"city": "Paris", "zip": 75001},
            "active": true,
            "nickname": null,
            "ratio": 0.25
        })
    );
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    let script = "# header\n\n  # indented comment\na = 1\n";
    assert_eq!(build_script(script, &plain()).unwrap(), json!({"a": 1}));
}

#[test]
fn value_may_contain_equals_sign() {
    let value = build_script(r#"expr = "x = y""#, &plain()).unwrap();
    assert_eq!(value, json!({"expr": "x = y"}));
}

#[test]
fn large_unsigned_numbers_survive() {
    let value = build_script("big = 18446744073709551615", &plain()).unwrap();
    assert_eq!(value, json!({"big": u64::MAX}));
}

#[test]
fn arrays_of_primitives_and_objects() {
    let script = r#"items = [1, "two", false, null, {"id": 3}]"#;
    let value = build_script(script, &plain()).unwrap();
    assert_eq!(value, json!({"items": [1, "two", false, null, {"id": 3}]}));
}

#[test]
fn object_literals_merge_leaf_by_leaf() {
    let script = r#"
        owner = {"id": 7}
        owner = {"admin": true, "meta": {"since": 2020}}
        owner.meta.team = "core"
    "#;
    let value = build_script(script, &plain()).unwrap();
    assert_eq!(
        value,
        json!({"owner": {"id": 7, "admin": true, "meta": {"since": 2020, "team": "core"}}})
    );
}

#[test]
fn empty_object_literal_creates_object() {
    let value = build_script("a.b = {}", &plain()).unwrap();
    assert_eq!(value, json!({"a": {"b": {}}}));
}

#[test]
fn later_lines_overwrite_leaves_in_place() {
    let script = "a = 1\nb = 2\na = 3";
    let value = build_script(script, &plain()).unwrap();
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(value, json!({"a": 3, "b": 2}));
}

#[test]
fn apply_script_extends_existing_builder() {
    let mut builder = JsonObjectBuilder::new();
    builder.nested_field("a", &["x"]).unwrap().number_value(1);
    apply_script(&mut builder, "a.y = 2", &plain()).unwrap();
    assert_eq!(builder.build(), json!({"a": {"x": 1, "y": 2}}));
}

// ============================================================================
// Layouts
// ============================================================================

#[test]
fn prefix_layout_interleaves_every_segment() {
    let options = ScriptOptions {
        prefix: Some("p".into()),
        suffix: None,
    };
    let value = build_script("a.b = 42", &options).unwrap();
    assert_eq!(value, json!({"p": {"a": {"p": {"b": 42}}}}));
}

#[test]
fn suffix_layout_interleaves_every_segment() {
    let options = ScriptOptions {
        prefix: None,
        suffix: Some("s".into()),
    };
    let value = build_script("a.b = 42\na.c = {\"d\": 1}", &options).unwrap();
    assert_eq!(
        value,
        json!({"a": {"s": {"b": {"s": 42}, "c": {"s": {"d": {"s": 1}}}}}})
    );
}

#[test]
fn prefix_and_suffix_together_are_rejected() {
    let options = ScriptOptions {
        prefix: Some("p".into()),
        suffix: Some("s".into()),
    };
    let err = build_script("a = 1", &options).unwrap_err();
    assert!(matches!(
        err,
        ScriptError::Options(BuildError::InvalidArgument { .. })
    ));
}

#[test]
fn empty_prefix_is_rejected() {
    let options = ScriptOptions {
        prefix: Some(String::new()),
        suffix: None,
    };
    assert!(matches!(
        build_script("a = 1", &options).unwrap_err(),
        ScriptError::Options(_)
    ));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn missing_equals_reports_line() {
    let err = build_script("a = 1\njust words", &plain()).unwrap_err();
    match err {
        ScriptError::Parse { line, .. } => assert_eq!(line, 2),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn bad_literal_reports_line() {
    let err = build_script("a = 1\n\nb = {not json}", &plain()).unwrap_err();
    assert!(matches!(err, ScriptError::Parse { line: 3, .. }));
    assert!(err.to_string().contains("invalid JSON literal"));
}

#[test]
fn empty_path_segment_is_build_error() {
    let err = build_script("a..b = 1", &plain()).unwrap_err();
    assert!(matches!(
        err,
        ScriptError::Build {
            line: 1,
            source: BuildError::InvalidArgument { .. }
        }
    ));
}

#[test]
fn conflict_reports_line_and_keeps_earlier_lines() {
    let mut builder = JsonObjectBuilder::new();
    let err = apply_script(&mut builder, "a = \"x\"\na.b = 1", &plain()).unwrap_err();
    assert!(matches!(
        err,
        ScriptError::Build {
            line: 2,
            source: BuildError::PathTypeConflict { found: "string", .. }
        }
    ));
    assert_eq!(builder.build(), json!({"a": "x"}));
}

#[test]
fn rejected_object_literal_writes_nothing() {
    let mut builder = JsonObjectBuilder::new();
    apply_script(&mut builder, "a.y = 5", &plain()).unwrap();

    let err = apply_script(&mut builder, r#"a = {"x": 1, "y": {"z": 1}}"#, &plain()).unwrap_err();
    match err {
        ScriptError::Build {
            line: 1,
            source: BuildError::PathTypeConflict { path, found },
        } => {
            assert_eq!(path, FieldPath::parse("a.y").unwrap());
            assert_eq!(found, "number");
        }
        other => panic!("expected a conflict at a.y, got {:?}", other),
    }
    assert_eq!(builder.build(), json!({"a": {"y": 5}}));
}

#[test]
fn object_literal_with_empty_key_writes_nothing() {
    let mut builder = JsonObjectBuilder::new();
    let err = apply_script(&mut builder, r#"a = {"x": 1, "": 2}"#, &plain()).unwrap_err();
    assert!(matches!(
        err,
        ScriptError::Build {
            source: BuildError::InvalidArgument { .. },
            ..
        }
    ));
    assert!(builder.is_empty());
}

#[test]
fn rejected_prefixed_literal_writes_nothing() {
    let options = ScriptOptions {
        prefix: Some("p".to_string()),
        suffix: None,
    };
    let mut builder = JsonObjectBuilder::new();
    apply_script(&mut builder, "a.b = true", &options).unwrap();

    let err = apply_script(&mut builder, r#"a = {"c": 1, "b": {"d": 2}}"#, &options).unwrap_err();
    assert!(matches!(
        err,
        ScriptError::Build {
            source: BuildError::PathTypeConflict { found: "boolean", .. },
            ..
        }
    ));
    assert_eq!(builder.build(), json!({"p": {"a": {"p": {"b": true}}}}));
}

#[test]
fn nested_array_literals_are_built() {
    let script = r#"
        matrix = [[1, 2], [3], []]
        rows = [{"cells": [[true], [null, "x"]]}]
    "#;
    assert_eq!(
        build_script(script, &plain()).unwrap(),
        json!({
            "matrix": [[1, 2], [3], []],
            "rows": [{"cells": [[true], [null, "x"]]}]
        })
    );
}

// ============================================================================
// flatten / to_script
// ============================================================================

#[test]
fn flatten_lists_leaves_in_document_order() {
    let value = json!({"z": 1, "a": {"c": [1, 2], "b": {"d": null}}, "e": {}});
    let paths: Vec<String> = flatten(value.as_object().unwrap())
        .into_iter()
        .map(|(path, _)| path.to_string())
        .collect();
    assert_eq!(paths, ["z", "a.c", "a.b.d", "e"]);
}

#[test]
fn to_script_rebuilds_the_object() {
    let value = json!({
        "name": "Alice",
        "address": {"city": "Paris", "geo": {"lat": 48.85}},
        "tags": ["a", "b"],
        "people": [{"id": 1}],
        "empty": {},
        "none": null
    });
    let script = to_script(value.as_object().unwrap()).unwrap();
    assert!(script.contains("address.geo.lat = 48.85\n"));
    assert_eq!(build_script(&script, &plain()).unwrap(), value);
}

#[test]
fn to_script_rebuilds_nested_arrays() {
    let value = json!({"matrix": [[1, 2], [3]], "x": [{"a": [[1]]}]});
    let script = to_script(value.as_object().unwrap()).unwrap();
    assert_eq!(script, "matrix = [[1,2],[3]]\nx = [{\"a\":[[1]]}]\n");
    assert_eq!(build_script(&script, &plain()).unwrap(), value);
}

#[test]
fn to_script_rejects_dotted_keys() {
    let value = json!({"a.b": 1});
    let err = to_script(value.as_object().unwrap()).unwrap_err();
    assert!(matches!(err, BuildError::InvalidArgument { .. }));
}
