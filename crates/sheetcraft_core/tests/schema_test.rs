//! Tests for schema descriptors: remote rendering and structural validation.

use serde_json::json;
use sheetcraft_core::SchemaDescriptor;
use sheetcraft_error::FormatErrorKind;

fn word_search_schema() -> SchemaDescriptor {
    SchemaDescriptor::array(
        SchemaDescriptor::object()
            .required("title", SchemaDescriptor::string())
            .required("words", SchemaDescriptor::array(SchemaDescriptor::string()))
            .required("grid_size", SchemaDescriptor::integer())
            .optional(
                "difficulty",
                SchemaDescriptor::string_enum(["Beginner", "Medium", "Hard", "Expert"]),
            )
            .optional("note", SchemaDescriptor::string().nullable())
            .build(),
    )
}

#[test]
fn test_remote_schema_dialect() {
    let remote = word_search_schema().to_remote_schema();

    assert_eq!(remote["type"], "ARRAY");
    let item = &remote["items"];
    assert_eq!(item["type"], "OBJECT");
    assert_eq!(item["properties"]["words"]["type"], "ARRAY");
    assert_eq!(item["properties"]["words"]["items"]["type"], "STRING");
    assert_eq!(item["properties"]["grid_size"]["type"], "INTEGER");
    assert_eq!(item["properties"]["note"]["nullable"], true);
    assert_eq!(
        item["properties"]["difficulty"]["enum"],
        json!(["Beginner", "Expert", "Hard", "Medium"])
    );
    assert_eq!(item["required"], json!(["grid_size", "title", "words"]));
}

#[test]
fn test_valid_value_passes() {
    let value = json!([
        {"title": "Pets", "words": ["cat", "dog"], "grid_size": 10, "note": null},
        {"title": "Farm", "words": [], "grid_size": 12.0, "difficulty": "Hard", "extra": 1}
    ]);
    assert!(word_search_schema().validate(&value).is_ok());
}

#[test]
fn test_missing_required_field_reports_path() {
    let value = json!([
        {"title": "Pets", "words": ["cat"], "grid_size": 10},
        {"title": "Farm", "grid_size": 10}
    ]);
    let err = word_search_schema().validate(&value).unwrap_err();
    match err.kind {
        FormatErrorKind::SchemaMismatch { path, .. } => assert_eq!(path, "$[1].words"),
        other => panic!("unexpected kind: {other}"),
    }
}

#[test]
fn test_wrong_type_is_rejected() {
    let value = json!([{"title": "Pets", "words": "cat, dog", "grid_size": 10}]);
    let err = word_search_schema().validate(&value).unwrap_err();
    match err.kind {
        FormatErrorKind::SchemaMismatch {
            path,
            expected,
            found,
        } => {
            assert_eq!(path, "$[0].words");
            assert_eq!(expected, "array");
            assert_eq!(found, "string");
        }
        other => panic!("unexpected kind: {other}"),
    }
}

#[test]
fn test_fractional_integer_and_enum_violation_rejected() {
    let fractional = json!([{"title": "Pets", "words": [], "grid_size": 10.5}]);
    assert!(word_search_schema().validate(&fractional).is_err());

    let bad_enum = json!([{"title": "Pets", "words": [], "grid_size": 10, "difficulty": "Easy"}]);
    assert!(word_search_schema().validate(&bad_enum).is_err());
}

#[test]
fn test_null_only_when_nullable() {
    let schema = SchemaDescriptor::object()
        .required("title", SchemaDescriptor::string())
        .build();
    assert!(schema.validate(&json!({"title": null})).is_err());

    let lenient = SchemaDescriptor::object()
        .required("title", SchemaDescriptor::string().nullable())
        .build();
    assert!(lenient.validate(&json!({"title": null})).is_ok());
}

#[test]
fn test_descriptor_serde_roundtrip() {
    let schema = word_search_schema();
    let text = serde_json::to_string(&schema).unwrap();
    let back: SchemaDescriptor = serde_json::from_str(&text).unwrap();
    assert_eq!(schema, back);
}
