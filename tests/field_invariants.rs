//! Field Decoding Invariant Tests
//!
//! Tests for decoding invariants:
//! - Validation only looks at fields present in both record and schema
//! - Accessor tiers agree with each other
//! - Accessors are idempotent
//! - Defaults and zero values fill in absent fields

use fielddata::schema::{CoercionError, DecodeError, FieldSchema, FieldType, FieldValue, SchemaMap};
use fielddata::{FieldData, RawRecord};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn record(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        _ => panic!("record must be an object"),
    }
}

fn request_schema() -> SchemaMap {
    let mut fields = SchemaMap::new();
    fields.insert("name".to_string(), FieldSchema::new(FieldType::NameString));
    fields.insert(
        "ttl".to_string(),
        FieldSchema::new(FieldType::DurationSecond).with_default(3600),
    );
    fields.insert(
        "max_ttl".to_string(),
        FieldSchema::new(FieldType::DurationSecond),
    );
    fields.insert(
        "allowed_domains".to_string(),
        FieldSchema::new(FieldType::CommaStringSlice),
    );
    fields.insert("policies".to_string(), FieldSchema::new(FieldType::StringSlice));
    fields.insert(
        "allow_any".to_string(),
        FieldSchema::new(FieldType::Bool).with_default(true),
    );
    fields.insert("num_uses".to_string(), FieldSchema::new(FieldType::Int));
    fields.insert("metadata".to_string(), FieldSchema::new(FieldType::Map));
    fields.insert("extra".to_string(), FieldSchema::new(FieldType::Slice));
    fields.insert(
        "display_name".to_string(),
        FieldSchema::new(FieldType::String).with_description("Shown in listings"),
    );
    fields
}

// =============================================================================
// Validation Tests
// =============================================================================

/// Fields absent from the schema never affect validation.
#[test]
fn test_unschemad_fields_ignored() {
    let schema = request_schema();
    let raw = record(json!({
        "name": "web-role",
        "unexpected": [1, 2, 3],
        "also_unexpected": { "deep": null }
    }));

    assert!(FieldData::new(&raw, &schema).validate().is_ok());
}

/// Fields absent from the record are not validated.
#[test]
fn test_empty_record_validates() {
    let schema = request_schema();
    let raw = RawRecord::new();

    assert!(FieldData::new(&raw, &schema).validate().is_ok());
}

/// Every compatible representation passes validation.
#[test]
fn test_compatible_representations_validate() {
    let schema = request_schema();
    let raw = record(json!({
        "name": "my-secret.v1",
        "ttl": "2m",
        "max_ttl": 90,
        "allowed_domains": "example.com, example.org",
        "policies": ["default", " admin "],
        "allow_any": "false",
        "num_uses": "10",
        "metadata": { "team": "core" },
        "extra": "single",
        "display_name": 42
    }));

    assert!(FieldData::new(&raw, &schema).validate().is_ok());
}

/// A single bad field fails validation and is named in the error.
#[test]
fn test_incompatible_field_named() {
    let schema = request_schema();
    let cases = [
        ("name", json!("-bad")),
        ("name", json!("bad!")),
        ("name", json!("")),
        ("ttl", json!("nonsense")),
        ("max_ttl", json!([1])),
        ("allow_any", json!("maybe")),
        ("num_uses", json!("ten")),
        ("metadata", json!("k=v")),
        ("policies", json!([["nested"]])),
        ("display_name", json!({ "a": 1 })),
    ];

    for (field, value) in cases {
        let mut raw = RawRecord::new();
        raw.insert(field.to_string(), value.clone());

        let err = FieldData::new(&raw, &schema).validate().unwrap_err();
        assert_eq!(err.code(), "FIELD_COERCION_FAILED", "{field}: {value}");
        assert_eq!(err.field(), field);
        assert!(err.to_string().contains(&value.to_string()));
    }
}

/// With several bad fields, the first in key order is reported.
#[test]
fn test_first_bad_field_in_key_order_reported() {
    let schema = request_schema();
    let raw = record(json!({
        "num_uses": "ten",
        "allow_any": "maybe",
        "policies": [["nested"]]
    }));

    for _ in 0..10 {
        let err = FieldData::new(&raw, &schema).validate().unwrap_err();
        assert_eq!(err.field(), "allow_any");
        assert_eq!(err.coercion(), Some(&CoercionError::InvalidBool("maybe".into())));
    }
}

/// Duration strings at the edges of the integer range decode exactly.
#[test]
fn test_duration_extremes_and_fractions() {
    let schema = request_schema();
    let raw = record(json!({
        "ttl": "-9223372036854775808",
        "max_ttl": ".5m"
    }));
    let data = FieldData::new(&raw, &schema);
    data.validate().unwrap();

    assert_eq!(data.get("ttl"), FieldValue::Int(i64::MIN));
    assert_eq!(data.get("max_ttl"), FieldValue::Int(30));
}

/// Name strings violating the format report the formatting rule.
#[test]
fn test_name_string_format_error() {
    let schema = request_schema();
    let raw = record(json!({ "name": "bad!" }));

    let err = FieldData::new(&raw, &schema).validate().unwrap_err();
    assert_eq!(err.coercion(), Some(&CoercionError::NameFormat));
    assert!(err.to_string().contains("field does not match the formatting rules"));
}

/// Unknown declared types fail both validation and conservative reads.
#[test]
fn test_unknown_type_is_hard_failure() {
    let mut schema = request_schema();
    schema.insert("weight".to_string(), FieldSchema::declared("float"));
    let raw = record(json!({ "weight": 1.5 }));
    let data = FieldData::new(&raw, &schema);

    let expected = DecodeError::UnknownType {
        field: "weight".into(),
        type_name: "float".into(),
    };
    assert_eq!(data.validate(), Err(expected.clone()));
    assert_eq!(data.get_ok_err("weight"), Err(expected));
}

// =============================================================================
// Accessor Tests
// =============================================================================

/// Unknown keys are errors for the conservative accessor.
#[test]
fn test_get_ok_err_unknown_key() {
    let schema = request_schema();
    let raw = record(json!({ "nope": true }));

    let err = FieldData::new(&raw, &schema).get_ok_err("nope").unwrap_err();
    assert_eq!(err.code(), "FIELD_UNKNOWN_FIELD");
}

/// Unknown keys abort the convenience accessor.
#[test]
#[should_panic(expected = "not in the schema")]
fn test_get_unknown_key_panics() {
    let schema = request_schema();
    let raw = RawRecord::new();

    FieldData::new(&raw, &schema).get("nope");
}

/// Absent fields fall back to defaults, then zero values.
#[test]
fn test_absent_fields_use_default_or_zero() {
    let schema = request_schema();
    let raw = RawRecord::new();
    let data = FieldData::new(&raw, &schema);

    assert_eq!(data.get("ttl"), FieldValue::Int(3600));
    assert_eq!(data.get("max_ttl"), FieldValue::Int(0));
    assert_eq!(data.get("allow_any"), FieldValue::Bool(true));
    assert_eq!(data.get("policies"), FieldValue::StringSlice(Vec::new()));
    assert_eq!(data.get("display_name"), FieldValue::String(String::new()));

    assert_eq!(data.get_ok("ttl"), (Some(FieldValue::Int(3600)), false));
    assert_eq!(data.get_ok_err("ttl"), Ok((None, false)));
}

/// Present values are returned as decoded, with presence reported.
#[test]
fn test_present_fields_decoded() {
    let schema = request_schema();
    let raw = record(json!({
        "ttl": "2m",
        "max_ttl": 90,
        "allowed_domains": "a, b ,c",
        "policies": [" default ", "admin"],
        "allow_any": 0,
        "num_uses": "0x10"
    }));
    let data = FieldData::new(&raw, &schema);
    data.validate().unwrap();

    assert_eq!(data.get_ok("ttl"), (Some(FieldValue::Int(120)), true));
    assert_eq!(data.get("max_ttl"), FieldValue::Int(90));
    assert_eq!(
        data.get("allowed_domains").as_string_slice(),
        Some(&["a".to_string(), "b".to_string(), "c".to_string()][..])
    );
    assert_eq!(
        data.get("policies").as_string_slice(),
        Some(&["default".to_string(), "admin".to_string()][..])
    );
    assert_eq!(data.get("allow_any").as_bool(), Some(false));
    assert_eq!(data.get("num_uses").as_int(), Some(16));
}

/// A present null keeps its presence but takes the default value.
#[test]
fn test_present_null_takes_default() {
    let schema = request_schema();
    let raw = record(json!({ "allow_any": null, "metadata": null }));
    let data = FieldData::new(&raw, &schema);

    assert_eq!(data.get_ok_err("allow_any"), Ok((None, true)));
    assert_eq!(data.get_ok("allow_any"), (Some(FieldValue::Bool(true)), true));
    assert_eq!(data.get("metadata"), FieldValue::Map(Default::default()));
}

/// Repeated reads of the same key return identical results.
#[test]
fn test_accessors_are_idempotent() {
    let schema = request_schema();
    let raw = record(json!({
        "ttl": "1h 30m",
        "allowed_domains": "x,y",
        "num_uses": "bad"
    }));
    let data = FieldData::new(&raw, &schema);

    let first_ttl = data.get("ttl");
    let first_domains = data.get_ok("allowed_domains");
    let first_err = data.get_ok_err("num_uses");
    for _ in 0..100 {
        assert_eq!(data.get("ttl"), first_ttl);
        assert_eq!(data.get_ok("allowed_domains"), first_domains);
        assert_eq!(data.get_ok_err("num_uses"), first_err);
    }
    assert_eq!(first_ttl, FieldValue::Int(5400));
}

/// Reads never modify the raw record.
#[test]
fn test_raw_record_untouched() {
    let schema = request_schema();
    let raw = record(json!({ "policies": [" a "], "allowed_domains": "b, c" }));
    let before = raw.clone();

    let data = FieldData::new(&raw, &schema);
    data.validate().unwrap();
    data.get("policies");
    data.get("allowed_domains");

    assert_eq!(raw, before);
}
