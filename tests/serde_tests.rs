#![cfg(feature = "serde")]

//! Integration tests for serde support in pathlens.
//!
//! These tests verify that value trees read from and written to JSON keep
//! their shape, so lenses can be applied to deserialized documents.

use pathlens::optics::lens_of;
use pathlens::value::Value;
use pathlens::{record, sequence};
use rstest::rstest;

// =============================================================================
// Value Integration Tests
// =============================================================================

#[rstest]
#[case("null", Value::Null)]
#[case("true", Value::from(true))]
#[case("-17", Value::from(-17))]
#[case("2.5", Value::from(2.5))]
#[case("\"text\"", Value::from("text"))]
#[case("[1,\"two\",null]", sequence![1, "two", Value::Null])]
#[case("{\"a\":{\"b\":[]}}", record! { "a" => record! { "b" => sequence![] } })]
fn test_value_from_json(#[case] json: &str, #[case] expected: Value) {
    let value: Value = serde_json::from_str(json).unwrap();
    assert_eq!(value, expected);
}

#[rstest]
fn test_value_json_roundtrip() {
    let john = record! {
        "name" => "John Wallace",
        "age" => 41,
        "height" => 1.82,
        "spouse" => Value::Null,
        "hobbies" => sequence![record! { "name" => "Chess" }],
    };

    let json = serde_json::to_string(&john).unwrap();
    let restored: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, john);
}

#[rstest]
fn test_large_unsigned_becomes_float() {
    let value: Value = serde_json::from_str("18446744073709551615").unwrap();
    assert_eq!(value, Value::from(18_446_744_073_709_551_615_f64));
}

#[rstest]
fn test_lens_over_deserialized_document() {
    let document: Value = serde_json::from_str(
        r#"{"company": {"name": "Microsoft", "address": {"city": "Redmond"}}}"#,
    )
    .unwrap();

    let moved = lens_of(document).at_path("company.address.city").set("Seattle");
    assert_eq!(
        serde_json::to_string(&moved).unwrap(),
        r#"{"company":{"address":{"city":"Seattle"},"name":"Microsoft"}}"#
    );
}

#[rstest]
fn test_serialization_matches_display() {
    let value = record! { "a" => sequence![1, true, Value::Null], "b" => "x" };
    assert_eq!(serde_json::to_string(&value).unwrap(), value.to_string());
}
