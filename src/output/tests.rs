//! Tests for output module

use super::*;
use crate::error::Error;
use crate::schema::{CollectionSchema, FieldDescriptor, FieldType, TypeTag};
use crate::source::CollectionInfo;
use crate::types::LogLevel;
use mongodb::bson::doc;
use pretty_assertions::assert_eq;
use serde_json::json;

fn users_schema() -> CollectionSchema {
    CollectionSchema {
        name: "users".to_string(),
        fields: vec![
            FieldDescriptor::new("_id", TypeTag::Object, true),
            FieldDescriptor::new("email", TypeTag::String, true),
            FieldDescriptor::new("address", TypeTag::Object, false).with_children(vec![
                FieldDescriptor::new("address.city", TypeTag::String, true),
            ]),
            FieldDescriptor::new("address.city", TypeTag::String, false),
            FieldDescriptor::new(
                "age",
                FieldType::Union(vec![TypeTag::Number, TypeTag::String]),
                true,
            ),
        ],
        total_count: 1200,
        sampled: 100,
        indexes: vec![
            doc! { "v": 2, "key": { "_id": 1 }, "name": "_id_" },
            doc! { "v": 2, "key": { "email": 1 }, "name": "email_1", "unique": true },
        ],
    }
}

// ============================================================================
// Message Tests
// ============================================================================

#[test]
fn test_schema_message() {
    let msg = schema_message(&users_schema());

    assert_eq!(msg["type"], "SCHEMA");
    assert_eq!(msg["schema"]["name"], "users");
    assert_eq!(msg["schema"]["total_count"], 1200);
    assert_eq!(msg["schema"]["sampled"], 100);
    assert_eq!(msg["schema"]["fields"][4]["type"], "number|string");
    assert_eq!(msg["schema"]["fields"][2]["required"], false);
    assert_eq!(
        msg["schema"]["fields"][2]["children"][0]["path"],
        "address.city"
    );
    assert!(msg["schema"]["fields"][0].get("children").is_none());
    assert_eq!(msg["schema"]["indexes"][1]["name"], "email_1");
}

#[test]
fn test_collections_message() {
    let msg = collections_message(&[
        CollectionInfo::new("orders", "collection"),
        CollectionInfo::new("active_users", "view"),
    ]);

    assert_eq!(
        msg,
        json!({
            "type": "COLLECTIONS",
            "collections": [
                {"name": "orders", "type": "collection"},
                {"name": "active_users", "type": "view"}
            ]
        })
    );
}

#[test]
fn test_connection_status() {
    let ok = connection_status(Ok(()));
    assert_eq!(ok["connectionStatus"]["status"], "SUCCEEDED");

    let err = Error::source("server selection timeout");
    let failed = connection_status(Err(&err));
    assert_eq!(failed["connectionStatus"]["status"], "FAILED");
    assert!(failed["connectionStatus"]["message"]
        .as_str()
        .unwrap()
        .contains("server selection timeout"));
}

#[test]
fn test_log_message() {
    let msg = log_message(LogLevel::Warn, "sampling 0 records");
    assert_eq!(
        msg,
        json!({"type": "LOG", "log": {"level": "WARN", "message": "sampling 0 records"}})
    );
}

// ============================================================================
// Report Tests
// ============================================================================

#[test]
fn test_report_header_and_rows() {
    let report = render_report(&users_schema());
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(lines[0], "users: 100 of 1200 documents sampled");

    let tokens: Vec<Vec<&str>> = lines[1..6]
        .iter()
        .map(|l| l.split_whitespace().collect())
        .collect();
    assert_eq!(tokens[0], vec!["_id", "object", "required"]);
    assert_eq!(tokens[1], vec!["email", "string", "required"]);
    assert_eq!(tokens[2], vec!["address", "object", "optional"]);
    assert_eq!(tokens[3], vec!["address.city", "string", "optional"]);
    assert_eq!(tokens[4], vec!["age", "number|string", "required"]);

    // Nested fields are indented one level
    assert!(lines[4].starts_with("    address.city"));
    assert!(lines[3].starts_with("  address"));
}

#[test]
fn test_report_columns_are_aligned() {
    let report = render_report(&users_schema());
    let columns: Vec<usize> = report
        .lines()
        .skip(1)
        .take(5)
        .map(|l| {
            l.find("required")
                .or_else(|| l.find("optional"))
                .unwrap()
        })
        .collect();

    assert!(columns.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_report_indexes() {
    let report = render_report(&users_schema());
    let tail: Vec<&str> = report.lines().skip(6).collect();

    assert_eq!(tail[0], "indexes:");
    assert!(tail[1].starts_with("  _id_ "));
    assert!(tail[2].starts_with("  email_1 "));
    assert!(tail[2].contains("email"));
}

#[test]
fn test_report_empty_schema() {
    let schema = CollectionSchema {
        name: "empty".to_string(),
        fields: vec![],
        total_count: 42,
        sampled: 0,
        indexes: vec![],
    };

    assert_eq!(
        render_report(&schema),
        "empty: 0 of 42 documents sampled\n  (no fields)\n"
    );
}
