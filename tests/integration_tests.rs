//! Integration tests over JSON exports
//!
//! Tests the full end-to-end flow: YAML probe → file catalog → sampled schema → report

use docshape::loader::load_definition;
use docshape::output::{render_report, schema_message};
use docshape::schema::{build_schema, FieldType, SchemaAggregator, TypeTag};
use docshape::source::{open_catalog, Catalog, FileCatalog, MemorySource, SampleMode};
use mongodb::bson::doc;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const USERS: &str = r#"[
  {
    "_id": {"$oid": "65a1b2c3d4e5f60718293a4b"},
    "email": "john@example.com",
    "name": "John Doe",
    "age": 30,
    "address": {"city": "New York", "zip": "10001"},
    "tags": ["admin"],
    "createdAt": {"$date": "2024-01-15T10:30:00Z"}
  },
  {
    "_id": {"$oid": "65a1b2c3d4e5f60718293a4c"},
    "email": "jane@example.com",
    "name": "Jane Smith",
    "age": "unknown",
    "address": {"city": "Boston"},
    "tags": []
  },
  {
    "_id": {"$oid": "65a1b2c3d4e5f60718293a4d"},
    "email": "sam@example.com",
    "name": "Sam Lee",
    "phone": null,
    "address": {"city": "Austin", "zip": 73301}
  }
]"#;

const ORDERS: &str = r#"{"orderId": "o-1", "items": [{"sku": "A-1", "quantity": 1}], "total": 9.5}
{"orderId": "o-2", "items": [{"sku": "B-2", "quantity": 2, "note": "gift"}], "total": 20}

{"orderId": "o-3", "items": [], "total": 0}
"#;

fn write_exports(dir: &Path) {
    fs::write(dir.join("users.json"), USERS).unwrap();
    fs::write(dir.join("orders.jsonl"), ORDERS).unwrap();
}

fn paths(schema: &docshape::CollectionSchema) -> Vec<&str> {
    schema.fields.iter().map(|f| f.path.as_str()).collect()
}

// ============================================================================
// Probe Definition → Schema
// ============================================================================

#[tokio::test]
async fn test_probe_definition_end_to_end() {
    let dir = tempdir().unwrap();
    write_exports(dir.path());

    let probe_path = dir.path().join("probe.yaml");
    fs::write(
        &probe_path,
        format!(
            r#"
name: shop
source:
  type: file
  path: {}
sampling:
  size: 50
"#,
            dir.path().display()
        ),
    )
    .unwrap();

    let def = load_definition(&probe_path).unwrap();
    assert_eq!(def.sampling.size, 50);

    let catalog = open_catalog(&def.source, def.sampling.mode).await.unwrap();
    catalog.check().await.unwrap();

    let names: Vec<String> = catalog
        .list_collections()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["orders", "users"]);

    let aggregator = SchemaAggregator::new().with_sample_size(def.sampling.size);
    for name in &names {
        let source = catalog.source(name).unwrap();
        let schema = aggregator.build(source.as_ref()).await.unwrap();
        assert_eq!(&schema.name, name);
        assert_eq!(schema.sampled as u64, schema.total_count);
    }
}

#[tokio::test]
async fn test_users_schema() {
    let dir = tempdir().unwrap();
    write_exports(dir.path());

    let catalog = FileCatalog::new(dir.path());
    let users = catalog.source("users").unwrap();
    let schema = build_schema(users.as_ref(), 100).await.unwrap();

    assert_eq!(
        paths(&schema),
        vec![
            "_id",
            "email",
            "name",
            "age",
            "address",
            "address.city",
            "address.zip",
            "tags",
            "createdAt",
            "phone",
        ]
    );

    let field = |path: &str| schema.field(path).unwrap();

    assert_eq!(field("_id").field_type, FieldType::Single(TypeTag::Object));
    assert_eq!(field("age").field_type.to_string(), "number|string");
    assert_eq!(field("address.zip").field_type.to_string(), "string|number");
    assert_eq!(field("createdAt").field_type, FieldType::Single(TypeTag::Date));
    assert_eq!(field("phone").field_type, FieldType::Single(TypeTag::Null));
    assert_eq!(field("tags").field_type, FieldType::Single(TypeTag::Array));

    assert_eq!(
        schema.required_paths(),
        vec!["_id", "email", "name", "address", "address.city", "address.zip"]
    );

    // Nested structure is attached to the parent as well
    let children: Vec<&str> = field("address")
        .children()
        .iter()
        .map(|c| c.path.as_str())
        .collect();
    assert_eq!(children, vec!["address.city", "address.zip"]);
}

#[tokio::test]
async fn test_orders_schema_with_array_elements() {
    let dir = tempdir().unwrap();
    write_exports(dir.path());

    let catalog = FileCatalog::new(dir.path());
    let orders = catalog.source("orders").unwrap();
    let schema = build_schema(orders.as_ref(), 100).await.unwrap();

    assert_eq!(schema.total_count, 3);
    assert_eq!(
        paths(&schema),
        vec![
            "orderId",
            "items",
            "items[].sku",
            "items[].quantity",
            "total",
            "items[].note",
        ]
    );
    // Element paths are rooted at `items[]`, never a record key
    assert_eq!(schema.required_paths(), vec!["orderId", "items", "total"]);
    assert_eq!(schema.field("items").unwrap().children().len(), 2);
}

#[tokio::test]
async fn test_sample_smaller_than_collection() {
    let dir = tempdir().unwrap();
    write_exports(dir.path());

    let catalog = FileCatalog::new(dir.path());
    let users = catalog.source("users").unwrap();
    let schema = build_schema(users.as_ref(), 2).await.unwrap();

    assert_eq!(schema.sampled, 2);
    assert_eq!(schema.total_count, 3);
    assert!(schema.field("phone").is_none());
    assert!(schema.field("age").unwrap().required);
}

// ============================================================================
// Output
// ============================================================================

#[tokio::test]
async fn test_schema_message_and_report() {
    let source = MemorySource::from_documents(
        "products",
        vec![
            doc! { "sku": "LAPTOP-001", "price": 1299.99, "specs": { "ram": "16GB" } },
            doc! { "sku": "MOUSE-001", "price": 49, "discontinued": true },
        ],
    )
    .with_indexes(vec![
        doc! { "name": "_id_", "key": { "_id": 1 } },
        doc! { "name": "sku_1", "key": { "sku": 1 }, "unique": true },
    ]);

    let schema = build_schema(&source, 100).await.unwrap();

    let msg = schema_message(&schema);
    assert_eq!(msg["type"], "SCHEMA");
    assert_eq!(msg["schema"]["name"], "products");
    assert_eq!(msg["schema"]["fields"][0]["path"], "sku");
    assert_eq!(msg["schema"]["fields"][0]["type"], "string");

    let report = render_report(&schema);
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[0], "products: 2 of 2 documents sampled");
    assert!(lines.iter().any(|l| l.split_whitespace().collect::<Vec<_>>()
        == vec!["specs.ram", "string", "optional"]));
    assert!(lines.contains(&"indexes:"));
    assert!(lines.iter().any(|l| l.trim_start().starts_with("sku_1")));
}

#[tokio::test]
async fn test_random_mode_on_files_falls_back_to_first() {
    let dir = tempdir().unwrap();
    write_exports(dir.path());

    let def = docshape::loader::SourceDefinition::File {
        path: dir.path().join("users.json"),
        format: None,
        collection: None,
    };
    let catalog = open_catalog(&def, SampleMode::Random).await.unwrap();
    let users = catalog.source("users").unwrap();
    let schema = build_schema(users.as_ref(), 1).await.unwrap();

    assert_eq!(schema.sampled, 1);
    assert_eq!(
        schema.field("email").unwrap().field_type,
        FieldType::Single(TypeTag::String)
    );
}
