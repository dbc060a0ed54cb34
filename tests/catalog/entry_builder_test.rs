//! Integration tests for CatalogEntryBuilder.

use tap_redshift::catalog::{
    CatalogEntryBuilder, Inclusion, JsonType, ReplicationMethod, ReplicationPolicy,
};
use tap_redshift::metadata::{ColumnDescriptor, KeyCandidate, NativeType, TableIntrospection};

fn introspection(columns: Vec<ColumnDescriptor>) -> TableIntrospection {
    TableIntrospection {
        schema_name: "sales".to_string(),
        table_name: "orders".to_string(),
        is_view: false,
        columns,
        primary_key: None,
        unique_indexes: Vec::new(),
    }
}

fn key(columns: &[&str]) -> KeyCandidate {
    KeyCandidate::new(columns.iter().copied()).unwrap()
}

#[test]
fn test_primary_key_wins_over_unique_index() {
    let mut table = introspection(vec![
        ColumnDescriptor::new("id", NativeType::new("bigint"), false),
        ColumnDescriptor::new("number", NativeType::new("varchar(32)"), false),
    ]);
    table.primary_key = Some(key(&["id"]));
    table.unique_indexes = vec![key(&["number"])];

    let entry = CatalogEntryBuilder::default().build(table);
    assert_eq!(entry.key_properties, Some(vec!["id".to_string()]));
    assert_eq!(
        entry.metadata.root().unwrap().table_key_properties,
        Some(vec!["id".to_string()])
    );
}

#[test]
fn test_first_unique_index_used_without_primary_key() {
    let mut table = introspection(vec![
        ColumnDescriptor::new("region", NativeType::new("char(2)"), false),
        ColumnDescriptor::new("number", NativeType::new("integer"), false),
        ColumnDescriptor::new("ref", NativeType::new("uuid"), false),
    ]);
    table.unique_indexes = vec![key(&["region", "number"]), key(&["ref"])];

    let entry = CatalogEntryBuilder::default().build(table);
    assert_eq!(entry.key_properties(), ["region", "number"]);
    assert_eq!(
        entry.metadata.property("ref").unwrap().inclusion,
        Some(Inclusion::Available)
    );
    assert_eq!(
        entry.metadata.property("region").unwrap().inclusion,
        Some(Inclusion::Automatic)
    );
}

#[test]
fn test_no_key_candidates() {
    let entry = CatalogEntryBuilder::default().build(introspection(vec![ColumnDescriptor::new(
        "note",
        NativeType::new("text"),
        true,
    )]));
    assert_eq!(entry.key_properties, None);
    assert!(entry.key_properties().is_empty());
    assert_eq!(entry.metadata.root().unwrap().table_key_properties, None);
}

#[test]
fn test_nullable_columns_accept_null() {
    let entry = CatalogEntryBuilder::default().build(introspection(vec![
        ColumnDescriptor::new("id", NativeType::new("integer"), false),
        ColumnDescriptor::new("total", NativeType::new("numeric").with_precision(18, 2), true),
        ColumnDescriptor::new("placed_at", NativeType::new("timestamp without time zone"), true),
    ]));

    let id = entry.schema.property("id").unwrap();
    assert!(id.allows(JsonType::Integer));
    assert!(!id.allows(JsonType::Null));

    let total = entry.schema.property("total").unwrap();
    assert!(total.allows(JsonType::Number));
    assert!(total.allows(JsonType::Null));

    let placed_at = entry.schema.property("placed_at").unwrap();
    assert_eq!(placed_at.format.as_deref(), Some("date-time"));
    assert!(placed_at.allows(JsonType::Null));

    assert_eq!(entry.schema.required, Some(vec!["id".to_string()]));
}

#[test]
fn test_unknown_type_falls_back_to_string() {
    let entry = CatalogEntryBuilder::default().build(introspection(vec![
        ColumnDescriptor::new("shape", NativeType::new("tsvector"), true),
        ColumnDescriptor::new("blob", NativeType::new(""), false),
    ]));

    let shape = entry.schema.property("shape").unwrap();
    assert!(shape.allows(JsonType::String));
    assert!(shape.allows(JsonType::Null));
    assert!(!shape.allows(JsonType::Integer));

    let blob = entry.schema.property("blob").unwrap();
    assert!(blob.allows(JsonType::String));
}

#[test]
fn test_views_are_flagged() {
    let mut table = introspection(vec![ColumnDescriptor::new(
        "id",
        NativeType::new("integer"),
        true,
    )]);
    table.is_view = true;
    table.table_name = "order_summary".to_string();

    let entry = CatalogEntryBuilder::default().build(table);
    assert!(entry.is_view);
    assert_eq!(entry.tap_stream_id, "sales-order_summary");
    assert_eq!(entry.stream, entry.tap_stream_id);
}

#[test]
fn test_key_naming_missing_column_is_kept() {
    let mut table = introspection(vec![ColumnDescriptor::new(
        "id",
        NativeType::new("integer"),
        false,
    )]);
    table.primary_key = Some(key(&["legacy_id"]));

    let entry = CatalogEntryBuilder::default().build(table);
    assert_eq!(entry.key_properties(), ["legacy_id"]);
    assert!(entry.metadata.property("legacy_id").is_none());
}

#[test]
fn test_additional_replication_methods() {
    let builder = CatalogEntryBuilder::new(ReplicationPolicy {
        use_computed_method: true,
        additional_methods: vec![ReplicationMethod::Incremental],
    });
    let entry = builder.build(introspection(Vec::new()));
    assert_eq!(entry.replication_method, Some(ReplicationMethod::Incremental));
    assert_eq!(
        entry.metadata.root().unwrap().forced_replication_method,
        Some(ReplicationMethod::Incremental)
    );
}

#[test]
fn test_discovered_fields_left_empty() {
    let entry = CatalogEntryBuilder::default().build(introspection(Vec::new()));
    assert_eq!(entry.database, None);
    assert_eq!(entry.row_count, None);
    assert_eq!(entry.stream_alias, None);
    assert_eq!(entry.replication_key, None);
    assert!(entry.is_selected());
}
