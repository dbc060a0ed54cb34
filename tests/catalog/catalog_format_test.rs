//! Tests for the persisted catalog format.

use insta::assert_snapshot;
use serde_json::json;
use tap_redshift::catalog::{
    split_stream_id, stream_id, Catalog, CatalogEntryBuilder, ReplicationMethod,
};
use tap_redshift::metadata::{ColumnDescriptor, KeyCandidate, NativeType, TableIntrospection};

fn widgets() -> TableIntrospection {
    TableIntrospection {
        schema_name: "app".to_string(),
        table_name: "widgets".to_string(),
        is_view: false,
        columns: vec![
            ColumnDescriptor::new("id", NativeType::new("integer"), false),
            ColumnDescriptor::new(
                "name",
                NativeType::new("character varying").with_length(64),
                true,
            ),
        ],
        primary_key: KeyCandidate::new(["id"]),
        unique_indexes: Vec::new(),
    }
}

#[test]
fn test_entry_wire_format() {
    let entry = CatalogEntryBuilder::default().build(widgets());
    let json = serde_json::to_string_pretty(&entry).unwrap();

    assert_snapshot!(json, @r#"
    {
      "tap_stream_id": "app-widgets",
      "stream": "app-widgets",
      "table": "widgets",
      "key_properties": [
        "id"
      ],
      "schema": {
        "type": "object",
        "properties": {
          "id": {
            "type": [
              "integer"
            ]
          },
          "name": {
            "type": [
              "string",
              "null"
            ],
            "maxLength": 64
          }
        },
        "required": [
          "id"
        ]
      },
      "is_view": false,
      "replication_method": "FULL_TABLE",
      "metadata": [
        {
          "breadcrumb": [],
          "metadata": {
            "inclusion": "available",
            "selected-by-default": true,
            "table-key-properties": [
              "id"
            ],
            "forced-replication-method": "FULL_TABLE",
            "schema-name": "app"
          }
        },
        {
          "breadcrumb": [
            "properties",
            "id"
          ],
          "metadata": {
            "inclusion": "automatic",
            "selected-by-default": true
          }
        },
        {
          "breadcrumb": [
            "properties",
            "name"
          ],
          "metadata": {
            "inclusion": "available",
            "selected-by-default": true
          }
        }
      ],
      "database": null,
      "row_count": null,
      "stream_alias": null,
      "replication_key": null
    }
    "#);
}

#[test]
fn test_user_edited_catalog_round_trips() {
    let document = json!({
        "streams": [{
            "tap_stream_id": "app-widgets",
            "stream": "widgets_alias",
            "table": "widgets",
            "key_properties": ["id"],
            "schema": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "id": {"type": ["integer"], "minimum": 0},
                    "updated_at": {"type": ["string", "null"], "format": "date-time"}
                }
            },
            "is_view": false,
            "replication_method": "INCREMENTAL",
            "metadata": [
                {"breadcrumb": [], "metadata": {
                    "selected": true,
                    "replication-key": "updated_at",
                    "inclusion": "available"
                }},
                {"breadcrumb": ["properties", "updated_at"], "metadata": {"selected": false}}
            ],
            "database": "analytics",
            "row_count": 1200,
            "stream_alias": "widgets_alias",
            "replication_key": "updated_at"
        }]
    });

    let catalog: Catalog = serde_json::from_value(document.clone()).unwrap();
    let entry = catalog.get("app-widgets").unwrap();
    assert_eq!(entry.replication_method, Some(ReplicationMethod::Incremental));
    assert_eq!(entry.row_count, Some(1200));
    assert!(entry.is_selected());
    assert!(!entry.metadata.property("updated_at").unwrap().is_selected());

    let reparsed: serde_json::Value =
        serde_json::from_str(&catalog.to_json().unwrap()).unwrap();
    assert_eq!(reparsed, document);
}

#[test]
fn test_catalog_load_from_file() {
    let catalog = Catalog::new(vec![CatalogEntryBuilder::default().build(widgets())]);
    let path = std::env::temp_dir().join(format!("tap-redshift-catalog-{}.json", std::process::id()));
    std::fs::write(&path, catalog.to_json().unwrap()).unwrap();

    let loaded = Catalog::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, catalog);
}

#[test]
fn test_invalid_catalog_is_rejected() {
    assert!(Catalog::from_json(r#"{"streams": [{"stream": "x"}]}"#).is_err());
    assert!(Catalog::from_json("not json").is_err());
}

#[test]
fn test_stream_ids_are_injective() {
    let pairs = [
        ("a-b", "c"),
        ("a", "b-c"),
        ("a%2Db", "c"),
        ("a", "b%2Dc"),
        ("Sales", "orders"),
        ("sales", "orders"),
    ];
    let ids: Vec<String> = pairs.iter().map(|(s, t)| stream_id(s, t)).collect();

    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());

    for ((schema, table), id) in pairs.iter().zip(&ids) {
        assert_eq!(
            split_stream_id(id),
            Some((schema.to_string(), table.to_string()))
        );
    }
}
