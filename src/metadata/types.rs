//! Introspection data model.
//!
//! Values here are produced by an [`Inspector`](super::Inspector) and are
//! immutable once read.

use serde::{Deserialize, Serialize};

use crate::worker::protocol;

/// Opaque native column type as reported by introspection.
///
/// `name` is the database's own spelling (`"character varying"`,
/// `"numeric(18,2)"`, ...). Length, precision and scale are carried
/// separately when the backend reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeType {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
}

impl NativeType {
    /// A native type with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            length: None,
            precision: None,
            scale: None,
        }
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }
}

/// One column of a table or view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub native_type: NativeType,
    pub nullable: bool,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, native_type: NativeType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            native_type,
            nullable,
        }
    }
}

/// Ordered, non-empty list of columns forming a uniqueness constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCandidate(Vec<String>);

impl KeyCandidate {
    /// Build a key candidate. Returns `None` for an empty column list.
    pub fn new<I, S>(columns: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            None
        } else {
            Some(Self(columns))
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.0
    }

    pub fn into_columns(self) -> Vec<String> {
        self.0
    }
}

/// Index as reported by introspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexInfo {
    pub name: String,
    /// Key columns, in index order.
    pub columns: Vec<String>,
    pub is_unique: bool,
    /// Whether the index backs the primary key constraint.
    pub is_primary_key: bool,
}

/// A table or view found in a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    pub name: String,
    pub is_view: bool,
}

impl ObjectInfo {
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_view: false,
        }
    }

    pub fn view(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_view: true,
        }
    }
}

/// Everything introspection reports about one object, gathered for the
/// catalog entry builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableIntrospection {
    pub schema_name: String,
    pub table_name: String,
    pub is_view: bool,
    /// Columns in introspection order.
    pub columns: Vec<ColumnDescriptor>,
    pub primary_key: Option<KeyCandidate>,
    /// Unique, non-primary indexes in introspection order.
    pub unique_indexes: Vec<KeyCandidate>,
}

// ============================================================================
// Conversions from worker protocol types
// ============================================================================

fn non_negative(value: Option<i32>) -> Option<u32> {
    value.and_then(|v| u32::try_from(v).ok())
}

impl From<protocol::ColumnInfo> for ColumnDescriptor {
    fn from(info: protocol::ColumnInfo) -> Self {
        Self {
            name: info.name,
            native_type: NativeType {
                name: info.data_type,
                length: non_negative(info.max_length),
                precision: non_negative(info.numeric_precision),
                scale: non_negative(info.numeric_scale),
            },
            nullable: info.is_nullable,
        }
    }
}

impl From<protocol::TableInfo> for ObjectInfo {
    fn from(info: protocol::TableInfo) -> Self {
        Self {
            is_view: info.is_view(),
            name: info.name,
        }
    }
}

impl From<protocol::IndexInfo> for IndexInfo {
    fn from(info: protocol::IndexInfo) -> Self {
        Self {
            name: info.name,
            columns: info
                .columns
                .into_iter()
                .filter(|c| !c.is_included)
                .map(|c| c.name)
                .collect(),
            is_unique: info.is_unique,
            is_primary_key: info.is_primary_key,
        }
    }
}
