//! Type mapping from native column types to catalog schema nodes.
//!
//! [`to_jsonschema_type`] is total: types the dialect does not recognize map
//! to a plain string node, so one exotic column never aborts discovery of its
//! table. Nullability is not decided here; the entry builder adds `"null"`
//! for nullable columns.

mod native;

pub use native::DataType;

use tracing::debug;

use crate::catalog::{JsonType, Schema};
use crate::metadata::NativeType;

/// Map a native column type to its schema node.
pub fn to_jsonschema_type(native: &NativeType) -> Schema {
    match DataType::from_native(native) {
        Some(data_type) => data_type_schema(data_type),
        None => {
            debug!(native_type = %native.name, "unrecognized type, falling back to string");
            Schema::of([JsonType::String])
        }
    }
}

/// Schema node for a parsed native type.
pub fn data_type_schema(data_type: DataType) -> Schema {
    match data_type {
        DataType::Bool => Schema::of([JsonType::Boolean]),

        DataType::SmallInt | DataType::Integer | DataType::BigInt => {
            Schema::of([JsonType::Integer])
        }

        DataType::Real | DataType::DoublePrecision | DataType::Decimal { .. } => {
            Schema::of([JsonType::Number])
        }

        DataType::Char(len) | DataType::Varchar(len) => {
            let schema = Schema::of([JsonType::String]);
            match len {
                Some(n) => schema.with_max_length(u64::from(n)),
                None => schema,
            }
        }

        DataType::Date => Schema::of([JsonType::String]).with_format("date"),
        DataType::Time | DataType::TimeTz => Schema::of([JsonType::String]).with_format("time"),
        DataType::Timestamp | DataType::TimestampTz => {
            Schema::of([JsonType::String]).with_format("date-time")
        }

        // Any JSON value.
        DataType::Super | DataType::Json => Schema::of([
            JsonType::Object,
            JsonType::Array,
            JsonType::String,
            JsonType::Number,
            JsonType::Integer,
            JsonType::Boolean,
        ]),

        DataType::Uuid => Schema::of([JsonType::String]).with_format("uuid"),

        DataType::VarByte(_) | DataType::Geometry | DataType::Geography | DataType::HllSketch => {
            Schema::of([JsonType::String])
        }
    }
}
