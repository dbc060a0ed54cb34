//! Native Redshift column types.
//!
//! Introspection reports a type name plus optional length, precision and
//! scale. [`DataType`] is the parsed form the type mapper works from.
//!
//! Supports the Redshift type names and their PostgreSQL aliases:
//! - `smallint`, `int2`, `integer`, `int`, `int4`, `bigint`, `int8`
//! - `real`, `float4`, `double precision`, `float8`, `float`
//! - `decimal(p,s)`, `numeric(p,s)`
//! - `boolean`, `bool`
//! - `char(n)`, `character(n)`, `nchar`, `bpchar`
//! - `varchar(n)`, `character varying(n)`, `nvarchar`, `text`
//! - `date`, `time`, `timetz`, `timestamp`, `timestamptz` and their
//!   `with[out] time zone` spellings
//! - `super`, `json`, `jsonb`, `varbyte`, `varbinary`, `binary varying`,
//!   `geometry`, `geography`, `hllsketch`, `uuid`

use crate::metadata::NativeType;

/// Parsed native column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Bool,
    SmallInt,
    Integer,
    BigInt,
    Real,
    DoublePrecision,
    /// Fixed-precision decimal; parameters when reported.
    Decimal {
        precision: Option<u32>,
        scale: Option<u32>,
    },
    /// Fixed-length character string.
    Char(Option<u32>),
    /// Variable-length character string.
    Varchar(Option<u32>),
    Date,
    Time,
    TimeTz,
    Timestamp,
    TimestampTz,
    /// Semi-structured SUPER value.
    Super,
    /// PostgreSQL JSON / JSONB.
    Json,
    VarByte(Option<u32>),
    Geometry,
    Geography,
    HllSketch,
    Uuid,
}

impl DataType {
    /// Parse a native type, preferring parameters reported alongside the
    /// name over parameters spelled inside it.
    ///
    /// Returns `None` for types this dialect does not know.
    pub fn from_native(native: &NativeType) -> Option<Self> {
        let parsed = Self::parse(&native.name)?;
        Some(match parsed {
            DataType::Char(len) => DataType::Char(native.length.or(len)),
            DataType::Varchar(len) => DataType::Varchar(native.length.or(len)),
            DataType::VarByte(len) => DataType::VarByte(native.length.or(len)),
            DataType::Decimal { precision, scale } => DataType::Decimal {
                precision: native.precision.or(precision),
                scale: native.scale.or(scale),
            },
            other => other,
        })
    }

    /// Parse a type name such as `"character varying(256)"`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        let (base, params) = split_params(&s)?;

        let length = || params.as_deref().and_then(parse_length_param);

        let data_type = match base {
            "bool" | "boolean" => DataType::Bool,

            "smallint" | "int2" => DataType::SmallInt,
            "integer" | "int" | "int4" => DataType::Integer,
            "bigint" | "int8" => DataType::BigInt,

            "real" | "float4" => DataType::Real,
            "double precision" | "float8" | "float" => DataType::DoublePrecision,

            "decimal" | "numeric" => match params.as_deref() {
                Some(inner) => parse_decimal_params(inner)?,
                None => DataType::Decimal {
                    precision: None,
                    scale: None,
                },
            },

            "char" | "character" | "nchar" | "bpchar" => DataType::Char(length()),
            "varchar" | "character varying" | "nvarchar" => DataType::Varchar(length()),
            "text" => DataType::Varchar(None),

            "date" => DataType::Date,
            "time" | "time without time zone" => DataType::Time,
            "timetz" | "time with time zone" => DataType::TimeTz,
            "timestamp" | "timestamp without time zone" => DataType::Timestamp,
            "timestamptz" | "timestamp with time zone" => DataType::TimestampTz,

            "super" => DataType::Super,
            "json" | "jsonb" => DataType::Json,
            "varbyte" | "varbinary" | "binary varying" => DataType::VarByte(length()),
            "geometry" => DataType::Geometry,
            "geography" => DataType::Geography,
            "hllsketch" => DataType::HllSketch,
            "uuid" => DataType::Uuid,

            _ => return None,
        };

        Some(data_type)
    }
}

/// Split `"numeric(18,2)"` into `("numeric", Some("18,2"))`.
///
/// Returns `None` for unbalanced parentheses.
fn split_params(s: &str) -> Option<(&str, Option<String>)> {
    match s.find('(') {
        None => Some((s, None)),
        Some(open) => {
            let close = s.rfind(')')?;
            if close < open {
                return None;
            }
            let base = s[..open].trim_end();
            let inner = s[open + 1..close].trim().to_string();
            // "timestamp(6) with time zone"
            let tail = s[close + 1..].trim();
            if tail.is_empty() {
                Some((base, Some(inner)))
            } else {
                Some((normalize_tail(base, tail)?, Some(inner)))
            }
        }
    }
}

fn normalize_tail<'a>(base: &'a str, tail: &str) -> Option<&'a str> {
    match (base, tail) {
        ("timestamp", "with time zone") => Some("timestamptz"),
        ("timestamp", "without time zone") => Some("timestamp"),
        ("time", "with time zone") => Some("timetz"),
        ("time", "without time zone") => Some("time"),
        _ => None,
    }
}

/// Parse decimal parameters "precision,scale" or "precision".
fn parse_decimal_params(inner: &str) -> Option<DataType> {
    let mut parts = inner.split(',').map(str::trim);
    let precision: u32 = parts.next()?.parse().ok()?;
    let scale: u32 = match parts.next() {
        Some(s) => s.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }

    Some(DataType::Decimal {
        precision: Some(precision),
        scale: Some(scale),
    })
}

/// Parse a single length parameter. `max` means unbounded.
fn parse_length_param(inner: &str) -> Option<u32> {
    let inner = inner.trim();
    if inner.eq_ignore_ascii_case("max") {
        return None;
    }
    inner.parse().ok()
}
