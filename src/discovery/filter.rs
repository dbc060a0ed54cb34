//! Table allow-list.

use crate::config::ConfigError;

/// One `schema.table` allow-list entry, as configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub schema: String,
    pub table: String,
}

impl TableRef {
    /// Parse `schema.table`, splitting on the first `.`.
    pub fn parse(entry: &str) -> Result<Self, ConfigError> {
        match entry.split_once('.') {
            Some((schema, table)) if !schema.is_empty() && !table.is_empty() => Ok(Self {
                schema: schema.to_string(),
                table: table.to_string(),
            }),
            _ => Err(ConfigError::InvalidTableFilter(entry.to_string())),
        }
    }

    fn matches(&self, schema: &str, table: &str) -> bool {
        self.schema.eq_ignore_ascii_case(schema) && self.table.eq_ignore_ascii_case(table)
    }
}

/// Allow-list restricting discovery to named tables.
///
/// Matching is case-insensitive on both the configured and the discovered
/// side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFilter {
    entries: Vec<TableRef>,
}

impl TableFilter {
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> Result<Self, ConfigError> {
        let entries = entries
            .iter()
            .map(|e| TableRef::parse(e.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// Distinct schema names, in order of first occurrence.
    pub fn schema_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !names.iter().any(|n| n.eq_ignore_ascii_case(&entry.schema)) {
                names.push(&entry.schema);
            }
        }
        names
    }

    /// Whether `schema.table` is on the allow-list.
    pub fn allows(&self, schema: &str, table: &str) -> bool {
        self.entries.iter().any(|e| e.matches(schema, table))
    }
}
