//! Stream identifiers.
//!
//! A stream id joins schema and table with `-`. Redshift allows `-` inside
//! quoted identifiers, so `%` and `-` in either component are
//! percent-escaped; the id is therefore unique per (schema, table) pair and
//! reversible with [`split_stream_id`].

/// Delimiter between schema and table.
pub const STREAM_ID_DELIMITER: char = '-';

/// Build the stream id for a schema and table.
pub fn stream_id(schema: &str, table: &str) -> String {
    format!("{}{}{}", escape(schema), STREAM_ID_DELIMITER, escape(table))
}

/// Recover `(schema, table)` from a stream id produced by [`stream_id`].
pub fn split_stream_id(id: &str) -> Option<(String, String)> {
    let (schema, table) = id.split_once(STREAM_ID_DELIMITER)?;
    if table.contains(STREAM_ID_DELIMITER) {
        return None;
    }
    Some((unescape(schema)?, unescape(table)?))
}

fn escape(component: &str) -> String {
    let mut out = String::with_capacity(component.len());
    for c in component.chars() {
        match c {
            '%' => out.push_str("%25"),
            '-' => out.push_str("%2D"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(component: &str) -> Option<String> {
    let mut out = String::with_capacity(component.len());
    let mut rest = component;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let code = rest.get(pos + 1..pos + 3)?;
        match code {
            "25" => out.push('%'),
            "2D" => out.push('-'),
            _ => return None,
        }
        rest = &rest[pos + 3..];
    }
    out.push_str(rest);
    Some(out)
}
