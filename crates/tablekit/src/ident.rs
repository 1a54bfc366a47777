//! SQL identifier handling.
//!
//! Identifiers cannot be bound as parameters, so they reach SQL as text:
//!
//! - Table names are validated once, when a [`Table`](crate::Table) handle is
//!   created: `[A-Za-z_][A-Za-z0-9_$]*`, optionally `schema.table`.
//! - Condition and data field names are wrapped in backticks, with embedded
//!   backticks doubled.
//! - Selected column names are checked against the table's known columns (see
//!   [`check_columns`](crate::condition::check_columns)).

use crate::error::{TableError, TableResult};
use regex::Regex;
use std::sync::OnceLock;

fn table_name_re() -> &'static Regex {
    static TABLE_RE: OnceLock<Regex> = OnceLock::new();
    TABLE_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_$]*(\.[A-Za-z_][A-Za-z0-9_$]*)?$")
            .expect("invalid built-in table name regex")
    })
}

/// Validate a table name before it is interpolated into SQL.
pub fn validate_table_name(name: &str) -> TableResult<()> {
    if name.is_empty() {
        return Err(TableError::validation("Table name cannot be empty"));
    }
    if !table_name_re().is_match(name) {
        return Err(TableError::validation(format!(
            "Invalid table name '{name}'"
        )));
    }
    Ok(())
}

/// Wrap a field name in backticks.
pub fn quote_field(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    write_quoted(&mut out, name);
    out
}

pub(crate) fn write_quoted(out: &mut String, name: &str) {
    out.push('`');
    for ch in name.chars() {
        if ch == '`' {
            out.push_str("``");
        } else {
            out.push(ch);
        }
    }
    out.push('`');
}
