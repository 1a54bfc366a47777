use super::Table;
use crate::builder::SqlFragment;
use crate::client::Driver;
use crate::condition::{Format, FormatSpec};
use crate::error::TableResult;
use crate::ident::write_quoted;
use crate::monitor::StatementKind;
use crate::param::Param;
use crate::row::Row;
use serde_json::Value;

impl<D: Driver> Table<D> {
    /// Insert one row and return the id it was assigned.
    ///
    /// `formats` is resolved per column, by name or by position in `data`.
    /// Returns `Ok(None)` without issuing a statement when `data` is empty.
    pub fn insert_one(
        &self,
        data: &Row,
        formats: impl Into<FormatSpec>,
    ) -> TableResult<Option<u64>> {
        self.require_table()?;
        if data.is_empty() {
            self.reject("insert_one", "no data");
            return Ok(None);
        }
        let formats = formats.into();

        let mut stmt = SqlFragment::new(format!("INSERT INTO {} (", self.name));
        for (i, column) in data.keys().enumerate() {
            if i > 0 {
                stmt.sql.push(',');
            }
            write_quoted(&mut stmt.sql, column);
        }
        stmt.push(") VALUES (");
        for (i, (column, value)) in data.iter().enumerate() {
            if i > 0 {
                stmt.sql.push(',');
            }
            stmt.push_bind(Param::coerce(value, formats.resolve(column, i)));
        }
        stmt.push(")");

        let outcome = self.execute(StatementKind::Insert, &stmt.sql, &stmt.params)?;
        Ok(Some(outcome.last_insert_id.unwrap_or(0)))
    }

    /// Insert several rows in one statement and return the affected row count.
    ///
    /// Columns come from the first row; a row missing one of them binds NULL
    /// and its extra keys are ignored. Values are bound as strings. With
    /// `update_on_duplicate` the statement ends in
    /// `ON DUPLICATE KEY UPDATE c=VALUES(c), ...` over the same columns.
    pub fn insert_many(
        &self,
        rows: &[Row],
        update_on_duplicate: bool,
    ) -> TableResult<Option<u64>> {
        self.require_table()?;
        let Some(first) = rows.first().filter(|row| !row.is_empty()) else {
            self.reject("insert_many", "no rows");
            return Ok(None);
        };
        let columns: Vec<&String> = first.keys().collect();

        let mut stmt = SqlFragment::new(format!("INSERT INTO {} (", self.name));
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                stmt.sql.push_str(", ");
            }
            write_quoted(&mut stmt.sql, column);
        }
        stmt.push(") VALUES ");
        for (n, row) in rows.iter().enumerate() {
            if n > 0 {
                stmt.push(", ");
            }
            stmt.push("(");
            stmt.push_bind_list(columns.iter().map(|column| {
                Param::coerce(row.get(*column).unwrap_or(&Value::Null), Format::String)
            }));
            stmt.push(")");
        }

        if update_on_duplicate {
            stmt.push(" ON DUPLICATE KEY UPDATE ");
            for (i, column) in columns.iter().enumerate() {
                if i > 0 {
                    stmt.sql.push_str(", ");
                }
                write_quoted(&mut stmt.sql, column);
                stmt.sql.push_str("=VALUES(");
                write_quoted(&mut stmt.sql, column);
                stmt.sql.push(')');
            }
        }

        let outcome = self.execute(StatementKind::Insert, &stmt.sql, &stmt.params)?;
        Ok(Some(outcome.affected))
    }
}
