use super::Table;
use crate::builder::SqlFragment;
use crate::client::Driver;
use crate::condition::{ConditionSet, Format, FormatSpec};
use crate::error::TableResult;
use crate::ident::write_quoted;
use crate::monitor::StatementKind;
use crate::param::Param;
use crate::row::Row;
use serde_json::Value;

impl<D: Driver> Table<D> {
    /// `UPDATE table SET `a` = ?, ... WHERE `k` = ? AND ...`
    ///
    /// `formats` applies to the SET values; condition values are bound as
    /// strings and a null condition renders as `IS NULL`. Returns the affected
    /// row count, or `Ok(None)` without issuing a statement when either `data`
    /// or `conditions` is empty.
    pub fn update_rows(
        &self,
        data: &Row,
        conditions: &ConditionSet,
        formats: impl Into<FormatSpec>,
    ) -> TableResult<Option<u64>> {
        self.require_table()?;
        if data.is_empty() {
            self.reject("update_rows", "no data");
            return Ok(None);
        }
        if conditions.is_empty() {
            self.reject("update_rows", "no conditions");
            return Ok(None);
        }
        let formats = formats.into();

        let mut stmt = SqlFragment::new(format!("UPDATE {} SET ", self.name));
        for (i, (column, value)) in data.iter().enumerate() {
            if i > 0 {
                stmt.push(", ");
            }
            write_quoted(&mut stmt.sql, column);
            stmt.push(" = ");
            stmt.push_bind(Param::coerce(value, formats.resolve(column, i)));
        }
        stmt.push(" WHERE ");
        push_equalities(&mut stmt, conditions.iter().map(|(k, v)| (k, v, Format::String)));

        let outcome = self.execute(StatementKind::Update, &stmt.sql, &stmt.params)?;
        Ok(Some(outcome.affected))
    }
}

/// Append `` `k` = ? AND ... ``; null values render as `` `k` IS NULL ``.
pub(super) fn push_equalities<'a>(
    stmt: &mut SqlFragment,
    pairs: impl Iterator<Item = (&'a str, &'a Value, Format)>,
) {
    for (i, (field, value, format)) in pairs.enumerate() {
        if i > 0 {
            stmt.push(" AND ");
        }
        write_quoted(&mut stmt.sql, field);
        if value.is_null() {
            stmt.push(" IS NULL");
        } else {
            stmt.push(" = ");
            stmt.push_bind(Param::coerce(value, format));
        }
    }
}
