use super::Table;
use super::update::push_equalities;
use crate::builder::SqlFragment;
use crate::client::Driver;
use crate::columns::check_column;
use crate::condition::{ConditionSet, Format, FormatSpec};
use crate::error::TableResult;
use crate::monitor::StatementKind;
use crate::param::Param;
use serde_json::Value;

impl<D: Driver> Table<D> {
    /// `DELETE FROM table WHERE `k` = ? AND ...`
    ///
    /// `formats` is resolved per condition, by name or position. Returns the
    /// affected row count, or `Ok(None)` without issuing a statement when
    /// `conditions` is empty.
    pub fn delete_rows(
        &self,
        conditions: &ConditionSet,
        formats: impl Into<FormatSpec>,
    ) -> TableResult<Option<u64>> {
        self.require_table()?;
        if conditions.is_empty() {
            self.reject("delete_rows", "no conditions");
            return Ok(None);
        }
        let formats = formats.into();

        let mut stmt = SqlFragment::new(format!("DELETE FROM {} WHERE ", self.name));
        push_equalities(
            &mut stmt,
            conditions
                .iter()
                .enumerate()
                .map(|(i, (k, v))| (k, v, formats.resolve(k, i))),
        );

        let outcome = self.execute(StatementKind::Delete, &stmt.sql, &stmt.params)?;
        Ok(Some(outcome.affected))
    }

    /// `DELETE FROM table WHERE field IN (?, ...)`, one placeholder per value.
    ///
    /// `field` must be one of the table's columns. An unknown field or an
    /// empty value list returns `Ok(None)` without issuing a statement.
    pub fn delete_by_field_list(
        &self,
        field: &str,
        values: &[Value],
        format: impl Into<Format>,
    ) -> TableResult<Option<u64>> {
        self.require_table()?;
        let Some(field) = check_column(field, &self.columns) else {
            self.reject("delete_by_field_list", "unknown field");
            return Ok(None);
        };
        if values.is_empty() {
            self.reject("delete_by_field_list", "no values");
            return Ok(None);
        }
        let format = format.into();

        let mut stmt = SqlFragment::new(format!("DELETE FROM {} WHERE {field} IN (", self.name));
        stmt.push_bind_list(values.iter().map(|v| Param::coerce(v, format)));
        stmt.push(")");

        let outcome = self.execute(StatementKind::Delete, &stmt.sql, &stmt.params)?;
        Ok(Some(outcome.affected))
    }
}
