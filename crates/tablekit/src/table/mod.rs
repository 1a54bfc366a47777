//! Single-table handle.
//!
//! A [`Table`] is created once per logical table. Construction validates the
//! table name and fetches its column list through [`Driver::describe`]; the
//! column list is then fixed for the handle's lifetime and is used to vet every
//! column name a caller asks to select or order by.
//!
//! ```ignore
//! use tablekit::{ConditionSet, Filter, SelectOptions, Table};
//! use serde_json::json;
//!
//! let posts = Table::new(&driver, "posts")?;
//!
//! let drafts = posts.select_where(
//!     ["id", "title"],
//!     Filter::new(ConditionSet::new().with("status", json!("draft"))),
//!     SelectOptions::new().order_by("id").limit(Limit::count(20)),
//! )?;
//!
//! posts.delete_by_field_list("id", &[json!(4), json!(5)], "%d")?;
//! ```

mod delete;
mod insert;
mod options;
mod select;
mod update;

pub use options::{ColumnCounts, Filter, SelectOptions};

use crate::client::{Driver, ExecOutcome};
use crate::config::TableConfig;
use crate::error::{TableError, TableResult};
use crate::ident::validate_table_name;
use crate::monitor::{SqlLogger, StatementKind};
use crate::param::Param;
use crate::row::Row;
use serde_json::Value;

/// Handle for one database table.
#[derive(Debug)]
pub struct Table<D: Driver> {
    driver: D,
    name: String,
    columns: Vec<String>,
    config: TableConfig,
    logger: SqlLogger,
}

impl<D: Driver> Table<D> {
    /// Open a handle with the default configuration.
    pub fn new(driver: D, name: impl Into<String>) -> TableResult<Self> {
        Self::with_config(driver, name, TableConfig::default())
    }

    /// Open a handle with an explicit configuration.
    pub fn with_config(driver: D, name: impl Into<String>, config: TableConfig) -> TableResult<Self> {
        let name = name.into();
        validate_table_name(&name)?;
        let logger = SqlLogger::new(config.sql_log.clone());
        logger.log(StatementKind::Other, &name, &format!("DESCRIBE {name}"), 0);
        let columns = driver.describe(&name)?;
        Ok(Self {
            driver,
            name,
            columns,
            config,
            logger,
        })
    }

    /// Drop this handle and open a fresh one, re-reading the column list.
    pub fn reopen(self) -> TableResult<Self> {
        Self::with_config(self.driver, self.name, self.config)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column names known when the handle was created.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Check whether the table exists right now.
    pub fn table_exists(&self) -> TableResult<bool> {
        let sql = "SHOW TABLES LIKE ?";
        let params = [Param::Text(self.name.clone())];
        self.logger.log(StatementKind::Other, &self.name, sql, params.len());
        let row = self.driver.query_opt(sql, &params)?;
        Ok(row
            .and_then(|r| r.into_iter().next())
            .is_some_and(|(_, v)| v.as_str() == Some(self.name.as_str())))
    }

    /// Create the table from column/key definitions unless it already exists.
    ///
    /// Returns `true` if a `CREATE TABLE` statement was issued. The handle's
    /// column list is not refreshed; use [`Table::reopen`] afterwards.
    pub fn create_table_if_missing<S: AsRef<str>>(&self, definitions: &[S]) -> TableResult<bool> {
        if definitions.is_empty() || self.table_exists()? {
            return Ok(false);
        }
        let body: Vec<&str> = definitions.iter().map(AsRef::as_ref).collect();
        let mut sql = format!("CREATE TABLE {} ({})", self.name, body.join(","));
        if let Some(charset) = &self.config.charset_collate {
            sql.push(' ');
            sql.push_str(charset);
        }
        sql.push(';');
        self.execute(StatementKind::Other, &sql, &[])?;
        Ok(true)
    }

    /// Operations on table data need a table that existed at construction.
    fn require_table(&self) -> TableResult<()> {
        if self.columns.is_empty() {
            return Err(TableError::TableMissing(self.name.clone()));
        }
        Ok(())
    }

    fn query(&self, kind: StatementKind, sql: &str, params: &[Param]) -> TableResult<Vec<Row>> {
        self.logger.log(kind, &self.name, sql, params.len());
        self.driver.query(sql, params)
    }

    fn execute(&self, kind: StatementKind, sql: &str, params: &[Param]) -> TableResult<ExecOutcome> {
        self.logger.log(kind, &self.name, sql, params.len());
        self.driver.execute(sql, params)
    }

    fn reject(&self, operation: &str, reason: &str) {
        tracing::warn!(target: "tablekit", table = %self.name, operation, reason, "statement not issued");
    }
}

/// Read a count/number column value as `u64`.
fn value_to_u64(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn count_values() {
        assert_eq!(value_to_u64(&json!(5)), 5);
        assert_eq!(value_to_u64(&json!("12")), 12);
        assert_eq!(value_to_u64(&json!(null)), 0);
        assert_eq!(value_to_u64(&json!(-3)), 0);
    }
}
