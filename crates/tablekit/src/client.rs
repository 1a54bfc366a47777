//! Driver trait for the database connection underneath a table handle.

use crate::error::TableResult;
use crate::param::Param;
use crate::row::Row;

/// Outcome of a mutating statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecOutcome {
    /// Number of rows the statement affected.
    pub affected: u64,
    /// Auto-increment id generated by an INSERT, if any.
    pub last_insert_id: Option<u64>,
}

impl ExecOutcome {
    pub fn affected(affected: u64) -> Self {
        Self {
            affected,
            last_insert_id: None,
        }
    }

    pub fn inserted(affected: u64, last_insert_id: u64) -> Self {
        Self {
            affected,
            last_insert_id: Some(last_insert_id),
        }
    }
}

/// A synchronous SQL driver.
///
/// Implementations execute the final SQL strings produced by a
/// [`Table`](crate::Table) and bind `params` to its `?` placeholders in order.
/// Connection management, timeouts and retries belong to the implementation.
pub trait Driver {
    /// Column names of `table`, in table order.
    ///
    /// Returns an empty list if the table does not exist.
    fn describe(&self, table: &str) -> TableResult<Vec<String>>;

    /// Execute a statement and report the affected rows / inserted id.
    fn execute(&self, sql: &str, params: &[Param]) -> TableResult<ExecOutcome>;

    /// Execute a query and return all rows.
    fn query(&self, sql: &str, params: &[Param]) -> TableResult<Vec<Row>>;

    /// Execute a query and return the first row, if any.
    fn query_opt(&self, sql: &str, params: &[Param]) -> TableResult<Option<Row>> {
        Ok(self.query(sql, params)?.into_iter().next())
    }
}

impl<D: Driver + ?Sized> Driver for &D {
    fn describe(&self, table: &str) -> TableResult<Vec<String>> {
        (**self).describe(table)
    }

    fn execute(&self, sql: &str, params: &[Param]) -> TableResult<ExecOutcome> {
        (**self).execute(sql, params)
    }

    fn query(&self, sql: &str, params: &[Param]) -> TableResult<Vec<Row>> {
        (**self).query(sql, params)
    }

    fn query_opt(&self, sql: &str, params: &[Param]) -> TableResult<Option<Row>> {
        (**self).query_opt(sql, params)
    }
}

impl<D: Driver + ?Sized> Driver for std::rc::Rc<D> {
    fn describe(&self, table: &str) -> TableResult<Vec<String>> {
        (**self).describe(table)
    }

    fn execute(&self, sql: &str, params: &[Param]) -> TableResult<ExecOutcome> {
        (**self).execute(sql, params)
    }

    fn query(&self, sql: &str, params: &[Param]) -> TableResult<Vec<Row>> {
        (**self).query(sql, params)
    }

    fn query_opt(&self, sql: &str, params: &[Param]) -> TableResult<Option<Row>> {
        (**self).query_opt(sql, params)
    }
}
