use super::options::{ColumnCounts, Filter, SelectOptions};
use super::{Table, value_to_u64};
use crate::builder::{Lead, SqlFragment, WhereBuilder, single_condition};
use crate::client::Driver;
use crate::columns::{Columns, check_column, push_order_by};
use crate::condition::{Format, Joiner, Operator};
use crate::error::TableResult;
use crate::monitor::StatementKind;
use crate::row::{FromRow, QueryOutput, Row};
use serde_json::Value;

impl<D: Driver> Table<D> {
    /// `SELECT * FROM table [ORDER BY ..] [LIMIT ..]`
    ///
    /// Reads `order_by`, `order`, `limit` and `shape` from `options`.
    pub fn select_all(&self, options: SelectOptions) -> TableResult<QueryOutput> {
        self.require_table()?;
        let mut sql = format!("SELECT * FROM {}", self.name);
        self.push_ordering(&mut sql, &options);
        if let Some(limit) = options.limit {
            sql.push(' ');
            sql.push_str(&limit.to_string());
        }
        let rows = self.query(StatementKind::Select, &sql, &[])?;
        Ok(options.shape.apply(rows))
    }

    /// `SELECT columns FROM table WHERE 1=1 AND ..`, keeping only the row at
    /// `options.row_offset`.
    ///
    /// Reads `shape` and `row_offset` from `options`. The output holds at most
    /// one row.
    pub fn select_row(
        &self,
        columns: impl Into<Columns>,
        filter: impl Into<Filter>,
        options: SelectOptions,
    ) -> TableResult<QueryOutput> {
        self.require_table()?;
        let columns = columns.into();
        let filter = filter.into();
        let mut stmt = SqlFragment::new(format!(
            "SELECT {} FROM {} ",
            columns.render(&self.columns),
            self.name
        ));
        stmt.append(self.where_clause(&filter)?);
        let rows = self.query(StatementKind::Select, &stmt.sql, &stmt.params)?;
        let row: Vec<Row> = rows.into_iter().nth(options.row_offset).into_iter().collect();
        Ok(options.shape.apply(row))
    }

    /// [`Table::select_row`] mapped into `T`.
    pub fn select_row_as<T: FromRow>(
        &self,
        columns: impl Into<Columns>,
        filter: impl Into<Filter>,
        row_offset: usize,
    ) -> TableResult<Option<T>> {
        let options = SelectOptions::new().row_offset(row_offset);
        match self.select_row(columns, filter, options)? {
            QueryOutput::Objects(rows) => rows.first().map(T::from_row).transpose(),
            _ => Ok(None),
        }
    }

    /// `SELECT columns FROM table WHERE `field` <op> ..` for one field.
    ///
    /// The value is used even if empty. Reads `order_by`, `order` and `shape`
    /// from `options`.
    pub fn select_by(
        &self,
        columns: impl Into<Columns>,
        field: &str,
        value: &Value,
        operator: impl Into<Operator>,
        format: impl Into<Format>,
        options: SelectOptions,
    ) -> TableResult<QueryOutput> {
        self.require_table()?;
        let columns = columns.into();
        let mut stmt = SqlFragment::new(format!(
            "SELECT {} FROM {} WHERE",
            columns.render(&self.columns),
            self.name
        ));
        stmt.append(single_condition(
            field,
            value,
            operator.into(),
            format.into(),
            Joiner::None,
        )?);
        self.push_ordering(&mut stmt.sql, &options);
        let rows = self.query(StatementKind::Select, &stmt.sql, &stmt.params)?;
        Ok(options.shape.apply(rows))
    }

    /// `SELECT columns[,raw] FROM table [join] WHERE 1=1 AND .. [ORDER BY ..] [LIMIT ..]`
    ///
    /// Reads every field of `options` except `row_offset`.
    pub fn select_where(
        &self,
        columns: impl Into<Columns>,
        filter: impl Into<Filter>,
        options: SelectOptions,
    ) -> TableResult<QueryOutput> {
        self.require_table()?;
        let columns = columns.into();
        let filter = filter.into();
        let mut stmt = SqlFragment::new(format!(
            "SELECT {} FROM {} ",
            columns.render_with_raw(&self.columns),
            self.name
        ));
        if let Some(join) = &options.join {
            stmt.push(join).push(" ");
        }
        stmt.append(self.where_clause(&filter)?);
        self.push_ordering(&mut stmt.sql, &options);
        if let Some(limit) = options.limit {
            stmt.push(" ").push(&limit.to_string());
        }
        let rows = self.query(StatementKind::Select, &stmt.sql, &stmt.params)?;
        Ok(options.shape.apply(rows))
    }

    /// [`Table::select_where`] with every row mapped into `T`.
    pub fn select_where_as<T: FromRow>(
        &self,
        columns: impl Into<Columns>,
        filter: impl Into<Filter>,
        options: SelectOptions,
    ) -> TableResult<Vec<T>> {
        let options = SelectOptions {
            shape: Default::default(),
            ..options
        };
        match self.select_where(columns, filter, options)? {
            QueryOutput::Objects(rows) => rows.iter().map(T::from_row).collect(),
            _ => Ok(Vec::new()),
        }
    }

    /// First column of the first matching row.
    pub fn select_scalar(
        &self,
        column: &str,
        filter: impl Into<Filter>,
    ) -> TableResult<Option<Value>> {
        self.require_table()?;
        let filter = filter.into();
        let mut stmt = SqlFragment::new(format!(
            "SELECT {} FROM {} ",
            Columns::one(column).render(&self.columns),
            self.name
        ));
        stmt.append(self.where_clause(&filter)?);
        let rows = self.query(StatementKind::Select, &stmt.sql, &stmt.params)?;
        Ok(rows
            .into_iter()
            .next()
            .and_then(|row| row.into_iter().next())
            .map(|(_, v)| v))
    }

    /// `SELECT COUNT(*) FROM table`
    pub fn count(&self) -> TableResult<u64> {
        self.require_table()?;
        let sql = format!("SELECT COUNT(*) FROM {}", self.name);
        let rows = self.query(StatementKind::Select, &sql, &[])?;
        Ok(rows
            .first()
            .and_then(|row| row.values().next())
            .map(value_to_u64)
            .unwrap_or(0))
    }

    /// Row counts grouped by the values of `column`.
    ///
    /// An unknown column yields empty counts without querying.
    pub fn count_by_column(&self, column: &str) -> TableResult<ColumnCounts> {
        self.require_table()?;
        let Some(column) = check_column(column, &self.columns) else {
            return Ok(ColumnCounts::default());
        };
        let sql = format!(
            "SELECT {column}, COUNT(*) AS count FROM {} GROUP BY {column}",
            self.name
        );
        let rows = self.query(StatementKind::Select, &sql, &[])?;
        let mut counts = ColumnCounts::default();
        for row in rows {
            let n = row.get("count").map(value_to_u64).unwrap_or(0);
            let key = match row.get(column) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            counts.all += n;
            *counts.counts.entry(key).or_insert(0) += n;
        }
        Ok(counts)
    }

    fn where_clause(&self, filter: &Filter) -> TableResult<SqlFragment> {
        WhereBuilder::new(&filter.operators, &filter.formats)
            .build_clause(Lead::Baseline, &filter.conditions)
    }

    fn push_ordering(&self, sql: &mut String, options: &SelectOptions) {
        let order = options.order.unwrap_or(self.config.default_order);
        push_order_by(sql, options.order_by.as_deref(), order, &self.columns);
    }
}
