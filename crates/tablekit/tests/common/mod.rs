#![allow(dead_code)]

use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use tablekit::{Driver, ExecOutcome, Param, Row, TableResult};

/// One statement handed to the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub sql: String,
    pub params: Vec<Param>,
}

/// Driver that records every statement and serves canned results.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    tables: HashMap<String, Vec<String>>,
    rows: RefCell<Vec<Row>>,
    outcome: RefCell<ExecOutcome>,
    log: RefCell<Vec<Recorded>>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Driver knowing a `posts` table with `id, title, status, author`.
    pub fn posts() -> Self {
        Self::new().with_table("posts", &["id", "title", "status", "author"])
    }

    pub fn with_table(mut self, name: &str, columns: &[&str]) -> Self {
        self.tables.insert(
            name.to_string(),
            columns.iter().map(|c| c.to_string()).collect(),
        );
        self
    }

    /// Rows returned by every following query.
    pub fn returns(&self, rows: Vec<Value>) {
        *self.rows.borrow_mut() = rows.into_iter().map(row).collect();
    }

    /// Outcome returned by every following execute.
    pub fn outcome(&self, outcome: ExecOutcome) {
        *self.outcome.borrow_mut() = outcome;
    }

    /// Statements recorded so far.
    pub fn statements(&self) -> Vec<Recorded> {
        self.log.borrow().clone()
    }

    pub fn last(&self) -> Option<Recorded> {
        self.log.borrow().last().cloned()
    }

    fn record(&self, sql: &str, params: &[Param]) {
        self.log.borrow_mut().push(Recorded {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
    }
}

impl Driver for RecordingDriver {
    fn describe(&self, table: &str) -> TableResult<Vec<String>> {
        Ok(self.tables.get(table).cloned().unwrap_or_default())
    }

    fn execute(&self, sql: &str, params: &[Param]) -> TableResult<ExecOutcome> {
        self.record(sql, params);
        Ok(*self.outcome.borrow())
    }

    fn query(&self, sql: &str, params: &[Param]) -> TableResult<Vec<Row>> {
        self.record(sql, params);
        Ok(self.rows.borrow().clone())
    }
}

/// Build a [`Row`] from a JSON object.
pub fn row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub fn text(s: &str) -> Param {
    Param::Text(s.to_string())
}
