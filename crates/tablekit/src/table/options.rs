use crate::columns::{Limit, Order};
use crate::condition::{ConditionSet, FormatSpec, OperatorSpec};
use crate::row::ResultShape;
use std::collections::BTreeMap;

/// Conditions plus the operator and format choices that apply to them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub conditions: ConditionSet,
    pub operators: OperatorSpec,
    pub formats: FormatSpec,
}

impl Filter {
    /// Filter with `=` and the string format for every condition.
    pub fn new(conditions: ConditionSet) -> Self {
        Self {
            conditions,
            ..Self::default()
        }
    }

    pub fn operators(mut self, operators: impl Into<OperatorSpec>) -> Self {
        self.operators = operators.into();
        self
    }

    pub fn formats(mut self, formats: impl Into<FormatSpec>) -> Self {
        self.formats = formats.into();
        self
    }
}

impl From<ConditionSet> for Filter {
    fn from(conditions: ConditionSet) -> Self {
        Filter::new(conditions)
    }
}

/// Optional parts of a SELECT.
///
/// Each `select_*` method documents which of these it reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectOptions {
    pub order_by: Option<String>,
    pub order: Option<Order>,
    pub limit: Option<Limit>,
    pub shape: ResultShape,
    /// Opaque JOIN text placed between the table name and `WHERE`.
    pub join: Option<String>,
    pub row_offset: usize,
}

impl SelectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_by(mut self, column: impl Into<String>) -> Self {
        self.order_by = Some(column.into());
        self
    }

    pub fn order(mut self, order: impl Into<Order>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn limit(mut self, limit: Limit) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn shape(mut self, shape: ResultShape) -> Self {
        self.shape = shape;
        self
    }

    /// # Safety
    /// The join text is inserted verbatim.
    pub fn join(mut self, join: impl Into<String>) -> Self {
        self.join = Some(join.into());
        self
    }

    pub fn row_offset(mut self, offset: usize) -> Self {
        self.row_offset = offset;
        self
    }
}

/// Row counts per distinct value of one column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnCounts {
    pub counts: BTreeMap<String, u64>,
    /// Sum of all counts.
    pub all: u64,
}

impl ColumnCounts {
    pub fn get(&self, value: &str) -> u64 {
        self.counts.get(value).copied().unwrap_or(0)
    }
}
