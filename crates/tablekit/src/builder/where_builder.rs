//! Dynamic WHERE clause assembly.

use super::dispatch::{Dispatcher, FragmentInput};
use super::fragment::SqlFragment;
use crate::condition::{
    ConditionSet, Format, FormatSpec, Joiner, Operator, OperatorSpec, is_empty_value,
};
use crate::error::TableResult;
use serde_json::Value;

/// How a WHERE clause starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lead {
    /// `WHERE 1=1`, followed by joined conditions.
    #[default]
    Baseline,
    /// `WHERE`, followed directly by the first condition.
    Bare,
}

impl Lead {
    fn as_str(self) -> &'static str {
        match self {
            Lead::Baseline => "WHERE 1=1",
            Lead::Bare => "WHERE",
        }
    }
}

/// Builds WHERE clauses from a [`ConditionSet`].
///
/// Conditions are rendered in order. A condition whose value is empty
/// (see [`is_empty_value`]) emits nothing but still takes up its position, so
/// positional operator/format overrides stay aligned with the caller's list.
pub struct WhereBuilder<'a> {
    operators: &'a OperatorSpec,
    formats: &'a FormatSpec,
    joiner: Joiner,
    dispatcher: &'static Dispatcher,
}

impl<'a> WhereBuilder<'a> {
    /// Create a builder joining every condition with `AND`.
    pub fn new(operators: &'a OperatorSpec, formats: &'a FormatSpec) -> Self {
        Self {
            operators,
            formats,
            joiner: Joiner::And,
            dispatcher: Dispatcher::global(),
        }
    }

    /// Set the boolean prefix used for every condition.
    pub fn joiner(mut self, joiner: Joiner) -> Self {
        self.joiner = joiner;
        self
    }

    /// Render all non-empty conditions, without a leading `WHERE`.
    pub fn build(&self, conditions: &ConditionSet) -> TableResult<SqlFragment> {
        let mut out = SqlFragment::default();
        for (position, (field, value)) in conditions.iter().enumerate() {
            if is_empty_value(value) {
                continue;
            }
            let input = FragmentInput {
                field,
                value,
                operator: self.operators.resolve(field, position),
                format: self.formats.resolve(field, position),
                joiner: self.joiner,
            };
            out.append(self.dispatcher.render(&input)?);
        }
        Ok(out)
    }

    /// Render a full clause: `lead` followed by the conditions.
    pub fn build_clause(&self, lead: Lead, conditions: &ConditionSet) -> TableResult<SqlFragment> {
        let mut clause = SqlFragment::new(lead.as_str());
        clause.append(self.build(conditions)?);
        Ok(clause)
    }
}

/// Render a single condition as-is; empty values are not skipped.
pub fn single_condition(
    field: &str,
    value: &Value,
    operator: Operator,
    format: Format,
    joiner: Joiner,
) -> TableResult<SqlFragment> {
    Dispatcher::global().render(&FragmentInput {
        field,
        value,
        operator,
        format,
        joiner,
    })
}
