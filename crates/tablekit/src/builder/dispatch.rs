//! Operator → fragment generator table.
//!
//! Every operator maps to a dispatch key (`NOT LIKE` → `not_like`). Keys with a
//! dedicated generator are registered once, on first use; any other key uses
//! the plain binary comparison generator.

use super::fragment::SqlFragment;
use crate::condition::{Format, Joiner, Operator};
use crate::error::{TableError, TableResult};
use crate::ident::write_quoted;
use crate::param::Param;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Everything a generator needs to render one condition.
#[derive(Debug, Clone, Copy)]
pub struct FragmentInput<'a> {
    pub field: &'a str,
    pub value: &'a Value,
    pub operator: Operator,
    pub format: Format,
    pub joiner: Joiner,
}

/// Renders one condition into a fragment.
pub type FragmentFn = fn(&FragmentInput<'_>) -> TableResult<SqlFragment>;

/// Lookup table from dispatch key to generator.
#[derive(Debug)]
pub struct Dispatcher {
    generators: HashMap<&'static str, FragmentFn>,
}

impl Dispatcher {
    /// Build the table of built-in generators.
    pub fn new() -> Self {
        let mut generators: HashMap<&'static str, FragmentFn> = HashMap::new();
        generators.insert("in", list_fragment);
        generators.insert("not_in", list_fragment);
        generators.insert("between", range_fragment);
        generators.insert("not_between", range_fragment);
        generators.insert("like", pattern_fragment);
        generators.insert("not_like", pattern_fragment);
        generators.insert("custom", custom_fragment);
        Self { generators }
    }

    /// The process-wide table.
    pub fn global() -> &'static Dispatcher {
        static DISPATCHER: OnceLock<Dispatcher> = OnceLock::new();
        DISPATCHER.get_or_init(Dispatcher::new)
    }

    /// Generator for `operator`, or the default comparison generator.
    pub fn generator(&self, operator: Operator) -> FragmentFn {
        self.generators
            .get(operator.dispatch_key().as_str())
            .copied()
            .unwrap_or(default_fragment)
    }

    /// Check if `key` has a dedicated generator.
    pub fn has_key(&self, key: &str) -> bool {
        self.generators.contains_key(key)
    }

    /// Render one condition.
    pub fn render(&self, input: &FragmentInput<'_>) -> TableResult<SqlFragment> {
        (self.generator(input.operator))(input)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// `<join> `field` <op> ?`
fn start(input: &FragmentInput<'_>) -> SqlFragment {
    let mut frag = SqlFragment::new(input.joiner.prefix());
    frag.sql.push(' ');
    write_quoted(&mut frag.sql, input.field);
    frag.sql.push(' ');
    frag.sql.push_str(input.operator.as_str());
    frag.sql.push(' ');
    frag
}

/// Values of a sequence condition; a scalar counts as a one-element list.
fn elements(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

pub(crate) fn default_fragment(input: &FragmentInput<'_>) -> TableResult<SqlFragment> {
    let mut frag = start(input);
    frag.push_bind(Param::coerce(input.value, input.format));
    Ok(frag)
}

fn pattern_fragment(input: &FragmentInput<'_>) -> TableResult<SqlFragment> {
    // Wildcards are the caller's business.
    default_fragment(input)
}

fn list_fragment(input: &FragmentInput<'_>) -> TableResult<SqlFragment> {
    let values = elements(input.value);
    if values.is_empty() {
        return Err(TableError::arity(input.operator.as_str(), 1, 0));
    }
    let mut frag = start(input);
    frag.push("(")
        .push_bind_list(values.into_iter().map(|v| Param::coerce(v, input.format)))
        .push(")");
    Ok(frag)
}

fn range_fragment(input: &FragmentInput<'_>) -> TableResult<SqlFragment> {
    let values = elements(input.value);
    if values.len() < 2 {
        return Err(TableError::arity(input.operator.as_str(), 2, values.len()));
    }
    // Low/high order is not checked.
    let mut frag = start(input);
    frag.push_bind(Param::coerce(values[0], input.format))
        .push(" AND ")
        .push_bind(Param::coerce(values[1], input.format));
    Ok(frag)
}

/// Raw SQL escape hatch: each element is appended verbatim after the joiner.
fn custom_fragment(input: &FragmentInput<'_>) -> TableResult<SqlFragment> {
    let mut frag = SqlFragment::default();
    let Value::Array(items) = input.value else {
        return Ok(frag);
    };
    for item in items {
        frag.push(input.joiner.prefix());
        frag.push(" ");
        match item {
            Value::String(s) => frag.push(s),
            other => frag.push(&other.to_string()),
        };
    }
    Ok(frag)
}
