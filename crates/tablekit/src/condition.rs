//! Condition resolution for dynamic WHERE clauses.
//!
//! A WHERE clause is described by a [`ConditionSet`] (ordered field → value
//! pairs) plus an operator spec and a format spec. Each spec is a [`Choice`]:
//! one value for every condition, or a per-field / per-position override.
//!
//! ```ignore
//! use tablekit::{Choice, ConditionSet, Format, Operator};
//! use serde_json::json;
//!
//! let conditions = ConditionSet::new()
//!     .with("status", json!("draft"))
//!     .with("id", json!([1, 2, 3]));
//!
//! let operators = Choice::by_field([("id", Operator::In)]);
//! let formats = Choice::by_position([Format::String, Format::Integer]);
//! ```
//!
//! Unknown operator and format tokens never fail: they fall back to `=` and
//! the string placeholder.

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Comparison operator applied to one condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    /// `=`
    #[default]
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Gte,
    /// `<=`
    Lte,
    /// `<=>` (NULL-safe equality)
    NullSafeEq,
    /// `LIKE`
    Like,
    /// `NOT LIKE`
    NotLike,
    /// `IN (...)`
    In,
    /// `NOT IN (...)`
    NotIn,
    /// `BETWEEN a AND b`
    Between,
    /// `NOT BETWEEN a AND b`
    NotBetween,
    /// Raw SQL fragments, appended verbatim.
    ///
    /// # Safety
    /// Values are not escaped. Never feed untrusted input to this operator.
    Custom,
}

impl Operator {
    /// All recognised operators.
    pub const ALL: [Operator; 14] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Gt,
        Operator::Lt,
        Operator::Gte,
        Operator::Lte,
        Operator::NullSafeEq,
        Operator::Like,
        Operator::NotLike,
        Operator::In,
        Operator::NotIn,
        Operator::Between,
        Operator::NotBetween,
        Operator::Custom,
    ];

    /// Parse an operator token, case-insensitively.
    ///
    /// Tokens outside the allow-list resolve to [`Operator::Eq`].
    pub fn parse(token: &str) -> Self {
        Self::try_parse(token).unwrap_or_else(|| {
            tracing::debug!(target: "tablekit.resolve", token, "unknown operator, using `=`");
            Operator::Eq
        })
    }

    /// Parse an operator token, returning `None` if it is not recognised.
    pub fn try_parse(token: &str) -> Option<Self> {
        let upper = token.trim().to_uppercase();
        Self::ALL.into_iter().find(|op| op.as_str() == upper)
    }

    /// The SQL spelling of this operator (upper case).
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Gte => ">=",
            Operator::Lte => "<=",
            Operator::NullSafeEq => "<=>",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT LIKE",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::Between => "BETWEEN",
            Operator::NotBetween => "NOT BETWEEN",
            Operator::Custom => "CUSTOM",
        }
    }

    /// Key used to look up the fragment generator: lower case, spaces as
    /// underscores (`NOT LIKE` → `not_like`).
    pub fn dispatch_key(self) -> String {
        self.as_str().to_lowercase().replace(' ', "_")
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Operator {
    fn from(token: &str) -> Self {
        Operator::parse(token)
    }
}

/// How a bound value is typed before it reaches the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// `%s`
    #[default]
    String,
    /// `%d`
    Integer,
    /// `%f`
    Float,
}

impl Format {
    /// Parse a format token (`%s`, `%d`, `%f`).
    ///
    /// Anything else resolves to [`Format::String`].
    pub fn parse(token: &str) -> Self {
        match token {
            "%s" => Format::String,
            "%d" => Format::Integer,
            "%f" => Format::Float,
            _ => {
                tracing::debug!(target: "tablekit.resolve", token, "unknown format, using `%s`");
                Format::String
            }
        }
    }

    /// The format token.
    pub fn as_str(self) -> &'static str {
        match self {
            Format::String => "%s",
            Format::Integer => "%d",
            Format::Float => "%f",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Format {
    fn from(token: &str) -> Self {
        Format::parse(token)
    }
}

/// A setting that applies to every condition, or is chosen per condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Choice<T> {
    /// One value for every condition.
    Scalar(T),
    /// Looked up by field name.
    ByField(HashMap<String, T>),
    /// Looked up by the condition's position in the [`ConditionSet`].
    ByPosition(BTreeMap<usize, T>),
    /// Looked up by field name first, then by position.
    Mixed {
        by_field: HashMap<String, T>,
        by_position: BTreeMap<usize, T>,
    },
}

/// Operator choice for a set of conditions.
pub type OperatorSpec = Choice<Operator>;

/// Format choice for a set of conditions.
pub type FormatSpec = Choice<Format>;

impl<T> Choice<T> {
    /// Per-field overrides keyed by field name.
    pub fn by_field<K, V, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<T>,
    {
        Choice::ByField(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Positional overrides: the n-th item applies to the n-th condition.
    pub fn by_position<V, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<T>,
    {
        Choice::ByPosition(
            entries
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i, v.into()))
                .collect(),
        )
    }

    /// Positional overrides at explicit positions.
    pub fn at_positions<V, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, V)>,
        V: Into<T>,
    {
        Choice::ByPosition(entries.into_iter().map(|(i, v)| (i, v.into())).collect())
    }

    /// Field-name overrides with a positional fallback.
    pub fn mixed<K, V, P, I, J>(by_field: I, by_position: J) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        J: IntoIterator<Item = (usize, P)>,
        K: Into<String>,
        V: Into<T>,
        P: Into<T>,
    {
        Choice::Mixed {
            by_field: by_field
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            by_position: by_position
                .into_iter()
                .map(|(i, v)| (i, v.into()))
                .collect(),
        }
    }

    /// Returns `true` for [`Choice::Scalar`].
    pub fn is_scalar(&self) -> bool {
        matches!(self, Choice::Scalar(_))
    }
}

impl<T: Copy + Default> Choice<T> {
    /// Effective value for the condition on `field` at `position`.
    pub fn resolve(&self, field: &str, position: usize) -> T {
        match self {
            Choice::Scalar(v) => *v,
            Choice::ByField(map) => map.get(field).copied().unwrap_or_default(),
            Choice::ByPosition(map) => map.get(&position).copied().unwrap_or_default(),
            Choice::Mixed {
                by_field,
                by_position,
            } => by_field
                .get(field)
                .or_else(|| by_position.get(&position))
                .copied()
                .unwrap_or_default(),
        }
    }
}

impl<T: Default> Default for Choice<T> {
    fn default() -> Self {
        Choice::Scalar(T::default())
    }
}

impl From<Operator> for OperatorSpec {
    fn from(op: Operator) -> Self {
        Choice::Scalar(op)
    }
}

impl From<&str> for OperatorSpec {
    fn from(token: &str) -> Self {
        Choice::Scalar(Operator::parse(token))
    }
}

impl From<Format> for FormatSpec {
    fn from(format: Format) -> Self {
        Choice::Scalar(format)
    }
}

impl From<&str> for FormatSpec {
    fn from(token: &str) -> Self {
        Choice::Scalar(Format::parse(token))
    }
}

/// Effective operator and format for the condition on `field` at `position`.
pub fn resolve(
    field: &str,
    position: usize,
    operators: &OperatorSpec,
    formats: &FormatSpec,
) -> (Operator, Format) {
    (
        operators.resolve(field, position),
        formats.resolve(field, position),
    )
}

/// Ordered field → value pairs describing a WHERE clause.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionSet {
    entries: Vec<(String, Value)>,
}

impl ConditionSet {
    /// Create an empty condition set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a condition (builder form).
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(field, value);
        self
    }

    /// Append a condition.
    pub fn push(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.entries.push((field.into(), value.into()));
        self
    }

    /// Number of conditions, including ones with empty values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no conditions were given.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(field, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(f, v)| (f.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ConditionSet {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl From<serde_json::Map<String, Value>> for ConditionSet {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

/// Returns `true` if `value` means "no filter requested".
///
/// `null`, `false`, `0`, `0.0`, `""`, `"0"`, `[]` and `{}` are empty.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Boolean prefix placed before each fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Joiner {
    /// ` AND`
    #[default]
    And,
    /// ` OR`
    Or,
    /// No prefix.
    None,
}

impl Joiner {
    /// The prefix text, including its leading space.
    pub fn prefix(self) -> &'static str {
        match self {
            Joiner::And => " AND",
            Joiner::Or => " OR",
            Joiner::None => "",
        }
    }
}

impl From<bool> for Joiner {
    fn from(and: bool) -> Self {
        if and { Joiner::And } else { Joiner::None }
    }
}

impl From<&str> for Joiner {
    fn from(mode: &str) -> Self {
        if mode.eq_ignore_ascii_case("OR") {
            Joiner::Or
        } else {
            Joiner::None
        }
    }
}
