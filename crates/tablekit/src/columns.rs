//! Column lists, ordering and limits for SELECT statements.
//!
//! Column names cannot be bound as parameters, so every requested column is
//! checked against the table's known columns. Unknown columns are dropped; a
//! list with nothing left selects `*`.

use serde::Deserialize;
use std::fmt;

/// Columns requested by a SELECT.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Columns {
    names: Vec<String>,
    raw: Vec<String>,
}

impl Columns {
    /// Select every column (`*`).
    pub fn all() -> Self {
        Self::default()
    }

    /// Select a single column.
    pub fn one(name: impl Into<String>) -> Self {
        Self::list([name])
    }

    /// Select a list of columns.
    pub fn list<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names
                .into_iter()
                .map(Into::into)
                .filter(|n: &String| n != "*")
                .collect(),
            raw: Vec::new(),
        }
    }

    /// Append raw select expressions (e.g. `COUNT(*) AS total`).
    ///
    /// # Safety
    /// Raw expressions are appended verbatim and are not checked against the
    /// table's columns.
    pub fn with_raw<I, S>(mut self, exprs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.raw.extend(exprs.into_iter().map(Into::into));
        self
    }

    /// Requested column names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Raw select expressions.
    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    /// Render the validated column list, without raw expressions.
    pub fn render(&self, known: &[String]) -> String {
        check_columns(&self.names, known)
    }

    /// Render the validated column list followed by the raw expressions.
    pub fn render_with_raw(&self, known: &[String]) -> String {
        let mut out = self.render(known);
        for expr in &self.raw {
            out.push(',');
            out.push_str(expr);
        }
        out
    }
}

impl From<&str> for Columns {
    fn from(name: &str) -> Self {
        Columns::one(name)
    }
}

impl From<String> for Columns {
    fn from(name: String) -> Self {
        Columns::one(name)
    }
}

impl From<Vec<&str>> for Columns {
    fn from(names: Vec<&str>) -> Self {
        Columns::list(names)
    }
}

impl From<Vec<String>> for Columns {
    fn from(names: Vec<String>) -> Self {
        Columns::list(names)
    }
}

impl<const N: usize> From<[&str; N]> for Columns {
    fn from(names: [&str; N]) -> Self {
        Columns::list(names)
    }
}

impl From<&[&str]> for Columns {
    fn from(names: &[&str]) -> Self {
        Columns::list(names.iter().copied())
    }
}

/// Drop unknown columns and join the rest with `,`; `*` if none survive.
pub fn check_columns<S: AsRef<str>>(requested: &[S], known: &[String]) -> String {
    let kept: Vec<&str> = requested
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| known.iter().any(|k| k == name))
        .collect();
    if kept.is_empty() {
        "*".to_string()
    } else {
        kept.join(",")
    }
}

/// Returns the column if it is known to the table.
pub fn check_column<'a>(name: &'a str, known: &[String]) -> Option<&'a str> {
    known.iter().any(|k| k == name).then_some(name)
}

/// ORDER BY direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    /// Parse `ASC` / `DESC`. Anything else (including lower case) is `ASC`.
    pub fn parse(token: &str) -> Self {
        match token {
            "DESC" => Order::Desc,
            _ => Order::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Order {
    fn from(token: &str) -> Self {
        Order::parse(token)
    }
}

/// LIMIT clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub offset: Option<u64>,
    pub count: u64,
}

impl Limit {
    /// `LIMIT count`
    pub fn count(count: u64) -> Self {
        Self {
            offset: None,
            count,
        }
    }

    /// `LIMIT offset,count`
    pub fn offset(offset: u64, count: u64) -> Self {
        Self {
            offset: Some(offset),
            count,
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "LIMIT {offset},{}", self.count),
            None => write!(f, "LIMIT {}", self.count),
        }
    }
}

/// Append ` ORDER BY col DIR` when `order_by` names a known column.
pub(crate) fn push_order_by(sql: &mut String, order_by: Option<&str>, order: Order, known: &[String]) {
    if let Some(col) = order_by.and_then(|c| check_column(c, known)) {
        sql.push_str(" ORDER BY ");
        sql.push_str(col);
        sql.push(' ');
        sql.push_str(order.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> Vec<String> {
        vec!["id".into(), "title".into(), "status".into()]
    }

    #[test]
    fn keeps_known_columns_in_order() {
        assert_eq!(Columns::from(["title", "id"]).render(&known()), "title,id");
    }

    #[test]
    fn drops_unknown_columns() {
        assert_eq!(
            Columns::from(["id", "password", "title"]).render(&known()),
            "id,title"
        );
    }

    #[test]
    fn only_unknown_columns_select_all() {
        assert_eq!(Columns::from(["nope", "also_nope"]).render(&known()), "*");
        assert_eq!(Columns::from("id; DROP TABLE posts").render(&known()), "*");
    }

    #[test]
    fn star_and_empty_select_all() {
        assert_eq!(Columns::from("*").render(&known()), "*");
        assert_eq!(Columns::all().render(&known()), "*");
        assert_eq!(Columns::from(Vec::<String>::new()).render(&known()), "*");
    }

    #[test]
    fn raw_expressions_are_appended() {
        let cols = Columns::from(["id"]).with_raw(["COUNT(*) AS n"]);
        assert_eq!(cols.render_with_raw(&known()), "id,COUNT(*) AS n");
        assert_eq!(cols.render(&known()), "id");
    }

    #[test]
    fn single_column_check() {
        assert_eq!(check_column("id", &known()), Some("id"));
        assert_eq!(check_column("ID", &known()), None);
    }

    #[test]
    fn order_parse() {
        assert_eq!(Order::parse("DESC"), Order::Desc);
        assert_eq!(Order::parse("ASC"), Order::Asc);
        assert_eq!(Order::parse("desc"), Order::Asc);
        assert_eq!(Order::parse("RANDOM()"), Order::Asc);
    }

    #[test]
    fn limit_display() {
        assert_eq!(Limit::count(10).to_string(), "LIMIT 10");
        assert_eq!(Limit::offset(20, 10).to_string(), "LIMIT 20,10");
    }

    #[test]
    fn order_by_unknown_column_is_skipped() {
        let mut sql = String::from("SELECT * FROM posts");
        push_order_by(&mut sql, Some("rank"), Order::Desc, &known());
        assert_eq!(sql, "SELECT * FROM posts");
        push_order_by(&mut sql, Some("title"), Order::Desc, &known());
        assert_eq!(sql, "SELECT * FROM posts ORDER BY title DESC");
    }
}
