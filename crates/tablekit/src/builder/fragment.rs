use crate::param::Param;

/// A piece of SQL plus the parameters its `?` placeholders consume, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlFragment {
    pub sql: String,
    pub params: Vec<Param>,
}

impl SqlFragment {
    /// Create a fragment with initial SQL and no parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Append raw SQL (no parameters).
    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Append a `?` placeholder and bind its value.
    pub fn push_bind(&mut self, param: Param) -> &mut Self {
        self.sql.push('?');
        self.params.push(param);
        self
    }

    /// Append `?, ?, ...` (one per value) and bind all values.
    pub fn push_bind_list(&mut self, params: impl IntoIterator<Item = Param>) -> &mut Self {
        for (i, param) in params.into_iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            self.push_bind(param);
        }
        self
    }

    /// Append another fragment, keeping its parameter order.
    pub fn append(&mut self, mut other: SqlFragment) -> &mut Self {
        self.sql.push_str(&other.sql);
        self.params.append(&mut other.params);
        self
    }

    /// Check if the fragment has no SQL.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Number of bound parameters.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_list_matches_placeholders() {
        let mut frag = SqlFragment::new("id IN (");
        frag.push_bind_list([Param::Int(1), Param::Int(2), Param::Int(3)])
            .push(")");
        assert_eq!(frag.sql, "id IN (?, ?, ?)");
        assert_eq!(frag.param_count(), 3);
    }

    #[test]
    fn append_keeps_param_order() {
        let mut a = SqlFragment::new("a = ");
        a.push_bind(Param::Int(1));
        let mut b = SqlFragment::new(" AND b = ");
        b.push_bind(Param::Int(2));
        a.append(b);
        assert_eq!(a.sql, "a = ? AND b = ?");
        assert_eq!(a.params, vec![Param::Int(1), Param::Int(2)]);
    }
}
