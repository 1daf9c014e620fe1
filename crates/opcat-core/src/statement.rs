//! Parameterized SQL statements and their inline rendering.

use std::fmt;

/// A value bound to a statement placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    /// SQL NULL (bound as a nullable text).
    Null,
    Text(String),
    Int(i32),
    Bool(bool),
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        value.map(SqlValue::Text).unwrap_or(SqlValue::Null)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

/// One SQL statement with PostgreSQL `$n` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: &'static str,
    pub params: Vec<SqlValue>,
}

impl Statement {
    pub fn new(sql: &'static str, params: Vec<SqlValue>) -> Self {
        Self { sql, params }
    }

    /// Substitute placeholders with literals.
    ///
    /// Text values are written between single quotes verbatim: callers must
    /// have escaped them first (see [`crate::sanitize`]).
    pub(crate) fn render_inline(&self) -> String {
        let mut out = String::with_capacity(self.sql.len() + 16 * self.params.len());
        let mut chars = self.sql.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' || !chars.peek().is_some_and(|next| next.is_ascii_digit()) {
                out.push(c);
                continue;
            }

            let mut index = 0usize;
            while let Some(digit) = chars.peek().and_then(|next| next.to_digit(10)) {
                index = index * 10 + digit as usize;
                chars.next();
            }

            match index.checked_sub(1).and_then(|i| self.params.get(i)) {
                Some(value) => out.push_str(&value.to_string()),
                None => {
                    out.push('$');
                    out.push_str(&index.to_string());
                }
            }
        }

        out
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => f.write_str("NULL"),
            SqlValue::Text(text) => write!(f, "'{}'", text),
            SqlValue::Int(n) => write!(f, "{}", n),
            SqlValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Statements executed together in one transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    /// What the batch loads, for logs.
    pub label: String,
    pub statements: Vec<Statement>,
}

impl Batch {
    pub fn new(label: impl Into<String>, statements: Vec<Statement>) -> Self {
        Self {
            label: label.into(),
            statements,
        }
    }
}

/// Render statements as a SQL script, one statement per line.
pub(crate) fn render_script(statements: &[Statement]) -> String {
    statements
        .iter()
        .map(|statement| {
            let mut line = statement.render_inline();
            line.push('\n');
            line
        })
        .collect()
}
