//! Parameterized queries handed to the storage collaborator.
//!
//! Statement text is `&'static str`: it can only come from a literal compiled into the
//! binary, never from caller input. Values travel next to it as bound parameters.

use std::fmt;

/// Look up a single user by its id. Binds `$1` to the id.
pub const USER_BY_ID: &str = "SELECT * FROM users WHERE id = $1";

#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    Int(i64),
    Text(String),
}

impl fmt::Display for QueryParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryParam::Int(value) => write!(f, "{value}"),
            QueryParam::Text(value) => write!(f, "{value:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    statement: &'static str,
    params: Vec<QueryParam>,
}

impl Query {
    pub fn new(statement: &'static str) -> Self {
        Self {
            statement,
            params: Vec::new(),
        }
    }

    /// Binds the next positional parameter.
    pub fn bind(mut self, param: impl Into<QueryParam>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn statement(&self) -> &'static str {
        self.statement
    }

    pub fn params(&self) -> &[QueryParam] {
        &self.params
    }

    /// Returns the 1-based positional parameter `$n`.
    pub fn param(&self, position: usize) -> Option<&QueryParam> {
        position.checked_sub(1).and_then(|i| self.params.get(i))
    }
}

impl From<i64> for QueryParam {
    fn from(value: i64) -> Self {
        QueryParam::Int(value)
    }
}

impl From<String> for QueryParam {
    fn from(value: String) -> Self {
        QueryParam::Text(value)
    }
}

impl From<&str> for QueryParam {
    fn from(value: &str) -> Self {
        QueryParam::Text(value.to_string())
    }
}
