use crate::error::CheckoutError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// An opaque set of columns as returned by the storage collaborator.
pub type Row = Map<String, Value>;

/// Identifier of a user in the storage collaborator.
///
/// Only non-negative integers are representable, so an identifier can never carry
/// query syntax into the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    pub fn new(value: i64) -> Result<Self, CheckoutError> {
        if value < 0 {
            return Err(CheckoutError::invalid(format!(
                "User id must not be negative, got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = CheckoutError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl FromStr for UserId {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // `i64::from_str` accepts a leading '+', which is not a plain identifier
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CheckoutError::invalid(format!(
                "User id '{s}' is not a non-negative integer"
            )));
        }
        let value = trimmed
            .parse::<i64>()
            .map_err(|e| CheckoutError::invalid(format!("User id '{s}' is out of range: {e}")))?;
        Self::new(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A user as returned by the storage collaborator.
///
/// Only the id is interpreted here; every other column is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    #[serde(flatten)]
    pub attributes: Row,
}

impl UserRecord {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            attributes: Row::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builds a record from a storage row, which must carry an integer `id` column.
    pub fn from_row(mut row: Row) -> Result<Self, CheckoutError> {
        let id = row
            .remove("id")
            .and_then(|value| value.as_i64())
            .ok_or_else(|| CheckoutError::collaborator("User row has no integer 'id' column"))?;
        let id = UserId::new(id).map_err(|e| CheckoutError::collaborator(e.to_string()))?;
        Ok(Self {
            id,
            attributes: row,
        })
    }

    pub fn into_row(self) -> Row {
        let mut row = self.attributes;
        row.insert("id".to_string(), Value::from(self.id.value()));
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_id_parsing() {
        assert_eq!("42".parse::<UserId>().unwrap().value(), 42);
        assert_eq!(" 7 ".parse::<UserId>().unwrap().value(), 7);
        assert!(matches!(
            "1; DROP TABLE users".parse::<UserId>(),
            Err(CheckoutError::InvalidInput(_))
        ));
        assert!("1 OR 1=1".parse::<UserId>().is_err());
        assert!("-1".parse::<UserId>().is_err());
        assert!("+1".parse::<UserId>().is_err());
        assert!("".parse::<UserId>().is_err());
        assert!("99999999999999999999".parse::<UserId>().is_err());
    }

    #[test]
    fn test_user_record_row_conversion() {
        let record = UserRecord::new(UserId::new(3).unwrap()).with_attribute("name", "Ada");
        let row = record.clone().into_row();
        assert_eq!(row.get("id"), Some(&json!(3)));

        let back = UserRecord::from_row(row).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_user_record_from_row_without_id() {
        let mut row = Row::new();
        row.insert("name".to_string(), json!("Ada"));
        assert!(matches!(
            UserRecord::from_row(row),
            Err(CheckoutError::CollaboratorFailure(_))
        ));
    }

    #[test]
    fn test_user_record_serializes_flat() {
        let record = UserRecord::new(UserId::new(1).unwrap()).with_attribute("email", "a@b.c");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, json!({"id": 1, "email": "a@b.c"}));
    }
}
