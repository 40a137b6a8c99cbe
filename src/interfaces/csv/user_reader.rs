use crate::domain::user::{UserId, UserRecord};
use crate::error::{CheckoutError, Result};
use serde_json::Value;
use std::io::Read;

/// Reads user records from a CSV source.
///
/// The header row must contain an `id` column; every other column becomes a string
/// attribute of the record. Whitespace is trimmed and ragged rows are tolerated.
pub struct UserReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> UserReader<R> {
    /// Creates a new `UserReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and converts user rows.
    ///
    /// Fails up front if the header has no `id` column.
    pub fn users(mut self) -> Result<impl Iterator<Item = Result<UserRecord>>> {
        let headers = self.reader.headers()?.clone();
        let id_column = headers
            .iter()
            .position(|h| h == "id")
            .ok_or_else(|| CheckoutError::invalid("users CSV has no 'id' column"))?;

        Ok(self.reader.into_records().map(move |record| -> Result<UserRecord> {
            let record = record?;
            let raw_id = record
                .get(id_column)
                .ok_or_else(|| CheckoutError::invalid("user row has no id value"))?;
            let mut user = UserRecord::new(raw_id.parse::<UserId>()?);

            for (i, (name, value)) in headers.iter().zip(record.iter()).enumerate() {
                if i != id_column {
                    user.attributes
                        .insert(name.to_string(), Value::String(value.to_string()));
                }
            }
            Ok(user)
        }))
    }
}
