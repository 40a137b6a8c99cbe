use crate::domain::ports::QueryExecutorBox;
use crate::domain::query::{Query, USER_BY_ID};
use crate::domain::user::{UserId, UserRecord};
use crate::error::Result;
use tracing::debug;

/// Fetches user records from the storage collaborator.
///
/// The identifier is always sent as a bound parameter of a fixed statement.
pub struct UserLookup {
    executor: QueryExecutorBox,
}

impl UserLookup {
    pub fn new(executor: QueryExecutorBox) -> Self {
        Self { executor }
    }

    /// Builds the query issued for `id`. The statement text never depends on the id.
    pub fn query_for(id: UserId) -> Query {
        Query::new(USER_BY_ID).bind(id.value())
    }

    pub async fn find_user(&self, id: UserId) -> Result<Option<UserRecord>> {
        let query = Self::query_for(id);
        debug!(user_id = %id, statement = query.statement(), "looking up user");

        let row = self.executor.fetch_optional(&query).await?;
        match row {
            Some(row) => {
                let record = UserRecord::from_row(row)?;
                debug!(user_id = %id, "user found");
                Ok(Some(record))
            }
            None => {
                debug!(user_id = %id, "user not found");
                Ok(None)
            }
        }
    }

    /// Parses untrusted text into a [`UserId`] before looking it up.
    ///
    /// Anything that is not a plain non-negative integer fails with `InvalidInput` and
    /// the storage collaborator is never called.
    pub async fn find_user_by_raw_id(&self, raw: &str) -> Result<Option<UserRecord>> {
        let id: UserId = raw.parse()?;
        self.find_user(id).await
    }
}
