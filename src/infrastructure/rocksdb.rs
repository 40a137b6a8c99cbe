use super::bound_user_id;
use crate::domain::ports::QueryExecutor;
use crate::domain::query::{Query, USER_BY_ID};
use crate::domain::user::{Row, UserRecord};
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding one JSON row per user, keyed by the big-endian id.
pub const CF_USERS: &str = "users";

/// A persistent user table backed by RocksDB.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbUserStore {
    db: Arc<DB>,
}

impl RocksDbUserStore {
    /// Opens or creates a RocksDB instance at `path`, creating the `users` column
    /// family if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_users = ColumnFamilyDescriptor::new(CF_USERS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_users])?;

        Ok(Self { db: Arc::new(db) })
    }

    pub fn insert(&self, record: UserRecord) -> Result<()> {
        let cf = self.users_cf()?;
        let key = record.id.value().to_be_bytes();
        let value = serde_json::to_vec(&record.into_row())?;
        self.db.put_cf(&cf, key, value)?;
        Ok(())
    }

    fn users_cf(&self) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(CF_USERS)
            .ok_or_else(|| CheckoutError::collaborator("users column family not found"))
    }
}

#[async_trait]
impl QueryExecutor for RocksDbUserStore {
    async fn fetch_optional(&self, query: &Query) -> Result<Option<Row>> {
        match query.statement() {
            USER_BY_ID => {
                let id = bound_user_id(query)?;
                let cf = self.users_cf()?;
                let bytes = self
                    .db
                    .get_cf(&cf, id.to_be_bytes())
                    .map_err(|e| CheckoutError::collaborator(format!("RocksDB read error: {e}")))?;

                match bytes {
                    Some(bytes) => {
                        let row: Row = serde_json::from_slice(&bytes).map_err(|e| {
                            CheckoutError::collaborator(format!("corrupt user row {id}: {e}"))
                        })?;
                        Ok(Some(row))
                    }
                    None => Ok(None),
                }
            }
            other => Err(CheckoutError::collaborator(format!(
                "unsupported statement: {other}"
            ))),
        }
    }
}
