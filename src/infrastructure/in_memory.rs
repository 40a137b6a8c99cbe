use super::bound_user_id;
use crate::domain::ports::QueryExecutor;
use crate::domain::query::{Query, USER_BY_ID};
use crate::domain::user::{Row, UserRecord};
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory user table.
///
/// Uses `Arc<RwLock<HashMap<i64, Row>>>` so clones share the same rows. Understands the
/// statements in [`crate::domain::query`] and nothing else.
#[derive(Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<i64, Row>>>,
}

impl InMemoryUserStore {
    /// Creates a new, empty in-memory user store.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, record: UserRecord) {
        let mut users = self.users.write().await;
        users.insert(record.id.value(), record.into_row());
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl QueryExecutor for InMemoryUserStore {
    async fn fetch_optional(&self, query: &Query) -> Result<Option<Row>> {
        match query.statement() {
            USER_BY_ID => {
                let id = bound_user_id(query)?;
                let users = self.users.read().await;
                Ok(users.get(&id).cloned())
            }
            other => Err(CheckoutError::collaborator(format!(
                "unsupported statement: {other}"
            ))),
        }
    }
}
