use super::payment::{ChargeRequest, GatewayResponse};
use super::query::Query;
use super::user::Row;
use crate::error::Result;
use async_trait::async_trait;

/// Storage collaborator. Executes parameterized queries only.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Runs a query expected to match at most one row.
    async fn fetch_optional(&self, query: &Query) -> Result<Option<Row>>;
}

/// Payment collaborator.
///
/// Every call is a distinct charge attempt. An `Ok` only means the gateway answered;
/// the caller must still look at the response status.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, request: &ChargeRequest) -> Result<GatewayResponse>;
}

pub type QueryExecutorBox = Box<dyn QueryExecutor>;
pub type PaymentGatewayBox = Box<dyn PaymentGateway>;
