//! Adapters implementing the domain ports.

pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
pub mod sandbox;

use crate::domain::query::{Query, QueryParam};
use crate::error::{CheckoutError, Result};

/// Reads `$1` of a user query as an integer id.
///
/// A text parameter is treated as a type mismatch, never reinterpreted.
pub(crate) fn bound_user_id(query: &Query) -> Result<i64> {
    match query.param(1) {
        Some(QueryParam::Int(id)) => Ok(*id),
        Some(other) => Err(CheckoutError::collaborator(format!(
            "expected integer for $1, got {other}"
        ))),
        None => Err(CheckoutError::collaborator("missing parameter $1")),
    }
}
