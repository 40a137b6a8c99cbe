//! Application layer: the three operations the crate offers.
//!
//! Discounting is plain arithmetic. User lookup and payment processing reach their
//! collaborators only through the ports in [`crate::domain::ports`], injected at
//! construction, so tests can substitute doubles for them.

pub mod discount;
pub mod payment;
pub mod user_lookup;
