//! Domain types and the ports through which the application reaches its collaborators.

pub mod money;
pub mod payment;
pub mod ports;
pub mod query;
pub mod user;
