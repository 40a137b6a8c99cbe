//! Input formats used to seed adapters.

pub mod csv;
