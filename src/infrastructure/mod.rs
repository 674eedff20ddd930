//! Infrastructure layer implementing the domain repository traits.
//!
//! - [`persistence`] - PostgreSQL repositories
//! - [`memory`] - In-process storage for tests and database-less runs

pub mod memory;
pub mod persistence;
