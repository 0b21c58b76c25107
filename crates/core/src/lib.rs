//! Domain logic for the Faena backend.
//!
//! Everything in this crate is pure: no database access, no HTTP. The `db`
//! and `api` crates feed rows in and persist whatever comes back out.

pub mod account;
pub mod error;
pub mod inventory;
pub mod labor;
pub mod lease;
pub mod maintenance;
pub mod payroll;
pub mod roles;
pub mod search;
pub mod shift;
pub mod status;
pub mod types;
pub mod validation;
