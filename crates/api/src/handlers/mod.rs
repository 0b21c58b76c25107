//! Request handlers, one submodule per resource.
//!
//! Handlers validate input, delegate to the matching repository in `faena_db`
//! or to the pure rules in `faena_core`, and map failures via [`AppError`].

pub mod auth;
pub mod contract;
pub mod current_account;
pub mod delivery;
pub mod expense;
pub mod export;
pub mod health;
pub mod inventory;
pub mod labor_report;
pub mod lease;
pub mod machine;
pub mod maintenance;
pub mod payment;
pub mod payroll;
pub mod project;
pub mod shift;
pub mod user;

use faena_core::error::CoreError;

use crate::error::{AppError, AppResult};

/// Lift a `faena_core::validation` result into a 400.
pub(crate) fn check(result: Result<(), String>) -> AppResult<()> {
    result.map_err(|msg| AppError::Core(CoreError::Validation(msg)))
}
