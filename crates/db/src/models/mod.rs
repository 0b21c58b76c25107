//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod contract;
pub mod current_account;
pub mod delivery;
pub mod expense;
pub mod inventory;
pub mod labor_report;
pub mod lease;
pub mod machine;
pub mod maintenance;
pub mod payment;
pub mod payroll;
pub mod project;
pub mod report;
pub mod role;
pub mod session;
pub mod user;
pub mod work_shift;
