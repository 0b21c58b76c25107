//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod contract_repo;
pub mod current_account_repo;
pub mod delivery_repo;
pub mod expense_repo;
pub mod inventory_movement_repo;
pub mod labor_report_repo;
pub mod lease_repo;
pub mod machine_repo;
pub mod maintenance_repo;
pub mod payment_repo;
pub mod payroll_repo;
pub mod product_repo;
pub mod project_repo;
pub mod report_repo;
pub mod role_repo;
pub mod session_repo;
pub mod user_repo;
pub mod work_shift_repo;

pub use contract_repo::ContractRepo;
pub use current_account_repo::CurrentAccountReportRepo;
pub use delivery_repo::AggregateDeliveryRepo;
pub use expense_repo::ExpenseRepo;
pub use inventory_movement_repo::{InventoryMovementRepo, StockOutcome};
pub use labor_report_repo::LaborReportRepo;
pub use lease_repo::LeaseRepo;
pub use machine_repo::MachineRepo;
pub use maintenance_repo::MaintenanceRecordRepo;
pub use payment_repo::PaymentRepo;
pub use payroll_repo::PayrollSummaryRepo;
pub use product_repo::ProductRepo;
pub use project_repo::ProjectRepo;
pub use report_repo::ReportRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
pub use work_shift_repo::WorkShiftRepo;
