//! Read-only aggregate views used by dashboards and exports.

use faena_core::types::{Date, DbId};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Totals for one project across every ledger that references it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectSummary {
    pub project_id: DbId,
    pub contract_count: i64,
    pub contracted_amount: Decimal,
    pub expense_total: Decimal,
    pub payment_total: Decimal,
    pub lease_total: Decimal,
    pub delivery_total: Decimal,
    pub delivered_volume_m3: Decimal,
    pub labor_hours: Decimal,
    pub machine_count: i64,
}

/// One line of the current account detail used by spreadsheet/PDF exports.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AccountLine {
    /// `lease`, `delivery`, `labor` or `payment`.
    pub kind: String,
    pub occurred_on: Date,
    pub description: String,
    pub amount: Decimal,
}
