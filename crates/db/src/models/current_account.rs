//! Current account (cuenta corriente) report model and DTOs.

use faena_core::account::AccountTotals;
use faena_core::types::{Date, DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `current_account_reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CurrentAccountReport {
    pub id: DbId,
    pub project_id: DbId,
    pub period_start: Date,
    pub period_end: Date,
    pub lease_charges: Decimal,
    pub delivery_charges: Decimal,
    pub labor_charges: Decimal,
    pub total_charges: Decimal,
    pub total_payments: Decimal,
    pub balance: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Values written by [`crate::repositories::CurrentAccountReportRepo::create`].
#[derive(Debug, Clone)]
pub struct NewCurrentAccountReport {
    pub project_id: DbId,
    pub period_start: Date,
    pub period_end: Date,
    pub totals: AccountTotals,
}

/// Request body for generating a current account report.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateCurrentAccount {
    pub project_id: DbId,
    pub period_start: Date,
    pub period_end: Date,
}

/// Raw sums a report is built from.
#[derive(Debug, Clone, FromRow)]
pub struct AccountSums {
    pub lease_charges: Decimal,
    pub delivery_charges: Decimal,
    pub labor_charges: Decimal,
    pub total_payments: Decimal,
}

/// Query filters for listing current account reports.
#[derive(Debug, Default, Deserialize)]
pub struct CurrentAccountFilter {
    pub project_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
