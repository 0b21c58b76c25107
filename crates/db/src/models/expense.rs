//! Expense (gasto) entity model and DTOs.

use faena_core::types::{Date, DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An expense row from the `expenses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Expense {
    pub id: DbId,
    pub project_id: Option<DbId>,
    pub user_id: DbId,
    pub category: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub expense_date: Date,
    pub receipt_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new expense.
///
/// `user_id` is filled from the authenticated user unless a manager
/// records the expense on someone else's behalf.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateExpense {
    pub project_id: Option<DbId>,
    pub user_id: Option<DbId>,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub expense_date: Date,
}

/// DTO for updating an existing expense. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateExpense {
    pub project_id: Option<DbId>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub expense_date: Option<Date>,
}

/// Query filters for listing expenses.
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseFilter {
    pub project_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
