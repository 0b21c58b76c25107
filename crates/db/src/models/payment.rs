//! Payment entity model and DTOs.

use faena_core::types::{Date, DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A payment row from the `payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub project_id: DbId,
    pub contract_id: Option<DbId>,
    pub amount: Decimal,
    pub payment_date: Date,
    pub method: String,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new payment.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePayment {
    pub project_id: DbId,
    pub contract_id: Option<DbId>,
    pub amount: Decimal,
    pub payment_date: Date,
    #[validate(length(min = 1))]
    pub method: String,
    #[validate(length(max = 100))]
    pub reference: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating an existing payment. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePayment {
    pub contract_id: Option<DbId>,
    pub amount: Option<Decimal>,
    pub payment_date: Option<Date>,
    pub method: Option<String>,
    #[validate(length(max = 100))]
    pub reference: Option<String>,
    pub notes: Option<String>,
}

/// Query filters for listing payments.
#[derive(Debug, Default, Deserialize)]
pub struct PaymentFilter {
    pub project_id: Option<DbId>,
    pub contract_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
