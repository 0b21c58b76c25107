//! Contract entity model and DTOs.

use faena_core::types::{Date, DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A contract row from the `contracts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contract {
    pub id: DbId,
    pub project_id: DbId,
    pub contract_number: String,
    pub client_name: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub status: String,
    pub document_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new contract.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContract {
    pub project_id: DbId,
    #[validate(length(min = 1, max = 50))]
    pub contract_number: String,
    #[validate(length(min = 1, max = 200))]
    pub client_name: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub start_date: Date,
    pub end_date: Option<Date>,
    /// Defaults to `draft` if omitted.
    pub status: Option<String>,
}

/// DTO for updating an existing contract. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateContract {
    #[validate(length(min = 1, max = 50))]
    pub contract_number: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub client_name: Option<String>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub status: Option<String>,
}

/// Query filters for listing contracts.
#[derive(Debug, Default, Deserialize)]
pub struct ContractFilter {
    pub project_id: Option<DbId>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
