//! HTTP error mapping.
//!
//! Every failure leaves a handler as `{"error": message, "code": CODE}`.
//! Unique-constraint names are translated into messages a form can show
//! next to the offending field.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use faena_core::error::CoreError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed request that never reached domain validation (bad path
    /// segment, missing multipart field).
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(errors.to_string()))
    }
}

const INTERNAL_MESSAGE: &str = "An internal error occurred";

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::Conflict(_) => StatusCode::CONFLICT,
        CoreError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        CoreError::Forbidden(_) => StatusCode::FORBIDDEN,
        CoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(CoreError::Internal(msg)) | AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
            AppError::Core(core) => (core_status(core), core.code(), core.to_string()),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        (status, axum::Json(json!({ "error": message, "code": code }))).into_response()
    }
}

/// User-facing message for a unique constraint.
fn duplicate_message(constraint: &str) -> String {
    match constraint {
        "uq_users_email" => "A user with this email already exists".into(),
        "uq_machines_code" => "Another machine already uses this code".into(),
        "uq_products_sku" => "Another product already uses this SKU".into(),
        "uq_contracts_contract_number" => "A contract with this number already exists".into(),
        "uq_work_shifts_open_per_user" => "User already has an open shift".into(),
        other => format!("Duplicate value violates {other}"),
    }
}

/// Map a sqlx error to status, code and message.
///
/// `23505` on a `uq_*` constraint is a 409; FK (`23503`) and CHECK (`23514`)
/// violations are 400. Anything else is logged and hidden behind a 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if let sqlx::Error::RowNotFound = err {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }
    if let sqlx::Error::Database(db_err) = err {
        let constraint = db_err.constraint().unwrap_or("unknown");
        match db_err.code().as_deref() {
            Some("23505") if constraint.starts_with("uq_") => {
                return (StatusCode::CONFLICT, "CONFLICT", duplicate_message(constraint));
            }
            Some("23503") => {
                return (
                    StatusCode::BAD_REQUEST,
                    "INVALID_REFERENCE",
                    format!("Referenced record does not exist or is still in use ({constraint})"),
                );
            }
            Some("23514") => {
                return (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    format!("Value out of range ({constraint})"),
                );
            }
            _ => {}
        }
    }
    tracing::error!(error = %err, "Database error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_keep_their_status() {
        let cases = [
            (
                CoreError::NotFound {
                    entity: "Machine",
                    id: 7,
                },
                StatusCode::NOT_FOUND,
            ),
            (CoreError::Validation("neg".into()), StatusCode::BAD_REQUEST),
            (CoreError::Conflict("stock".into()), StatusCode::CONFLICT),
            (CoreError::Forbidden("no".into()), StatusCode::FORBIDDEN),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::Core(err).into_response().status(), status);
        }
    }

    #[test]
    fn row_not_found_maps_to_404() {
        let response = AppError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_errors_are_500() {
        let response = AppError::InternalError("disk full".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let response = AppError::Core(CoreError::Internal("bad status".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn duplicate_messages_name_the_field() {
        assert_eq!(
            duplicate_message("uq_machines_code"),
            "Another machine already uses this code"
        );
        assert!(duplicate_message("uq_something_else").contains("uq_something_else"));
    }
}
