//! Domain error shared by the db and api crates.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input breaks a business rule: negative quantity, inverted period,
    /// meter reading going backwards.
    #[error("{0}")]
    Validation(String),

    /// The input is fine but the current state forbids it, e.g. clocking out
    /// a closed shift or taking more stock than is on hand.
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    /// Stored data is in a state the code does not expect. Never shown to
    /// clients verbatim.
    #[error("internal: {0}")]
    Internal(String),
}

impl CoreError {
    /// Stable machine-readable code for error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::NotFound { .. } => "NOT_FOUND",
            CoreError::Validation(_) => "VALIDATION_ERROR",
            CoreError::Conflict(_) => "CONFLICT",
            CoreError::Unauthorized(_) => "UNAUTHORIZED",
            CoreError::Forbidden(_) => "FORBIDDEN",
            CoreError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_entity() {
        let err = CoreError::NotFound {
            entity: "Machine",
            id: 12,
        };
        assert_eq!(err.to_string(), "Machine with id 12 not found");
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn rule_messages_pass_through_unchanged() {
        let err = CoreError::Conflict("Shift is already completed".into());
        assert_eq!(err.to_string(), "Shift is already completed");
        assert_eq!(err.code(), "CONFLICT");
    }
}
