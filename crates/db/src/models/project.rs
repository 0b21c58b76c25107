//! Project entity model and DTOs.

use faena_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A project (obra) row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub client_name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub client_name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Defaults to `active` if omitted.
    pub status: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub client_name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// Query filters for listing projects.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectFilter {
    pub status: Option<String>,
    /// Free-text match on name, client or location.
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
