//! `{ "data": ... }` wrapper for action endpoints whose payload may be null
//! or a bare list, such as the current shift or generated payroll rows.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Wrap `data` in the envelope, ready to return from a handler.
pub fn data<T: Serialize>(data: T) -> Json<DataResponse<T>> {
    Json(DataResponse { data })
}
