//! Register API endpoint handlers.
//!
//! Each handler reads the shared `ApiContext` via `State`, calls into the
//! document store, and maps failures through `ApiError`.

pub mod dashboard;
pub mod documents;
pub mod health;
pub mod tracking;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use uuid::Uuid;

use crate::api::error::ApiError;

pub(crate) fn parse_document_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|e| ApiError::BadRequest(format!("Invalid document ID: {e}")))
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
