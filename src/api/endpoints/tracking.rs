//! Public tracking lookup by register number.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::query::{track_document, TrackingRequest, TrackingResult};

/// `GET /api/track?register_number=`. Without a query parameter this
/// returns the blank form state (`searched = false`).
pub async fn show(
    State(ctx): State<ApiContext>,
    query: Result<Query<TrackingRequest>, QueryRejection>,
) -> Result<Json<TrackingResult>, ApiError> {
    let Query(request) = query?;
    if request.register_number.is_none() {
        return Ok(Json(TrackingResult {
            search_query: String::new(),
            document: None,
            searched: false,
        }));
    }
    Ok(Json(track_document(ctx.store.as_ref(), &request)?))
}

/// `POST /api/track` with `{"register_number": "..."}`.
pub async fn search(
    State(ctx): State<ApiContext>,
    body: Result<Json<TrackingRequest>, JsonRejection>,
) -> Result<Json<TrackingResult>, ApiError> {
    let Json(request) = body?;
    Ok(Json(track_document(ctx.store.as_ref(), &request)?))
}
