//! Admin dashboard summary.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::stats::Dashboard;

/// `GET /api/dashboard`: headline counts plus the five newest documents.
pub async fn summary(State(ctx): State<ApiContext>) -> Result<Json<Dashboard>, ApiError> {
    Ok(Json(ctx.store.dashboard()?))
}
