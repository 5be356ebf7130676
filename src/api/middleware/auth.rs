//! Admin bearer token gate.
//!
//! Extracts `Authorization: Bearer <token>` and checks it against the
//! configured admin token. Requests without a valid token are rejected
//! here, so handlers behind this layer never touch the store for an
//! unauthenticated caller.

use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::{AdminContext, ApiContext};
use crate::auth::bearer_token;

/// Require the admin bearer token.
///
/// Accesses `ApiContext` from request extensions (injected by Extension layer).
/// On success: marks both the request and the response with `AdminContext`
/// so handlers and the outer access logger can tell admin traffic apart.
pub async fn require_admin(req: Request<axum::body::Body>, next: Next) -> Response {
    match require_admin_inner(req, next).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn require_admin_inner(
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx: ApiContext = req
        .extensions()
        .get::<ApiContext>()
        .cloned()
        .ok_or(ApiError::Internal("missing API context".into()))?;

    let authenticated = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .is_some_and(|token| ctx.auth.is_authenticated(token));

    if !authenticated {
        tracing::warn!(path = %req.uri().path(), "Rejected admin request");
        return Err(ApiError::Unauthorized);
    }

    req.extensions_mut().insert(AdminContext);
    let mut response = next.run(req).await;
    response.extensions_mut().insert(AdminContext);
    Ok(response)
}
