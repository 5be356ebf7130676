//! Shared types for the API layer.

use std::sync::Arc;

use serde::Serialize;

use crate::auth::AdminAuth;
use crate::models::Document;
use crate::store::DocumentStore;

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub store: Arc<dyn DocumentStore>,
    pub auth: Arc<AdminAuth>,
}

impl ApiContext {
    pub fn new(store: Arc<dyn DocumentStore>, auth: AdminAuth) -> Self {
        Self {
            store,
            auth: Arc::new(auth),
        }
    }
}

/// Marker injected into request extensions by the auth middleware
/// once the caller has presented the admin token.
#[derive(Debug, Clone, Copy)]
pub struct AdminContext;

/// Acknowledgment for a successful create/update/delete.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
}
