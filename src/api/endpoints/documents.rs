//! Admin document management: listing, CRUD and form options.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::api::endpoints::parse_document_id;
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, MutationResponse};
use crate::models::enums::{Department, DocumentStatus};
use crate::models::{Document, DocumentFilter, DocumentInput, Page};

/// `GET /api/documents?search=&page=`
pub async fn index(
    State(ctx): State<ApiContext>,
    query: Result<Query<DocumentFilter>, QueryRejection>,
) -> Result<Json<Page<Document>>, ApiError> {
    let Query(filter) = query?;
    Ok(Json(ctx.store.list(&filter)?))
}

/// `POST /api/documents`
pub async fn store(
    State(ctx): State<ApiContext>,
    body: Result<Json<DocumentInput>, JsonRejection>,
) -> Result<(StatusCode, Json<MutationResponse>), ApiError> {
    let Json(input) = body?;
    let document = ctx.store.create(&input)?;
    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            message: "Document created successfully.",
            document: Some(document),
        }),
    ))
}

/// `GET /api/documents/:id`
pub async fn show(
    State(ctx): State<ApiContext>,
    Path(document_id): Path<String>,
) -> Result<Json<Document>, ApiError> {
    let id = parse_document_id(&document_id)?;
    Ok(Json(ctx.store.get(&id)?))
}

/// `PUT`/`PATCH /api/documents/:id`. Both are full replacements; every
/// field is validated as on create.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(document_id): Path<String>,
    body: Result<Json<DocumentInput>, JsonRejection>,
) -> Result<Json<MutationResponse>, ApiError> {
    let id = parse_document_id(&document_id)?;
    let Json(input) = body?;
    let document = ctx.store.update(&id, &input)?;
    Ok(Json(MutationResponse {
        message: "Document updated successfully.",
        document: Some(document),
    }))
}

/// `DELETE /api/documents/:id`
pub async fn destroy(
    State(ctx): State<ApiContext>,
    Path(document_id): Path<String>,
) -> Result<Json<MutationResponse>, ApiError> {
    let id = parse_document_id(&document_id)?;
    ctx.store.delete(&id)?;
    Ok(Json(MutationResponse {
        message: "Document deleted successfully.",
        document: None,
    }))
}

#[derive(Debug, Serialize)]
pub struct FormOptions {
    pub statuses: Vec<&'static str>,
    pub departments: Vec<&'static str>,
}

/// `GET /api/documents/options`: values accepted by the status and
/// department fields.
pub async fn options() -> Json<FormOptions> {
    Json(FormOptions {
        statuses: DocumentStatus::options(),
        departments: Department::options(),
    })
}
