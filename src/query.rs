//! Read-side views: the paginated admin listing and the public tracking lookup.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::db::{count_documents_matching, list_documents, DatabaseError};
use crate::models::{Document, DocumentFilter, Page, PAGE_SIZE};
use crate::store::{DocumentStore, StoreError};
use crate::validation::validate_register_lookup;

/// Newest-first page of documents, filtered by sender name when a search is given.
/// A page past the end comes back with empty `data`.
pub fn fetch_document_page(
    conn: &Connection,
    filter: &DocumentFilter,
) -> Result<Page<Document>, DatabaseError> {
    let search = filter.search_term();
    let total = count_documents_matching(conn, search)?;
    let data = list_documents(
        conn,
        search,
        u64::from(PAGE_SIZE),
        Page::<Document>::offset(filter),
    )?;
    Ok(Page::new(data, filter, total))
}

/// Public tracking form payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrackingRequest {
    pub register_number: Option<String>,
}

/// Result of a public lookup. `document` is `None` when nothing matched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingResult {
    pub search_query: String,
    pub document: Option<Document>,
    pub searched: bool,
}

/// Exact-match lookup by register number. Blank input is rejected
/// before the store is touched.
pub fn track_document(
    store: &dyn DocumentStore,
    request: &TrackingRequest,
) -> Result<TrackingResult, StoreError> {
    let term = validate_register_lookup(request.register_number.as_deref())
        .map_err(StoreError::Validation)?;
    let document = store.find_by_register_number(&term)?;

    tracing::debug!(register_number = %term, found = document.is_some(), "Tracking lookup");

    Ok(TrackingResult {
        search_query: term,
        document,
        searched: true,
    })
}
