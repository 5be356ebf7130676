//! Document store: sole owner of document identity and uniqueness.
//!
//! `DocumentStore` is the interface the HTTP layer and the seeder work
//! against. `SqliteDocumentStore` implements it over a single rusqlite
//! connection: writes run inside an IMMEDIATE transaction so the
//! register-number check and the write commit together.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{Duration, SubsecRound, Utc};
use rusqlite::{Connection, TransactionBehavior};
use uuid::Uuid;

use crate::db::{self, DatabaseError};
use crate::models::{Document, DocumentFilter, DocumentInput, Page};
use crate::query::fetch_document_page;
use crate::stats::{fetch_dashboard, Dashboard};
use crate::validation::{validate_document, ValidationErrors, REGISTER_NUMBER_TAKEN};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Document not found: {id}")]
    NotFound { id: Uuid },

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Database(DatabaseError::Sqlite(err))
    }
}

impl StoreError {
    /// Map a repository error for `id`, keeping not-found distinct and
    /// turning a UNIQUE index hit into the register-number field error.
    fn from_write(err: DatabaseError, id: &Uuid) -> Self {
        if err.is_unique_violation() {
            return StoreError::Validation(ValidationErrors::single(
                "register_number",
                REGISTER_NUMBER_TAKEN,
            ));
        }
        match err {
            DatabaseError::NotFound { .. } => StoreError::NotFound { id: *id },
            other => StoreError::Database(other),
        }
    }
}

pub trait DocumentStore: Send + Sync {
    /// Validate and persist a new document with a fresh id and timestamps.
    fn create(&self, input: &DocumentInput) -> Result<Document, StoreError>;

    /// Replace every editable field of an existing document.
    fn update(&self, id: &Uuid, input: &DocumentInput) -> Result<Document, StoreError>;

    /// Permanently remove a document.
    fn delete(&self, id: &Uuid) -> Result<(), StoreError>;

    fn get(&self, id: &Uuid) -> Result<Document, StoreError>;

    /// Exact-match lookup used by public tracking.
    fn find_by_register_number(&self, register_number: &str)
        -> Result<Option<Document>, StoreError>;

    fn list(&self, filter: &DocumentFilter) -> Result<Page<Document>, StoreError>;

    fn dashboard(&self) -> Result<Dashboard, StoreError>;

    fn count(&self) -> Result<u64, StoreError>;
}

pub struct SqliteDocumentStore {
    conn: Mutex<Connection>,
}

impl SqliteDocumentStore {
    /// Open (or create) the database file and run migrations.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Ok(Self::from_connection(db::open_database(path)?))
    }

    /// Open an in-memory store (for testing)
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self::from_connection(db::open_memory_database()?))
    }

    /// Wrap an already-migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl DocumentStore for SqliteDocumentStore {
    fn create(&self, input: &DocumentInput) -> Result<Document, StoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let fields = validate_document(input, |number| {
            db::register_number_taken(&tx, number, None)
        })?
        .map_err(StoreError::Validation)?;

        // Stored with microsecond precision; truncate so the returned record matches a reload.
        let now = Utc::now().trunc_subsecs(6);
        let doc = Document::from_fields(Uuid::new_v4(), fields, now, now);
        db::insert_document(&tx, &doc).map_err(|e| StoreError::from_write(e, &doc.id))?;
        tx.commit()?;

        tracing::info!(
            document_id = %doc.id,
            register_number = %doc.register_number,
            status = %doc.status,
            "Document created"
        );
        Ok(doc)
    }

    fn update(&self, id: &Uuid, input: &DocumentInput) -> Result<Document, StoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing = db::get_document(&tx, id)?.ok_or(StoreError::NotFound { id: *id })?;
        let fields = validate_document(input, |number| {
            db::register_number_taken(&tx, number, Some(id))
        })?
        .map_err(StoreError::Validation)?;

        // updated_at must move forward even when two writes land in the same microsecond
        let now = Utc::now().trunc_subsecs(6);
        let updated_at = now.max(existing.updated_at + Duration::microseconds(1));
        let doc = Document::from_fields(*id, fields, existing.created_at, updated_at);
        db::update_document(&tx, &doc).map_err(|e| StoreError::from_write(e, id))?;
        tx.commit()?;

        tracing::info!(
            document_id = %doc.id,
            register_number = %doc.register_number,
            from_status = %existing.status,
            to_status = %doc.status,
            "Document updated"
        );
        Ok(doc)
    }

    fn delete(&self, id: &Uuid) -> Result<(), StoreError> {
        let conn = self.lock()?;
        db::delete_document(&conn, id).map_err(|e| StoreError::from_write(e, id))?;
        tracing::info!(document_id = %id, "Document deleted");
        Ok(())
    }

    fn get(&self, id: &Uuid) -> Result<Document, StoreError> {
        let conn = self.lock()?;
        db::get_document(&conn, id)?.ok_or(StoreError::NotFound { id: *id })
    }

    fn find_by_register_number(
        &self,
        register_number: &str,
    ) -> Result<Option<Document>, StoreError> {
        let conn = self.lock()?;
        Ok(db::get_document_by_register_number(&conn, register_number)?)
    }

    fn list(&self, filter: &DocumentFilter) -> Result<Page<Document>, StoreError> {
        let conn = self.lock()?;
        Ok(fetch_document_page(&conn, filter)?)
    }

    fn dashboard(&self) -> Result<Dashboard, StoreError> {
        let conn = self.lock()?;
        Ok(fetch_dashboard(&conn)?)
    }

    fn count(&self) -> Result<u64, StoreError> {
        let conn = self.lock()?;
        Ok(db::count_documents(&conn)?)
    }
}
