use std::str::FromStr;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

const DOCUMENT_COLUMNS: &str = "id, register_number, sender_name, opd_name, letter_number,
     letter_subject, receiver_name, incoming_date, status, department, update_date, notes,
     created_at, updated_at";

/// Storage form of a UTC timestamp. Fixed width so text ordering matches time ordering.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn insert_document(conn: &Connection, doc: &Document) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO documents (id, register_number, sender_name, opd_name, letter_number,
         letter_subject, receiver_name, incoming_date, status, department, update_date, notes,
         created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            doc.id.to_string(),
            doc.register_number,
            doc.sender_name,
            doc.opd_name,
            doc.letter_number,
            doc.letter_subject,
            doc.receiver_name,
            format_date(&doc.incoming_date),
            doc.status.as_str(),
            doc.department.as_str(),
            format_date(&doc.update_date),
            doc.notes,
            format_timestamp(&doc.created_at),
            format_timestamp(&doc.updated_at),
        ],
    )?;
    Ok(())
}

pub fn get_document(conn: &Connection, id: &Uuid) -> Result<Option<Document>, DatabaseError> {
    let sql = format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = ?1");
    let row = conn
        .query_row(&sql, params![id.to_string()], DocumentRow::from_row)
        .optional()?;
    row.map(document_from_row).transpose()
}

/// Exact-match lookup by the public register number.
pub fn get_document_by_register_number(
    conn: &Connection,
    register_number: &str,
) -> Result<Option<Document>, DatabaseError> {
    let sql = format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE register_number = ?1");
    let row = conn
        .query_row(&sql, params![register_number], DocumentRow::from_row)
        .optional()?;
    row.map(document_from_row).transpose()
}

/// Whether another document already uses `register_number`.
/// `exclude` skips the document being updated.
pub fn register_number_taken(
    conn: &Connection,
    register_number: &str,
    exclude: Option<&Uuid>,
) -> Result<bool, DatabaseError> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM documents WHERE register_number = ?1 AND id IS NOT ?2)",
        params![register_number, exclude.map(|id| id.to_string())],
        |row| row.get(0),
    )?;
    Ok(exists != 0)
}

/// Replace every editable column and `updated_at`. `id` and `created_at` are never written.
pub fn update_document(conn: &Connection, doc: &Document) -> Result<(), DatabaseError> {
    let rows = conn.execute(
        "UPDATE documents SET register_number = ?2, sender_name = ?3, opd_name = ?4,
         letter_number = ?5, letter_subject = ?6, receiver_name = ?7, incoming_date = ?8,
         status = ?9, department = ?10, update_date = ?11, notes = ?12, updated_at = ?13
         WHERE id = ?1",
        params![
            doc.id.to_string(),
            doc.register_number,
            doc.sender_name,
            doc.opd_name,
            doc.letter_number,
            doc.letter_subject,
            doc.receiver_name,
            format_date(&doc.incoming_date),
            doc.status.as_str(),
            doc.department.as_str(),
            format_date(&doc.update_date),
            doc.notes,
            format_timestamp(&doc.updated_at),
        ],
    )?;
    if rows == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Document".into(),
            id: doc.id.to_string(),
        });
    }
    Ok(())
}

pub fn delete_document(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    let deleted = conn.execute("DELETE FROM documents WHERE id = ?1", params![id.to_string()])?;
    if deleted == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Document".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

pub fn count_documents(conn: &Connection) -> Result<u64, DatabaseError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
    Ok(count as u64)
}

pub fn count_documents_by_status(
    conn: &Connection,
    status: DocumentStatus,
) -> Result<u64, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM documents WHERE status = ?1",
        params![status.as_str()],
        |row| row.get(0),
    )?;
    Ok(count as u64)
}

/// Case-folded `%term%` pattern with LIKE wildcards escaped so the term
/// matches literally. Pairs with `fold_case(sender_name)` on the column side.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Count documents whose sender name contains `search`, ignoring case.
pub fn count_documents_matching(
    conn: &Connection,
    search: Option<&str>,
) -> Result<u64, DatabaseError> {
    let count: i64 = match search {
        Some(term) => conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE fold_case(sender_name) LIKE ?1 ESCAPE '\\'",
            params![like_pattern(term)],
            |row| row.get(0),
        )?,
        None => conn.query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?,
    };
    Ok(count as u64)
}

/// Newest-first slice of documents, optionally filtered by sender name.
pub fn list_documents(
    conn: &Connection,
    search: Option<&str>,
    limit: u64,
    offset: u64,
) -> Result<Vec<Document>, DatabaseError> {
    let where_clause = if search.is_some() {
        "WHERE fold_case(sender_name) LIKE ?3 ESCAPE '\\'"
    } else {
        ""
    };
    let sql = format!(
        "SELECT {DOCUMENT_COLUMNS} FROM documents {where_clause}
         ORDER BY created_at DESC, rowid DESC
         LIMIT ?1 OFFSET ?2"
    );
    let mut stmt = conn.prepare(&sql)?;

    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let offset = i64::try_from(offset).unwrap_or(i64::MAX);
    let rows = match search {
        Some(term) => stmt
            .query_map(params![limit, offset, like_pattern(term)], DocumentRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?,
        None => stmt
            .query_map(params![limit, offset], DocumentRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?,
    };

    rows.into_iter().map(document_from_row).collect()
}

/// The `limit` most recently created documents.
pub fn recent_documents(conn: &Connection, limit: u64) -> Result<Vec<Document>, DatabaseError> {
    list_documents(conn, None, limit, 0)
}

// Internal row type for Document mapping
struct DocumentRow {
    id: String,
    register_number: String,
    sender_name: String,
    opd_name: String,
    letter_number: String,
    letter_subject: String,
    receiver_name: String,
    incoming_date: String,
    status: String,
    department: String,
    update_date: String,
    notes: Option<String>,
    created_at: String,
    updated_at: String,
}

impl DocumentRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            register_number: row.get(1)?,
            sender_name: row.get(2)?,
            opd_name: row.get(3)?,
            letter_number: row.get(4)?,
            letter_subject: row.get(5)?,
            receiver_name: row.get(6)?,
            incoming_date: row.get(7)?,
            status: row.get(8)?,
            department: row.get(9)?,
            update_date: row.get(10)?,
            notes: row.get(11)?,
            created_at: row.get(12)?,
            updated_at: row.get(13)?,
        })
    }
}

fn parse_stored_date(field: &str, value: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| DatabaseError::InvalidValue {
        field: field.into(),
        value: value.into(),
    })
}

fn parse_stored_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| DatabaseError::InvalidValue {
            field: field.into(),
            value: value.into(),
        })
}

fn document_from_row(row: DocumentRow) -> Result<Document, DatabaseError> {
    Ok(Document {
        id: Uuid::parse_str(&row.id).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        register_number: row.register_number,
        sender_name: row.sender_name,
        opd_name: row.opd_name,
        letter_number: row.letter_number,
        letter_subject: row.letter_subject,
        receiver_name: row.receiver_name,
        incoming_date: parse_stored_date("incoming_date", &row.incoming_date)?,
        status: DocumentStatus::from_str(&row.status)?,
        department: Department::from_str(&row.department)?,
        update_date: parse_stored_date("update_date", &row.update_date)?,
        notes: row.notes,
        created_at: parse_stored_timestamp("created_at", &row.created_at)?,
        updated_at: parse_stored_timestamp("updated_at", &row.updated_at)?,
    })
}
