use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{Department, DocumentStatus};

/// A registered incoming letter as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub register_number: String,
    pub sender_name: String,
    pub opd_name: String,
    pub letter_number: String,
    pub letter_subject: String,
    pub receiver_name: String,
    pub incoming_date: NaiveDate,
    pub status: DocumentStatus,
    pub department: Department,
    pub update_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Assemble a record from validated fields and store-managed metadata.
    pub fn from_fields(
        id: Uuid,
        fields: DocumentFields,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            register_number: fields.register_number,
            sender_name: fields.sender_name,
            opd_name: fields.opd_name,
            letter_number: fields.letter_number,
            letter_subject: fields.letter_subject,
            receiver_name: fields.receiver_name,
            incoming_date: fields.incoming_date,
            status: fields.status,
            department: fields.department,
            update_date: fields.update_date,
            notes: fields.notes,
            created_at,
            updated_at,
        }
    }

    /// The editable part of this record.
    pub fn fields(&self) -> DocumentFields {
        DocumentFields {
            register_number: self.register_number.clone(),
            sender_name: self.sender_name.clone(),
            opd_name: self.opd_name.clone(),
            letter_number: self.letter_number.clone(),
            letter_subject: self.letter_subject.clone(),
            receiver_name: self.receiver_name.clone(),
            incoming_date: self.incoming_date,
            status: self.status,
            department: self.department,
            update_date: self.update_date,
            notes: self.notes.clone(),
        }
    }
}

/// Raw create/update payload as submitted by a form or JSON client.
///
/// Every field is an optional string so that missing values, unknown
/// enum members and malformed dates reach the validator instead of
/// failing deserialization with a single opaque error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentInput {
    pub register_number: Option<String>,
    pub sender_name: Option<String>,
    pub opd_name: Option<String>,
    pub letter_number: Option<String>,
    pub letter_subject: Option<String>,
    pub receiver_name: Option<String>,
    pub incoming_date: Option<String>,
    pub status: Option<String>,
    pub department: Option<String>,
    pub update_date: Option<String>,
    pub notes: Option<String>,
}

impl From<&DocumentFields> for DocumentInput {
    fn from(fields: &DocumentFields) -> Self {
        Self {
            register_number: Some(fields.register_number.clone()),
            sender_name: Some(fields.sender_name.clone()),
            opd_name: Some(fields.opd_name.clone()),
            letter_number: Some(fields.letter_number.clone()),
            letter_subject: Some(fields.letter_subject.clone()),
            receiver_name: Some(fields.receiver_name.clone()),
            incoming_date: Some(fields.incoming_date.format("%Y-%m-%d").to_string()),
            status: Some(fields.status.as_str().to_string()),
            department: Some(fields.department.as_str().to_string()),
            update_date: Some(fields.update_date.format("%Y-%m-%d").to_string()),
            notes: fields.notes.clone(),
        }
    }
}

/// Validated, typed editable fields of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFields {
    pub register_number: String,
    pub sender_name: String,
    pub opd_name: String,
    pub letter_number: String,
    pub letter_subject: String,
    pub receiver_name: String,
    pub incoming_date: NaiveDate,
    pub status: DocumentStatus,
    pub department: Department,
    pub update_date: NaiveDate,
    pub notes: Option<String>,
}
