//! Shared fixtures for unit tests.

use crate::models::enums::{Department, DocumentStatus};
use crate::models::DocumentInput;

/// A complete, valid payload for `register_number` from `sender`.
pub fn input(register_number: &str, sender: &str, status: DocumentStatus) -> DocumentInput {
    DocumentInput {
        register_number: Some(register_number.into()),
        sender_name: Some(sender.into()),
        opd_name: Some("Dinas Kesehatan Kota".into()),
        letter_number: Some("001/DKK/2024".into()),
        letter_subject: Some("Permohonan Penambahan Tenaga Medis".into()),
        receiver_name: Some("Kepala Bagian Kepegawaian".into()),
        incoming_date: Some("2024-01-15".into()),
        status: Some(status.as_str().into()),
        department: Some(Department::Personnel.as_str().into()),
        update_date: Some("2024-01-17".into()),
        notes: Some("Sedang dalam proses verifikasi.".into()),
    }
}
