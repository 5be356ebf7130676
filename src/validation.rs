//! Write-time validation for document payloads.
//!
//! Turns a raw [`DocumentInput`] into typed [`DocumentFields`]. Every rule
//! runs independently and all violations are reported together, at most
//! one message per field (first failing rule wins: presence, length,
//! format, uniqueness).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::enums::{Department, DocumentStatus};
use crate::models::{DocumentFields, DocumentInput};

/// Upper bound for single-line string fields, counted in characters.
pub const MAX_STRING_LENGTH: usize = 255;

/// Field-level validation failures keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation. The first message recorded for a field is kept.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// A single-field error, e.g. a uniqueness race caught by the index.
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields.keys().copied().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

pub const REGISTER_NUMBER_TAKEN: &str = "This register number already exists.";

/// Trimmed value, `None` when absent or blank.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn required_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    value: &Option<String>,
    max_len: Option<usize>,
) -> Option<String> {
    let Some(text) = present(value) else {
        errors.add(field, format!("{label} is required."));
        return None;
    };
    if let Some(max) = max_len {
        if text.chars().count() > max {
            errors.add(field, format!("{label} may not be greater than {max} characters."));
            return None;
        }
    }
    Some(text.to_string())
}

/// Accepts `YYYY-MM-DD`, or a datetime whose calendar date is kept.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

fn required_date(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    value: &Option<String>,
) -> Option<NaiveDate> {
    let Some(text) = present(value) else {
        errors.add(field, format!("{label} is required."));
        return None;
    };
    let parsed = parse_date(text);
    if parsed.is_none() {
        errors.add(
            field,
            format!("Please provide a valid {}.", label.to_lowercase()),
        );
    }
    parsed
}

fn required_choice<T: FromStr>(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    value: &Option<String>,
) -> Option<T> {
    let Some(text) = present(value) else {
        errors.add(field, format!("{label} is required."));
        return None;
    };
    let parsed = T::from_str(text).ok();
    if parsed.is_none() {
        errors.add(
            field,
            format!("Please select a valid {}.", label.to_lowercase()),
        );
    }
    parsed
}

/// Validate a create/update payload.
///
/// `register_taken` reports whether another document already holds the
/// given register number; callers run it inside the write transaction and
/// exclude the document being updated. A failing lookup aborts with its
/// error (outer `Err`); rule violations come back as the inner `Err`.
pub fn validate_document<F, E>(
    input: &DocumentInput,
    register_taken: F,
) -> Result<Result<DocumentFields, ValidationErrors>, E>
where
    F: FnOnce(&str) -> Result<bool, E>,
{
    let mut errors = ValidationErrors::new();
    let max = Some(MAX_STRING_LENGTH);

    let register_number = required_text(
        &mut errors,
        "register_number",
        "Register Number",
        &input.register_number,
        max,
    );
    let sender_name = required_text(&mut errors, "sender_name", "Sender Name", &input.sender_name, max);
    let opd_name = required_text(&mut errors, "opd_name", "OPD Name", &input.opd_name, max);
    let letter_number =
        required_text(&mut errors, "letter_number", "Letter Number", &input.letter_number, max);
    let letter_subject =
        required_text(&mut errors, "letter_subject", "Letter Subject", &input.letter_subject, None);
    let receiver_name =
        required_text(&mut errors, "receiver_name", "Receiver Name", &input.receiver_name, max);
    let incoming_date =
        required_date(&mut errors, "incoming_date", "Incoming Date", &input.incoming_date);
    let status: Option<DocumentStatus> =
        required_choice(&mut errors, "status", "Status", &input.status);
    let department: Option<Department> =
        required_choice(&mut errors, "department", "Department", &input.department);
    let update_date = required_date(&mut errors, "update_date", "Update Date", &input.update_date);
    let notes = present(&input.notes).map(str::to_string);

    if let Some(number) = register_number.as_deref() {
        if register_taken(number)? {
            errors.add("register_number", REGISTER_NUMBER_TAKEN);
        }
    }

    Ok(match (
        register_number,
        sender_name,
        opd_name,
        letter_number,
        letter_subject,
        receiver_name,
        incoming_date,
        status,
        department,
        update_date,
    ) {
        (
            Some(register_number),
            Some(sender_name),
            Some(opd_name),
            Some(letter_number),
            Some(letter_subject),
            Some(receiver_name),
            Some(incoming_date),
            Some(status),
            Some(department),
            Some(update_date),
        ) if errors.is_empty() => Ok(DocumentFields {
            register_number,
            sender_name,
            opd_name,
            letter_number,
            letter_subject,
            receiver_name,
            incoming_date,
            status,
            department,
            update_date,
            notes,
        }),
        _ => Err(errors),
    })
}

/// Validate the public tracking lookup term.
pub fn validate_register_lookup(value: Option<&str>) -> Result<String, ValidationErrors> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(term) => Ok(term.to_string()),
        None => Err(ValidationErrors::single(
            "register_number",
            "Register Number is required.",
        )),
    }
}
