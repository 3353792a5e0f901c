use serde::Serialize;

use crate::models::wire;

/// A client-side validation failure attached to a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Collects `Option<String>` validator results under a field name.
#[derive(Debug, Default)]
pub struct Checks(Vec<FieldError>);

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, field: &str, result: Option<String>) -> &mut Self {
        if let Some(message) = result {
            self.0.push(FieldError::new(field, message));
        }
        self
    }

    pub fn finish(self) -> Vec<FieldError> {
        self.0
    }
}

/// Validate an email: must contain '@' and '.', max 254 chars.
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Email is required".to_string());
    }
    if trimmed.len() > 254 {
        return Some("Email must be at most 254 characters".to_string());
    }
    if !trimmed.contains('@') || !trimmed.contains('.') {
        return Some("Email must be a valid address (contain '@' and '.')".to_string());
    }
    None
}

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

pub fn validate_positive(value: i64, field_name: &str) -> Option<String> {
    if value <= 0 {
        return Some(format!("{field_name} must be a positive number"));
    }
    None
}

/// Meeting durations are whole quarters of an hour, at least 15 minutes.
pub fn validate_duration(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some("Duration is required".to_string());
    }
    match trimmed.parse::<i64>() {
        Ok(minutes) if minutes < 15 => Some("Duration must be at least 15 minutes".to_string()),
        Ok(minutes) if minutes % 15 != 0 => {
            Some("Duration must be a multiple of 15 minutes".to_string())
        }
        Ok(_) => None,
        Err(_) => Some("Duration must be a whole number of minutes".to_string()),
    }
}

pub fn validate_datetime(raw: &str, field_name: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if wire::parse_datetime(trimmed).is_none() {
        return Some(format!("{field_name} must be a valid date and time"));
    }
    None
}

/// An empty value is fine; anything else must parse as a calendar date.
pub fn validate_optional_date(raw: &str, field_name: &str) -> Option<String> {
    let trimmed = raw.trim();
    if !trimmed.is_empty() && wire::parse_date(trimmed).is_none() {
        return Some(format!("{field_name} must be a valid date (YYYY-MM-DD)"));
    }
    None
}
