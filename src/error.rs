//! Application Errors
//!
//! Everything a command can fail with. Store failures come from `remote`.

use thiserror::Error;

use crate::remote::StoreError;

/// Message shown under an invalid form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// DOM id of the input
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

/// Changes that need the caller to own the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonAction {
    Edit,
    Delete,
}

impl PersonAction {
    pub fn denied_message(self) -> &'static str {
        match self {
            PersonAction::Edit => "You can't edit other registered users.",
            PersonAction::Delete => "You can't delete other registered users.",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{} field(s) need attention", .0.len())]
    Validation(Vec<FieldError>),

    #[error("{}", .action.denied_message())]
    Unauthorized { action: PersonAction },

    #[error("{what} {id} not found")]
    NotFound { what: &'static str, id: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    /// Field messages of a validation failure; empty for everything else
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            AppError::Validation(errors) => errors,
            _ => &[],
        }
    }

    /// Message for the given field, if any
    pub fn message_for(&self, field: &str) -> Option<&str> {
        field_message(self.field_errors(), field)
    }
}

pub fn field_message<'a>(errors: &'a [FieldError], field: &str) -> Option<&'a str> {
    errors.iter().find(|e| e.field == field).map(|e| e.message.as_str())
}

/// Turn collected field errors into a result
pub fn check_fields(errors: Vec<FieldError>) -> Result<(), AppError> {
    if errors.is_empty() { Ok(()) } else { Err(AppError::Validation(errors)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_message() {
        let err = AppError::Unauthorized { action: PersonAction::Delete };
        assert_eq!(err.to_string(), "You can't delete other registered users.");
    }

    #[test]
    fn test_field_lookup() {
        let err = check_fields(vec![FieldError::new("title", "This field is required")]).unwrap_err();
        assert_eq!(err.message_for("title"), Some("This field is required"));
        assert_eq!(err.message_for("dueDate"), None);
        assert!(check_fields(Vec::new()).is_ok());
    }
}
