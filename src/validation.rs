//! Form Validation
//!
//! Field rules for the task form and the sign-up form. Messages are keyed by
//! the DOM id of the input they belong to.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{check_fields, AppError, FieldError};
use crate::models::TaskDraft;

pub const CATEGORIES: [&str; 2] = ["Technical Task", "User Story"];
pub const CATEGORY_PLACEHOLDER: &str = "Select a category";

pub const REQUIRED: &str = "This field is required";
pub const INVALID_DATE: &str = "Please use the format YYYY-MM-DD";
pub const CANNOT_BE_EMPTY: &str = "Cannot be empty.";
pub const EMAIL_TAKEN: &str = "Account with this Email already exists.";
pub const EMAIL_INVALID: &str = "Email address is not valid.";
pub const PASSWORDS_DIFFER: &str = "Passwords don't match.";
pub const PRIVACY_REQUIRED: &str = "Please accept the privacy policy.";

const DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

// ========================
// Shared rules
// ========================

pub fn email_is_valid(email: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(email.trim()))
}

pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// `2025-01-31` -> `31/01/2025`; anything unparseable is shown as stored
pub fn format_due_date(raw: &str) -> String {
    parse_due_date(raw)
        .map(|date| date.format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

// ========================
// Task form
// ========================

pub fn validate_task_draft(draft: &TaskDraft) -> Result<(), AppError> {
    let mut errors = Vec::new();

    if draft.title.trim().is_empty() {
        errors.push(FieldError::new("title", REQUIRED));
    }

    if draft.due_date.trim().is_empty() {
        errors.push(FieldError::new("due-date", REQUIRED));
    } else if parse_due_date(&draft.due_date).is_none() {
        errors.push(FieldError::new("due-date", INVALID_DATE));
    }

    let category = draft.category.trim();
    if category.is_empty() || category == CATEGORY_PLACEHOLDER {
        errors.push(FieldError::new("categorySelect", REQUIRED));
    }

    check_fields(errors)
}

// ========================
// Sign-up form
// ========================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub privacy_accepted: bool,
}

/// `email_taken` is looked up by the caller since it needs the store.
pub fn validate_sign_up(form: &SignUpForm, email_taken: bool) -> Result<(), AppError> {
    if email_taken {
        return check_fields(vec![FieldError::new("emailInput", EMAIL_TAKEN)]);
    }
    if form.password != form.confirm_password {
        return check_fields(vec![
            FieldError::new("passwordInput", PASSWORDS_DIFFER),
            FieldError::new("confirmPasswordInput", PASSWORDS_DIFFER),
        ]);
    }

    let mut errors = Vec::new();
    if form.password.is_empty() {
        errors.push(FieldError::new("passwordInput", CANNOT_BE_EMPTY));
    }
    if form.confirm_password.is_empty() {
        errors.push(FieldError::new("confirmPasswordInput", CANNOT_BE_EMPTY));
    }
    if form.name.trim().is_empty() {
        errors.push(FieldError::new("nameInput", CANNOT_BE_EMPTY));
    }
    if form.email.trim().is_empty() {
        errors.push(FieldError::new("emailInput", CANNOT_BE_EMPTY));
    } else if !email_is_valid(&form.email) {
        errors.push(FieldError::new("emailInput", EMAIL_INVALID));
    }
    if !form.privacy_accepted {
        errors.push(FieldError::new("acceptPrivacyPolicy", PRIVACY_REQUIRED));
    }

    check_fields(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> TaskDraft {
        TaskDraft {
            title: "Write spec".into(),
            due_date: "2025-01-01".into(),
            category: "User Story".into(),
            ..TaskDraft::default()
        }
    }

    #[test]
    fn test_email_pattern() {
        assert!(email_is_valid("anna@example.com"));
        assert!(email_is_valid(" ben@join.de "));
        assert!(!email_is_valid("anna@example"));
        assert!(!email_is_valid("anna example@x.de"));
        assert!(!email_is_valid(""));
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate_task_draft(&valid_draft()).is_ok());
    }

    #[test]
    fn test_missing_fields_are_each_reported() {
        let draft = TaskDraft { category: CATEGORY_PLACEHOLDER.into(), ..TaskDraft::default() };
        let err = validate_task_draft(&draft).unwrap_err();
        assert_eq!(err.message_for("title"), Some(REQUIRED));
        assert_eq!(err.message_for("due-date"), Some(REQUIRED));
        assert_eq!(err.message_for("categorySelect"), Some(REQUIRED));
    }

    #[test]
    fn test_due_date_must_be_iso() {
        let draft = TaskDraft { due_date: "01.02.2025".into(), ..valid_draft() };
        let err = validate_task_draft(&draft).unwrap_err();
        assert_eq!(err.message_for("due-date"), Some(INVALID_DATE));
    }

    #[test]
    fn test_format_due_date() {
        assert_eq!(format_due_date("2025-01-31"), "31/01/2025");
        assert_eq!(format_due_date("soon"), "soon");
    }

    #[test]
    fn test_sign_up_rules() {
        let form = SignUpForm {
            name: "Anna Alt".into(),
            email: "anna@example.com".into(),
            password: "pw".into(),
            confirm_password: "pw".into(),
            privacy_accepted: true,
        };
        assert!(validate_sign_up(&form, false).is_ok());

        let err = validate_sign_up(&form, true).unwrap_err();
        assert_eq!(err.message_for("emailInput"), Some(EMAIL_TAKEN));

        let mismatch = SignUpForm { confirm_password: "other".into(), ..form.clone() };
        let err = validate_sign_up(&mismatch, false).unwrap_err();
        assert_eq!(err.message_for("confirmPasswordInput"), Some(PASSWORDS_DIFFER));

        let bad_email = SignUpForm { email: "nope".into(), ..form.clone() };
        let err = validate_sign_up(&bad_email, false).unwrap_err();
        assert_eq!(err.message_for("emailInput"), Some(EMAIL_INVALID));

        let empty = SignUpForm::default();
        let err = validate_sign_up(&empty, false).unwrap_err();
        assert_eq!(err.message_for("nameInput"), Some(CANNOT_BE_EMPTY));
        assert_eq!(err.message_for("passwordInput"), Some(CANNOT_BE_EMPTY));
    }
}
