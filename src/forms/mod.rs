//! Console forms
//!
//! Each form validates its own required/length rules and turns into the
//! backend payload of the matching service. Field errors are reported as a
//! field name → message map, matching the shape the backend uses for its own
//! validation failures.

pub mod admin;
pub mod s3;
pub mod user;

use std::collections::BTreeMap;

use validator::ValidationErrors;

use crate::error::{AppError, AppResult};

/// Field name → first failing rule's message
pub type FieldErrors = BTreeMap<String, String>;

/// Whether a form creates a record or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Flatten validator output, keeping the first message of each field
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect()
}

/// Record `message` for `field` when `value` is blank, replacing any length message
pub(crate) fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), message.to_string());
    }
}

/// Console ids are strings; the backend wants numbers
pub fn parse_id(id: &str) -> AppResult<i64> {
    id.trim()
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("无效的ID: {}", id)))
}

/// Ok when no field failed
pub(crate) fn finish(errors: FieldErrors) -> AppResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_overrides_length_message() {
        let mut errors = FieldErrors::new();
        errors.insert("username".into(), "too short".into());
        require(&mut errors, "username", "  ", "请输入用户名");
        require(&mut errors, "password", "secret", "请输入密码");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors["username"], "请输入用户名");
    }

    #[test]
    fn test_finish() {
        assert!(finish(FieldErrors::new()).is_ok());

        let mut errors = FieldErrors::new();
        errors.insert("bucket".into(), "请输入桶名称!".into());
        assert!(matches!(finish(errors), Err(AppError::Validation(e)) if e.len() == 1));
    }
}
