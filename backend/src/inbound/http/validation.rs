//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    BlankField,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::BlankField => "blank_field",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn blank_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must not be blank"))
        .with_code(ErrorCode::BlankField)
}

/// Require a field to be present, returning a field-scoped error otherwise.
pub(crate) fn require_field(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;

    #[rstest]
    fn missing_field_error_names_the_field() {
        let error = missing_field_error(FieldName::new("email"));
        assert_eq!(error.message(), "missing required field: email");
        assert_eq!(
            error.details(),
            Some(&json!({ "field": "email", "code": "missing_field" })),
        );
    }

    #[rstest]
    fn blank_field_error_names_the_field() {
        let error = blank_field_error(FieldName::new("name"));
        assert_eq!(error.message(), "name must not be blank");
        let details = error.details().expect("details present");
        assert_eq!(details.get("code").and_then(Value::as_str), Some("blank_field"));
    }

    #[rstest]
    fn require_field_passes_through_present_values() {
        let value = require_field(Some("ada@example.com".into()), FieldName::new("email"))
            .expect("value present");
        assert_eq!(value, "ada@example.com");
    }

    #[rstest]
    fn require_field_rejects_absent_values() {
        let error =
            require_field(None, FieldName::new("password")).expect_err("value is absent");
        assert_eq!(error.message(), "missing required field: password");
    }
}
