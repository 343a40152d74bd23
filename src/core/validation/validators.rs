//! Reusable field validators
//!
//! Each validator receives the field name and its (already filtered) value.
//! Validators other than `required` let `null` through so they can be
//! combined with `optional` fields.

use serde_json::Value;
use validator::{ValidateEmail, ValidateUrl};

/// Validator signature: field name and value to an error message
pub type FieldValidator = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;

/// Validator: field is required (not null, not an empty string)
pub fn required(
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value {
        Value::Null => Err(message.to_string()),
        Value::String(s) if s.is_empty() => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: field is optional (always valid)
pub fn optional() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, _: &Value| Ok(())
}

/// Validator: value must be a string when present
pub fn string() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Null | Value::String(_) => Ok(()),
        other => Err(format!("'{}' must be a string (got {})", field, other)),
    }
}

/// Validator: string must be a valid email address
pub fn email() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| match value.as_str() {
        Some(s) if !s.validate_email() => Err("Invalid email".to_string()),
        _ => Ok(()),
    }
}

/// Validator: string must be a valid URL, or empty
pub fn url_or_empty() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| match value.as_str() {
        Some(s) if !s.is_empty() && !s.validate_url() => Err("Invalid URL".to_string()),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // === required() ===

    #[test]
    fn test_required_null_value_returns_error() {
        let v = required("Name is required");
        assert_eq!(v("name", &json!(null)), Err("Name is required".to_string()));
    }

    #[test]
    fn test_required_empty_string_returns_error() {
        let v = required("Name is required");
        assert!(v("name", &json!("")).is_err());
    }

    #[test]
    fn test_required_string_value_returns_ok() {
        let v = required("Name is required");
        assert!(v("name", &json!("Leanne")).is_ok());
    }

    // === optional() / string() ===

    #[test]
    fn test_optional_always_ok() {
        let v = optional();
        assert!(v("phone", &json!(null)).is_ok());
        assert!(v("phone", &json!(12)).is_ok());
    }

    #[test]
    fn test_string_rejects_numbers() {
        let v = string();
        assert!(v("phone", &json!("1-770")).is_ok());
        assert!(v("phone", &json!(null)).is_ok());
        assert!(v("phone", &json!(1770)).is_err());
    }

    // === email() ===

    #[test]
    fn test_email_accepts_fixture_addresses() {
        let v = email();
        assert!(v("email", &json!("Sincere@april.biz")).is_ok());
        assert!(v("email", &json!("Rey.Padberg@karina.biz")).is_ok());
    }

    #[test]
    fn test_email_rejects_garbage() {
        let v = email();
        assert_eq!(
            v("email", &json!("not-an-email")),
            Err("Invalid email".to_string())
        );
    }

    #[test]
    fn test_email_null_passthrough() {
        let v = email();
        assert!(v("email", &json!(null)).is_ok());
    }

    // === url_or_empty() ===

    #[test]
    fn test_url_or_empty() {
        let v = url_or_empty();
        assert!(v("website", &json!("")).is_ok());
        assert!(v("website", &json!("https://hildegard.org")).is_ok());
        assert_eq!(
            v("website", &json!("hildegard org")),
            Err("Invalid URL".to_string())
        );
    }
}
