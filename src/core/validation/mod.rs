//! Validation and filtering for the user detail form
//!
//! Form payloads are flat JSON objects keyed by field path (`"company.name"`
//! included). Each configured field is filtered first, then validated; all
//! failures are collected instead of stopping at the first.

pub mod filters;
pub mod validators;

use crate::core::error::{FieldValidationError, ValidationError};
use crate::core::user::{Company, User, UserId};
use filters::FieldFilter;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validators::FieldValidator;

struct FieldRule {
    field: &'static str,
    filters: Vec<FieldFilter>,
    validators: Vec<FieldValidator>,
}

/// Ordered set of per-field rules for one form
#[derive(Default)]
pub struct FormValidationConfig {
    rules: Vec<FieldRule>,
}

impl FormValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field with its filters and validators
    pub fn field(
        mut self,
        field: &'static str,
        filters: Vec<FieldFilter>,
        validators: Vec<FieldValidator>,
    ) -> Self {
        self.rules.push(FieldRule {
            field,
            filters,
            validators,
        });
        self
    }

    /// Filter then validate every configured field of `payload`
    ///
    /// Unconfigured keys are dropped from the result.
    pub fn validate_and_filter(&self, payload: Value) -> Result<Value, ValidationError> {
        let Value::Object(mut input) = payload else {
            return Err(ValidationError::InvalidJson {
                message: "expected a JSON object".to_string(),
            });
        };

        let mut output = Map::new();
        let mut errors = Vec::new();

        for rule in &self.rules {
            let raw = input.remove(rule.field).unwrap_or(Value::Null);
            let value = rule
                .filters
                .iter()
                .fold(raw, |value, filter| filter(rule.field, value));

            for validator in &rule.validators {
                if let Err(message) = validator(rule.field, &value) {
                    errors.push(FieldValidationError {
                        field: rule.field.to_string(),
                        message,
                    });
                }
            }
            output.insert(rule.field.to_string(), value);
        }

        if errors.is_empty() {
            Ok(Value::Object(output))
        } else {
            Err(ValidationError::FieldErrors(errors))
        }
    }
}

/// Rules of the user detail form
pub fn user_form() -> FormValidationConfig {
    use filters::{empty_as_null, trim};
    use validators::{email, optional, required, string, url_or_empty};

    FormValidationConfig::new()
        .field(
            "name",
            vec![Box::new(trim())],
            vec![Box::new(string()), Box::new(required("Name is required"))],
        )
        .field(
            "username",
            vec![Box::new(trim())],
            vec![
                Box::new(string()),
                Box::new(required("Username is required")),
            ],
        )
        .field(
            "email",
            vec![Box::new(trim())],
            vec![
                Box::new(string()),
                Box::new(required("Email is required")),
                Box::new(email()),
            ],
        )
        .field(
            "phone",
            vec![Box::new(trim()), Box::new(empty_as_null())],
            vec![Box::new(string()), Box::new(optional())],
        )
        .field(
            "website",
            vec![Box::new(trim())],
            vec![Box::new(string()), Box::new(url_or_empty())],
        )
        .field(
            "company.name",
            vec![Box::new(trim()), Box::new(empty_as_null())],
            vec![Box::new(string()), Box::new(optional())],
        )
}

/// A validated user form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    #[serde(rename = "company.name")]
    pub company_name: Option<String>,
}

impl UserDraft {
    /// Validate a raw form payload
    pub fn validate(payload: Value) -> Result<Self, ValidationError> {
        let filtered = user_form().validate_and_filter(payload)?;
        serde_json::from_value(filtered).map_err(|e| ValidationError::InvalidJson {
            message: e.to_string(),
        })
    }

    /// Build a new user carrying `id`
    pub fn into_user(self, id: UserId) -> User {
        let mut user = User::new(id, "");
        self.apply_to(&mut user);
        user
    }

    /// Overwrite the editable fields of `user`, keeping its id and address
    pub fn apply_to(self, user: &mut User) {
        user.name = Some(self.name);
        user.username = Some(self.username);
        user.email = Some(self.email);
        user.phone = self.phone;
        user.website = self.website.filter(|w| !w.is_empty());
        match self.company_name {
            Some(name) => user.company.get_or_insert_with(Company::default).name = name,
            None => user.company = None,
        }
    }
}
