use regex::Regex;
use std::sync::OnceLock;

use crate::shared::errors::AppError;

static KEY_PATTERN: OnceLock<Regex> = OnceLock::new();

fn key_pattern() -> &'static Regex {
    KEY_PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_\-\.]*$").expect("business key pattern is valid")
    })
}

pub struct Validator;

impl Validator {
    /// Business keys (curp, nc, rfc, ids) end up in URL paths, so they must be
    /// non-empty and path-safe.
    pub fn validate_key(field: &str, value: &str) -> Result<(), AppError> {
        if value.trim().is_empty() {
            return Err(AppError::ValidationError(format!(
                "{} cannot be empty",
                field
            )));
        }
        if value.len() > 64 {
            return Err(AppError::ValidationError(format!(
                "{} too long (max 64 characters)",
                field
            )));
        }
        if !key_pattern().is_match(value) {
            return Err(AppError::ValidationError(format!(
                "{} contains invalid characters",
                field
            )));
        }
        Ok(())
    }

    /// Every embedded `{id}` reference must carry a usable key.
    pub fn validate_reference(field: &str, value: &str) -> Result<(), AppError> {
        Self::validate_key(field, value)
    }

    pub fn validate_grade(value: f64) -> Result<(), AppError> {
        if !value.is_finite() {
            return Err(AppError::ValidationError(
                "cal must be a finite number".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_threshold(value: f64) -> Result<(), AppError> {
        if !value.is_finite() {
            return Err(AppError::ValidationError(
                "umbral must be a finite number".to_string(),
            ));
        }
        Ok(())
    }
}
