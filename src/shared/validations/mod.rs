//! Field-level validators shared by the service DTOs and the HTTP layer.
//!
//! Each function has the signature `validator` expects for
//! `#[validate(custom(function = "..."))]`.

use std::borrow::Cow;

use rust_decimal::Decimal;
use validator::ValidationError;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("blank", "must not be empty"));
    }
    Ok(())
}

/// Non-empty and containing `@`. Deliberately looser than RFC 5322.
pub fn validate_email_shape(value: &str) -> Result<(), ValidationError> {
    validate_not_blank(value)?;
    if !value.contains('@') {
        return Err(error("email", "must contain '@'"));
    }
    Ok(())
}

/// Empty is allowed; anything else must look like an email.
pub fn validate_optional_email(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    validate_email_shape(value)
}

pub fn validate_non_negative_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(error("negative", "must not be negative"));
    }
    Ok(())
}

pub fn validate_power_kw<T: std::borrow::Borrow<f64>>(value: T) -> Result<(), ValidationError> {
    let value: &f64 = value.borrow();
    if !value.is_finite() || *value < 0.0 {
        return Err(error("power", "must be a non-negative number"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_are_rejected() {
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("Station A").is_ok());
    }

    #[test]
    fn email_needs_an_at_sign() {
        assert!(validate_email_shape("john.example.com").is_err());
        assert!(validate_email_shape("").is_err());
        assert!(validate_email_shape("john@example.com").is_ok());
    }

    #[test]
    fn optional_email_accepts_empty() {
        assert!(validate_optional_email("").is_ok());
        assert!(validate_optional_email("nope").is_err());
    }

    #[test]
    fn decimals_and_power_must_be_non_negative() {
        assert!(validate_non_negative_decimal(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative_decimal(&Decimal::new(-1, 2)).is_err());
        assert!(validate_power_kw(&0.0).is_ok());
        assert!(validate_power_kw(&-3.5).is_err());
        assert!(validate_power_kw(&f64::NAN).is_err());
    }
}
