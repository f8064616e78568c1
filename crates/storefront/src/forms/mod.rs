//! Local form validation.
//!
//! Forms are checked before any service call. Validation reports every
//! failing field at once so the front end can show them together.

mod auth;
mod payment;

use std::fmt;

use thiserror::Error;

pub use auth::{LoginForm, SignupForm};
pub use payment::PaymentForm;

/// A form field, named for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
    CardNumber,
    CardExpiry,
    CardCvc,
}

impl Field {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::ConfirmPassword => "Password confirmation",
            Self::CardNumber => "Card number",
            Self::CardExpiry => "Expiry date",
            Self::CardCvc => "CVC",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One failed field check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(Field),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("{field} must be at least {min} characters")]
    TooShort { field: Field, min: usize },
}

impl FormError {
    /// The field this error belongs to.
    #[must_use]
    pub const fn field(&self) -> Field {
        match self {
            Self::Required(field) | Self::TooShort { field, .. } => *field,
            Self::InvalidEmail => Field::Email,
            Self::PasswordMismatch => Field::ConfirmPassword,
        }
    }
}

/// Every failed check of one validation pass, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<FormError>);

impl FormErrors {
    #[must_use]
    pub fn as_slice(&self) -> &[FormError] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `field` failed.
    #[must_use]
    pub fn has(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field() == field)
    }

    fn check(&mut self, ok: bool, error: FormError) {
        if !ok {
            self.0.push(error);
        }
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_join_for_display() {
        let mut errors = FormErrors::default();
        errors.check(false, FormError::Required(Field::Name));
        errors.check(true, FormError::InvalidEmail);
        errors.check(false, FormError::PasswordMismatch);
        assert_eq!(errors.to_string(), "Name is required; Passwords do not match");
        assert!(errors.has(Field::ConfirmPassword));
        assert!(!errors.has(Field::Email));
    }

    #[test]
    fn test_empty_errors_are_ok() {
        assert!(FormErrors::default().into_result().is_ok());
    }
}
