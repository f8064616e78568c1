//! Login and signup forms.

use secrecy::{ExposeSecret, SecretString};

use digital_market_core::Email;

use super::{Field, FormError, FormErrors};

/// Login form input.
#[derive(Debug)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

impl LoginForm {
    /// Both fields must be filled in.
    ///
    /// # Errors
    ///
    /// Returns the failed checks.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.check(!self.email.is_empty(), FormError::Required(Field::Email));
        errors.check(
            !self.password.expose_secret().is_empty(),
            FormError::Required(Field::Password),
        );
        errors.into_result()
    }
}

/// Signup form input.
#[derive(Debug)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl SignupForm {
    /// # Errors
    ///
    /// Returns the failed checks: a blank name, an email that does not
    /// look like an address, an empty password, or a confirmation that
    /// differs from the password.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.check(!self.name.trim().is_empty(), FormError::Required(Field::Name));

        if self.email.is_empty() {
            errors.0.push(FormError::Required(Field::Email));
        } else {
            errors.check(Email::parse(&self.email).is_ok(), FormError::InvalidEmail);
        }

        let password = self.password.expose_secret();
        errors.check(!password.is_empty(), FormError::Required(Field::Password));
        errors.check(
            password == self.confirm_password.expose_secret(),
            FormError::PasswordMismatch,
        );
        errors.into_result()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn signup(name: &str, email: &str, password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            name: name.to_owned(),
            email: email.to_owned(),
            password: SecretString::from(password),
            confirm_password: SecretString::from(confirm),
        }
    }

    #[test]
    fn test_login_requires_both_fields() {
        let form = LoginForm {
            email: String::new(),
            password: SecretString::from(""),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.has(Field::Email));
        assert!(errors.has(Field::Password));
    }

    #[test]
    fn test_signup_valid() {
        assert!(signup("Ada", "ada@example.com", "pw", "pw").validate().is_ok());
    }

    #[test]
    fn test_signup_password_mismatch() {
        let errors = signup("Ada", "ada@example.com", "pw", "pW")
            .validate()
            .unwrap_err();
        assert_eq!(errors.as_slice(), [FormError::PasswordMismatch]);
        assert_eq!(errors.to_string(), "Passwords do not match");
    }

    #[test]
    fn test_signup_bad_email_and_blank_name() {
        let errors = signup("  ", "ada", "pw", "pw").validate().unwrap_err();
        assert_eq!(
            errors.as_slice(),
            [FormError::Required(Field::Name), FormError::InvalidEmail]
        );
    }

    #[test]
    fn test_debug_hides_passwords() {
        let rendered = format!("{:?}", signup("Ada", "ada@example.com", "hunter2", "hunter2"));
        assert!(!rendered.contains("hunter2"));
    }
}
