//! Checkout payment form.
//!
//! Card details are only checked for shape; nothing is charged.

use std::fmt;

use super::{Field, FormError, FormErrors};

/// Minimum trimmed length of the card number.
pub const MIN_CARD_NUMBER_LEN: usize = 15;

/// Minimum trimmed length of the CVC.
pub const MIN_CVC_LEN: usize = 3;

/// Payment details entered at checkout.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PaymentForm {
    pub name: String,
    pub email: String,
    pub card_number: String,
    pub card_expiry: String,
    pub card_cvc: String,
}

impl PaymentForm {
    /// Check the form.
    ///
    /// Lengths count characters after trimming, spaces inside the card
    /// number included.
    ///
    /// # Errors
    ///
    /// Returns the failed checks.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.check(!self.name.trim().is_empty(), FormError::Required(Field::Name));
        errors.check(self.email.contains('@'), FormError::InvalidEmail);
        errors.check(
            self.card_number.trim().chars().count() >= MIN_CARD_NUMBER_LEN,
            FormError::TooShort {
                field: Field::CardNumber,
                min: MIN_CARD_NUMBER_LEN,
            },
        );
        errors.check(
            !self.card_expiry.trim().is_empty(),
            FormError::Required(Field::CardExpiry),
        );
        errors.check(
            self.card_cvc.trim().chars().count() >= MIN_CVC_LEN,
            FormError::TooShort {
                field: Field::CardCvc,
                min: MIN_CVC_LEN,
            },
        );
        errors.into_result()
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl fmt::Debug for PaymentForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("card_number", &"[REDACTED]")
            .field("card_expiry", &self.card_expiry)
            .field("card_cvc", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid() -> PaymentForm {
        PaymentForm {
            name: "Ada Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            card_number: "4242 4242 4242 4242".to_owned(),
            card_expiry: "12/30".to_owned(),
            card_cvc: "123".to_owned(),
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(valid().is_valid());
    }

    #[test]
    fn test_empty_form_fails_every_field() {
        let errors = PaymentForm::default().validate().unwrap_err();
        for field in [
            Field::Name,
            Field::Email,
            Field::CardNumber,
            Field::CardExpiry,
            Field::CardCvc,
        ] {
            assert!(errors.has(field), "{field} should fail");
        }
    }

    #[test]
    fn test_card_number_length_is_trimmed() {
        let mut form = valid();
        form.card_number = "   12345678901234   ".to_owned();
        assert!(form.validate().unwrap_err().has(Field::CardNumber));
        form.card_number = "123456789012345".to_owned();
        assert!(form.is_valid());
    }

    #[test]
    fn test_inner_spaces_count() {
        let mut form = valid();
        form.card_number = "1234 5678 9012".to_owned();
        assert_eq!(form.card_number.chars().count(), 14);
        assert!(!form.is_valid());
        form.card_number = "1234 5678 90123".to_owned();
        assert!(form.is_valid());
    }

    #[test]
    fn test_whitespace_only_name_and_short_cvc() {
        let mut form = valid();
        form.name = "   ".to_owned();
        form.card_cvc = " 12 ".to_owned();
        let errors = form.validate().unwrap_err();
        assert!(errors.has(Field::Name));
        assert!(errors.has(Field::CardCvc));
        assert_eq!(errors.as_slice().len(), 2);
    }

    #[test]
    fn test_debug_redacts_card() {
        let rendered = format!("{:?}", valid());
        assert!(!rendered.contains("4242"));
        assert!(!rendered.contains("123\""));
    }
}
