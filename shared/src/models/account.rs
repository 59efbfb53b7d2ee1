//! Account, billing and security settings forms

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{validate_card_cvc, validate_card_expiry, validate_card_number};

/// Profile data shown on the account settings form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct AccountData {
    #[validate(length(min = 2, message = "Name must be at least 2 characters."))]
    pub display_name: String,
    #[validate(email(message = "Invalid email address."))]
    pub email: String,
    #[serde(default)]
    pub bio: String,
    /// URL of the current avatar image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl AccountData {
    /// Two-letter avatar fallback: first and last character of the display name
    pub fn fallback_initials(&self) -> String {
        let chars: Vec<char> = self.display_name.chars().collect();
        if chars.len() < 2 {
            return String::new();
        }
        let mut initials = String::new();
        initials.push(chars[0]);
        initials.push(chars[chars.len() - 1]);
        initials.to_uppercase()
    }
}

/// New avatar image attached to an account update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Payment card form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct BillingData {
    #[validate(
        length(min = 16, message = "Card number must be at least 16 characters."),
        custom = "validate_card_number"
    )]
    pub card_number: String,
    #[validate(
        length(min = 5, message = "Invalid expiry date."),
        custom = "validate_card_expiry"
    )]
    pub card_expiry: String,
    #[validate(
        length(min = 3, message = "Invalid CVC."),
        custom = "validate_card_cvc"
    )]
    pub card_cvc: String,
    #[validate(length(min = 5, message = "Invalid zip code."))]
    pub card_zip: String,
}

/// Password change form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct SecurityData {
    #[validate(length(min = 6, message = "Password must be at least 6 characters."))]
    pub current_password: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters."))]
    pub new_password: String,
    #[validate(
        length(min = 6, message = "Password must be at least 6 characters."),
        must_match(other = "new_password", message = "Passwords don't match")
    )]
    pub confirm_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldErrors;

    fn errors_of<T: Validate>(form: &T) -> FieldErrors {
        match form.validate() {
            Ok(()) => FieldErrors::default(),
            Err(e) => FieldErrors::from(&e),
        }
    }

    #[test]
    fn test_fallback_initials() {
        let mut account = AccountData {
            display_name: "jane doe".to_string(),
            ..Default::default()
        };
        assert_eq!(account.fallback_initials(), "JE");

        account.display_name = "J".to_string();
        assert_eq!(account.fallback_initials(), "");
    }

    #[test]
    fn test_account_validation() {
        let account = AccountData {
            display_name: "A".to_string(),
            email: "not-an-email".to_string(),
            bio: String::new(),
            avatar: None,
        };
        let errors = errors_of(&account);
        assert_eq!(errors.get("display_name"), Some("Name must be at least 2 characters."));
        assert_eq!(errors.get("email"), Some("Invalid email address."));
        assert!(errors.get("bio").is_none());
    }

    #[test]
    fn test_billing_rejects_bad_luhn() {
        let billing = BillingData {
            card_number: "4242 4242 4242 4241".to_string(),
            card_expiry: "12/99".to_string(),
            card_cvc: "123".to_string(),
            card_zip: "94105".to_string(),
        };
        let errors = errors_of(&billing);
        assert_eq!(errors.get("card_number"), Some("Invalid card number."));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_billing_valid() {
        let billing = BillingData {
            card_number: "4242 4242 4242 4242".to_string(),
            card_expiry: "12/99".to_string(),
            card_cvc: "1234".to_string(),
            card_zip: "94105".to_string(),
        };
        assert!(billing.validate().is_ok());
    }

    #[test]
    fn test_security_passwords_must_match() {
        let security = SecurityData {
            current_password: "hunter22".to_string(),
            new_password: "correct horse".to_string(),
            confirm_password: "correct h0rse".to_string(),
        };
        let errors = errors_of(&security);
        assert_eq!(errors.get("confirm_password"), Some("Passwords don't match"));
    }
}
