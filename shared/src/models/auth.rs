//! Sign-in, registration and contact forms

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Sign-in form posted to `/api/auth/login`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct LoginData {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Sign-up form posted to `/api/auth/register`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct RegisterData {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords don't match"))]
    pub confirm_password: String,
    #[validate(length(min = 4, message = "Display name must be at least 4 characters."))]
    pub display_name: String,
}

/// Contact-us message
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct ContactMessage {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldErrors;

    #[test]
    fn test_login_rules() {
        let form = LoginData {
            email: "not-an-email".to_string(),
            password: "12345".to_string(),
        };
        let errors = FieldErrors::from(&form.validate().unwrap_err());
        assert_eq!(errors.get("email"), Some("Invalid email address"));
        assert_eq!(errors.get("password"), Some("Password must be at least 6 characters"));

        let form = LoginData {
            email: "founder@example.com".to_string(),
            password: "123456".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_register_mismatched_passwords() {
        let form = RegisterData {
            email: "founder@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret2".to_string(),
            display_name: "Founder".to_string(),
        };
        let errors = FieldErrors::from(&form.validate().unwrap_err());
        assert_eq!(errors.get("confirm_password"), Some("Passwords don't match"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_register_short_display_name() {
        let form = RegisterData {
            email: "founder@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            display_name: "Bo".to_string(),
        };
        let errors = FieldErrors::from(&form.validate().unwrap_err());
        assert_eq!(
            errors.get("display_name"),
            Some("Display name must be at least 4 characters.")
        );
    }

    #[test]
    fn test_contact_requires_message() {
        let form = ContactMessage {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: String::new(),
        };
        let errors = FieldErrors::from(&form.validate().unwrap_err());
        assert_eq!(errors.get("message"), Some("Message is required"));
    }
}
