//! Validation utilities for the Startup Planner client
//!
//! Form structs declare their rules with `validator` derives; this module
//! holds the custom rules those derives call and the conversion of
//! `validator` output into per-field messages for display.

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

// ============================================================================
// Field errors
// ============================================================================

/// First error message per field, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keep only the listed fields
    pub fn retain_fields(&mut self, fields: &[&str]) {
        self.0.retain(|k, _| fields.contains(&k.as_str()));
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut out = FieldErrors::default();
        for (field, list) in errors.field_errors() {
            if let Some(first) = list.first() {
                let message = first
                    .message
                    .clone()
                    .unwrap_or_else(|| first.code.clone());
                out.insert(field, message.into_owned());
            }
        }
        out
    }
}

/// A form submission rejected before reaching the network
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Validation failed for {} field(s)", .0.len())]
pub struct ValidationFailure(pub FieldErrors);

impl From<ValidationErrors> for ValidationFailure {
    fn from(errors: ValidationErrors) -> Self {
        ValidationFailure(FieldErrors::from(&errors))
    }
}

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

// ============================================================================
// Business form rules
// ============================================================================

/// Funding must not be negative
pub fn validate_non_negative_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(rule_error("range", "Funding amount must be positive"));
    }
    Ok(())
}

/// Optional date inputs are either empty or `YYYY-MM-DD`
pub fn validate_optional_date(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    parse_date_input(value)
        .map(|_| ())
        .ok_or_else(|| rule_error("date", "Date must be in YYYY-MM-DD format"))
}

/// Parse a date input; empty input means no date
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

// ============================================================================
// Payment card rules
// ============================================================================

/// Luhn checksum over a string of ASCII digits
pub fn luhn_check(digits: &str) -> bool {
    let mut sum = 0u32;
    let mut double = false;
    for c in digits.chars().rev() {
        let Some(mut digit) = c.to_digit(10) else {
            return false;
        };
        if double {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
        double = !double;
    }
    sum % 10 == 0
}

/// Card number: whitespace ignored, 13-19 digits, Luhn-valid
pub fn is_valid_card_number(card_number: &str) -> bool {
    let sanitized: String = card_number.chars().filter(|c| !c.is_whitespace()).collect();
    if sanitized.is_empty() || !sanitized.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    if sanitized.len() < 13 || sanitized.len() > 19 {
        return false;
    }
    luhn_check(&sanitized)
}

/// `MM/YY` expiry not earlier than the month of `today`
pub fn is_valid_expiry_on(expiry: &str, today: NaiveDate) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };
    if month.len() != 2 || year.len() != 2 {
        return false;
    }
    let (Ok(month), Ok(year)) = (month.parse::<u32>(), year.parse::<i32>()) else {
        return false;
    };
    if !(1..=12).contains(&month) {
        return false;
    }
    let current_year = today.year() % 100;
    let current_month = today.month();
    !(year < current_year || (year == current_year && month < current_month))
}

/// CVC is three or four digits
pub fn is_valid_cvc(cvc: &str) -> bool {
    (3..=4).contains(&cvc.len()) && cvc.chars().all(|c| c.is_ascii_digit())
}

pub fn validate_card_number(value: &str) -> Result<(), ValidationError> {
    if is_valid_card_number(value) {
        Ok(())
    } else {
        Err(rule_error("card_number", "Invalid card number."))
    }
}

pub fn validate_card_expiry(value: &str) -> Result<(), ValidationError> {
    if is_valid_expiry_on(value, Utc::now().date_naive()) {
        Ok(())
    } else {
        Err(rule_error("card_expiry", "Invalid expiry date."))
    }
}

pub fn validate_card_cvc(value: &str) -> Result<(), ValidationError> {
    if is_valid_cvc(value) {
        Ok(())
    } else {
        Err(rule_error("card_cvc", "Invalid CVC."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ========================================================================
    // Card number
    // ========================================================================

    #[test]
    fn test_known_card_numbers() {
        assert!(is_valid_card_number("4242424242424242"));
        assert!(is_valid_card_number("4242 4242 4242 4242"));
        assert!(is_valid_card_number("378282246310005"));
        assert!(!is_valid_card_number("4242424242424241"));
    }

    #[test]
    fn test_card_number_shape() {
        assert!(!is_valid_card_number(""));
        assert!(!is_valid_card_number("4242-4242-4242-4242"));
        // 12 digits, Luhn-valid
        assert!(!is_valid_card_number("000000000000"));
        // 20 digits, Luhn-valid
        assert!(!is_valid_card_number("00000000000000000000"));
    }

    proptest! {
        #[test]
        fn test_single_digit_change_breaks_luhn(
            body in "[0-9]{15}",
            pos in 0usize..15,
            delta in 1u32..10,
        ) {
            // append the check digit that makes body valid
            let check = (0..10u32)
                .find(|d| luhn_check(&format!("{}{}", body, d)))
                .unwrap();
            let valid = format!("{}{}", body, check);
            prop_assert!(is_valid_card_number(&valid));

            let mut digits: Vec<u32> = valid.chars().map(|c| c.to_digit(10).unwrap()).collect();
            digits[pos] = (digits[pos] + delta) % 10;
            let mutated: String = digits.iter().map(|d| char::from_digit(*d, 10).unwrap()).collect();
            prop_assert!(!luhn_check(&mutated));
        }
    }

    // ========================================================================
    // Expiry and CVC
    // ========================================================================

    #[test]
    fn test_expiry() {
        let today = day(2026, 10, 19);
        assert!(is_valid_expiry_on("10/26", today));
        assert!(is_valid_expiry_on("01/27", today));
        assert!(!is_valid_expiry_on("09/26", today));
        assert!(!is_valid_expiry_on("13/27", today));
        assert!(!is_valid_expiry_on("1/27", today));
        assert!(!is_valid_expiry_on("1027", today));
        assert!(!is_valid_expiry_on("ab/cd", today));
    }

    #[test]
    fn test_cvc() {
        assert!(is_valid_cvc("123"));
        assert!(is_valid_cvc("1234"));
        assert!(!is_valid_cvc("12"));
        assert!(!is_valid_cvc("12a"));
        assert!(!is_valid_cvc("12345"));
    }

    // ========================================================================
    // Business form rules
    // ========================================================================

    #[test]
    fn test_non_negative_amount() {
        assert!(validate_non_negative_amount(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative_amount(&Decimal::new(1050, 2)).is_ok());
        let err = validate_non_negative_amount(&Decimal::new(-1, 0)).unwrap_err();
        assert_eq!(err.message.as_deref(), Some("Funding amount must be positive"));
    }

    #[test]
    fn test_optional_date() {
        assert!(validate_optional_date("").is_ok());
        assert!(validate_optional_date("2024-02-29").is_ok());
        assert!(validate_optional_date("2023-02-29").is_err());
        assert!(validate_optional_date("29/02/2024").is_err());
        assert_eq!(parse_date_input(" 2024-01-05 "), Some(day(2024, 1, 5)));
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::default();
        errors.insert("name", "first");
        errors.insert("name", "second");
        errors.insert("industry", "required");
        assert_eq!(errors.get("name"), Some("first"));

        errors.retain_fields(&["industry"]);
        assert_eq!(errors.len(), 1);
        assert!(errors.get("name").is_none());
    }
}
