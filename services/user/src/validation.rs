//! Input validation utilities
//!
//! The identity service rejects malformed emails and phone numbers with
//! opaque upstream errors; checking here turns those into validation
//! failures before anything is written.

use regex::Regex;
use std::sync::OnceLock;

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password
///
/// Only length is checked; the password is forwarded to the identity
/// service, never stored or verified here.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate phone number
///
/// The identity service only accepts international format (+ followed by
/// country code and subscriber number).
pub fn validate_phone_number(phone_number: &str) -> Result<(), String> {
    if phone_number.is_empty() {
        return Err("Phone number is required".to_string());
    }

    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = PHONE_REGEX
        .get_or_init(|| Regex::new(r"^\+[1-9]\d{7,14}$").expect("Failed to compile phone regex"));

    if !regex.is_match(phone_number) {
        return Err("Phone number must be in international format, e.g. +14155550101".to_string());
    }

    Ok(())
}
