//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Column widths of the `employees` table
const NAME_MAX_LEN: usize = 30;
const EMAIL_MAX_LEN: usize = 50;
const PASSWORD_MAX_LEN: usize = 128;

/// Validate a first or last name
pub fn validate_name(field: &str, name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err(format!("{} is required", field));
    }

    if name.chars().count() > NAME_MAX_LEN {
        return Err(format!(
            "{} must be at most {} characters long",
            field, NAME_MAX_LEN
        ));
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > EMAIL_MAX_LEN {
        return Err(format!(
            "Email must be at most {} characters long",
            EMAIL_MAX_LEN
        ));
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

/// Validate password (presence and upper bound only)
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() > PASSWORD_MAX_LEN {
        return Err(format!(
            "Password must be at most {} characters long",
            PASSWORD_MAX_LEN
        ));
    }

    Ok(())
}
