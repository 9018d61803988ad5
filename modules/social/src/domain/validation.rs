use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::error::DomainError;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").unwrap());

pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if !EMAIL_RE.is_match(email) {
        return Err(DomainError::invalid_email(email));
    }
    Ok(())
}

/// Length is counted in characters, not bytes.
pub fn validate_password(password: &str, min_len: usize) -> Result<(), DomainError> {
    if password.is_empty() || password.chars().count() < min_len {
        return Err(DomainError::invalid_password(min_len));
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), DomainError> {
    if username.is_empty() {
        return Err(DomainError::validation("username", "must not be empty"));
    }
    Ok(())
}

pub fn validate_comment_content(content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::validation("content", "must not be empty"));
    }
    Ok(())
}
