use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::clock::format_local;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: {id}")]
    UserNotFound { id: Uuid },

    #[error("User not found: '{username}'")]
    UsernameNotFound { username: String },

    #[error("Post not found: {id}")]
    PostNotFound { id: Uuid },

    #[error("Comment not found: {id}")]
    CommentNotFound { id: Uuid },

    #[error("An account with email '{email}' already exists")]
    EmailAlreadyExists { email: String },

    #[error("Username '{username}' is already taken")]
    UsernameTaken { username: String },

    #[error(
        "This username was last updated at {}. You must wait until {} before updating again.",
        format_local(.last_modified),
        format_local(.cooldown_end)
    )]
    RenameCooldownActive {
        last_modified: DateTime<Utc>,
        cooldown_end: DateTime<Utc>,
    },

    #[error("Username '{username}' is held by {holders} users")]
    DataIntegrityViolation { username: String, holders: u64 },

    #[error("Internal inconsistency: {message}")]
    InternalInconsistency { message: String },

    #[error("Email address is not valid: {email}")]
    InvalidEmail { email: String },

    #[error("Password is not valid. Please choose a password at least {min_len} characters in length.")]
    InvalidPassword { min_len: usize },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Development routes are disabled")]
    DevRoutesDisabled,

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn user_not_found(id: Uuid) -> Self {
        Self::UserNotFound { id }
    }

    pub fn username_not_found(username: impl Into<String>) -> Self {
        Self::UsernameNotFound {
            username: username.into(),
        }
    }

    pub fn post_not_found(id: Uuid) -> Self {
        Self::PostNotFound { id }
    }

    pub fn comment_not_found(id: Uuid) -> Self {
        Self::CommentNotFound { id }
    }

    pub fn email_already_exists(email: impl Into<String>) -> Self {
        Self::EmailAlreadyExists {
            email: email.into(),
        }
    }

    pub fn username_taken(username: impl Into<String>) -> Self {
        Self::UsernameTaken {
            username: username.into(),
        }
    }

    pub fn rename_cooldown_active(
        last_modified: DateTime<Utc>,
        cooldown_end: DateTime<Utc>,
    ) -> Self {
        Self::RenameCooldownActive {
            last_modified,
            cooldown_end,
        }
    }

    pub fn data_integrity_violation(username: impl Into<String>, holders: u64) -> Self {
        Self::DataIntegrityViolation {
            username: username.into(),
            holders,
        }
    }

    pub fn internal_inconsistency(message: impl Into<String>) -> Self {
        Self::InternalInconsistency {
            message: message.into(),
        }
    }

    pub fn invalid_email(email: impl Into<String>) -> Self {
        Self::InvalidEmail {
            email: email.into(),
        }
    }

    pub fn invalid_password(min_len: usize) -> Self {
        Self::InvalidPassword { min_len }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Store or invariant corruption. Callers must log these at error level.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::DataIntegrityViolation { .. }
                | Self::InternalInconsistency { .. }
                | Self::Database { .. }
        )
    }
}
