use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SocialError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl SocialError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for SocialError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        let message = domain_error.to_string();
        match domain_error {
            UserNotFound { .. }
            | UsernameNotFound { .. }
            | PostNotFound { .. }
            | CommentNotFound { .. }
            | DevRoutesDisabled => Self::not_found(message),
            EmailAlreadyExists { .. } | UsernameTaken { .. } => Self::conflict(message),
            RenameCooldownActive { .. } => Self::forbidden(message),
            InvalidEmail { .. } | InvalidPassword { .. } | Validation { .. } => {
                Self::validation(message)
            }
            DataIntegrityViolation { .. } | InternalInconsistency { .. } | Database { .. } => {
                tracing::error!(error = %message, "social: fatal domain error");
                Self::internal()
            }
        }
    }
}
