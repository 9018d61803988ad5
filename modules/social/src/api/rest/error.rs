use std::convert::Infallible;

use axum::{
    extract::{rejection::JsonRejection, FromRequestParts},
    http::{request::Parts, StatusCode},
};
use tracing::{error, warn};

use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::domain::error::DomainError;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request details copied into every Problem body.
#[derive(Debug, Clone, Default)]
pub struct ProblemCtx {
    pub instance: String,
    pub request_id: Option<String>,
}

impl<S: Send + Sync> FromRequestParts<S> for ProblemCtx {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let request_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        Ok(Self {
            instance: parts.uri.path().to_owned(),
            request_id,
        })
    }
}

impl ProblemCtx {
    fn problem(&self, status: StatusCode, code: &str, detail: impl Into<String>) -> ProblemResponse {
        Problem::new(status, detail)
            .with_code(code)
            .with_instance(self.instance.clone())
            .with_request_id(self.request_id.clone())
            .into()
    }
}

/// Map a domain error to an RFC 9457 response.
pub fn map_domain_error(e: &DomainError, ctx: &ProblemCtx) -> ProblemResponse {
    let (status, code) = match e {
        DomainError::UserNotFound { .. } | DomainError::UsernameNotFound { .. } => {
            (StatusCode::NOT_FOUND, "USER_NOT_FOUND")
        }
        DomainError::PostNotFound { .. } => (StatusCode::NOT_FOUND, "POST_NOT_FOUND"),
        DomainError::CommentNotFound { .. } => (StatusCode::NOT_FOUND, "COMMENT_NOT_FOUND"),
        DomainError::DevRoutesDisabled => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        DomainError::EmailAlreadyExists { .. } => (StatusCode::CONFLICT, "EMAIL_ALREADY_EXISTS"),
        DomainError::UsernameTaken { .. } => (StatusCode::CONFLICT, "USERNAME_TAKEN"),
        DomainError::RenameCooldownActive { .. } => {
            (StatusCode::FORBIDDEN, "RENAME_COOLDOWN_ACTIVE")
        }
        DomainError::InvalidEmail { .. } => (StatusCode::BAD_REQUEST, "INVALID_EMAIL"),
        DomainError::InvalidPassword { .. } => (StatusCode::BAD_REQUEST, "INVALID_PASSWORD"),
        DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        DomainError::DataIntegrityViolation { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "DATA_INTEGRITY_VIOLATION")
        }
        DomainError::InternalInconsistency { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_INCONSISTENCY")
        }
        DomainError::Database { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
    };

    if e.is_fatal() {
        error!(
            error = %e,
            code,
            instance = %ctx.instance,
            request_id = ctx.request_id.as_deref().unwrap_or("n/a"),
            "request failed"
        );
        // Internals stay in the log.
        return ctx.problem(status, code, "An internal error occurred");
    }

    ctx.problem(status, code, e.to_string())
}

/// Map a malformed JSON body to a 400 Problem.
pub fn map_json_rejection(rejection: &JsonRejection, ctx: &ProblemCtx) -> ProblemResponse {
    warn!(error = %rejection.body_text(), instance = %ctx.instance, "rejected request body");
    ctx.problem(
        StatusCode::BAD_REQUEST,
        "INVALID_BODY",
        rejection.body_text(),
    )
}
