//! Store error classification.

use sea_orm::{DbErr, SqlErr};

use crate::domain::repo::StoreError;

/// Detects a UNIQUE constraint violation in a SeaORM error.
pub fn is_unique_violation(err: &DbErr) -> bool {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return true;
    }
    // Drivers that don't surface a structured error still name the constraint.
    let msg = err.to_string().to_lowercase();
    msg.contains("unique constraint") || msg.contains("duplicate key")
}

/// Classify a write failure for the domain layer.
pub fn into_store_error(err: DbErr) -> StoreError {
    if is_unique_violation(&err) {
        StoreError::UniqueViolation(err.to_string())
    } else {
        StoreError::Other(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    #[test]
    fn falls_back_to_message_matching() {
        let err = DbErr::Exec(RuntimeErr::Internal(
            "UNIQUE constraint failed: users.username".to_string(),
        ));
        assert!(is_unique_violation(&err));
        assert!(matches!(into_store_error(err), StoreError::UniqueViolation(_)));
    }

    #[test]
    fn other_errors_pass_through() {
        let err = DbErr::Custom("connection reset".to_string());
        assert!(!is_unique_violation(&err));
        assert!(matches!(into_store_error(err), StoreError::Other(_)));
    }
}
