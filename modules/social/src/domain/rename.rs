//! Username update coordinator.
//!
//! The pre-write uniqueness and cooldown checks are advisory. The UNIQUE
//! constraint on `users.username` is the only serialization point between
//! concurrent renames; a violation reported by the conditional update is
//! surfaced as [`DomainError::UsernameTaken`], the same as the fast-path check.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::contract::model::{RenameOutcome, UsernameChange};
use crate::domain::clock::Clock;
use crate::domain::error::DomainError;
use crate::domain::repo::{StoreError, UsernameStore};

/// Default length of the window after a rename during which further renames are rejected.
pub const DEFAULT_RENAME_COOLDOWN_HOURS: u32 = 24;

#[derive(Clone)]
pub struct RenameCoordinator {
    store: Arc<dyn UsernameStore>,
    clock: Arc<dyn Clock>,
    cooldown: Duration,
}

impl RenameCoordinator {
    pub fn new(store: Arc<dyn UsernameStore>, clock: Arc<dyn Clock>, cooldown: Duration) -> Self {
        Self {
            store,
            clock,
            cooldown,
        }
    }

    #[instrument(
        name = "social.rename.attempt",
        skip(self),
        fields(user_id = %user_id, username = %desired)
    )]
    pub async fn attempt_rename(
        &self,
        user_id: Uuid,
        desired: &str,
    ) -> Result<RenameOutcome, DomainError> {
        if desired.is_empty() {
            return Err(DomainError::validation("username", "must not be empty"));
        }

        let user = self
            .store
            .get_user_by_id(user_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(user_id))?;

        if user.username.as_deref() == Some(desired) {
            debug!("Username unchanged");
            return Ok(RenameOutcome::Unchanged(user));
        }

        let holders = self
            .store
            .count_users_by_username(desired)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        match holders {
            0 => {}
            1 => return Err(DomainError::username_taken(desired)),
            n => return Err(DomainError::data_integrity_violation(desired, n)),
        }

        let now = self.clock.now();
        if let Some(last_modified) = user.username_last_modified_at {
            let cooldown_end = last_modified + self.cooldown;
            if now < cooldown_end {
                debug!(%cooldown_end, "Rename cooldown still active");
                return Err(DomainError::rename_cooldown_active(
                    last_modified,
                    cooldown_end,
                ));
            }
        }

        match self
            .store
            .conditional_update_username(user_id, desired, now)
            .await
        {
            Ok(()) => {}
            Err(StoreError::UniqueViolation(detail)) => {
                warn!(%detail, "Lost username race at write time");
                return Err(DomainError::username_taken(desired));
            }
            Err(StoreError::Other(e)) => return Err(DomainError::database(e.to_string())),
        }

        let confirmed = self
            .store
            .get_user_by_username(desired)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .filter(|u| u.id == user_id)
            .ok_or_else(|| {
                DomainError::internal_inconsistency(format!(
                    "user {user_id} not found under username '{desired}' after update"
                ))
            })?;

        let modified_at = confirmed.username_last_modified_at.ok_or_else(|| {
            DomainError::internal_inconsistency(format!(
                "user {user_id} has no username_last_modified_at after update"
            ))
        })?;

        info!("Username changed");
        Ok(RenameOutcome::Renamed(UsernameChange {
            id: confirmed.id,
            username: desired.to_owned(),
            username_last_modified_at: modified_at,
        }))
    }
}
