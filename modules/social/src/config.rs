use serde::{Deserialize, Serialize};

use crate::domain::rename::DEFAULT_RENAME_COOLDOWN_HOURS;

/// Configuration for the social module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialConfig {
    #[serde(default = "default_rename_cooldown_hours")]
    pub rename_cooldown_hours: u32,
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
    /// Enables destructive development-only endpoints such as `DELETE /comments`.
    #[serde(default)]
    pub dev_routes: bool,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            rename_cooldown_hours: default_rename_cooldown_hours(),
            min_password_length: default_min_password_length(),
            dev_routes: false,
        }
    }
}

fn default_rename_cooldown_hours() -> u32 {
    DEFAULT_RENAME_COOLDOWN_HOURS
}

fn default_min_password_length() -> usize {
    8
}
