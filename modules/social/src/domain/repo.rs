use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::contract::model::{Comment, Post, User};

/// Write failures the domain must tell apart.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store rejected the write because of a UNIQUE constraint.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Port consumed by the rename coordinator.
#[async_trait]
pub trait UsernameStore: Send + Sync {
    async fn get_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;

    /// Exact (case-sensitive) match.
    async fn count_users_by_username(&self, username: &str) -> anyhow::Result<u64>;

    /// Single-statement `SET username, username_last_modified_at WHERE id = ?`.
    async fn conditional_update_username(
        &self,
        id: Uuid,
        username: &str,
        modified_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    async fn get_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
}

/// Port for the domain layer: user persistence beyond renames.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
    /// Check uniqueness by email.
    async fn email_exists(&self, email: &str) -> anyhow::Result<bool>;
    /// Insert a fully-formed domain user along with its password hash.
    async fn insert(&self, user: User, password_hash: String) -> Result<(), StoreError>;
}

#[async_trait]
pub trait PostsRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Post>>;
    /// Newest first.
    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Post>>;
    async fn insert(&self, post: Post) -> anyhow::Result<()>;
}

#[async_trait]
pub trait CommentsRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Comment>>;
    /// Oldest first.
    async fn list_all(&self) -> anyhow::Result<Vec<Comment>>;
    /// Oldest first.
    async fn list_by_post(&self, post_id: Uuid) -> anyhow::Result<Vec<Comment>>;
    async fn insert(&self, comment: Comment) -> anyhow::Result<()>;
    /// Remove every comment and its likes. Returns the number of comments deleted.
    async fn delete_all(&self) -> anyhow::Result<u64>;

    async fn like_exists(&self, comment_id: Uuid, user_id: Uuid) -> anyhow::Result<bool>;
    async fn insert_like(
        &self,
        comment_id: Uuid,
        user_id: Uuid,
        created_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;
    /// Returns true if a like was removed.
    async fn delete_like(&self, comment_id: Uuid, user_id: Uuid) -> anyhow::Result<bool>;
    async fn count_likes(&self, comment_id: Uuid) -> anyhow::Result<u64>;
}
