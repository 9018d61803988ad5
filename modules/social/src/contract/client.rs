use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::{
    error::SocialError,
    model::{
        Comment, LikeToggle, NewComment, NewPost, NewUser, Post, RenameOutcome, User,
    },
};

/// Public API trait for the social module that other modules can use
#[async_trait]
pub trait SocialApi: Send + Sync {
    /// Get a user by ID
    async fn get_user(&self, id: Uuid) -> Result<User, SocialError>;

    /// Get a user by their current username
    async fn get_user_by_username(&self, username: &str) -> Result<User, SocialError>;

    /// Register a new user
    async fn create_user(&self, new_user: NewUser) -> Result<User, SocialError>;

    /// Change a user's username, subject to uniqueness and the rename cooldown
    async fn rename_user(&self, id: Uuid, username: &str) -> Result<RenameOutcome, SocialError>;

    /// Posts authored by a user, newest first
    async fn list_user_posts(&self, user_id: Uuid) -> Result<Vec<Post>, SocialError>;

    /// Publish a post
    async fn create_post(&self, new_post: NewPost) -> Result<Post, SocialError>;

    /// Comment on a post
    async fn create_comment(&self, new_comment: NewComment) -> Result<Comment, SocialError>;

    /// Like the comment, or remove the like if it is already there
    async fn toggle_comment_like(
        &self,
        comment_id: Uuid,
        user_id: Uuid,
    ) -> Result<LikeToggle, SocialError>;
}
