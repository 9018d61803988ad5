use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{
    client::SocialApi,
    error::SocialError,
    model::{Comment, LikeToggle, NewComment, NewPost, NewUser, Post, RenameOutcome, User},
};
use crate::domain::service::Service;

/// Local implementation of the SocialApi trait that delegates to the domain service
pub struct SocialLocalClient {
    service: Arc<Service>,
}

impl SocialLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl SocialApi for SocialLocalClient {
    async fn get_user(&self, id: Uuid) -> Result<User, SocialError> {
        self.service.get_user(id).await.map_err(SocialError::from)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<User, SocialError> {
        self.service
            .get_user_by_username(username)
            .await
            .map_err(SocialError::from)
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, SocialError> {
        self.service
            .create_user(new_user)
            .await
            .map_err(SocialError::from)
    }

    async fn rename_user(&self, id: Uuid, username: &str) -> Result<RenameOutcome, SocialError> {
        self.service
            .rename_user(id, username)
            .await
            .map_err(SocialError::from)
    }

    async fn list_user_posts(&self, user_id: Uuid) -> Result<Vec<Post>, SocialError> {
        self.service
            .list_user_posts(user_id)
            .await
            .map_err(SocialError::from)
    }

    async fn create_post(&self, new_post: NewPost) -> Result<Post, SocialError> {
        self.service
            .create_post(new_post)
            .await
            .map_err(SocialError::from)
    }

    async fn create_comment(&self, new_comment: NewComment) -> Result<Comment, SocialError> {
        self.service
            .create_comment(new_comment)
            .await
            .map_err(SocialError::from)
    }

    async fn toggle_comment_like(
        &self,
        comment_id: Uuid,
        user_id: Uuid,
    ) -> Result<LikeToggle, SocialError> {
        self.service
            .toggle_comment_like(comment_id, user_id)
            .await
            .map_err(SocialError::from)
    }
}
