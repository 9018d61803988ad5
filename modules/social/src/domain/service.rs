use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::SocialConfig;
use crate::contract::model::{
    Comment, LikeToggle, NewComment, NewPost, NewUser, Post, RenameOutcome, User,
};
use crate::domain::clock::Clock;
use crate::domain::error::DomainError;
use crate::domain::password::hash_password;
use crate::domain::rename::RenameCoordinator;
use crate::domain::repo::{
    CommentsRepository, PostsRepository, StoreError, UsernameStore, UsersRepository,
};
use crate::domain::validation::{
    validate_comment_content, validate_email, validate_password, validate_username,
};

/// Persistence ports the service depends on.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UsersRepository>,
    pub usernames: Arc<dyn UsernameStore>,
    pub posts: Arc<dyn PostsRepository>,
    pub comments: Arc<dyn CommentsRepository>,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub rename_cooldown: Duration,
    pub min_password_length: usize,
    pub dev_routes: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from(&SocialConfig::default())
    }
}

impl From<&SocialConfig> for ServiceConfig {
    fn from(cfg: &SocialConfig) -> Self {
        Self {
            rename_cooldown: Duration::hours(i64::from(cfg.rename_cooldown_hours)),
            min_password_length: cfg.min_password_length,
            dev_routes: cfg.dev_routes,
        }
    }
}

/// Domain service with business rules for users, posts and comments.
/// Depends only on the repository ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    repos: Repositories,
    clock: Arc<dyn Clock>,
    renames: RenameCoordinator,
    config: ServiceConfig,
}

impl Service {
    pub fn new(repos: Repositories, clock: Arc<dyn Clock>, config: ServiceConfig) -> Self {
        let renames = RenameCoordinator::new(
            repos.usernames.clone(),
            clock.clone(),
            config.rename_cooldown,
        );
        Self {
            repos,
            clock,
            renames,
            config,
        }
    }

    // --- users ---

    #[instrument(name = "social.service.get_user", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: Uuid) -> Result<User, DomainError> {
        debug!("Getting user by id");
        self.repos
            .users
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    #[instrument(name = "social.service.get_user_by_username", skip(self))]
    pub async fn get_user_by_username(&self, username: &str) -> Result<User, DomainError> {
        debug!("Getting user by username");
        self.repos
            .users
            .find_by_username(username)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::username_not_found(username))
    }

    #[instrument(
        name = "social.service.create_user",
        skip(self, new_user),
        fields(email = %new_user.email)
    )]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");

        validate_email(&new_user.email)?;
        validate_password(&new_user.password, self.config.min_password_length)?;
        if let Some(ref username) = new_user.username {
            validate_username(username)?;
        }

        if self
            .repos
            .users
            .email_exists(&new_user.email)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        {
            return Err(DomainError::email_already_exists(new_user.email));
        }

        let password_hash = hash_password(&new_user.password)?;
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            username: new_user.username,
            profile_image_url: None,
            username_last_modified_at: None,
            created_at: self.clock.now(),
        };

        match self.repos.users.insert(user.clone(), password_hash).await {
            Ok(()) => {}
            // Raced with another signup; tell the caller which field clashed.
            Err(StoreError::UniqueViolation(detail)) => {
                warn!(%detail, "User insert hit a unique constraint");
                return Err(self.classify_user_conflict(&user).await);
            }
            Err(StoreError::Other(e)) => return Err(DomainError::database(e.to_string())),
        }

        info!("Successfully created user with id={}", user.id);
        Ok(user)
    }

    async fn classify_user_conflict(&self, user: &User) -> DomainError {
        match self.repos.users.email_exists(&user.email).await {
            Ok(true) => DomainError::email_already_exists(user.email.clone()),
            Ok(false) => match user.username {
                Some(ref username) => DomainError::username_taken(username.clone()),
                None => DomainError::database("unique constraint violated on user insert"),
            },
            Err(e) => DomainError::database(e.to_string()),
        }
    }

    /// Change a user's username. See [`RenameCoordinator::attempt_rename`].
    #[instrument(name = "social.service.rename_user", skip(self), fields(user_id = %id))]
    pub async fn rename_user(&self, id: Uuid, username: &str) -> Result<RenameOutcome, DomainError> {
        self.renames.attempt_rename(id, username).await
    }

    #[instrument(name = "social.service.list_user_posts", skip(self), fields(user_id = %user_id))]
    pub async fn list_user_posts(&self, user_id: Uuid) -> Result<Vec<Post>, DomainError> {
        self.get_user(user_id).await?;
        let posts = self
            .repos
            .posts
            .list_by_user(user_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        debug!("Found {} posts", posts.len());
        Ok(posts)
    }

    // --- posts ---

    #[instrument(name = "social.service.create_post", skip(self, new_post), fields(user_id = %new_post.user_id))]
    pub async fn create_post(&self, new_post: NewPost) -> Result<Post, DomainError> {
        self.get_user(new_post.user_id).await?;

        let post = Post {
            id: Uuid::new_v4(),
            user_id: new_post.user_id,
            content_url: new_post.content_url,
            created_at: self.clock.now(),
        };
        self.repos
            .posts
            .insert(post.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Created post id={}", post.id);
        Ok(post)
    }

    #[instrument(name = "social.service.get_post", skip(self), fields(post_id = %id))]
    pub async fn get_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.repos
            .posts
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    #[instrument(name = "social.service.list_post_comments", skip(self), fields(post_id = %post_id))]
    pub async fn list_post_comments(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        self.get_post(post_id).await?;
        self.repos
            .comments
            .list_by_post(post_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    // --- comments ---

    #[instrument(name = "social.service.list_comments", skip(self))]
    pub async fn list_comments(&self) -> Result<Vec<Comment>, DomainError> {
        self.repos
            .comments
            .list_all()
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    #[instrument(
        name = "social.service.create_comment",
        skip(self, new_comment),
        fields(user_id = %new_comment.user_id, post_id = %new_comment.post_id)
    )]
    pub async fn create_comment(&self, new_comment: NewComment) -> Result<Comment, DomainError> {
        validate_comment_content(&new_comment.content)?;
        self.get_user(new_comment.user_id).await?;
        self.get_post(new_comment.post_id).await?;

        let comment = Comment {
            id: Uuid::new_v4(),
            user_id: new_comment.user_id,
            post_id: new_comment.post_id,
            content: new_comment.content,
            created_at: self.clock.now(),
        };
        self.repos
            .comments
            .insert(comment.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Created comment id={}", comment.id);
        Ok(comment)
    }

    #[instrument(
        name = "social.service.toggle_comment_like",
        skip(self),
        fields(comment_id = %comment_id, user_id = %user_id)
    )]
    pub async fn toggle_comment_like(
        &self,
        comment_id: Uuid,
        user_id: Uuid,
    ) -> Result<LikeToggle, DomainError> {
        let comments = &self.repos.comments;
        comments
            .find_by_id(comment_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::comment_not_found(comment_id))?;
        self.get_user(user_id).await?;

        let already_liked = comments
            .like_exists(comment_id, user_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        let liked = if already_liked {
            comments
                .delete_like(comment_id, user_id)
                .await
                .map_err(|e| DomainError::database(e.to_string()))?;
            false
        } else {
            match comments
                .insert_like(comment_id, user_id, self.clock.now())
                .await
            {
                // A concurrent toggle already inserted the same like.
                Ok(()) | Err(StoreError::UniqueViolation(_)) => true,
                Err(StoreError::Other(e)) => return Err(DomainError::database(e.to_string())),
            }
        };

        let like_count = comments
            .count_likes(comment_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        debug!(liked, like_count, "Toggled comment like");
        Ok(LikeToggle {
            comment_id,
            liked,
            like_count,
        })
    }

    /// Development-only purge of every comment.
    #[instrument(name = "social.service.purge_comments", skip(self))]
    pub async fn purge_comments(&self) -> Result<u64, DomainError> {
        if !self.config.dev_routes {
            return Err(DomainError::DevRoutesDisabled);
        }
        let deleted = self
            .repos
            .comments
            .delete_all()
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        warn!(deleted, "Deleted all comments");
        Ok(deleted)
    }
}
