use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::contract::model::{
    Comment, LikeToggle, NewComment, NewPost, NewUser, Post, User, UsernameChange,
};

/// Public user representation. The password hash is never exposed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
    pub profile_image_url: Option<String>,
    pub username_last_modified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserReq {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RenameUsernameReq {
    pub id: Uuid,
    pub username: String,
}

/// Body of a successful rename.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UsernameChangeDto {
    pub id: Uuid,
    pub username: String,
    pub username_last_modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePostReq {
    pub user_id: Uuid,
    #[serde(default)]
    pub content_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCommentReq {
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ToggleLikeReq {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LikeToggleDto {
    pub comment_id: Uuid,
    pub liked: bool,
    pub like_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PurgeCommentsDto {
    pub deleted: u64,
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            profile_image_url: user.profile_image_url,
            username_last_modified_at: user.username_last_modified_at,
            created_at: user.created_at,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            email: req.email,
            password: req.password,
            username: req.username,
        }
    }
}

impl From<UsernameChange> for UsernameChangeDto {
    fn from(change: UsernameChange) -> Self {
        Self {
            id: change.id,
            username: change.username,
            username_last_modified_at: change.username_last_modified_at,
        }
    }
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            content_url: post.content_url,
            created_at: post.created_at,
        }
    }
}

impl From<CreatePostReq> for NewPost {
    fn from(req: CreatePostReq) -> Self {
        Self {
            user_id: req.user_id,
            content_url: req.content_url,
        }
    }
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            user_id: comment.user_id,
            post_id: comment.post_id,
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}

impl From<CreateCommentReq> for NewComment {
    fn from(req: CreateCommentReq) -> Self {
        Self {
            user_id: req.user_id,
            post_id: req.post_id,
            content: req.content,
        }
    }
}

impl From<LikeToggle> for LikeToggleDto {
    fn from(t: LikeToggle) -> Self {
        Self {
            comment_id: t.comment_id,
            liked: t.liked,
            like_count: t.like_count,
        }
    }
}
