use crate::contract::model::{Comment, Post, User};
use crate::infra::storage::entity::{comment, post, user};

/// Convert a database entity to a contract model. The password hash is dropped.
impl From<user::Model> for User {
    fn from(entity: user::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            username: entity.username,
            profile_image_url: entity.profile_image_url,
            username_last_modified_at: entity.username_last_modified_at,
            created_at: entity.created_at,
        }
    }
}

impl From<post::Model> for Post {
    fn from(entity: post::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            content_url: entity.content_url,
            created_at: entity.created_at,
        }
    }
}

impl From<comment::Model> for Comment {
    fn from(entity: comment::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            post_id: entity.post_id,
            content: entity.content,
            created_at: entity.created_at,
        }
    }
}
