use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::contract::model::Post;
use crate::domain::repo::PostsRepository;
use crate::infra::storage::entity::post;

#[derive(Clone)]
pub struct SeaOrmPostsRepository {
    conn: DatabaseConnection,
}

impl SeaOrmPostsRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl PostsRepository for SeaOrmPostsRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Post>> {
        let found = post::Entity::find_by_id(id).one(&self.conn).await?;
        Ok(found.map(Into::into))
    }

    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Post>> {
        let rows = post::Entity::find()
            .filter(post::Column::UserId.eq(user_id))
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, p: Post) -> anyhow::Result<()> {
        post::ActiveModel {
            id: Set(p.id),
            user_id: Set(p.user_id),
            content_url: Set(p.content_url),
            created_at: Set(p.created_at),
        }
        .insert(&self.conn)
        .await?;
        Ok(())
    }
}
