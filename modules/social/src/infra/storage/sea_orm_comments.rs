use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::contract::model::Comment;
use crate::domain::repo::{CommentsRepository, StoreError};
use crate::infra::storage::entity::{comment, comment_like};
use crate::infra::storage::errors::into_store_error;

#[derive(Clone)]
pub struct SeaOrmCommentsRepository {
    conn: DatabaseConnection,
}

impl SeaOrmCommentsRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl CommentsRepository for SeaOrmCommentsRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Comment>> {
        let found = comment::Entity::find_by_id(id).one(&self.conn).await?;
        Ok(found.map(Into::into))
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Comment>> {
        let rows = comment::Entity::find()
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_post(&self, post_id: Uuid) -> anyhow::Result<Vec<Comment>> {
        let rows = comment::Entity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, c: Comment) -> anyhow::Result<()> {
        comment::ActiveModel {
            id: Set(c.id),
            user_id: Set(c.user_id),
            post_id: Set(c.post_id),
            content: Set(c.content),
            created_at: Set(c.created_at),
        }
        .insert(&self.conn)
        .await?;
        Ok(())
    }

    async fn delete_all(&self) -> anyhow::Result<u64> {
        let txn = self.conn.begin().await?;
        comment_like::Entity::delete_many().exec(&txn).await?;
        let result = comment::Entity::delete_many().exec(&txn).await?;
        txn.commit().await?;
        Ok(result.rows_affected)
    }

    async fn like_exists(&self, comment_id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        let count = comment_like::Entity::find()
            .filter(comment_like::Column::CommentId.eq(comment_id))
            .filter(comment_like::Column::UserId.eq(user_id))
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }

    async fn insert_like(
        &self,
        comment_id: Uuid,
        user_id: Uuid,
        created_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        comment_like::ActiveModel {
            id: Set(Uuid::new_v4()),
            comment_id: Set(comment_id),
            user_id: Set(user_id),
            created_at: Set(created_at),
        }
        .insert(&self.conn)
        .await
        .map(|_| ())
        .map_err(into_store_error)
    }

    async fn delete_like(&self, comment_id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        let result = comment_like::Entity::delete_many()
            .filter(comment_like::Column::CommentId.eq(comment_id))
            .filter(comment_like::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn count_likes(&self, comment_id: Uuid) -> anyhow::Result<u64> {
        let count = comment_like::Entity::find()
            .filter(comment_like::Column::CommentId.eq(comment_id))
            .count(&self.conn)
            .await?;
        Ok(count)
    }
}
