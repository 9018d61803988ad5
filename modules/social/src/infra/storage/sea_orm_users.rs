use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::contract::model::User;
use crate::domain::repo::{StoreError, UsernameStore, UsersRepository};
use crate::infra::storage::entity::user;
use crate::infra::storage::errors::into_store_error;

/// SeaORM-backed user storage. Serves both the general user port and the
/// narrower port used by the rename coordinator.
#[derive(Clone)]
pub struct SeaOrmUsersRepository {
    conn: DatabaseConnection,
}

impl SeaOrmUsersRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn one_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let found = user::Entity::find_by_id(id).one(&self.conn).await?;
        Ok(found.map(Into::into))
    }

    async fn one_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let found = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.conn)
            .await?;
        Ok(found.map(Into::into))
    }
}

#[async_trait]
impl UsersRepository for SeaOrmUsersRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        self.one_by_id(id).await
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        self.one_by_username(username).await
    }

    async fn email_exists(&self, email: &str) -> anyhow::Result<bool> {
        let count = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }

    async fn insert(&self, u: User, password_hash: String) -> Result<(), StoreError> {
        let active_model = user::ActiveModel {
            id: Set(u.id),
            email: Set(u.email),
            username: Set(u.username),
            password_hash: Set(password_hash),
            profile_image_url: Set(u.profile_image_url),
            username_last_modified_at: Set(u.username_last_modified_at),
            created_at: Set(u.created_at),
        };

        active_model
            .insert(&self.conn)
            .await
            .map(|_| ())
            .map_err(into_store_error)
    }
}

#[async_trait]
impl UsernameStore for SeaOrmUsersRepository {
    async fn get_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        self.one_by_id(id).await
    }

    async fn count_users_by_username(&self, username: &str) -> anyhow::Result<u64> {
        let count = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .count(&self.conn)
            .await?;
        Ok(count)
    }

    async fn conditional_update_username(
        &self,
        id: Uuid,
        username: &str,
        modified_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::Username, Expr::value(username))
            .col_expr(user::Column::UsernameLastModifiedAt, Expr::value(modified_at))
            .filter(user::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .map_err(into_store_error)?;

        // Zero rows is left for the confirming read to report.
        debug!(rows_affected = result.rows_affected, "Username update executed");
        Ok(())
    }

    async fn get_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        self.one_by_username(username).await
    }
}
