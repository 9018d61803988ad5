use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::{openapi::ApiDoc, routes};
use crate::config::SocialConfig;
use crate::contract::client::SocialApi;
use crate::domain::clock::Clock;
use crate::domain::service::{Repositories, Service, ServiceConfig};
use crate::gateways::local::SocialLocalClient;
use crate::infra::storage::{
    Migrator, SeaOrmCommentsRepository, SeaOrmPostsRepository, SeaOrmUsersRepository,
};

/// The social module: wires SeaORM storage, the domain service, the
/// in-process client and the REST router together.
#[derive(Clone)]
pub struct SocialModule {
    conn: DatabaseConnection,
    service: Arc<Service>,
}

impl SocialModule {
    pub fn new(conn: DatabaseConnection, cfg: &SocialConfig, clock: Arc<dyn Clock>) -> Self {
        info!("Initializing social module");
        debug!(
            "Loaded social config: rename_cooldown_hours={}, dev_routes={}",
            cfg.rename_cooldown_hours, cfg.dev_routes
        );

        let users = Arc::new(SeaOrmUsersRepository::new(conn.clone()));
        let repos = Repositories {
            users: users.clone(),
            usernames: users,
            posts: Arc::new(SeaOrmPostsRepository::new(conn.clone())),
            comments: Arc::new(SeaOrmCommentsRepository::new(conn.clone())),
        };

        let service = Service::new(repos, clock, ServiceConfig::from(cfg));
        Self {
            conn,
            service: Arc::new(service),
        }
    }

    /// Apply pending schema migrations.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        info!("Running social database migrations");
        Migrator::up(&self.conn, None).await?;
        info!("Social database migrations completed successfully");
        Ok(())
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// In-process client for other modules.
    pub fn client(&self) -> Arc<dyn SocialApi> {
        Arc::new(SocialLocalClient::new(self.service.clone()))
    }

    pub fn router(&self) -> axum::Router {
        info!("Registering social REST routes");
        routes::router(self.service.clone())
    }

    pub fn openapi() -> utoipa::openapi::OpenApi {
        use utoipa::OpenApi;
        ApiDoc::openapi()
    }
}
