#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use social::config::SocialConfig;
use social::contract::model::{NewComment, NewPost, NewUser, Post, User};
use social::domain::clock::ManualClock;
use social::domain::service::Service;
use social::SocialModule;

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

/// Fresh in-memory SQLite with migrations applied. A single connection
/// keeps every query on the same in-memory database.
pub async fn test_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).sqlx_logging(false);
    Database::connect(opts)
        .await
        .expect("Failed to connect to test database")
}

pub struct Harness {
    pub module: SocialModule,
    pub service: Arc<Service>,
    pub clock: Arc<ManualClock>,
    pub db: DatabaseConnection,
}

pub async fn harness_with(cfg: SocialConfig) -> Harness {
    let db = test_db().await;
    let clock = Arc::new(ManualClock::new(t0()));
    let module = SocialModule::new(db.clone(), &cfg, clock.clone());
    module.migrate().await.expect("Failed to run migrations");
    Harness {
        service: module.service(),
        module,
        clock,
        db,
    }
}

pub async fn harness() -> Harness {
    harness_with(SocialConfig::default()).await
}

pub async fn seed_user(svc: &Service, email: &str, username: Option<&str>) -> User {
    svc.create_user(NewUser {
        email: email.to_string(),
        password: "correct horse".to_string(),
        username: username.map(str::to_string),
    })
    .await
    .expect("seed user")
}

pub async fn seed_post(svc: &Service, author: &User) -> Post {
    svc.create_post(NewPost {
        user_id: author.id,
        content_url: Some("https://cdn.example.com/p.png".to_string()),
    })
    .await
    .expect("seed post")
}

pub fn new_comment(author: &User, post: &Post, content: &str) -> NewComment {
    NewComment {
        user_id: author.id,
        post_id: post.id,
        content: content.to_string(),
    }
}
