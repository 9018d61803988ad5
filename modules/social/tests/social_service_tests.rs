mod common;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use chrono::Duration;
use common::{harness, harness_with, new_comment, seed_post, seed_user, t0};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use social::config::SocialConfig;
use social::contract::model::{NewPost, NewUser};
use social::domain::error::DomainError;
use social::infra::storage::entity::{comment_like, user};

fn new_user(email: &str, password: &str, username: Option<&str>) -> NewUser {
    NewUser {
        email: email.to_string(),
        password: password.to_string(),
        username: username.map(str::to_string),
    }
}

#[tokio::test]
async fn create_user_stores_argon2_hash() {
    let h = harness().await;
    let created = h
        .service
        .create_user(new_user("a@example.com", "hunter2hunter2", Some("alice")))
        .await
        .unwrap();

    assert_eq!(created.email, "a@example.com");
    assert_eq!(created.username.as_deref(), Some("alice"));
    assert_eq!(created.created_at, t0());
    assert_eq!(created.username_last_modified_at, None);

    let row = user::Entity::find_by_id(created.id)
        .one(&h.db)
        .await
        .unwrap()
        .unwrap();
    assert!(row.password_hash.starts_with("$argon2id$"));
    let parsed = PasswordHash::new(&row.password_hash).unwrap();
    let argon = Argon2::default();
    assert!(argon.verify_password(b"hunter2hunter2", &parsed).is_ok());
    assert!(argon.verify_password(b"wrong", &parsed).is_err());
}

#[tokio::test]
async fn create_user_validates_input() {
    let h = harness().await;

    assert!(matches!(
        h.service.create_user(new_user("not-an-email", "longenough", None)).await,
        Err(DomainError::InvalidEmail { .. })
    ));
    assert!(matches!(
        h.service.create_user(new_user("a@example.com", "short", None)).await,
        Err(DomainError::InvalidPassword { min_len: 8 })
    ));
    assert!(matches!(
        h.service.create_user(new_user("a@example.com", "longenough", Some(""))).await,
        Err(DomainError::Validation { .. })
    ));
}

#[tokio::test]
async fn password_minimum_is_configurable() {
    let h = harness_with(SocialConfig {
        min_password_length: 12,
        ..Default::default()
    })
    .await;
    assert!(matches!(
        h.service.create_user(new_user("a@example.com", "elevenchars", None)).await,
        Err(DomainError::InvalidPassword { min_len: 12 })
    ));
}

#[tokio::test]
async fn duplicate_email_and_username_conflict() {
    let h = harness().await;
    seed_user(&h.service, "a@example.com", Some("alice")).await;

    assert!(matches!(
        h.service.create_user(new_user("a@example.com", "longenough", None)).await,
        Err(DomainError::EmailAlreadyExists { .. })
    ));
    assert!(matches!(
        h.service.create_user(new_user("b@example.com", "longenough", Some("alice"))).await,
        Err(DomainError::UsernameTaken { .. })
    ));
}

#[tokio::test]
async fn users_without_username_coexist() {
    let h = harness().await;
    seed_user(&h.service, "a@example.com", None).await;
    seed_user(&h.service, "b@example.com", None).await;
}

#[tokio::test]
async fn posts_are_listed_newest_first() {
    let h = harness().await;
    let author = seed_user(&h.service, "a@example.com", None).await;
    let first = seed_post(&h.service, &author).await;
    h.clock.advance(Duration::minutes(5));
    let second = seed_post(&h.service, &author).await;

    let posts = h.service.list_user_posts(author.id).await.unwrap();
    let ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    assert_eq!(h.service.get_post(first.id).await.unwrap(), first);
}

#[tokio::test]
async fn posts_require_an_existing_author() {
    let h = harness().await;
    let err = h
        .service
        .create_post(NewPost {
            user_id: Uuid::new_v4(),
            content_url: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::UserNotFound { .. }));

    assert!(matches!(
        h.service.list_user_posts(Uuid::new_v4()).await,
        Err(DomainError::UserNotFound { .. })
    ));
    assert!(matches!(
        h.service.get_post(Uuid::new_v4()).await,
        Err(DomainError::PostNotFound { .. })
    ));
}

#[tokio::test]
async fn comments_on_posts() {
    let h = harness().await;
    let author = seed_user(&h.service, "a@example.com", None).await;
    let post = seed_post(&h.service, &author).await;
    let other_post = seed_post(&h.service, &author).await;

    let c1 = h
        .service
        .create_comment(new_comment(&author, &post, "first!"))
        .await
        .unwrap();
    h.clock.advance(Duration::seconds(10));
    let c2 = h
        .service
        .create_comment(new_comment(&author, &post, "second"))
        .await
        .unwrap();
    h.service
        .create_comment(new_comment(&author, &other_post, "elsewhere"))
        .await
        .unwrap();

    let on_post = h.service.list_post_comments(post.id).await.unwrap();
    assert_eq!(on_post, vec![c1, c2]);
    assert_eq!(h.service.list_comments().await.unwrap().len(), 3);

    assert!(matches!(
        h.service.create_comment(new_comment(&author, &post, "   ")).await,
        Err(DomainError::Validation { .. })
    ));
    assert!(matches!(
        h.service.list_post_comments(Uuid::new_v4()).await,
        Err(DomainError::PostNotFound { .. })
    ));
}

#[tokio::test]
async fn like_toggles_on_and_off() {
    let h = harness().await;
    let author = seed_user(&h.service, "a@example.com", None).await;
    let fan = seed_user(&h.service, "b@example.com", None).await;
    let post = seed_post(&h.service, &author).await;
    let comment = h
        .service
        .create_comment(new_comment(&author, &post, "like me"))
        .await
        .unwrap();

    let on = h.service.toggle_comment_like(comment.id, fan.id).await.unwrap();
    assert!(on.liked);
    assert_eq!(on.like_count, 1);

    let also = h
        .service
        .toggle_comment_like(comment.id, author.id)
        .await
        .unwrap();
    assert_eq!(also.like_count, 2);

    let off = h.service.toggle_comment_like(comment.id, fan.id).await.unwrap();
    assert!(!off.liked);
    assert_eq!(off.like_count, 1);

    assert!(matches!(
        h.service.toggle_comment_like(Uuid::new_v4(), fan.id).await,
        Err(DomainError::CommentNotFound { .. })
    ));
}

#[tokio::test]
async fn like_is_stamped_from_the_service_clock() {
    let h = harness().await;
    let author = seed_user(&h.service, "a@example.com", None).await;
    let post = seed_post(&h.service, &author).await;
    let comment = h
        .service
        .create_comment(new_comment(&author, &post, "stamp me"))
        .await
        .unwrap();

    h.clock.advance(Duration::hours(3));
    h.service
        .toggle_comment_like(comment.id, author.id)
        .await
        .unwrap();

    let likes = comment_like::Entity::find()
        .filter(comment_like::Column::CommentId.eq(comment.id))
        .all(&h.db)
        .await
        .unwrap();
    assert_eq!(likes.len(), 1);
    assert_eq!(likes[0].user_id, author.id);
    assert_eq!(likes[0].created_at, t0() + Duration::hours(3));
}

#[tokio::test]
async fn purge_requires_dev_routes() {
    let h = harness().await;
    assert!(matches!(
        h.service.purge_comments().await,
        Err(DomainError::DevRoutesDisabled)
    ));
}

#[tokio::test]
async fn purge_removes_comments_and_likes() {
    let h = harness_with(SocialConfig {
        dev_routes: true,
        ..Default::default()
    })
    .await;
    let author = seed_user(&h.service, "a@example.com", None).await;
    let post = seed_post(&h.service, &author).await;
    let comment = h
        .service
        .create_comment(new_comment(&author, &post, "one"))
        .await
        .unwrap();
    h.service
        .create_comment(new_comment(&author, &post, "two"))
        .await
        .unwrap();
    h.service
        .toggle_comment_like(comment.id, author.id)
        .await
        .unwrap();

    assert_eq!(h.service.purge_comments().await.unwrap(), 2);
    assert!(h.service.list_comments().await.unwrap().is_empty());
    assert_eq!(h.service.purge_comments().await.unwrap(), 0);
}

#[tokio::test]
async fn local_client_maps_errors_to_contract() {
    use social::contract::error::SocialError;

    let h = harness().await;
    let client = h.module.client();

    let user = client
        .create_user(new_user("a@example.com", "longenough", Some("alice")))
        .await
        .unwrap();
    assert_eq!(client.get_user(user.id).await.unwrap().id, user.id);
    assert_eq!(client.get_user_by_username("alice").await.unwrap().id, user.id);

    client.rename_user(user.id, "alice2").await.unwrap();
    assert!(matches!(
        client.rename_user(user.id, "alice3").await,
        Err(SocialError::Forbidden { .. })
    ));
    assert!(matches!(
        client.get_user(Uuid::new_v4()).await,
        Err(SocialError::NotFound { .. })
    ));
    assert!(matches!(
        client
            .create_user(new_user("a@example.com", "longenough", None))
            .await,
        Err(SocialError::Conflict { .. })
    ));

    let post = client
        .create_post(NewPost {
            user_id: user.id,
            content_url: None,
        })
        .await
        .unwrap();
    assert_eq!(client.list_user_posts(user.id).await.unwrap(), vec![post.clone()]);

    let comment = client
        .create_comment(new_comment(&user, &post, "hi"))
        .await
        .unwrap();
    let toggle = client
        .toggle_comment_like(comment.id, user.id)
        .await
        .unwrap();
    assert!(toggle.liked);
}
