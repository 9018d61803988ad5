use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// REST routes of the social module.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/users", post(handlers::create_user))
        .route("/users/username", put(handlers::rename_username))
        .route(
            "/users/by-username/{username}",
            get(handlers::get_user_by_username),
        )
        .route("/users/{id}", get(handlers::get_user))
        .route("/users/{id}/posts", get(handlers::list_user_posts))
        .route("/posts", post(handlers::create_post))
        .route("/posts/{id}", get(handlers::get_post))
        .route("/posts/{id}/comments", get(handlers::list_post_comments))
        .route(
            "/comments",
            get(handlers::list_comments)
                .post(handlers::create_comment)
                .delete(handlers::purge_comments),
        )
        .route("/comments/{id}/like", post(handlers::toggle_comment_like))
        .layer(Extension(service))
}
