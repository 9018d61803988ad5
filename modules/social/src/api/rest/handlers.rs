use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Extension,
};
use tracing::info;
use uuid::Uuid;

use crate::api::rest::dto::{
    CommentDto, CreateCommentReq, CreatePostReq, CreateUserReq, LikeToggleDto, PostDto,
    PurgeCommentsDto, RenameUsernameReq, ToggleLikeReq, UserDto, UsernameChangeDto,
};
use crate::api::rest::error::{map_domain_error, map_json_rejection, ProblemCtx};
use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::contract::model::RenameOutcome;
use crate::domain::service::Service;

type ApiResult<T> = Result<T, ProblemResponse>;

/// Register a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserReq,
    responses(
        (status = 201, description = "Created user", body = UserDto),
        (status = 400, description = "Invalid email, password or username", body = Problem, content_type = "application/problem+json"),
        (status = 409, description = "Email or username already in use", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    ctx: ProblemCtx,
    body: Result<Json<CreateUserReq>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserDto>)> {
    let Json(req) = body.map_err(|e| map_json_rejection(&e, &ctx))?;
    info!("Creating user with email: {}", req.email);

    match svc.create_user(req.into()).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(UserDto::from(user)))),
        Err(e) => Err(map_domain_error(&e, &ctx)),
    }
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User UUID")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    ctx: ProblemCtx,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserDto>> {
    match svc.get_user(id).await {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => Err(map_domain_error(&e, &ctx)),
    }
}

/// Get a user by their current username
#[utoipa::path(
    get,
    path = "/users/by-username/{username}",
    tag = "users",
    params(("username" = String, Path, description = "Exact, case-sensitive username")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_user_by_username(
    Extension(svc): Extension<Arc<Service>>,
    ctx: ProblemCtx,
    Path(username): Path<String>,
) -> ApiResult<Json<UserDto>> {
    match svc.get_user_by_username(&username).await {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => Err(map_domain_error(&e, &ctx)),
    }
}

/// Change a user's username
///
/// Returns 204 when the user already holds the requested name.
#[utoipa::path(
    put,
    path = "/users/username",
    tag = "users",
    request_body = RenameUsernameReq,
    responses(
        (status = 200, description = "Username changed", body = UsernameChangeDto),
        (status = 204, description = "Username unchanged"),
        (status = 400, description = "Empty username", body = Problem, content_type = "application/problem+json"),
        (status = 403, description = "Rename cooldown still active", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
        (status = 409, description = "Username already taken", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn rename_username(
    Extension(svc): Extension<Arc<Service>>,
    ctx: ProblemCtx,
    body: Result<Json<RenameUsernameReq>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(req) = body.map_err(|e| map_json_rejection(&e, &ctx))?;

    match svc.rename_user(req.id, &req.username).await {
        Ok(RenameOutcome::Unchanged(_)) => Ok(StatusCode::NO_CONTENT.into_response()),
        Ok(RenameOutcome::Renamed(change)) => {
            Ok(Json(UsernameChangeDto::from(change)).into_response())
        }
        Err(e) => Err(map_domain_error(&e, &ctx)),
    }
}

/// List a user's posts, newest first
#[utoipa::path(
    get,
    path = "/users/{id}/posts",
    tag = "posts",
    params(("id" = Uuid, Path, description = "User UUID")),
    responses(
        (status = 200, description = "Posts by the user", body = [PostDto]),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn list_user_posts(
    Extension(svc): Extension<Arc<Service>>,
    ctx: ProblemCtx,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<PostDto>>> {
    match svc.list_user_posts(id).await {
        Ok(posts) => Ok(Json(posts.into_iter().map(PostDto::from).collect())),
        Err(e) => Err(map_domain_error(&e, &ctx)),
    }
}

/// Publish a post
#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    request_body = CreatePostReq,
    responses(
        (status = 201, description = "Created post", body = PostDto),
        (status = 404, description = "Author not found", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn create_post(
    Extension(svc): Extension<Arc<Service>>,
    ctx: ProblemCtx,
    body: Result<Json<CreatePostReq>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PostDto>)> {
    let Json(req) = body.map_err(|e| map_json_rejection(&e, &ctx))?;

    match svc.create_post(req.into()).await {
        Ok(post) => Ok((StatusCode::CREATED, Json(PostDto::from(post)))),
        Err(e) => Err(map_domain_error(&e, &ctx)),
    }
}

/// Get a post by ID
#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "posts",
    params(("id" = Uuid, Path, description = "Post UUID")),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_post(
    Extension(svc): Extension<Arc<Service>>,
    ctx: ProblemCtx,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PostDto>> {
    match svc.get_post(id).await {
        Ok(post) => Ok(Json(PostDto::from(post))),
        Err(e) => Err(map_domain_error(&e, &ctx)),
    }
}

/// List comments on a post, oldest first
#[utoipa::path(
    get,
    path = "/posts/{id}/comments",
    tag = "comments",
    params(("id" = Uuid, Path, description = "Post UUID")),
    responses(
        (status = 200, description = "Comments on the post", body = [CommentDto]),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn list_post_comments(
    Extension(svc): Extension<Arc<Service>>,
    ctx: ProblemCtx,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<CommentDto>>> {
    match svc.list_post_comments(id).await {
        Ok(comments) => Ok(Json(comments.into_iter().map(CommentDto::from).collect())),
        Err(e) => Err(map_domain_error(&e, &ctx)),
    }
}

/// List all comments
#[utoipa::path(
    get,
    path = "/comments",
    tag = "comments",
    responses((status = 200, description = "All comments", body = [CommentDto]))
)]
pub async fn list_comments(
    Extension(svc): Extension<Arc<Service>>,
    ctx: ProblemCtx,
) -> ApiResult<Json<Vec<CommentDto>>> {
    match svc.list_comments().await {
        Ok(comments) => Ok(Json(comments.into_iter().map(CommentDto::from).collect())),
        Err(e) => Err(map_domain_error(&e, &ctx)),
    }
}

/// Comment on a post
#[utoipa::path(
    post,
    path = "/comments",
    tag = "comments",
    request_body = CreateCommentReq,
    responses(
        (status = 201, description = "Created comment", body = CommentDto),
        (status = 400, description = "Empty content", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Author or post not found", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn create_comment(
    Extension(svc): Extension<Arc<Service>>,
    ctx: ProblemCtx,
    body: Result<Json<CreateCommentReq>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CommentDto>)> {
    let Json(req) = body.map_err(|e| map_json_rejection(&e, &ctx))?;

    match svc.create_comment(req.into()).await {
        Ok(comment) => Ok((StatusCode::CREATED, Json(CommentDto::from(comment)))),
        Err(e) => Err(map_domain_error(&e, &ctx)),
    }
}

/// Like a comment, or take the like back
#[utoipa::path(
    post,
    path = "/comments/{id}/like",
    tag = "comments",
    params(("id" = Uuid, Path, description = "Comment UUID")),
    request_body = ToggleLikeReq,
    responses(
        (status = 200, description = "Like state after the toggle", body = LikeToggleDto),
        (status = 404, description = "Comment or user not found", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn toggle_comment_like(
    Extension(svc): Extension<Arc<Service>>,
    ctx: ProblemCtx,
    Path(id): Path<Uuid>,
    body: Result<Json<ToggleLikeReq>, JsonRejection>,
) -> ApiResult<Json<LikeToggleDto>> {
    let Json(req) = body.map_err(|e| map_json_rejection(&e, &ctx))?;

    match svc.toggle_comment_like(id, req.user_id).await {
        Ok(toggle) => Ok(Json(LikeToggleDto::from(toggle))),
        Err(e) => Err(map_domain_error(&e, &ctx)),
    }
}

/// Delete every comment (development only)
#[utoipa::path(
    delete,
    path = "/comments",
    tag = "comments",
    responses(
        (status = 200, description = "Number of comments deleted", body = PurgeCommentsDto),
        (status = 404, description = "Development routes are disabled", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn purge_comments(
    Extension(svc): Extension<Arc<Service>>,
    ctx: ProblemCtx,
) -> ApiResult<Json<PurgeCommentsDto>> {
    match svc.purge_comments().await {
        Ok(deleted) => Ok(Json(PurgeCommentsDto { deleted })),
        Err(e) => Err(map_domain_error(&e, &ctx)),
    }
}
