use utoipa::OpenApi;

use crate::api::rest::{dto, handlers, problem};

#[derive(OpenApi)]
#[openapi(
    info(title = "Social API", description = "Users, posts and comments"),
    paths(
        handlers::create_user,
        handlers::get_user,
        handlers::get_user_by_username,
        handlers::rename_username,
        handlers::list_user_posts,
        handlers::create_post,
        handlers::get_post,
        handlers::list_post_comments,
        handlers::list_comments,
        handlers::create_comment,
        handlers::toggle_comment_like,
        handlers::purge_comments,
    ),
    components(schemas(
        dto::UserDto,
        dto::CreateUserReq,
        dto::RenameUsernameReq,
        dto::UsernameChangeDto,
        dto::PostDto,
        dto::CreatePostReq,
        dto::CommentDto,
        dto::CreateCommentReq,
        dto::ToggleLikeReq,
        dto::LikeToggleDto,
        dto::PurgeCommentsDto,
        problem::Problem,
    )),
    tags(
        (name = "users", description = "Accounts and usernames"),
        (name = "posts", description = "Posts"),
        (name = "comments", description = "Comments and likes"),
    )
)]
pub struct ApiDoc;
