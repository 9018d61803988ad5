pub mod entity;
pub mod errors;
pub mod mapper;
pub mod migrations;
pub mod sea_orm_comments;
pub mod sea_orm_posts;
pub mod sea_orm_users;

pub use migrations::Migrator;
pub use sea_orm_comments::SeaOrmCommentsRepository;
pub use sea_orm_posts::SeaOrmPostsRepository;
pub use sea_orm_users::SeaOrmUsersRepository;
