//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod comment_repo;
pub mod favorite_repo;
pub mod like_repo;
pub mod note_repo;
pub mod post_repo;
pub mod user_repo;

pub use comment_repo::CommentRepo;
pub use favorite_repo::FavoriteRepo;
pub use like_repo::LikeRepo;
pub use note_repo::NoteRepo;
pub use post_repo::PostRepo;
pub use user_repo::UserRepo;
