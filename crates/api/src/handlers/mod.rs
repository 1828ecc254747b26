pub mod auth;
pub mod comments;
pub mod notes;
pub mod posts;
pub mod users;
