//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Serialize` response shape (camelCase, the mobile client's contract)
//! - `Deserialize` create / update DTOs

pub mod comment;
pub mod note;
pub mod post;
pub mod user;
