//! Domain types and validation rules shared by the Lumina database and API
//! crates. Nothing in here touches I/O.

pub mod comments;
pub mod error;
pub mod notes;
pub mod posts;
pub mod types;
pub mod users;
