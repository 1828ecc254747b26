//! Request extractors shared by handlers.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`client_ip::ClientIp`] -- Best-effort client address from proxy headers.

pub mod auth;
pub mod client_ip;
