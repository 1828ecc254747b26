//! JWT access-token generation and validation.
//!
//! Tokens are HS256-signed and carry a [`Claims`] payload. There is no
//! server-side session: a still-valid token can be exchanged for a fresh one
//! via `GET /api/auth/refresh`.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lumina_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Username at the time the token was issued.
    pub username: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in seconds.
    pub expiration_secs: i64,
}

impl JwtConfig {
    /// Seven days.
    pub const DEFAULT_EXPIRATION_SECS: i64 = 7 * 24 * 60 * 60;
    /// Ten years.
    pub const MAX_EXPIRATION_SECS: i64 = 10 * 365 * 24 * 60 * 60;
}

/// Generate an HS256 token for the given user.
///
/// Returns the encoded token and its lifetime in seconds.
pub fn generate_token(
    user_id: DbId,
    username: &str,
    config: &JwtConfig,
) -> Result<(String, i64), jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now
        .checked_add(config.expiration_secs)
        .ok_or_else(|| ErrorKind::MissingRequiredClaim("exp".to_string()))?;

    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;
    Ok((token, config.expiration_secs))
}

/// Validate and decode a token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// Pull the raw token out of an `Authorization` header value.
///
/// The `Bearer` scheme is optional and matched case-insensitively; a bare
/// token is accepted as-is. A scheme with no token yields `None`.
pub fn token_from_header(value: &str) -> Option<&str> {
    let value = value.trim();
    let token = match value.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ if value.eq_ignore_ascii_case("bearer") => "",
        _ => value,
    };
    (!token.is_empty()).then_some(token)
}
