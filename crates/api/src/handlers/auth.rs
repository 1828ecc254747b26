//! Handlers for the `/auth` resource (register, login, refresh).

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use lumina_core::error::CoreError;
use lumina_core::users::{
    default_email, parse_status, validate_email, validate_password, validate_username,
};
use lumina_db::models::user::{CreateUser, User, UserResponse};
use lumina_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_token, token_from_header, validate_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::client_ip::ClientIp;
use crate::response::{Envelope, TokenResponse};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Registration status as sent by clients: `"1"` or `1`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawStatus {
    Text(String),
    Number(i64),
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub email: Option<String>,
    pub status: Option<RawStatus>,
}

/// Request body for `POST /auth/login`. Either `username` or `email` identifies the account.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserPayload {
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create an account. Email defaults to `{username}@example.com`.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<Json<Envelope<UserPayload>>> {
    let username = validate_username(&input.username).map_err(CoreError::Validation)?;
    validate_password(&input.password).map_err(CoreError::Validation)?;

    let email = match input.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        Some(email) => validate_email(email).map_err(CoreError::Validation)?,
        None => default_email(&username),
    };

    let status = match &input.status {
        None => parse_status(None),
        Some(RawStatus::Text(s)) => parse_status(Some(s)),
        Some(RawStatus::Number(n)) => parse_status(Some(&n.to_string())),
    }
    .map_err(CoreError::Validation)?;

    if UserRepo::find_by_username(&state.pool, &username)
        .await?
        .is_some()
    {
        return Err(CoreError::Conflict("Username already exists".into()).into());
    }
    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(CoreError::Conflict("Email already exists".into()).into());
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username,
            email,
            password_hash,
            status,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok(Json(Envelope::new(
        UserPayload { user: user.into() },
        "Registration successful",
    )))
}

/// POST /api/auth/login
///
/// Authenticate with username (or email) + password and return a bearer token.
pub async fn login(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let non_blank = |v: &Option<String>| {
        v.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let identifier = non_blank(&input.username)
        .or_else(|| non_blank(&input.email))
        .ok_or_else(|| AppError::BadRequest("Username or email is required".into()))?;
    let password = input
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("Password is required".into()))?;

    let user = match UserRepo::find_by_username(&state.pool, &identifier).await? {
        Some(user) => Some(user),
        None => UserRepo::find_by_email(&state.pool, &identifier).await?,
    }
    .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

    let password_valid = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    ensure_active(&user)?;

    UserRepo::record_login(&state.pool, user.id, ip.as_deref()).await?;
    tracing::info!(user_id = user.id, ip = ?ip, "User logged in");

    issue_token(&state, &user, "Login successful").map(Json)
}

/// GET /api/auth/refresh
///
/// Exchange a still-valid token for a new one. The `Bearer ` prefix is optional.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<TokenResponse>> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(token_from_header)
        .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

    let claims = validate_token(token, &state.config.jwt)
        .map_err(|_| AppError::unauthorized("Invalid or expired token"))?;

    let user = UserRepo::find_by_id(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

    ensure_active(&user)?;

    issue_token(&state, &user, "Token refreshed").map(Json)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ensure_active(user: &User) -> AppResult<()> {
    if !user.is_active() {
        return Err(AppError::forbidden("Account is disabled"));
    }
    Ok(())
}

fn issue_token(state: &AppState, user: &User, message: &str) -> AppResult<TokenResponse> {
    let (token, expires_in) = generate_token(user.id, &user.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(TokenResponse {
        token,
        token_type: "Bearer",
        expires_in,
        status: 200,
        message: message.to_string(),
    })
}
