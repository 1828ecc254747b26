//! HTTP-level integration tests for registration, login and token refresh.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{
    body_json, create_user, create_user_with_status, get, get_auth, post_json, TEST_PASSWORD,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use lumina_api::auth::jwt::{generate_token, Claims, JwtConfig};
use lumina_core::users::USER_STATUS_DISABLED;
use lumina_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

async fn login(app: axum::Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = post_json(app, "/api/auth/login", body).await;
    let status = response.status();
    (status, body_json(response).await)
}

/// GET /api/auth/refresh with a raw Authorization header value.
async fn refresh_with(app: axum::Router, header: &str) -> axum::http::Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/auth/refresh")
        .header("authorization", header)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_creates_active_user_without_leaking_hash(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let body = json!({ "username": "  newbie ", "password": "abcdef" });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], 200);
    assert_eq!(json["user"]["username"], "newbie");
    assert_eq!(json["user"]["email"], "newbie@example.com");
    assert_eq!(json["user"]["status"], 1);
    assert!(json["user"].get("passwordHash").is_none());
    assert!(!json.to_string().contains("argon2"));

    let stored = UserRepo::find_by_username(&pool, "newbie").await.unwrap().unwrap();
    assert!(stored.password_hash.starts_with("$argon2id$"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_with_email_and_string_status(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({
        "username": "mailer",
        "password": "abcdef",
        "email": "mailer@lumina.app",
        "status": "0"
    });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["email"], "mailer@lumina.app");
    assert_eq!(json["user"]["status"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_duplicate_username_conflicts(pool: PgPool) {
    create_user(&pool, "taken").await;
    let app = common::build_test_app(pool);

    let body = json!({ "username": "taken", "password": "abcdef" });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Username already exists");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_duplicate_email_conflicts(pool: PgPool) {
    create_user(&pool, "first").await;
    let app = common::build_test_app(pool);

    let body = json!({ "username": "second", "password": "abcdef", "email": "first@test.com" });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_validation_failures(pool: PgPool) {
    let cases = [
        json!({ "username": "", "password": "abcdef" }),
        json!({ "username": "shortpw", "password": "abc" }),
        json!({ "username": "bademail", "password": "abcdef", "email": "nope" }),
        json!({ "username": "badstatus", "password": "abcdef", "status": "9" }),
    ];

    for body in cases {
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, "/api/auth/register", body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_success_returns_bearer_token(pool: PgPool) {
    create_user(&pool, "loginuser").await;
    let app = common::build_test_app(pool);

    let (status, json) = login(
        app,
        json!({ "username": "loginuser", "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["token"].is_string());
    assert_eq!(json["tokenType"], "Bearer");
    assert_eq!(json["expiresIn"], 3600);
    assert_eq!(json["status"], 200);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_by_email_when_username_blank(pool: PgPool) {
    create_user(&pool, "emailonly").await;
    let app = common::build_test_app(pool);

    let (status, _) = login(
        app,
        json!({ "username": "", "email": "emailonly@test.com", "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_records_forwarded_ip(pool: PgPool) {
    let (user, _) = create_user(&pool, "tracked").await;
    let app = common::build_test_app(pool.clone());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
        .body(Body::from(
            json!({ "username": "tracked", "password": TEST_PASSWORD }).to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(stored.last_login_ip.as_deref(), Some("203.0.113.9"));
    assert!(stored.last_login_time.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_ignores_forwarded_value_that_is_not_an_ip(pool: PgPool) {
    let (user, _) = create_user(&pool, "spoofed").await;
    let app = common::build_test_app(pool.clone());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .header("x-forwarded-for", format!("{}, 10.0.0.1", "a".repeat(60)))
        .body(Body::from(
            json!({ "username": "spoofed", "password": TEST_PASSWORD }).to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(stored.last_login_ip, None);
    assert!(stored.last_login_time.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_wrong_password_and_unknown_user_look_the_same(pool: PgPool) {
    create_user(&pool, "realuser").await;

    let (status_a, json_a) = login(
        common::build_test_app(pool.clone()),
        json!({ "username": "realuser", "password": "incorrect" }),
    )
    .await;
    let (status_b, json_b) = login(
        common::build_test_app(pool),
        json!({ "username": "ghost", "password": "incorrect" }),
    )
    .await;

    assert_eq!(status_a, StatusCode::UNAUTHORIZED);
    assert_eq!(status_b, StatusCode::UNAUTHORIZED);
    assert_eq!(json_a["message"], json_b["message"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_missing_credentials_is_bad_request(pool: PgPool) {
    let (status, _) = login(
        common::build_test_app(pool.clone()),
        json!({ "password": "whatever" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = login(
        common::build_test_app(pool),
        json!({ "username": "someone" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_disabled_account_is_forbidden(pool: PgPool) {
    create_user_with_status(&pool, "frozen", USER_STATUS_DISABLED).await;
    let app = common::build_test_app(pool);

    let (status, json) = login(
        app,
        json!({ "username": "frozen", "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Account is disabled");
}

// ---------------------------------------------------------------------------
// Refresh
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_accepts_token_with_or_without_bearer(pool: PgPool) {
    let (_, token) = create_user(&pool, "refresher").await;

    for header in [format!("Bearer {token}"), token.clone()] {
        let response = refresh_with(common::build_test_app(pool.clone()), &header).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["tokenType"], "Bearer");
        assert_ne!(json["token"].as_str().unwrap(), token, "a new token is issued");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_without_header_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/auth/refresh").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_with_expired_token_is_unauthorized(pool: PgPool) {
    let (user, _) = create_user(&pool, "stale").await;
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        exp: now - 600,
        iat: now - 4200,
        jti: "expired".to_string(),
    };
    let secret = common::test_config().jwt.secret;
    let expired = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();

    let response = refresh_with(common::build_test_app(pool), &expired).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_for_disabled_user_is_forbidden(pool: PgPool) {
    let (_, token) = create_user_with_status(&pool, "banned", USER_STATUS_DISABLED).await;
    let response = refresh_with(common::build_test_app(pool), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Full flow
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_login_and_fetch_profile(pool: PgPool) {
    let body = json!({ "username": "roundtrip", "password": "abcdef", "email": "rt@lumina.app" });
    let response = post_json(common::build_test_app(pool.clone()), "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let (status, json) = login(
        common::build_test_app(pool.clone()),
        json!({ "username": "roundtrip", "password": "abcdef" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = json["token"].as_str().unwrap().to_string();

    let response = get_auth(common::build_test_app(pool), "/api/users/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["username"], "roundtrip");
    assert_eq!(me["email"], "rt@lumina.app");
    assert!(me["lastLoginTime"].is_string());
    assert!(me.get("passwordHash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn protected_route_requires_valid_token(pool: PgPool) {
    let response = get(common::build_test_app(pool.clone()), "/api/notes").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");

    let response = get_auth(common::build_test_app(pool), "/api/notes", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn token_signed_with_another_secret_is_rejected(pool: PgPool) {
    let (user, _) = create_user(&pool, "forged").await;
    let foreign = JwtConfig {
        secret: "some-other-secret".to_string(),
        expiration_secs: 3600,
    };
    let (forged, _) = generate_token(user.id, &user.username, &foreign).unwrap();

    let response = get_auth(common::build_test_app(pool.clone()), "/api/users/me", &forged).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");

    let response = refresh_with(common::build_test_app(pool), &forged).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
