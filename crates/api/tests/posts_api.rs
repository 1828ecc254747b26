//! Integration tests for the community feed: posts, likes, favorites, comments.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_bytes, body_json, create_user, delete_auth, get_auth, post_auth, post_json_auth,
    put_json_auth, send,
};
use serde_json::json;
use sqlx::PgPool;

async fn create_post(pool: &PgPool, token: &str, title: &str) -> i64 {
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/posts",
        json!({ "title": title, "content": format!("{title} content") }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn fetch_post(pool: &PgPool, token: &str, id: i64) -> serde_json::Value {
    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/posts/{id}"),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

async fn toggle(pool: &PgPool, token: &str, id: i64, action: &str) -> StatusCode {
    post_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/posts/{id}/{action}"),
        token,
    )
    .await
    .status()
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_post_starts_with_zero_counters(pool: PgPool) {
    let (user, token) = create_user(&pool, "poster").await;
    let id = create_post(&pool, &token, "First post").await;

    let post = fetch_post(&pool, &token, id).await;
    assert_eq!(post["title"], "First post");
    assert_eq!(post["user"]["id"], user.id);
    assert_eq!(post["user"]["username"], "poster");
    assert_eq!(post["likeCount"], 0);
    assert_eq!(post["commentCount"], 0);
    assert_eq!(post["viewCount"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_post_requires_title_and_content(pool: PgPool) {
    let (_, token) = create_user(&pool, "hasty").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(app, "/api/posts", json!({ "title": "", "content": "x" }), &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_posts_newest_first(pool: PgPool) {
    let (_, token) = create_user(&pool, "lister").await;
    let older = create_post(&pool, &token, "older").await;
    let newer = create_post(&pool, &token, "newer").await;

    let response = get_auth(common::build_test_app(pool), "/api/posts", &token).await;
    let posts = body_json(response).await;
    let ids: Vec<i64> = posts
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();

    assert_eq!(ids, vec![newer, older]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_post_is_404(pool: PgPool) {
    let (_, token) = create_user(&pool, "lost").await;

    let response = get_auth(common::build_test_app(pool.clone()), "/api/posts/424242", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(toggle(&pool, &token, 424242, "like").await, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_author_can_edit_or_delete(pool: PgPool) {
    let (_, author_token) = create_user(&pool, "author").await;
    let (_, other_token) = create_user(&pool, "other").await;
    let id = create_post(&pool, &author_token, "Mine").await;
    let uri = format!("/api/posts/{id}");

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        json!({ "title": "Hijacked" }),
        &other_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(common::build_test_app(pool.clone()), &uri, &other_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Older clients send edits as POST.
    let response = send(
        common::build_test_app(pool.clone()),
        Method::POST,
        &uri,
        Some(&author_token),
        Some(json!({ "content": "Edited body" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Mine");
    assert_eq!(json["content"], "Edited body");

    let response = delete_auth(common::build_test_app(pool.clone()), &uri, &author_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());

    let response = get_auth(common::build_test_app(pool), &uri, &author_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Likes, favorites, hot list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn like_and_unlike_are_idempotent(pool: PgPool) {
    let (_, token) = create_user(&pool, "liker").await;
    let id = create_post(&pool, &token, "Likeable").await;

    assert_eq!(toggle(&pool, &token, id, "like").await, StatusCode::OK);
    assert_eq!(toggle(&pool, &token, id, "like").await, StatusCode::OK);
    assert_eq!(fetch_post(&pool, &token, id).await["likeCount"], 1);

    assert_eq!(toggle(&pool, &token, id, "unlike").await, StatusCode::OK);
    assert_eq!(toggle(&pool, &token, id, "unlike").await, StatusCode::OK);
    assert_eq!(fetch_post(&pool, &token, id).await["likeCount"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn favorite_and_unfavorite(pool: PgPool) {
    let (_, token) = create_user(&pool, "saver").await;
    let id = create_post(&pool, &token, "Keeper").await;

    assert_eq!(toggle(&pool, &token, id, "favorite").await, StatusCode::OK);
    assert_eq!(toggle(&pool, &token, id, "favorite").await, StatusCode::OK);

    let favorites = body_json(
        get_auth(common::build_test_app(pool.clone()), "/api/users/me/favorites", &token).await,
    )
    .await;
    assert_eq!(favorites.as_array().unwrap().len(), 1);

    assert_eq!(toggle(&pool, &token, id, "unfavorite").await, StatusCode::OK);

    let favorites = body_json(
        get_auth(common::build_test_app(pool), "/api/users/me/favorites", &token).await,
    )
    .await;
    assert!(favorites.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn hot_posts_ranked_by_likes(pool: PgPool) {
    let (_, a) = create_user(&pool, "fan_a").await;
    let (_, b) = create_user(&pool, "fan_b").await;
    let (_, c) = create_user(&pool, "fan_c").await;

    let quiet = create_post(&pool, &a, "quiet").await;
    let popular = create_post(&pool, &a, "popular").await;
    let viral = create_post(&pool, &a, "viral").await;
    let _fresh = create_post(&pool, &a, "fresh").await;

    for token in [&a, &b, &c] {
        toggle(&pool, token, viral, "like").await;
    }
    for token in [&a, &b] {
        toggle(&pool, token, popular, "like").await;
    }
    toggle(&pool, &c, quiet, "like").await;

    let response = get_auth(common::build_test_app(pool.clone()), "/api/posts/hot", &a).await;
    let hot = body_json(response).await;
    let ids: Vec<i64> = hot
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![viral, popular, quiet], "default limit is 3");

    let response = get_auth(common::build_test_app(pool), "/api/posts/hot?limit=1", &a).await;
    let hot = body_json(response).await;
    assert_eq!(hot.as_array().unwrap().len(), 1);
    assert_eq!(hot[0]["likeCount"], 3);
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn comments_keep_counter_in_step(pool: PgPool) {
    let (_, author) = create_user(&pool, "op").await;
    let (_, replier) = create_user(&pool, "replier").await;
    let post_id = create_post(&pool, &author, "Question").await;
    let comments_uri = format!("/api/posts/{post_id}/comments");

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &comments_uri,
        json!({ "content": " Try flashcards " }),
        &replier,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let comment = body_json(response).await;
    assert_eq!(comment["username"], "replier");
    assert_eq!(comment["content"], "Try flashcards");
    assert_eq!(comment["postId"], post_id);

    post_json_auth(
        common::build_test_app(pool.clone()),
        &comments_uri,
        json!({ "content": "Thanks!" }),
        &author,
    )
    .await;

    assert_eq!(fetch_post(&pool, &author, post_id).await["commentCount"], 2);

    let listed = body_json(
        get_auth(common::build_test_app(pool.clone()), &comments_uri, &author).await,
    )
    .await;
    assert_eq!(listed[0]["content"], "Try flashcards");
    assert_eq!(listed[1]["content"], "Thanks!");

    let comment_uri = format!("/api/comments/{}", comment["id"]);
    let response = delete_auth(common::build_test_app(pool.clone()), &comment_uri, &author).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(common::build_test_app(pool.clone()), &comment_uri, &replier).await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(fetch_post(&pool, &author, post_id).await["commentCount"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_comment_rejected(pool: PgPool) {
    let (_, token) = create_user(&pool, "mute").await;
    let post_id = create_post(&pool, &token, "Silence").await;

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/posts/{post_id}/comments"),
        json!({ "content": "   " }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_bodies_get_json_errors(pool: PgPool) {
    let (_, token) = create_user(&pool, "sloppy").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/posts",
        json!({ "title": "x" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["message"].as_str().unwrap().contains("content"));

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/posts")
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(common::build_test_app(pool), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
