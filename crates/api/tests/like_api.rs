//! HTTP-level integration tests for liking and unliking projects.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, post_auth};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_like_is_idempotent(pool: PgPool) {
    let owner = common::create_confirmed_user(&pool, "taro@example.com", "たろう").await;
    let fan = common::create_confirmed_user(&pool, "hana@example.com", "はなこ").await;
    let project = common::create_project(&pool, owner.id, "畑ノート").await;
    let app = common::build_test_app(pool);
    let uri = format!("/api/projects/{}/like", project.id);
    let token = common::token_for(fan.id);

    let response = post_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "liked": true, "likes_count": 1 }));

    let response = post_auth(app.clone(), &uri, &token).await;
    assert_eq!(body_json(response).await, json!({ "liked": true, "likes_count": 1 }));

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(body_json(response).await, json!({ "liked": false, "likes_count": 0 }));

    // Unliking again never drives the counter negative.
    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(body_json(response).await, json!({ "liked": false, "likes_count": 0 }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_like_requires_auth(pool: PgPool) {
    let owner = common::create_confirmed_user(&pool, "taro@example.com", "たろう").await;
    let project = common::create_project(&pool, owner.id, "畑ノート").await;
    let app = common::build_test_app(pool);

    let response = common::post_json(app, &format!("/api/projects/{}/like", project.id), json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_like_missing_project(pool: PgPool) {
    let fan = common::create_confirmed_user(&pool, "hana@example.com", "はなこ").await;
    let app = common::build_test_app(pool);

    let response = post_auth(app, "/api/projects/424242/like", &common::token_for(fan.id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
