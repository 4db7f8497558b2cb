//! End-to-end HTTP flows against PostgreSQL.
//!
//! `#[sqlx::test]` creates a scratch database per test from `DATABASE_URL`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, delete_auth, get, get_auth, post_json, post_json_auth,
    put_json_auth, token_for,
};
use quizbank_core::types::DbId;
use quizbank_db::models::user::CreateUser;
use quizbank_db::repositories::UserRepo;
use serde_json::{json, Value};
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, email: &str, role: &str) -> (DbId, String) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            name: "Tester".to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role: role.to_string(),
            year: Some(2),
        },
    )
    .await
    .unwrap();
    (user.id, token_for(user.id, role))
}

/// Create a subject and category through the API; returns their ids.
async fn seed_taxonomy(pool: &PgPool, boss: &str) -> (i64, i64) {
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/subjects",
        json!({ "name": "Anatomy", "description": "Structure of the human body", "year": 1 }),
        boss,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let subject_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/categories",
        json!({ "subject_id": subject_id, "name": "Bones", "description": "Skeletal system basics" }),
        boss,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let category_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    (subject_id, category_id)
}

async fn create_quiz(pool: &PgPool, token: &str, subject_id: i64, category_id: i64) -> Value {
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/quizzes",
        json!({
            "question": "Which bone is the longest?",
            "question_type": "choice",
            "choices": ["Femur", "Tibia", "Ulna"],
            "correct_answers": ["Femur"],
            "subject_id": subject_id,
            "category_id": category_id
        }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

async fn decide(pool: &PgPool, uri: &str, body: Value, token: &str) -> (StatusCode, Value) {
    let response = post_json_auth(build_test_app(pool.clone()), uri, body, token).await;
    let status = response.status();
    (status, body_json(response).await)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_database(pool: PgPool) {
    let response = get(build_test_app(pool), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_then_login(pool: PgPool) {
    let body = json!({
        "email": "Student@Example.com",
        "name": "Student",
        "password": "correct-horse-1",
        "year": 3
    });
    let response = post_json(build_test_app(pool.clone()), "/api/v1/auth/register", body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["email"], "student@example.com");
    assert_eq!(json["data"]["user"]["role"], "user");

    let response = post_json(build_test_app(pool.clone()), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/login",
        json!({ "email": "student@example.com", "password": "correct-horse-1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_json(response).await["data"]["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = get_auth(build_test_app(pool.clone()), "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        build_test_app(pool),
        "/api/v1/auth/login",
        json!({ "email": "student@example.com", "password": "wrong-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn two_admins_approve_a_quiz(pool: PgPool) {
    let (_, user) = seed_user(&pool, "user@example.com", "user").await;
    let (_, admin1) = seed_user(&pool, "a1@example.com", "admin").await;
    let (_, admin2) = seed_user(&pool, "a2@example.com", "admin").await;
    let (_, boss) = seed_user(&pool, "boss@example.com", "super_admin").await;
    let (subject_id, category_id) = seed_taxonomy(&pool, &boss).await;

    let quiz = create_quiz(&pool, &user, subject_id, category_id).await;
    assert_eq!(quiz["status"], "pending");
    let uri = format!("/api/v1/approvals/quiz/{}", quiz["id"]);

    let (status, first) = decide(&pool, &uri, json!({ "approved": true }), &admin1).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["data"]["outcome"], "pending");
    assert_eq!(first["data"]["tally"], json!({ "approvals": 1, "denials": 0 }));
    assert!(first["data"]["decided_by"].is_null());
    assert!(first["data"].get("target").is_none());

    let response = get_auth(build_test_app(pool.clone()), &format!("{uri}/votes"), &admin2).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["votes"].as_array().unwrap().len(), 1);

    let (status, second) = decide(&pool, &uri, json!({ "approved": true }), &admin2).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["data"]["outcome"], "approved");
    assert_eq!(second["data"]["decided_by"], "quorum");
    assert_eq!(second["data"]["target"]["status"], "approved");

    let (status, _) = decide(&pool, &uri, json!({ "approved": false }), &admin1).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn approved_report_swaps_original_for_suggestion(pool: PgPool) {
    let (_, user) = seed_user(&pool, "user@example.com", "user").await;
    let (_, boss) = seed_user(&pool, "boss@example.com", "super_admin").await;
    let (subject_id, category_id) = seed_taxonomy(&pool, &boss).await;

    let original = create_quiz(&pool, &boss, subject_id, category_id).await;
    assert_eq!(original["status"], "approved");
    let suggested = create_quiz(&pool, &user, subject_id, category_id).await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/reports",
        json!({
            "type": "quiz",
            "original_id": original["id"],
            "suggested_id": suggested["id"],
            "reason": "Tibia is listed twice in the textbook"
        }),
        &user,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let report = body_json(response).await["data"].clone();
    assert_eq!(report["status"], "pending");
    assert_eq!(report["original"]["status"], "reported");
    assert_eq!(report["suggested"]["status"], "reported");

    // Reported content is frozen.
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/quizzes/{}", suggested["id"]),
        json!({ "question": "Which bone is the shortest?" }),
        &user,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let (status, result) = decide(
        &pool,
        &format!("/api/v1/approvals/report/{}", report["id"]),
        json!({ "approved": true }),
        &boss,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["data"]["outcome"], "approved");
    assert_eq!(result["data"]["decided_by"], "super_admin");
    assert_eq!(result["data"]["target"]["status"], "approved");
    assert_eq!(result["data"]["target"]["original"]["status"], "rejected");
    assert_eq!(result["data"]["target"]["suggested"]["status"], "approved");
    assert_eq!(
        result["data"]["target"]["reason"],
        "Tibia is listed twice in the textbook"
    );

    let response = delete_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/reports/{}", report["id"]),
        &user,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn owner_edit_returns_quiz_to_review(pool: PgPool) {
    let (_, user) = seed_user(&pool, "user@example.com", "user").await;
    let (_, other) = seed_user(&pool, "other@example.com", "user").await;
    let (_, boss) = seed_user(&pool, "boss@example.com", "super_admin").await;
    let (subject_id, category_id) = seed_taxonomy(&pool, &boss).await;

    let quiz = create_quiz(&pool, &user, subject_id, category_id).await;
    let uri = format!("/api/v1/quizzes/{}", quiz["id"]);
    let (status, _) = decide(
        &pool,
        &format!("/api/v1/approvals/quiz/{}", quiz["id"]),
        json!({ "approved": true }),
        &boss,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let edit = json!({ "question": "Which bone is the longest in the body?" });
    let response = put_json_auth(build_test_app(pool.clone()), &uri, edit.clone(), &other).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(build_test_app(pool.clone()), &uri, edit, &user).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "pending");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn super_admin_promotes_user_to_admin(pool: PgPool) {
    let (user_id, user) = seed_user(&pool, "user@example.com", "user").await;
    let (_, boss) = seed_user(&pool, "boss@example.com", "super_admin").await;

    let response = get_auth(build_test_app(pool.clone()), "/api/v1/auth/users", &boss).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);

    let uri = format!("/api/v1/auth/users/{user_id}");
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &uri,
        json!({ "role": "admin", "year": 4 }),
        &boss,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "admin");
    assert_eq!(json["data"]["year"], 4);
    assert!(json["data"].get("password_hash").is_none());

    // Users can still edit their own profile, but not their role.
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &uri,
        json!({ "name": "Renamed" }),
        &user,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json_auth(
        build_test_app(pool),
        "/api/v1/auth/users/999999",
        json!({ "name": "Nobody" }),
        &boss,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_open_report_releases_quizzes(pool: PgPool) {
    let (_, user) = seed_user(&pool, "user@example.com", "user").await;
    let (_, boss) = seed_user(&pool, "boss@example.com", "super_admin").await;
    let (subject_id, category_id) = seed_taxonomy(&pool, &boss).await;

    let original = create_quiz(&pool, &boss, subject_id, category_id).await;
    let suggested = create_quiz(&pool, &user, subject_id, category_id).await;
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/reports",
        json!({ "type": "quiz", "original_id": original["id"], "suggested_id": suggested["id"] }),
        &user,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let report_id = body_json(response).await["data"]["id"].clone();

    let response = delete_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/reports/{report_id}"),
        &boss,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/quizzes/{}", original["id"]),
        &user,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["status"], "approved");

    // The suggestion is editable again.
    let response = put_json_auth(
        build_test_app(pool),
        &format!("/api/v1/quizzes/{}", suggested["id"]),
        json!({ "question": "Which bone is the longest one?" }),
        &user,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "pending");
}
