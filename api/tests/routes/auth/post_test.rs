use crate::test_helpers::{get_json_body, json_request, make_app, seed_user};
use api::auth::Claims;
use axum::http::StatusCode;
use common::Config;
use db::models::user::Role;
use db::test_utils::setup_test_db;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde_json::json;
use serial_test::serial;
use tower::ServiceExt;

#[tokio::test]
#[serial]
async fn register_success() {
    let db = setup_test_db().await;

    let app = make_app(db.clone());
    let payload = json!({
        "name": "Alice",
        "email": "alice@example.com",
        "password": "securepassword123",
        "role": "customer"
    });
    let response = app
        .oneshot(json_request("POST", "/api/auth/register", None, Some(payload)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = get_json_body(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "User registered successfully");

    let data = &json["data"];
    assert_eq!(data["name"], "Alice");
    assert_eq!(data["email"], "alice@example.com");
    assert_eq!(data["role"], "customer");
    assert!(data["id"].as_i64().is_some());
    assert!(data["token"].as_str().is_some());
    assert!(data["expires_at"].as_str().is_some());
    assert!(data.get("password_hash").is_none());
}

#[tokio::test]
#[serial]
async fn register_invalid_email() {
    let db = setup_test_db().await;

    let app = make_app(db.clone());
    let payload = json!({
        "name": "Alice",
        "email": "not-an-email",
        "password": "securepassword123",
        "role": "customer"
    });
    let response = app
        .oneshot(json_request("POST", "/api/auth/register", None, Some(payload)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_json_body(response).await;
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().unwrap().contains("email"));
}

#[tokio::test]
#[serial]
async fn register_short_password() {
    let db = setup_test_db().await;

    let app = make_app(db.clone());
    let payload = json!({
        "name": "Alice",
        "email": "alice@example.com",
        "password": "short",
        "role": "customer"
    });
    let response = app
        .oneshot(json_request("POST", "/api/auth/register", None, Some(payload)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_json_body(response).await;
    assert!(
        json["message"]
            .as_str()
            .unwrap()
            .contains("Password must be at least 8 characters")
    );
}

#[tokio::test]
#[serial]
async fn register_unknown_role() {
    let db = setup_test_db().await;

    let app = make_app(db.clone());
    let payload = json!({
        "name": "Alice",
        "email": "alice@example.com",
        "password": "securepassword123",
        "role": "admin"
    });
    let response = app
        .oneshot(json_request("POST", "/api/auth/register", None, Some(payload)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_json_body(response).await;
    assert!(json["message"].as_str().unwrap().contains("Role"));
}

#[tokio::test]
#[serial]
async fn register_duplicate_email() {
    let db = setup_test_db().await;
    seed_user(&db, "Alice", "alice@example.com", Role::Customer).await;

    let app = make_app(db.clone());
    let payload = json!({
        "name": "Other Alice",
        "email": "alice@example.com",
        "password": "securepassword123",
        "role": "customer"
    });
    let response = app
        .oneshot(json_request("POST", "/api/auth/register", None, Some(payload)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = get_json_body(response).await;
    assert_eq!(json["message"], "A user with this email already exists");
}

#[tokio::test]
#[serial]
async fn login_issues_token_with_stored_role() {
    let db = setup_test_db().await;
    seed_user(&db, "Agnes", "agnes@example.com", Role::SupportAgent).await;

    let app = make_app(db.clone());
    let payload = json!({
        "email": "agnes@example.com",
        "password": "password123",
        "role": "support_agent"
    });
    let response = app
        .oneshot(json_request("POST", "/api/auth/login", None, Some(payload)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["message"], "Login successful");

    let token = json["data"]["token"].as_str().unwrap();
    let config = Config::get();
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .unwrap()
    .claims;

    assert_eq!(claims.sub, "agnes@example.com");
    assert_eq!(claims.role, Role::SupportAgent);
}

#[tokio::test]
#[serial]
async fn login_wrong_password_and_unknown_email_are_indistinguishable() {
    let db = setup_test_db().await;
    seed_user(&db, "Alice", "alice@example.com", Role::Customer).await;

    let app = make_app(db.clone());

    let wrong_password = json!({"email": "alice@example.com", "password": "wrongpass"});
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/auth/login", None, Some(wrong_password)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let first = get_json_body(response).await;

    let unknown_email = json!({"email": "nobody@example.com", "password": "password123"});
    let response = app
        .oneshot(json_request("POST", "/api/auth/login", None, Some(unknown_email)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let second = get_json_body(response).await;

    assert_eq!(first["message"], second["message"]);
}

#[tokio::test]
#[serial]
async fn login_role_mismatch_is_rejected() {
    let db = setup_test_db().await;
    seed_user(&db, "Alice", "alice@example.com", Role::Customer).await;

    let app = make_app(db.clone());
    let payload = json!({
        "email": "alice@example.com",
        "password": "password123",
        "role": "support_agent"
    });
    let response = app
        .oneshot(json_request("POST", "/api/auth/login", None, Some(payload)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = get_json_body(response).await;
    assert_eq!(json["message"], "Invalid credentials or role");
}
