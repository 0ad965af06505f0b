use crate::test_helpers::{get_json_body, json_request, make_app, seed_user};
use axum::http::{StatusCode, header::LOCATION};
use db::models::user::Role;
use db::test_utils::setup_test_db;
use serde_json::json;
use serial_test::serial;
use tower::ServiceExt;

#[tokio::test]
#[serial]
async fn customer_creates_open_ticket() {
    let db = setup_test_db().await;
    let (alice, token) = seed_user(&db, "Alice", "alice@example.com", Role::Customer).await;

    let app = make_app(db.clone());
    let payload = json!({
        "subject": "Printer on fire",
        "description": "It started beeping and then smoking",
        "priority": "High"
    });
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/tickets/create_ticket",
            Some(&token),
            Some(payload),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = get_json_body(response).await;
    let data = &json["data"];
    assert_eq!(data["user_id"], alice.id);
    assert_eq!(data["subject"], "Printer on fire");
    assert_eq!(data["status"], "open");
    assert_eq!(data["priority"], "high");
    assert_eq!(data["responses"].as_array().unwrap().len(), 0);
}

#[tokio::test]
#[serial]
async fn agent_is_redirected_to_own_dashboard() {
    let db = setup_test_db().await;
    let (_, token) = seed_user(&db, "Agnes", "agnes@example.com", Role::SupportAgent).await;

    let app = make_app(db.clone());
    let payload = json!({
        "subject": "Agents cannot file tickets",
        "description": "should bounce",
        "priority": "low"
    });
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/tickets/create_ticket",
            Some(&token),
            Some(payload),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(LOCATION).unwrap(),
        "/api/support_agent_dashboard"
    );
}

#[tokio::test]
#[serial]
async fn unknown_priority_is_rejected() {
    let db = setup_test_db().await;
    let (_, token) = seed_user(&db, "Alice", "alice@example.com", Role::Customer).await;

    let app = make_app(db.clone());
    let payload = json!({
        "subject": "Subject",
        "description": "Description",
        "priority": "urgent"
    });
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/tickets/create_ticket",
            Some(&token),
            Some(payload),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_json_body(response).await;
    assert!(json["message"].as_str().unwrap().contains("Priority"));
}

#[tokio::test]
#[serial]
async fn empty_subject_is_rejected() {
    let db = setup_test_db().await;
    let (_, token) = seed_user(&db, "Alice", "alice@example.com", Role::Customer).await;

    let app = make_app(db.clone());
    let payload = json!({
        "subject": "",
        "description": "Description",
        "priority": "low"
    });
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/tickets/create_ticket",
            Some(&token),
            Some(payload),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn create_ticket_requires_authentication() {
    let db = setup_test_db().await;

    let app = make_app(db.clone());
    let payload = json!({
        "subject": "Subject",
        "description": "Description",
        "priority": "low"
    });
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/tickets/create_ticket",
            None,
            Some(payload),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
