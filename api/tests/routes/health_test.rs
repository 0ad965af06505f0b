use crate::test_helpers::{get_json_body, json_request, make_app};
use axum::http::StatusCode;
use db::test_utils::setup_test_db;
use serial_test::serial;
use tower::ServiceExt;

#[tokio::test]
#[serial]
async fn health_check_is_public() {
    let db = setup_test_db().await;

    let app = make_app(db);
    let response = app
        .oneshot(json_request("GET", "/api/health", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], "OK");
}
