use crate::test_helpers::{
    encode_claims, get_json_body, init_test_env, json_request, make_app, seed_user,
};
use api::auth::Claims;
use axum::http::{StatusCode, header::WWW_AUTHENTICATE};
use chrono::Utc;
use common::Config;
use db::models::user::Role;
use db::test_utils::setup_test_db;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serial_test::serial;
use tower::ServiceExt;

#[tokio::test]
#[serial]
async fn issued_token_round_trips_claims() {
    let db = setup_test_db().await;
    let (user, token) = seed_user(&db, "Alice", "alice@example.com", Role::Customer).await;

    let config = Config::get();
    let decoded = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .unwrap()
    .claims;

    assert_eq!(decoded.sub, user.email);
    assert_eq!(decoded.uid, user.id);
    assert_eq!(decoded.name, user.name);
    assert_eq!(decoded.role, Role::Customer);
    assert!(decoded.exp > decoded.iat);
    assert!(!decoded.jti.is_empty());
}

#[tokio::test]
#[serial]
async fn each_issued_token_has_a_fresh_id() {
    let db = setup_test_db().await;
    let (user, first) = seed_user(&db, "Alice", "alice@example.com", Role::Customer).await;
    let (second, _) = api::auth::generate_token(&user);

    let config = Config::get();
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    let a = decode::<Claims>(&first, &key, &validation).unwrap().claims;
    let b = decode::<Claims>(&second, &key, &validation).unwrap().claims;

    assert_ne!(a.jti, b.jti);
}

#[tokio::test]
#[serial]
async fn expired_token_is_rejected_regardless_of_signature() {
    let db = setup_test_db().await;
    let (user, _) = seed_user(&db, "Alice", "alice@example.com", Role::Customer).await;

    let now = Utc::now().timestamp() as usize;
    let expired = encode_claims(&Claims {
        sub: user.email.clone(),
        uid: user.id,
        name: user.name.clone(),
        role: user.role,
        iat: now - 7200,
        exp: now - 3600,
        jti: "expired-token".into(),
    });

    let app = make_app(db.clone());
    let response = app
        .oneshot(json_request("GET", "/api/auth/me", Some(&expired), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
}

#[tokio::test]
#[serial]
async fn tampered_token_is_rejected() {
    let db = setup_test_db().await;
    let (_, token) = seed_user(&db, "Alice", "alice@example.com", Role::Customer).await;

    let mut tampered = token;
    tampered.push('x');

    let app = make_app(db.clone());
    let response = app
        .oneshot(json_request("GET", "/api/auth/me", Some(&tampered), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn token_signed_with_wrong_secret_is_rejected() {
    init_test_env();
    let db = setup_test_db().await;
    let (user, _) = seed_user(&db, "Alice", "alice@example.com", Role::Customer).await;

    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user.email.clone(),
        uid: user.id,
        name: user.name.clone(),
        role: user.role,
        iat: now,
        exp: now + 3600,
        jti: "forged-token".into(),
    };
    let forged = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(b"wrong_secret_key"),
    )
    .unwrap();

    let app = make_app(db.clone());
    let response = app
        .oneshot(json_request("GET", "/api/auth/me", Some(&forged), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn missing_authorization_header_is_rejected() {
    let db = setup_test_db().await;

    let app = make_app(db.clone());
    let response = app
        .oneshot(json_request("GET", "/api/auth/me", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = get_json_body(response).await;
    assert_eq!(json["success"], false);
}
