use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::user::{Model as UserModel, Role};
use serde::Deserialize;
use std::str::FromStr;
use validator::Validate;

use crate::auth::generate_token;
use crate::response::ApiResponse;
use crate::routes::auth::common::UserResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    pub role: String,
}

/// POST /auth/register
///
/// Register a new user and issue an access token.
///
/// ### Request Body
/// ```json
/// {
///   "name": "Alice",
///   "email": "alice@example.com",
///   "password": "strongpassword",
///   "role": "customer"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` → identity summary plus token and expiry
/// - `400 Bad Request` → validation failure or unknown role string
/// - `409 Conflict` → email already registered
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UserResponse>::error(error_message)),
        );
    }

    let role = match Role::from_str(&req.role) {
        Ok(role) => role,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<UserResponse>::error(
                    "Role must be 'customer' or 'support_agent'",
                )),
            );
        }
    };

    let db = app_state.db();

    match UserModel::find_by_email(db, &req.email).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<UserResponse>::error(
                    "A user with this email already exists",
                )),
            );
        }
        Ok(None) => {}
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    match UserModel::create(db, &req.name, &req.email, &req.password, role).await {
        Ok(user) => {
            let (token, expires_at) = generate_token(&user);
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    UserResponse::new(user, token, expires_at),
                    "User registered successfully",
                )),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<UserResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,

    /// Optional role assertion; when present it must match the stored role.
    pub role: Option<String>,
}

/// POST /auth/login
///
/// Authenticate an existing user and issue an access token.
///
/// Unknown email and wrong password answer with the same message so the
/// endpoint does not reveal which accounts exist. The token's role claim
/// always comes from the stored row, never from the request.
///
/// ### Responses
/// - `200 OK` → identity summary plus token and expiry
/// - `400 Bad Request` → validation failure or unknown role string
/// - `401 Unauthorized` → invalid credentials, or role assertion mismatch
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UserResponse>::error(error_message)),
        );
    }

    let asserted_role = match &req.role {
        Some(raw) => match Role::from_str(raw) {
            Ok(role) => Some(role),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<UserResponse>::error(
                        "Role must be 'customer' or 'support_agent'",
                    )),
                );
            }
        },
        None => None,
    };

    let db = app_state.db();

    let user = match UserModel::verify_credentials(db, &req.email, &req.password).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::<UserResponse>::error(
                    "Invalid email or password",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    if let Some(role) = asserted_role {
        if role != user.role {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::<UserResponse>::error(
                    "Invalid credentials or role",
                )),
            );
        }
    }

    let (token, expires_at) = generate_token(&user);
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            UserResponse::new(user, token, expires_at),
            "Login successful",
        )),
    )
}
