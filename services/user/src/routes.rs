//! User service routes

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde::Serialize;
use serde_json::json;

use crate::{
    error::ApiError,
    models::{LoginCredentials, NewUser, UserUpdate},
    state::AppState,
};

/// Response for user creation
#[derive(Serialize)]
pub struct CreateUserResponse {
    pub uid: String,
    pub message: String,
}

/// Response for user login
#[derive(Serialize)]
pub struct LoginResponse {
    pub uid: String,
    pub message: String,
}

/// Response for user update
#[derive(Serialize)]
pub struct UpdateUserResponse {
    pub uid: String,
    pub message: String,
}

/// Create the router for the user service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/user/create", post(create_user))
        .route("/api/user/login", post(login_user))
        .route("/api/user/update", put(update_user))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "user-service"
    }))
}

/// User creation endpoint
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.user_service.create_user(&payload).await?;

    let response = CreateUserResponse {
        message: format!("User created successfully with UID: {}", user.uid),
        uid: user.uid,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// User login endpoint
pub async fn login_user(
    State(state): State<AppState>,
    Json(payload): Json<LoginCredentials>,
) -> Result<impl IntoResponse, ApiError> {
    let account = state
        .user_service
        .login_user(&payload.email, &payload.password)
        .await?;

    let response = LoginResponse {
        message: format!("Login successful for UID: {}", account.uid),
        uid: account.uid,
    };

    Ok((StatusCode::OK, Json(response)))
}

/// User update endpoint
pub async fn update_user(
    State(state): State<AppState>,
    Json(payload): Json<UserUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    let account = state.user_service.update_user(&payload).await?;

    let response = UpdateUserResponse {
        message: "User updated successfully.".to_string(),
        uid: account.uid,
    };

    Ok((StatusCode::OK, Json(response)))
}
