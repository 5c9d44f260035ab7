//! Auth routes — registration, login, profile.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use ecoscore_auth::AuthUser;
use ecoscore_core::Error;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/profile", get(profile))
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    name: String,
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    if req.name.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "All fields are required" })),
        );
    }

    let hash = match state.hasher.hash_password(&req.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Registration error: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error registering user" })),
            );
        }
    };

    let user = match state.store.create_user(&req.name, &req.email, &hash) {
        Ok(user) => user,
        Err(Error::Duplicate(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "User already exists with this email" })),
            );
        }
        Err(e) => {
            error!("Registration error: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error registering user" })),
            );
        }
    };

    let token = match state.jwt.issue(user.id) {
        Ok(token) => token,
        Err(e) => {
            error!("Registration error: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error registering user" })),
            );
        }
    };

    (
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully",
            "token": token,
            "user": { "id": user.id, "name": user.name, "email": user.email },
        })),
    )
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Email and password are required" })),
        );
    }

    let user = match state.store.find_user_by_email(&req.email) {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            );
        }
        Err(e) => {
            error!("Login error: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error logging in" })),
            );
        }
    };

    match state.hasher.verify_password(&req.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            );
        }
        Err(e) => {
            error!("Login error: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error logging in" })),
            );
        }
    }

    let token = match state.jwt.issue(user.id) {
        Ok(token) => token,
        Err(e) => {
            error!("Login error: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error logging in" })),
            );
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "message": "Login successful",
            "token": token,
            "user": { "id": user.id, "name": user.name, "email": user.email },
        })),
    )
}

async fn profile(State(state): State<Arc<AppState>>, user: AuthUser) -> impl IntoResponse {
    match state.store.get_user(user.user_id) {
        Ok(Some(user)) => (StatusCode::OK, Json(json!({ "user": user }))),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "User not found" })),
        ),
        Err(e) => {
            error!("Get profile error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error fetching profile" })),
            )
        }
    }
}
