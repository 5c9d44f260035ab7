//! Bearer-token request authentication for axum handlers.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, StatusCode};
use axum::Json;

use crate::jwt::JwtManager;

/// States that can expose a `JwtManager` to the extractor.
pub trait JwtState {
    fn jwt(&self) -> &JwtManager;
}

impl<T: JwtState + ?Sized> JwtState for Arc<T> {
    fn jwt(&self) -> &JwtManager {
        (**self).jwt()
    }
}

/// Authenticated user identity, extracted from the `Authorization` header.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: i64,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: JwtState + Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| unauthorized("No authentication token provided"))?;

        let claims = state
            .jwt()
            .verify(token)
            .map_err(|_| unauthorized("Invalid authentication token"))?;
        let user_id = claims
            .user_id()
            .map_err(|_| unauthorized("Invalid authentication token"))?;

        Ok(AuthUser { user_id })
    }
}

fn unauthorized(message: &str) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({ "error": message })),
    )
}
