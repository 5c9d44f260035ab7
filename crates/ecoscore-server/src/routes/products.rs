//! Product routes — CRUD over the caller's own products.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use ecoscore_auth::AuthUser;
use ecoscore_store::{NewProduct, ProductUpdate};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    category: Option<String>,
    limit: Option<i64>,
    skip: Option<i64>,
}

async fn create_product(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<NewProduct>,
) -> impl IntoResponse {
    if req.name.trim().is_empty() || req.description.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Name, description, and category are required" })),
        );
    }

    match state.store.create_product(user.user_id, req) {
        Ok(product) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Product created successfully",
                "product": product,
            })),
        ),
        Err(e) => {
            error!("Create product error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error creating product" })),
            )
        }
    }
}

async fn list_products(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let limit = query.limit.unwrap_or(20);
    let skip = query.skip.unwrap_or(0);
    let category = query.category.as_deref();

    let products = match state.store.list_products(user.user_id, category, limit, skip) {
        Ok(products) => products,
        Err(e) => {
            error!("Get products error: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error fetching products" })),
            );
        }
    };

    let total = match state.store.count_products(user.user_id, category) {
        Ok(total) => total,
        Err(e) => {
            error!("Get products error: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error fetching products" })),
            );
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "products": products,
            "total": total,
            "limit": limit,
            "skip": skip,
        })),
    )
}

async fn get_product(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.store.get_product(id, user.user_id) {
        Ok(Some(product)) => (StatusCode::OK, Json(json!({ "product": product }))),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Product not found" })),
        ),
        Err(e) => {
            error!("Get product error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error fetching product" })),
            )
        }
    }
}

async fn update_product(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(update): Json<ProductUpdate>,
) -> impl IntoResponse {
    match state.store.update_product(id, user.user_id, update) {
        Ok(Some(product)) => (
            StatusCode::OK,
            Json(json!({
                "message": "Product updated successfully",
                "product": product,
            })),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Product not found" })),
        ),
        Err(e) => {
            error!("Update product error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error updating product" })),
            )
        }
    }
}

async fn delete_product(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.store.delete_product(id, user.user_id) {
        Ok(true) => (
            StatusCode::OK,
            Json(json!({ "message": "Product deleted successfully" })),
        ),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Product not found" })),
        ),
        Err(e) => {
            error!("Delete product error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error deleting product" })),
            )
        }
    }
}
