//! Analysis routes — scoring orchestration and history.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use ecoscore_auth::AuthUser;
use ecoscore_core::Product;
use ecoscore_store::Analysis;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analyze/{product_id}", post(analyze_product))
        .route("/user/history", get(analysis_history))
        .route("/{analysis_id}", get(get_analysis))
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    limit: Option<i64>,
    skip: Option<i64>,
}

/// Analysis with its product embedded; the product is omitted when it has
/// since been deleted.
#[derive(Debug, Serialize)]
struct AnalysisView {
    #[serde(flatten)]
    analysis: Analysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    product: Option<Product>,
}

impl AnalysisView {
    fn build(state: &AppState, user_id: i64, analysis: Analysis) -> Self {
        let product = state
            .store
            .get_product(analysis.product_id, user_id)
            .unwrap_or(None);
        Self { analysis, product }
    }
}

async fn analyze_product(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(product_id): Path<i64>,
) -> impl IntoResponse {
    let product = match state.store.get_product(product_id, user.user_id) {
        Ok(Some(product)) => product,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Product not found" })),
            );
        }
        Err(e) => {
            error!("Analyze product error: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error analyzing product" })),
            );
        }
    };

    // One analysis per product; re-requests return the stored one.
    match state.store.find_analysis_for_product(product_id, user.user_id) {
        Ok(Some(existing)) => {
            return (
                StatusCode::OK,
                Json(json!({
                    "message": "Analysis already exists for this product",
                    "analysis": existing,
                })),
            );
        }
        Ok(None) => {}
        Err(e) => {
            error!("Analyze product error: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error analyzing product" })),
            );
        }
    }

    let result = state.analyzer.analyze(&product).await;

    match state.store.create_analysis(
        user.user_id,
        product_id,
        result.score,
        &result.insights,
        &result.recommendations,
        &result.raw_analysis,
    ) {
        Ok(analysis) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Environmental analysis completed",
                "analysis": analysis,
            })),
        ),
        Err(e) => {
            error!("Analyze product error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error analyzing product" })),
            )
        }
    }
}

async fn get_analysis(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(analysis_id): Path<i64>,
) -> impl IntoResponse {
    match state.store.get_analysis(analysis_id, user.user_id) {
        Ok(Some(analysis)) => {
            let view = AnalysisView::build(&state, user.user_id, analysis);
            (StatusCode::OK, Json(json!({ "analysis": view })))
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Analysis not found" })),
        ),
        Err(e) => {
            error!("Get analysis error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error fetching analysis" })),
            )
        }
    }
}

async fn analysis_history(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(query): Query<HistoryQuery>,
) -> impl IntoResponse {
    let limit = query.limit.unwrap_or(20);
    let skip = query.skip.unwrap_or(0);

    let analyses = match state.store.list_analyses(user.user_id, limit, skip) {
        Ok(analyses) => analyses,
        Err(e) => {
            error!("Get user analyses error: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error fetching analyses" })),
            );
        }
    };

    let total = match state.store.count_analyses(user.user_id) {
        Ok(total) => total,
        Err(e) => {
            error!("Get user analyses error: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error fetching analyses" })),
            );
        }
    };

    let views: Vec<AnalysisView> = analyses
        .into_iter()
        .map(|analysis| AnalysisView::build(&state, user.user_id, analysis))
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "analyses": views,
            "total": total,
            "limit": limit,
            "skip": skip,
        })),
    )
}
