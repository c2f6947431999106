//! REST handlers
//!
//! Request/response shapes mirror what downstream consumers already
//! expect: search wraps candidates in a success envelope, company
//! lookups return the serialized record as-is.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::error;

use zaubacorp_core::{CompanyRecord, SearchCandidate, SearchFilter};

use crate::AppState;

#[derive(Deserialize)]
pub struct SearchQuery {
    query: String,
    filter_type: Option<String>,
    max_results: Option<usize>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<SearchCandidate>,
    pub total_found: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

const DEFAULT_MAX_RESULTS: usize = 10;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> axum::response::Response {
    let filter = match params.filter_type.as_deref() {
        None => SearchFilter::default(),
        Some(raw) => match SearchFilter::from_param(raw) {
            Some(filter) => filter,
            None => {
                let body = serde_json::json!({
                    "error": format!(
                        "invalid filter_type; must be one of: {}",
                        SearchFilter::all_params().join(", ")
                    ),
                });
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            }
        },
    };

    let max_results = params.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
    let scraper = state.scraper.lock().await;

    match scraper.search(&params.query, filter, Some(max_results)).await {
        Ok(results) => Json(SearchResponse {
            success: true,
            total_found: results.len(),
            results,
            error_message: None,
        })
        .into_response(),
        Err(e) => {
            error!(query = params.query, error = %e, "search failed");
            Json(SearchResponse {
                success: false,
                results: Vec::new(),
                total_found: 0,
                error_message: Some(e.to_string()),
            })
            .into_response()
        }
    }
}

pub async fn company(
    State(state): State<Arc<AppState>>,
    Path(company_id): Path<String>,
) -> Json<CompanyRecord> {
    let scraper = state.scraper.lock().await;
    Json(scraper.get_company_record(&company_id).await)
}
