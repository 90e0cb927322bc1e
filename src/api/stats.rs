//! Statistics endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// A labelled frequency count
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatEntry {
    pub label: String,
    pub count: i64,
}

/// Dashboard counters
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub total_books: i64,
    pub total_members: i64,
    pub active_loans: i64,
    pub members_with_active_loans: i64,
    pub overdue_loans: i64,
}

/// Most borrowed authors and categories
#[derive(Debug, Serialize, ToSchema)]
pub struct TopStatsResponse {
    pub authors: Vec<StatEntry>,
    pub categories: Vec<StatEntry>,
}

/// Get dashboard statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Dashboard counters", body = StatsResponse)
    )
)]
pub async fn get_stats(State(state): State<crate::AppState>) -> AppResult<Json<StatsResponse>> {
    let stats = state.services.stats.get_stats().await?;
    Ok(Json(stats))
}

/// Get top authors and categories over the loan ledger
#[utoipa::path(
    get,
    path = "/stats/top",
    tag = "stats",
    responses(
        (status = 200, description = "Top authors and categories", body = TopStatsResponse)
    )
)]
pub async fn get_top_stats(
    State(state): State<crate::AppState>,
) -> AppResult<Json<TopStatsResponse>> {
    let stats = state.services.stats.get_top_stats().await?;
    Ok(Json(stats))
}
