//! Registry statistics endpoint

use std::collections::BTreeMap;

use axum::extract::State;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::api::v1::models::ModelResponse;
use crate::infrastructure::services::DashboardStats;

/// Aggregate statistics response
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub total_models: usize,
    pub models_by_status: BTreeMap<String, usize>,
    pub models_by_framework: BTreeMap<String, usize>,
    pub recent_models: Vec<ModelResponse>,
}

impl From<DashboardStats> for StatsResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total_models: stats.total_models,
            models_by_status: stats.models_by_status,
            models_by_framework: stats.models_by_framework,
            recent_models: stats.recent_models.iter().map(ModelResponse::from).collect(),
        }
    }
}

/// GET /api/v1/stats
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let stats = state.stats_service.get_stats().await?;

    Ok(Json(StatsResponse::from(stats)))
}
