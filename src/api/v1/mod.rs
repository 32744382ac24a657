//! Registry v1 API endpoints

pub mod models;
pub mod stats;
pub mod versions;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route(
            "/models",
            get(models::list_models).post(models::create_model),
        )
        .route(
            "/models/{model_id}",
            get(models::get_model)
                .put(models::update_model)
                .delete(models::delete_model),
        )
        .route("/models/{model_id}/deploy", post(models::deploy_model))
        .route(
            "/models/{model_id}/versions",
            get(versions::list_versions).post(versions::create_version),
        )
        .route("/stats", get(stats::get_stats))
}
