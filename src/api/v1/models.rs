//! Model CRUD and deployment endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, Query};
use crate::domain::{DeploymentStatus, Framework, Metrics, Model, ModelFilter, ModelPage};
use crate::infrastructure::services::{RegisterModelRequest, UpdateModelRequest};

/// Request to register a new model
#[derive(Debug, Clone, Deserialize)]
pub struct CreateModelApiRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub framework: Framework,
    /// Initial version; defaults to "1.0.0" when omitted
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub metrics: Option<Metrics>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: Option<String>,
}

/// Request to update a model's metadata
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateModelApiRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Request to change a model's deployment status
#[derive(Debug, Clone, Deserialize)]
pub struct DeployApiRequest {
    pub status: DeploymentStatus,
}

/// Query parameters for listing models
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListModelsQuery {
    pub framework: Option<Framework>,
    pub status: Option<DeploymentStatus>,
    pub search: Option<String>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

impl From<ListModelsQuery> for ModelFilter {
    fn from(query: ListModelsQuery) -> Self {
        ModelFilter {
            framework: query.framework,
            status: query.status,
            search: query.search,
            skip: query.skip.unwrap_or(0),
            limit: query.limit,
        }
    }
}

/// Model representation returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct ModelResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub framework: Framework,
    pub status: DeploymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Model> for ModelResponse {
    fn from(model: &Model) -> Self {
        Self {
            id: model.id().as_str().to_string(),
            name: model.name().to_string(),
            description: model.description().map(String::from),
            framework: model.framework(),
            status: model.status(),
            current_version: model.current_version().map(String::from),
            metrics: model.metrics().cloned(),
            tags: model.tags().to_vec(),
            author: model.author().map(String::from),
            created_at: model.created_at().to_rfc3339(),
            updated_at: model.updated_at().to_rfc3339(),
        }
    }
}

/// One page of the model listing
#[derive(Debug, Clone, Serialize)]
pub struct ModelListResponse {
    pub items: Vec<ModelResponse>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
}

impl From<ModelPage> for ModelListResponse {
    fn from(page: ModelPage) -> Self {
        Self {
            items: page.items.iter().map(ModelResponse::from).collect(),
            total: page.total,
            skip: page.skip,
            limit: page.limit,
        }
    }
}

/// GET /api/v1/models
pub async fn list_models(
    State(state): State<AppState>,
    Query(query): Query<ListModelsQuery>,
) -> Result<Json<ModelListResponse>, ApiError> {
    debug!(?query, "Listing models");

    let filter = ModelFilter::from(query);
    let page = state.registry_service.list(&filter).await?;

    Ok(Json(ModelListResponse::from(page)))
}

/// POST /api/v1/models
pub async fn create_model(
    State(state): State<AppState>,
    Json(request): Json<CreateModelApiRequest>,
) -> Result<(StatusCode, Json<ModelResponse>), ApiError> {
    debug!(name = %request.name, "Registering model");

    let register_request = RegisterModelRequest {
        name: request.name,
        description: request.description,
        framework: request.framework,
        version: request.version,
        metrics: request.metrics,
        tags: request.tags,
        author: request.author,
    };

    let model = state.registry_service.register(register_request).await?;

    Ok((StatusCode::CREATED, Json(ModelResponse::from(&model))))
}

/// GET /api/v1/models/{model_id}
pub async fn get_model(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
) -> Result<Json<ModelResponse>, ApiError> {
    let model = state
        .registry_service
        .get(&model_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Model '{}' not found", model_id)))?;

    Ok(Json(ModelResponse::from(&model)))
}

/// PUT /api/v1/models/{model_id}
pub async fn update_model(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
    Json(request): Json<UpdateModelApiRequest>,
) -> Result<Json<ModelResponse>, ApiError> {
    debug!(model_id = %model_id, "Updating model");

    let update_request = UpdateModelRequest {
        name: request.name,
        description: request.description,
        tags: request.tags,
    };

    let model = state
        .registry_service
        .update_metadata(&model_id, update_request)
        .await?;

    Ok(Json(ModelResponse::from(&model)))
}

/// DELETE /api/v1/models/{model_id}
pub async fn delete_model(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(model_id = %model_id, "Deleting model");

    if !state.registry_service.delete(&model_id).await? {
        return Err(ApiError::not_found(format!(
            "Model '{}' not found",
            model_id
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/models/{model_id}/deploy
pub async fn deploy_model(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
    Json(request): Json<DeployApiRequest>,
) -> Result<Json<ModelResponse>, ApiError> {
    debug!(model_id = %model_id, status = %request.status, "Deploying model");

    let model = state
        .registry_service
        .deploy(&model_id, request.status)
        .await?;

    Ok(Json(ModelResponse::from(&model)))
}
