//! Version history endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{Metrics, ModelVersion};
use crate::infrastructure::services::AddVersionRequest;

/// Request to record a new model version
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVersionApiRequest {
    pub version: String,
    #[serde(default)]
    pub metrics: Option<Metrics>,
    #[serde(default)]
    pub changelog: Option<String>,
}

/// Version representation returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct VersionResponse {
    pub id: String,
    pub model_id: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,
    pub created_at: String,
}

impl From<&ModelVersion> for VersionResponse {
    fn from(version: &ModelVersion) -> Self {
        Self {
            id: version.id().as_str().to_string(),
            model_id: version.model_id().as_str().to_string(),
            version: version.version().to_string(),
            metrics: version.metrics().cloned(),
            changelog: version.changelog().map(String::from),
            created_at: version.created_at().to_rfc3339(),
        }
    }
}

/// GET /api/v1/models/{model_id}/versions
///
/// Returns the version history as a plain array, newest first.
pub async fn list_versions(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
) -> Result<Json<Vec<VersionResponse>>, ApiError> {
    let versions = state.registry_service.list_versions(&model_id).await?;

    Ok(Json(versions.iter().map(VersionResponse::from).collect()))
}

/// POST /api/v1/models/{model_id}/versions
pub async fn create_version(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
    Json(request): Json<CreateVersionApiRequest>,
) -> Result<(StatusCode, Json<VersionResponse>), ApiError> {
    debug!(model_id = %model_id, version = %request.version, "Recording model version");

    let add_request = AddVersionRequest {
        version: request.version,
        metrics: request.metrics,
        changelog: request.changelog,
    };

    let version = state
        .registry_service
        .add_version(&model_id, add_request)
        .await?;

    Ok((StatusCode::CREATED, Json(VersionResponse::from(&version))))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use crate::api::v1::models::{create_model, CreateModelApiRequest};
    use crate::domain::storage::mock::MockStorage;
    use crate::domain::{Framework, ModelId};
    use crate::infrastructure::services::{RegistryService, StatsService};

    fn test_state() -> AppState {
        let models = Arc::new(MockStorage::new());
        let versions = Arc::new(MockStorage::new());

        AppState::new(
            Arc::new(RegistryService::new(models.clone(), versions)),
            Arc::new(StatsService::new(models)),
        )
    }

    async fn register(state: &AppState, name: &str) -> String {
        let (_, Json(model)) = create_model(
            State(state.clone()),
            Json(CreateModelApiRequest {
                name: name.to_string(),
                description: None,
                framework: Framework::Pytorch,
                version: None,
                metrics: None,
                tags: vec![],
                author: None,
            }),
        )
        .await
        .unwrap();

        model.id
    }

    fn version_request(version: &str) -> CreateVersionApiRequest {
        CreateVersionApiRequest {
            version: version.to_string(),
            metrics: None,
            changelog: None,
        }
    }

    #[tokio::test]
    async fn test_create_version_returns_created() {
        let state = test_state();
        let id = register(&state, "m").await;

        let (status, Json(version)) = create_version(
            State(state),
            Path(id.clone()),
            Json(CreateVersionApiRequest {
                version: "1.1.0".to_string(),
                metrics: None,
                changelog: Some("Retrained on Q3 data".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(version.model_id, id);
        assert_eq!(version.version, "1.1.0");
        assert_eq!(version.changelog.as_deref(), Some("Retrained on Q3 data"));
    }

    #[tokio::test]
    async fn test_create_version_invalid_format_bad_request() {
        let state = test_state();
        let id = register(&state, "m").await;

        let err = create_version(State(state), Path(id), Json(version_request("1.0")))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_version_missing_model_not_found() {
        let state = test_state();

        let err = create_version(
            State(state),
            Path("ghost".to_string()),
            Json(version_request("1.1.0")),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_versions_newest_first() {
        let state = test_state();
        let id = register(&state, "m").await;

        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        create_version(
            State(state.clone()),
            Path(id.clone()),
            Json(version_request("1.1.0")),
        )
        .await
        .unwrap();

        let Json(versions) = list_versions(State(state), Path(id)).await.unwrap();

        let order: Vec<&str> = versions.iter().map(|v| v.version.as_str()).collect();
        assert_eq!(order, ["1.1.0", "1.0.0"]);
    }

    #[tokio::test]
    async fn test_list_versions_missing_model_not_found() {
        let state = test_state();

        let err = list_versions(State(state), Path("ghost".to_string()))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_version_response_format() {
        let version = ModelVersion::new(ModelId::new("m-1"), "1.0.0".to_string());

        let json = serde_json::to_string(&VersionResponse::from(&version)).unwrap();

        assert!(json.contains("\"version\":\"1.0.0\""));
        assert!(json.contains("\"model_id\":\"m-1\""));
        assert!(!json.contains("\"changelog\""));
        assert!(!json.contains("\"metrics\""));
    }
}
