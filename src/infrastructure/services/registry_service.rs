//! Registry service - model lifecycle, deployment transitions, and version
//! bookkeeping

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::model::filter;
use crate::domain::storage::Storage;
use crate::domain::version::sort_newest_first;
use crate::domain::{
    normalize_tags, validate_description, validate_name, validate_version,
    DeploymentStatus, DomainError, Framework, Metrics, Model, ModelFilter, ModelId, ModelPage,
    ModelValidationError, ModelVersion,
};

/// Version assigned when a model is registered without one
pub const DEFAULT_INITIAL_VERSION: &str = "1.0.0";

/// Request to register a new model
#[derive(Debug, Clone)]
pub struct RegisterModelRequest {
    pub name: String,
    pub description: Option<String>,
    pub framework: Framework,
    /// Initial version string; omission falls back to [`DEFAULT_INITIAL_VERSION`]
    pub version: Option<String>,
    pub metrics: Option<Metrics>,
    pub tags: Vec<String>,
    pub author: Option<String>,
}

/// Request to update a model's mutable metadata.
///
/// Absent fields are left unchanged. Framework, status, and author are not
/// updatable through this path.
#[derive(Debug, Clone, Default)]
pub struct UpdateModelRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Request to record a new version of a model
#[derive(Debug, Clone)]
pub struct AddVersionRequest {
    pub version: String,
    pub metrics: Option<Metrics>,
    pub changelog: Option<String>,
}

/// Registry service coordinating model and version storage.
///
/// Mutations are serialized through an internal lock so check-then-write
/// sequences (name uniqueness, status transitions, cascade deletes) stay
/// atomic with respect to each other.
#[derive(Debug)]
pub struct RegistryService<M, V>
where
    M: Storage<Model>,
    V: Storage<ModelVersion>,
{
    models: Arc<M>,
    versions: Arc<V>,
    write_lock: Mutex<()>,
}

impl<M, V> RegistryService<M, V>
where
    M: Storage<Model>,
    V: Storage<ModelVersion>,
{
    pub fn new(models: Arc<M>, versions: Arc<V>) -> Self {
        Self {
            models,
            versions,
            write_lock: Mutex::new(()),
        }
    }

    /// Registers a new model together with its initial version record.
    ///
    /// The initial version carries the model's metrics but no changelog;
    /// it defaults to [`DEFAULT_INITIAL_VERSION`] when the request omits one.
    pub async fn register(&self, request: RegisterModelRequest) -> Result<Model, DomainError> {
        validate_name(&request.name).map_err(validation_error)?;

        if let Some(ref description) = request.description {
            validate_description(description).map_err(validation_error)?;
        }

        let version = request
            .version
            .unwrap_or_else(|| DEFAULT_INITIAL_VERSION.to_string());
        validate_version(&version).map_err(validation_error)?;

        let _guard = self.write_lock.lock().await;

        if self.find_by_name(&request.name).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "Model with name '{}' already exists",
                request.name
            )));
        }

        let mut model = Model::new(request.name, request.framework)
            .with_version(version.clone())
            .with_tags(normalize_tags(request.tags));

        if let Some(description) = request.description {
            model = model.with_description(description);
        }

        if let Some(ref metrics) = request.metrics {
            model = model.with_metrics(metrics.clone());
        }

        if let Some(author) = request.author {
            model = model.with_author(author);
        }

        let mut record = ModelVersion::new(model.id().clone(), version);

        if let Some(metrics) = request.metrics {
            record = record.with_metrics(metrics);
        }

        // Version record first: if the model write fails, the stray record is
        // unreachable and registration can be retried under a fresh id.
        self.versions.create(record).await?;
        let model = self.models.create(model).await?;

        tracing::info!(model_id = %model.id(), name = %model.name(), "Registered model");

        Ok(model)
    }

    /// Gets a model by id
    pub async fn get(&self, id: &str) -> Result<Option<Model>, DomainError> {
        self.models.get(&ModelId::new(id)).await
    }

    /// Gets a model by id, returning an error if not found
    pub async fn get_required(&self, id: &str) -> Result<Model, DomainError> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Model '{}' not found", id)))
    }

    /// Lists models matching the filter, one deterministic page at a time
    pub async fn list(&self, filter: &ModelFilter) -> Result<ModelPage, DomainError> {
        let models = self.models.list().await?;
        Ok(filter::apply(filter, models))
    }

    /// Updates a model's mutable metadata
    pub async fn update_metadata(
        &self,
        id: &str,
        request: UpdateModelRequest,
    ) -> Result<Model, DomainError> {
        if let Some(ref name) = request.name {
            validate_name(name).map_err(validation_error)?;
        }

        if let Some(ref description) = request.description {
            validate_description(description).map_err(validation_error)?;
        }

        let _guard = self.write_lock.lock().await;

        let mut model = self.get_required(id).await?;

        if let Some(name) = request.name {
            if name != model.name() {
                if self.find_by_name(&name).await?.is_some() {
                    return Err(DomainError::conflict(format!(
                        "Model with name '{}' already exists",
                        name
                    )));
                }
                model.set_name(name);
            }
        }

        if let Some(description) = request.description {
            model.set_description(Some(description));
        }

        if let Some(tags) = request.tags {
            model.set_tags(normalize_tags(tags));
        }

        self.models.update(model).await
    }

    /// Deletes a model and all of its version records.
    ///
    /// Returns false if no model with the given id exists. Version records
    /// are removed before the model, so a failure part-way leaves the model
    /// in place with the delete retryable rather than orphaning versions.
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let _guard = self.write_lock.lock().await;

        let model_id = ModelId::new(id);

        if !self.models.exists(&model_id).await? {
            return Ok(false);
        }

        for version in self.versions.list().await? {
            if version.model_id() == &model_id {
                self.versions.delete(version.id()).await?;
            }
        }

        self.models.delete(&model_id).await?;

        tracing::info!(model_id = %model_id, "Deleted model and its versions");

        Ok(true)
    }

    /// Moves a model to a new deployment status, enforcing the transition
    /// rules. On rejection the stored model is untouched.
    pub async fn deploy(
        &self,
        id: &str,
        target: DeploymentStatus,
    ) -> Result<Model, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut model = self.get_required(id).await?;
        let from = model.status();

        model.transition_to(target)?;
        let model = self.models.update(model).await?;

        tracing::info!(
            model_id = %model.id(),
            from = %from,
            to = %target,
            "Deployment status changed"
        );

        Ok(model)
    }

    /// Records a new version for a model.
    ///
    /// The model's current version and metrics follow the newest record.
    pub async fn add_version(
        &self,
        id: &str,
        request: AddVersionRequest,
    ) -> Result<ModelVersion, DomainError> {
        validate_version(&request.version).map_err(validation_error)?;

        let _guard = self.write_lock.lock().await;

        let mut model = self.get_required(id).await?;

        let mut record = ModelVersion::new(model.id().clone(), request.version.clone());

        if let Some(ref metrics) = request.metrics {
            record = record.with_metrics(metrics.clone());
        }

        if let Some(changelog) = request.changelog {
            record = record.with_changelog(changelog);
        }

        let record = self.versions.create(record).await?;

        model.set_current_version(request.version);
        if let Some(metrics) = request.metrics {
            model.set_metrics(metrics);
        }
        self.models.update(model).await?;

        Ok(record)
    }

    /// Lists a model's version history, newest first
    pub async fn list_versions(&self, id: &str) -> Result<Vec<ModelVersion>, DomainError> {
        let model = self.get_required(id).await?;

        let mut versions: Vec<ModelVersion> = self
            .versions
            .list()
            .await?
            .into_iter()
            .filter(|v| v.model_id() == model.id())
            .collect();

        sort_newest_first(&mut versions);

        Ok(versions)
    }

    /// Finds a model by exact name
    async fn find_by_name(&self, name: &str) -> Result<Option<Model>, DomainError> {
        let models = self.models.list().await?;
        Ok(models.into_iter().find(|m| m.name() == name))
    }
}

fn validation_error(error: ModelValidationError) -> DomainError {
    DomainError::validation(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::storage::mock::MockStorage;

    fn create_service() -> RegistryService<MockStorage<Model>, MockStorage<ModelVersion>> {
        RegistryService::new(Arc::new(MockStorage::new()), Arc::new(MockStorage::new()))
    }

    fn register_request(name: &str) -> RegisterModelRequest {
        RegisterModelRequest {
            name: name.to_string(),
            description: Some("Customer churn predictor".to_string()),
            framework: Framework::Sklearn,
            version: Some("1.0.0".to_string()),
            metrics: Some(Metrics::from([("accuracy".to_string(), 0.93)])),
            tags: vec!["Churn".to_string(), "PROD".to_string()],
            author: Some("data-team".to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_model() {
        let service = create_service();

        let model = service.register(register_request("churn-v1")).await.unwrap();

        assert_eq!(model.name(), "churn-v1");
        assert_eq!(model.framework(), Framework::Sklearn);
        assert_eq!(model.status(), DeploymentStatus::Development);
        assert_eq!(model.current_version(), Some("1.0.0"));
        assert_eq!(model.tags(), ["churn", "prod"]);
    }

    #[tokio::test]
    async fn test_register_creates_initial_version_without_changelog() {
        let service = create_service();

        let model = service.register(register_request("churn-v1")).await.unwrap();

        let versions = service.list_versions(model.id().as_str()).await.unwrap();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].version(), "1.0.0");
        assert!(versions[0].changelog().is_none());
        assert_eq!(versions[0].metrics().unwrap()["accuracy"], 0.93);
    }

    #[tokio::test]
    async fn test_register_without_version_defaults_to_1_0_0() {
        let service = create_service();

        let model = service
            .register(RegisterModelRequest {
                name: "bare".to_string(),
                description: None,
                framework: Framework::Other,
                version: None,
                metrics: None,
                tags: vec![],
                author: None,
            })
            .await
            .unwrap();

        assert_eq!(model.current_version(), Some(DEFAULT_INITIAL_VERSION));

        let versions = service.list_versions(model.id().as_str()).await.unwrap();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].version(), "1.0.0");
        assert!(versions[0].metrics().is_none());
    }

    #[tokio::test]
    async fn test_register_duplicate_name_conflicts() {
        let service = create_service();

        service.register(register_request("taken")).await.unwrap();
        let result = service.register(register_request("taken")).await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_name() {
        let service = create_service();
        let mut request = register_request("bad");
        request.name = "no/slashes".to_string();

        let result = service.register(request).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_version() {
        let service = create_service();
        let mut request = register_request("m");
        request.version = Some("v1".to_string());

        let result = service.register(request).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_failed_register_leaves_no_record() {
        let service = create_service();
        service.register(register_request("taken")).await.unwrap();

        let _ = service.register(register_request("taken")).await;

        let page = service.list(&ModelFilter::new()).await.unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_get_required_not_found() {
        let service = create_service();

        let result = service.get_required("no-such-id").await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_deploy_development_to_production_rejected() {
        let service = create_service();
        let model = service.register(register_request("m")).await.unwrap();

        let result = service
            .deploy(model.id().as_str(), DeploymentStatus::Production)
            .await;

        assert!(matches!(result, Err(DomainError::InvalidTransition { .. })));

        // Stored model is untouched
        let stored = service.get_required(model.id().as_str()).await.unwrap();
        assert_eq!(stored.status(), DeploymentStatus::Development);
    }

    #[tokio::test]
    async fn test_deploy_through_staging_succeeds() {
        let service = create_service();
        let model = service.register(register_request("m")).await.unwrap();
        let id = model.id().as_str();

        let staged = service.deploy(id, DeploymentStatus::Staging).await.unwrap();
        assert_eq!(staged.status(), DeploymentStatus::Staging);

        let live = service
            .deploy(id, DeploymentStatus::Production)
            .await
            .unwrap();
        assert_eq!(live.status(), DeploymentStatus::Production);
    }

    #[tokio::test]
    async fn test_deploy_production_back_to_development_rejected() {
        let service = create_service();
        let model = service.register(register_request("m")).await.unwrap();
        let id = model.id().as_str();

        service.deploy(id, DeploymentStatus::Staging).await.unwrap();
        service
            .deploy(id, DeploymentStatus::Production)
            .await
            .unwrap();

        let result = service.deploy(id, DeploymentStatus::Development).await;
        assert!(matches!(result, Err(DomainError::InvalidTransition { .. })));
    }

    #[tokio::test]
    async fn test_deploy_missing_model() {
        let service = create_service();

        let result = service.deploy("ghost", DeploymentStatus::Staging).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_add_version_updates_model() {
        let service = create_service();
        let model = service.register(register_request("m")).await.unwrap();
        let id = model.id().as_str();

        let record = service
            .add_version(
                id,
                AddVersionRequest {
                    version: "1.1.0".to_string(),
                    metrics: Some(Metrics::from([("accuracy".to_string(), 0.95)])),
                    changelog: Some("Retrained on Q3 data".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(record.version(), "1.1.0");
        assert_eq!(record.changelog(), Some("Retrained on Q3 data"));

        let model = service.get_required(id).await.unwrap();
        assert_eq!(model.current_version(), Some("1.1.0"));
        assert_eq!(model.metrics().unwrap()["accuracy"], 0.95);
    }

    #[tokio::test]
    async fn test_add_version_duplicate_string_permitted() {
        let service = create_service();
        let model = service.register(register_request("m")).await.unwrap();
        let id = model.id().as_str();

        service
            .add_version(
                id,
                AddVersionRequest {
                    version: "1.0.0".to_string(),
                    metrics: None,
                    changelog: None,
                },
            )
            .await
            .unwrap();

        let versions = service.list_versions(id).await.unwrap();
        assert_eq!(versions.len(), 2);
    }

    #[tokio::test]
    async fn test_add_version_invalid_format_rejected() {
        let service = create_service();
        let model = service.register(register_request("m")).await.unwrap();

        let result = service
            .add_version(
                model.id().as_str(),
                AddVersionRequest {
                    version: "1.0".to_string(),
                    metrics: None,
                    changelog: None,
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_list_versions_newest_first() {
        let service = create_service();
        let model = service.register(register_request("m")).await.unwrap();
        let id = model.id().as_str();

        for version in ["1.1.0", "1.2.0"] {
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
            service
                .add_version(
                    id,
                    AddVersionRequest {
                        version: version.to_string(),
                        metrics: None,
                        changelog: None,
                    },
                )
                .await
                .unwrap();
        }

        let versions = service.list_versions(id).await.unwrap();
        let order: Vec<&str> = versions.iter().map(|v| v.version()).collect();
        assert_eq!(order, ["1.2.0", "1.1.0", "1.0.0"]);
    }

    #[tokio::test]
    async fn test_list_versions_missing_model() {
        let service = create_service();

        let result = service.list_versions("ghost").await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_cascades_versions() {
        let service = create_service();
        let model = service.register(register_request("m")).await.unwrap();
        let id = model.id().as_str();

        for version in ["1.1.0", "1.2.0"] {
            service
                .add_version(
                    id,
                    AddVersionRequest {
                        version: version.to_string(),
                        metrics: None,
                        changelog: None,
                    },
                )
                .await
                .unwrap();
        }

        assert!(service.delete(id).await.unwrap());

        let result = service.list_versions(id).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));

        // No orphaned version records remain
        assert_eq!(service.versions.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_only_touches_target_model_versions() {
        let service = create_service();
        let kept = service.register(register_request("kept")).await.unwrap();
        let doomed = service.register(register_request("doomed")).await.unwrap();

        service.delete(doomed.id().as_str()).await.unwrap();

        let versions = service.list_versions(kept.id().as_str()).await.unwrap();
        assert_eq!(versions.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_cascade_delete_keeps_model() {
        let versions = Arc::new(MockStorage::new());
        let service = RegistryService::new(Arc::new(MockStorage::new()), versions.clone());
        let model = service.register(register_request("m")).await.unwrap();
        let id = model.id().as_str();

        versions.set_error("connection reset");
        let result = service.delete(id).await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));

        // Model survives the failed cascade and a retry finishes the job
        versions.clear_error();
        assert!(service.get(id).await.unwrap().is_some());
        assert!(service.delete(id).await.unwrap());
        assert_eq!(service.versions.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_register_version_write_failure_leaves_no_model() {
        let service: RegistryService<MockStorage<Model>, MockStorage<ModelVersion>> =
            RegistryService::new(
                Arc::new(MockStorage::new()),
                Arc::new(MockStorage::new().with_error("connection refused")),
            );

        let result = service.register(register_request("m")).await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));

        assert_eq!(service.models.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_model() {
        let service = create_service();

        assert!(!service.delete("ghost").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_metadata() {
        let service = create_service();
        let model = service.register(register_request("old-name")).await.unwrap();

        let updated = service
            .update_metadata(
                model.id().as_str(),
                UpdateModelRequest {
                    name: Some("new-name".to_string()),
                    description: Some("Updated description".to_string()),
                    tags: Some(vec!["V2".to_string()]),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name(), "new-name");
        assert_eq!(updated.description(), Some("Updated description"));
        assert_eq!(updated.tags(), ["v2"]);
        // Framework and status are untouched
        assert_eq!(updated.framework(), Framework::Sklearn);
        assert_eq!(updated.status(), DeploymentStatus::Development);
    }

    #[tokio::test]
    async fn test_update_rename_to_taken_name_conflicts() {
        let service = create_service();
        service.register(register_request("taken")).await.unwrap();
        let model = service.register(register_request("other")).await.unwrap();

        let result = service
            .update_metadata(
                model.id().as_str(),
                UpdateModelRequest {
                    name: Some("taken".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_keeping_own_name_is_not_a_conflict() {
        let service = create_service();
        let model = service.register(register_request("same")).await.unwrap();

        let updated = service
            .update_metadata(
                model.id().as_str(),
                UpdateModelRequest {
                    name: Some("same".to_string()),
                    description: Some("tweaked".to_string()),
                    tags: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name(), "same");
        assert_eq!(updated.description(), Some("tweaked"));
    }

    #[tokio::test]
    async fn test_update_missing_model() {
        let service = create_service();

        let result = service
            .update_metadata("ghost", UpdateModelRequest::default())
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_with_filter() {
        let service = create_service();

        let mut sklearn = register_request("sklearn-model");
        sklearn.framework = Framework::Sklearn;
        let mut pytorch = register_request("pytorch-model");
        pytorch.framework = Framework::Pytorch;

        service.register(sklearn).await.unwrap();
        let staged = service.register(pytorch).await.unwrap();
        service
            .deploy(staged.id().as_str(), DeploymentStatus::Staging)
            .await
            .unwrap();

        let page = service
            .list(
                &ModelFilter::new()
                    .with_framework(Framework::Pytorch)
                    .with_status(DeploymentStatus::Staging),
            )
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name(), "pytorch-model");
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let service: RegistryService<MockStorage<Model>, MockStorage<ModelVersion>> =
            RegistryService::new(
                Arc::new(MockStorage::new().with_error("connection refused")),
                Arc::new(MockStorage::new()),
            );

        let result = service.list(&ModelFilter::new()).await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
