//! Application state for shared services

use std::sync::Arc;

use crate::domain::storage::Storage;
use crate::domain::{
    DeploymentStatus, DomainError, Model, ModelFilter, ModelPage, ModelVersion,
};
use crate::infrastructure::services::{
    AddVersionRequest, DashboardStats, RegisterModelRequest, RegistryService, StatsService,
    UpdateModelRequest,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub registry_service: Arc<dyn RegistryServiceTrait>,
    pub stats_service: Arc<dyn StatsServiceTrait>,
}

/// Trait for registry service operations
#[async_trait::async_trait]
pub trait RegistryServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterModelRequest) -> Result<Model, DomainError>;
    async fn get(&self, id: &str) -> Result<Option<Model>, DomainError>;
    async fn list(&self, filter: &ModelFilter) -> Result<ModelPage, DomainError>;
    async fn update_metadata(
        &self,
        id: &str,
        request: UpdateModelRequest,
    ) -> Result<Model, DomainError>;
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
    async fn deploy(&self, id: &str, target: DeploymentStatus) -> Result<Model, DomainError>;
    async fn add_version(
        &self,
        id: &str,
        request: AddVersionRequest,
    ) -> Result<ModelVersion, DomainError>;
    async fn list_versions(&self, id: &str) -> Result<Vec<ModelVersion>, DomainError>;
}

/// Trait for stats service operations
#[async_trait::async_trait]
pub trait StatsServiceTrait: Send + Sync {
    async fn get_stats(&self) -> Result<DashboardStats, DomainError>;
}

#[async_trait::async_trait]
impl<M, V> RegistryServiceTrait for RegistryService<M, V>
where
    M: Storage<Model> + 'static,
    V: Storage<ModelVersion> + 'static,
{
    async fn register(&self, request: RegisterModelRequest) -> Result<Model, DomainError> {
        RegistryService::register(self, request).await
    }

    async fn get(&self, id: &str) -> Result<Option<Model>, DomainError> {
        RegistryService::get(self, id).await
    }

    async fn list(&self, filter: &ModelFilter) -> Result<ModelPage, DomainError> {
        RegistryService::list(self, filter).await
    }

    async fn update_metadata(
        &self,
        id: &str,
        request: UpdateModelRequest,
    ) -> Result<Model, DomainError> {
        RegistryService::update_metadata(self, id, request).await
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        RegistryService::delete(self, id).await
    }

    async fn deploy(&self, id: &str, target: DeploymentStatus) -> Result<Model, DomainError> {
        RegistryService::deploy(self, id, target).await
    }

    async fn add_version(
        &self,
        id: &str,
        request: AddVersionRequest,
    ) -> Result<ModelVersion, DomainError> {
        RegistryService::add_version(self, id, request).await
    }

    async fn list_versions(&self, id: &str) -> Result<Vec<ModelVersion>, DomainError> {
        RegistryService::list_versions(self, id).await
    }
}

#[async_trait::async_trait]
impl<M> StatsServiceTrait for StatsService<M>
where
    M: Storage<Model> + 'static,
{
    async fn get_stats(&self) -> Result<DashboardStats, DomainError> {
        StatsService::get_stats(self).await
    }
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(
        registry_service: Arc<dyn RegistryServiceTrait>,
        stats_service: Arc<dyn StatsServiceTrait>,
    ) -> Self {
        Self {
            registry_service,
            stats_service,
        }
    }
}
