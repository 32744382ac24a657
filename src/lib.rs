//! ML Model Registry
//!
//! A REST service for tracking ML model metadata:
//! - Model registration, search, and metadata updates
//! - Deployment lifecycle with enforced status transitions
//! - Version history per model
//! - Registry-wide statistics

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::{AppState, RegistryServiceTrait, StatsServiceTrait};
use domain::{Model, ModelVersion};
use infrastructure::services::{RegistryService, StatsService};
use infrastructure::storage::{PostgresConfig, StorageFactory, StorageType};

/// Table holding model documents when the postgres backend is used
const MODELS_TABLE: &str = "models";

/// Table holding version documents when the postgres backend is used
const VERSIONS_TABLE: &str = "model_versions";

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_backend =
        StorageType::from_str(&config.storage.backend).unwrap_or(StorageType::InMemory);

    info!("Storage backend: {:?}", storage_backend);

    let (registry_service, stats_service): (
        Arc<dyn RegistryServiceTrait>,
        Arc<dyn StatsServiceTrait>,
    ) = match storage_backend {
        StorageType::Postgres => {
            let database_url = config
                .storage
                .database_url
                .clone()
                .or_else(|| std::env::var("DATABASE_URL").ok())
                .ok_or_else(|| {
                    anyhow::anyhow!("database_url is required for the postgres backend")
                })?;

            let pg_config = PostgresConfig::new(database_url);

            let models =
                StorageFactory::create_postgres::<Model>(&pg_config, MODELS_TABLE).await?;
            let versions =
                StorageFactory::create_postgres::<ModelVersion>(&pg_config, VERSIONS_TABLE)
                    .await?;

            (
                Arc::new(RegistryService::new(models.clone(), versions)),
                Arc::new(StatsService::new(models)),
            )
        }
        StorageType::InMemory => {
            let models = StorageFactory::create_in_memory::<Model>();
            let versions = StorageFactory::create_in_memory::<ModelVersion>();

            (
                Arc::new(RegistryService::new(models.clone(), versions)),
                Arc::new(StatsService::new(models)),
            )
        }
    };

    Ok(AppState::new(registry_service, stats_service))
}
