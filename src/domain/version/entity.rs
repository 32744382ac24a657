//! Model version entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::model::{Metrics, ModelId};
use crate::domain::storage::{StorageEntity, StorageKey};

/// Version identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(String);

impl VersionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VersionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for VersionId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// An immutable snapshot of a model at a version.
///
/// Owned exclusively by its model; deleted when the model is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelVersion {
    id: VersionId,

    /// Owning model; lookup reference, not ownership
    model_id: ModelId,

    version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<Metrics>,

    #[serde(skip_serializing_if = "Option::is_none")]
    changelog: Option<String>,

    /// Set at creation, immutable; versions are totally ordered by this
    created_at: DateTime<Utc>,
}

impl ModelVersion {
    pub fn new(model_id: ModelId, version: impl Into<String>) -> Self {
        Self {
            id: VersionId::generate(),
            model_id,
            version: version.into(),
            metrics: None,
            changelog: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_changelog(mut self, changelog: impl Into<String>) -> Self {
        self.changelog = Some(changelog.into());
        self
    }

    pub fn id(&self) -> &VersionId {
        &self.id
    }

    pub fn model_id(&self) -> &ModelId {
        &self.model_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn metrics(&self) -> Option<&Metrics> {
        self.metrics.as_ref()
    }

    pub fn changelog(&self) -> Option<&str> {
        self.changelog.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl StorageEntity for ModelVersion {
    type Key = VersionId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

/// Orders versions newest first, id as tiebreaker for determinism
pub fn sort_newest_first(versions: &mut [ModelVersion]) {
    versions.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| a.id().as_str().cmp(b.id().as_str()))
    });
}
