//! Model entity and identifier

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::DomainError;

use super::{DeploymentStatus, Framework};

/// Opaque model identifier, assigned at creation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    /// Generates a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing identifier string (e.g. from a URL path)
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for ModelId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Named numeric metrics attached to a model or version
pub type Metrics = HashMap<String, f64>;

/// A registered ML model metadata record.
///
/// The trained artifact itself is out of scope; this tracks name, framework,
/// deployment status, metrics, tags, and the derived current version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    id: ModelId,

    /// Unique among all registered models
    name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    /// Fixed at creation, not updatable
    framework: Framework,

    /// Mutable only through the transition gate
    status: DeploymentStatus,

    /// Version string of the most recently created version; derived
    #[serde(skip_serializing_if = "Option::is_none")]
    current_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<Metrics>,

    /// Lowercase, insertion-ordered
    #[serde(default)]
    tags: Vec<String>,

    /// Set at creation, immutable thereafter
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<String>,

    created_at: DateTime<Utc>,

    /// Advances on every mutation, including status changes and version adds
    updated_at: DateTime<Utc>,
}

impl Model {
    /// Creates a new model in `development` status with a fresh id
    pub fn new(name: impl Into<String>, framework: Framework) -> Self {
        let now = Utc::now();
        Self {
            id: ModelId::generate(),
            name: name.into(),
            description: None,
            framework,
            status: DeploymentStatus::Development,
            current_version: None,
            metrics: None,
            tags: Vec::new(),
            author: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.current_version = Some(version.into());
        self
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    // Getters

    pub fn id(&self) -> &ModelId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn framework(&self) -> Framework {
        self.framework
    }

    pub fn status(&self) -> DeploymentStatus {
        self.status
    }

    pub fn current_version(&self) -> Option<&str> {
        self.current_version.as_deref()
    }

    pub fn metrics(&self) -> Option<&Metrics> {
        self.metrics.as_ref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators (for service layer updates)

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.touch();
    }

    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
        self.touch();
    }

    pub fn set_metrics(&mut self, metrics: Metrics) {
        self.metrics = Some(metrics);
        self.touch();
    }

    /// Records a newly created version as current
    pub fn set_current_version(&mut self, version: impl Into<String>) {
        self.current_version = Some(version.into());
        self.touch();
    }

    /// Applies a deployment status change, enforcing the transition table.
    ///
    /// On success only `status` and `updated_at` change.
    pub fn transition_to(&mut self, target: DeploymentStatus) -> Result<(), DomainError> {
        self.status.check_transition(target)?;
        self.status = target;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Model {
    type Key = ModelId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_model_defaults() {
        let model = Model::new("churn-v1", Framework::Sklearn);

        assert_eq!(model.name(), "churn-v1");
        assert_eq!(model.framework(), Framework::Sklearn);
        assert_eq!(model.status(), DeploymentStatus::Development);
        assert!(model.current_version().is_none());
        assert!(model.tags().is_empty());
        assert_eq!(model.created_at(), model.updated_at());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Model::new("a", Framework::Other);
        let b = Model::new("b", Framework::Other);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_builder_fields() {
        let mut metrics = Metrics::new();
        metrics.insert("accuracy".to_string(), 0.93);

        let model = Model::new("fraud-detector", Framework::Xgboost)
            .with_description("Detects fraudulent transactions")
            .with_version("1.0.0")
            .with_metrics(metrics)
            .with_tags(vec!["fraud".to_string(), "prod".to_string()])
            .with_author("data-team");

        assert_eq!(model.description(), Some("Detects fraudulent transactions"));
        assert_eq!(model.current_version(), Some("1.0.0"));
        assert_eq!(model.metrics().unwrap()["accuracy"], 0.93);
        assert_eq!(model.tags(), ["fraud", "prod"]);
        assert_eq!(model.author(), Some("data-team"));
    }

    #[test]
    fn test_transition_legal() {
        let mut model = Model::new("m", Framework::Pytorch);

        model.transition_to(DeploymentStatus::Staging).unwrap();
        assert_eq!(model.status(), DeploymentStatus::Staging);

        model.transition_to(DeploymentStatus::Production).unwrap();
        assert_eq!(model.status(), DeploymentStatus::Production);
    }

    #[test]
    fn test_transition_illegal_leaves_status_unchanged() {
        let mut model = Model::new("m", Framework::Pytorch);

        let before = model.updated_at();
        let result = model.transition_to(DeploymentStatus::Production);

        assert!(result.is_err());
        assert_eq!(model.status(), DeploymentStatus::Development);
        assert_eq!(model.updated_at(), before);
    }

    #[test]
    fn test_transition_does_not_touch_other_fields() {
        let mut metrics = Metrics::new();
        metrics.insert("f1".to_string(), 0.8);

        let mut model = Model::new("m", Framework::Onnx)
            .with_version("2.0.0")
            .with_metrics(metrics.clone())
            .with_tags(vec!["a".to_string()]);

        model.transition_to(DeploymentStatus::Staging).unwrap();

        assert_eq!(model.current_version(), Some("2.0.0"));
        assert_eq!(model.metrics(), Some(&metrics));
        assert_eq!(model.tags(), ["a"]);
    }

    #[test]
    fn test_set_current_version_advances_updated_at() {
        let mut model = Model::new("m", Framework::Sklearn).with_version("1.0.0");

        let before = model.updated_at();
        model.set_current_version("1.1.0");

        assert_eq!(model.current_version(), Some("1.1.0"));
        assert!(model.updated_at() >= before);
    }

    #[test]
    fn test_serialization_skips_absent_optionals() {
        let model = Model::new("bare", Framework::Other);
        let json = serde_json::to_value(&model).unwrap();

        assert!(json.get("description").is_none());
        assert!(json.get("current_version").is_none());
        assert!(json.get("author").is_none());
        assert_eq!(json["status"], "development");
        assert_eq!(json["framework"], "other");
    }
}
