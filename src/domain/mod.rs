//! Domain layer - core entities, invariants, and the storage abstraction

pub mod error;
pub mod model;
pub mod storage;
pub mod version;

pub use error::DomainError;
pub use model::{
    normalize_tags, validate_description, validate_name, validate_version, DeploymentStatus,
    Framework, Metrics, Model, ModelFilter, ModelId, ModelPage, ModelValidationError,
};
pub use storage::{Storage, StorageEntity, StorageKey};
pub use version::{ModelVersion, VersionId};
