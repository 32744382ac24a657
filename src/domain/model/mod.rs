//! Model domain - entities, lifecycle, and the list-query contract

mod entity;
pub mod filter;
mod framework;
mod status;
mod validation;

pub use entity::{Metrics, Model, ModelId};
pub use filter::{ModelFilter, ModelPage};
pub use framework::Framework;
pub use status::DeploymentStatus;
pub use validation::{
    normalize_tags, validate_description, validate_name, validate_version, ModelValidationError,
    MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH,
};
