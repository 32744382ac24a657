//! Version history sub-resource

mod entity;

pub use entity::{sort_newest_first, ModelVersion, VersionId};
