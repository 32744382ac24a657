//! Application services

pub mod registry_service;
pub mod stats_service;

pub use registry_service::{
    AddVersionRequest, RegisterModelRequest, RegistryService, UpdateModelRequest,
    DEFAULT_INITIAL_VERSION,
};
pub use stats_service::{DashboardStats, StatsService, RECENT_MODELS_LIMIT};
