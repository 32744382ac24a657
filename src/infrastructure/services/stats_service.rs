//! Stats service - registry-wide aggregate counts

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::model::filter::sort_recent_first;
use crate::domain::storage::Storage;
use crate::domain::{DomainError, Model};

/// How many recently updated models the dashboard shows
pub const RECENT_MODELS_LIMIT: usize = 5;

/// Aggregate statistics over the whole registry.
///
/// The breakdowns cover only statuses and frameworks at least one model
/// currently has; absent values are omitted rather than reported as zero.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_models: usize,
    pub models_by_status: BTreeMap<String, usize>,
    pub models_by_framework: BTreeMap<String, usize>,
    /// The most recently updated models, newest first
    pub recent_models: Vec<Model>,
}

/// Stats service computing dashboard aggregates from model storage
#[derive(Debug)]
pub struct StatsService<M: Storage<Model>> {
    models: Arc<M>,
}

impl<M: Storage<Model>> StatsService<M> {
    pub fn new(models: Arc<M>) -> Self {
        Self { models }
    }

    /// Computes aggregate counts over all registered models
    pub async fn get_stats(&self) -> Result<DashboardStats, DomainError> {
        let mut models = self.models.list().await?;

        let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_framework: BTreeMap<String, usize> = BTreeMap::new();

        for model in &models {
            *by_status.entry(model.status().to_string()).or_default() += 1;
            *by_framework.entry(model.framework().to_string()).or_default() += 1;
        }

        let total_models = models.len();

        sort_recent_first(&mut models);
        models.truncate(RECENT_MODELS_LIMIT);

        Ok(DashboardStats {
            total_models,
            models_by_status: by_status,
            models_by_framework: by_framework,
            recent_models: models,
        })
    }
}
