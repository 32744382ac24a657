//! List query contract: filtering, ordering, pagination

use serde::Serialize;

use super::{DeploymentStatus, Framework, Model};

/// Default page size when the caller does not supply one
pub const DEFAULT_LIMIT: usize = 20;

/// Hard cap on page size
pub const MAX_LIMIT: usize = 100;

/// Filter for listing models; all provided criteria are ANDed
#[derive(Debug, Clone, Default)]
pub struct ModelFilter {
    pub framework: Option<Framework>,
    pub status: Option<DeploymentStatus>,
    /// Case-insensitive substring match against name or description
    pub search: Option<String>,
    pub skip: usize,
    pub limit: Option<usize>,
}

impl ModelFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_framework(mut self, framework: Framework) -> Self {
        self.framework = Some(framework);
        self
    }

    pub fn with_status(mut self, status: DeploymentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Page size after defaulting and clamping to `1..=MAX_LIMIT`
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Whether a model satisfies every provided criterion
    pub fn matches(&self, model: &Model) -> bool {
        if let Some(framework) = self.framework {
            if model.framework() != framework {
                return false;
            }
        }

        if let Some(status) = self.status {
            if model.status() != status {
                return false;
            }
        }

        if let Some(ref search) = self.search {
            let needle = search.to_lowercase();
            let name_hit = model.name().to_lowercase().contains(&needle);
            let description_hit = model
                .description()
                .map(|d| d.to_lowercase().contains(&needle))
                .unwrap_or(false);

            if !name_hit && !description_hit {
                return false;
            }
        }

        true
    }
}

/// One page of a filtered model listing
#[derive(Debug, Clone, Serialize)]
pub struct ModelPage {
    pub items: Vec<Model>,
    /// Matches before pagination
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
}

/// Orders models most-recently-updated first, with the id as tiebreaker so
/// repeated calls against unchanged data paginate identically.
pub fn sort_recent_first(models: &mut [Model]) {
    models.sort_by(|a, b| {
        b.updated_at()
            .cmp(&a.updated_at())
            .then_with(|| a.id().as_str().cmp(b.id().as_str()))
    });
}

/// Applies a filter to the full model set, producing one deterministic page
pub fn apply(filter: &ModelFilter, models: Vec<Model>) -> ModelPage {
    let mut matched: Vec<Model> = models.into_iter().filter(|m| filter.matches(m)).collect();

    sort_recent_first(&mut matched);

    let total = matched.len();
    let limit = filter.effective_limit();
    let items = matched
        .into_iter()
        .skip(filter.skip)
        .take(limit)
        .collect();

    ModelPage {
        items,
        total,
        skip: filter.skip,
        limit,
    }
}
