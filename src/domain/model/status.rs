//! Deployment status lifecycle and the transition table

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Position of a model in the deployment lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    Development,
    Staging,
    Production,
    Archived,
}

impl DeploymentStatus {
    /// All statuses, for exhaustive enumeration in validation and tests
    pub const ALL: [DeploymentStatus; 4] = [
        DeploymentStatus::Development,
        DeploymentStatus::Staging,
        DeploymentStatus::Production,
        DeploymentStatus::Archived,
    ];

    /// Legal next statuses for each state.
    ///
    /// The graph has no terminal state: archived models can be revived back
    /// into development. Self-transitions are never listed.
    pub fn allowed_transitions(self) -> &'static [DeploymentStatus] {
        match self {
            DeploymentStatus::Development => {
                &[DeploymentStatus::Staging, DeploymentStatus::Archived]
            }
            DeploymentStatus::Staging => &[
                DeploymentStatus::Production,
                DeploymentStatus::Development,
                DeploymentStatus::Archived,
            ],
            DeploymentStatus::Production => {
                &[DeploymentStatus::Staging, DeploymentStatus::Archived]
            }
            DeploymentStatus::Archived => &[DeploymentStatus::Development],
        }
    }

    /// Whether moving from this status to `target` is legal
    pub fn can_transition_to(self, target: DeploymentStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }

    /// Validates a transition, returning the domain error used by the gate
    pub fn check_transition(self, target: DeploymentStatus) -> Result<(), DomainError> {
        if self.can_transition_to(target) {
            Ok(())
        } else {
            Err(DomainError::invalid_transition(
                self.to_string(),
                target.to_string(),
            ))
        }
    }
}

impl std::fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DeploymentStatus::Development => "development",
            DeploymentStatus::Staging => "staging",
            DeploymentStatus::Production => "production",
            DeploymentStatus::Archived => "archived",
        };
        write!(f, "{}", s)
    }
}
