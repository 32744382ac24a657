//! Validation utilities for model names, versions, and tags

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length for model names
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length for descriptions
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Letters, digits, hyphen, underscore, space
static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9 _-]+$").unwrap());

/// major.minor.patch, numeric components
static VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+$").unwrap());

/// Model validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ModelValidationError {
    /// Name is empty or whitespace only
    EmptyName,
    /// Name exceeds maximum length
    NameTooLong { length: usize, max: usize },
    /// Name contains disallowed characters
    InvalidNameFormat { name: String },
    /// Description exceeds maximum length
    DescriptionTooLong { length: usize, max: usize },
    /// Version does not follow major.minor.patch form
    InvalidVersionFormat { version: String },
}

impl fmt::Display for ModelValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Model name cannot be empty"),
            Self::NameTooLong { length, max } => {
                write!(f, "Model name too long: {} characters (max {})", length, max)
            }
            Self::InvalidNameFormat { name } => {
                write!(
                    f,
                    "Invalid model name '{}': must contain only letters, digits, hyphens, underscores, or spaces",
                    name
                )
            }
            Self::DescriptionTooLong { length, max } => {
                write!(f, "Description too long: {} characters (max {})", length, max)
            }
            Self::InvalidVersionFormat { version } => {
                write!(
                    f,
                    "Invalid version '{}': must follow major.minor.patch numeric form",
                    version
                )
            }
        }
    }
}

impl std::error::Error for ModelValidationError {}

/// Validate a model name
pub fn validate_name(name: &str) -> Result<(), ModelValidationError> {
    if name.trim().is_empty() {
        return Err(ModelValidationError::EmptyName);
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(ModelValidationError::NameTooLong {
            length: name.len(),
            max: MAX_NAME_LENGTH,
        });
    }

    if !NAME_PATTERN.is_match(name) {
        return Err(ModelValidationError::InvalidNameFormat {
            name: name.to_string(),
        });
    }

    Ok(())
}

/// Validate an optional description
pub fn validate_description(description: &str) -> Result<(), ModelValidationError> {
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(ModelValidationError::DescriptionTooLong {
            length: description.len(),
            max: MAX_DESCRIPTION_LENGTH,
        });
    }

    Ok(())
}

/// Validate a version string
pub fn validate_version(version: &str) -> Result<(), ModelValidationError> {
    if !VERSION_PATTERN.is_match(version) {
        return Err(ModelValidationError::InvalidVersionFormat {
            version: version.to_string(),
        });
    }

    Ok(())
}

/// Normalize tags: lowercase, deduplicated, insertion order preserved
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();

    for tag in tags {
        let tag = tag.trim().to_lowercase();

        if !tag.is_empty() && !seen.contains(&tag) {
            seen.push(tag);
        }
    }

    seen
}
