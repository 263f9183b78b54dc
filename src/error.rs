//! Error types for projections, catalog queries and catalog loading

use thiserror::Error;

/// Validation failures reported by the projectors and the strict catalog lookups.
///
/// Every variant is raised before any computation starts, so a caller never
/// receives a partially filled result.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CalcError {
    /// A numeric field is non-finite, negative, zero where it must be positive,
    /// or outside the configured input bounds.
    #[error("Invalid input '{field}': {reason}")]
    InvalidInput {
        /// Name of the offending field
        field: &'static str,
        /// Human readable description of the violation
        reason: String,
    },

    /// Retirement age does not exceed the current age.
    #[error("Invalid age range: retirement age {retirement_age} must exceed current age {current_age}")]
    InvalidAgeRange {
        current_age: u32,
        retirement_age: u32,
    },

    /// A category key that the catalog does not define.
    #[error("Unknown calculator category: {0}")]
    InvalidCategory(String),
}

impl CalcError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Failures while building a [`CatalogIndex`](crate::catalog::CatalogIndex) from CSV files.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("I/O error reading catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Duplicate calculator id: {0}")]
    DuplicateId(String),

    #[error("Duplicate category key: {0}")]
    DuplicateCategory(String),

    #[error("Calculator '{entry}' references unknown category '{category}'")]
    UnknownCategory { entry: String, category: String },
}

/// Result alias for projection and query operations
pub type Result<T> = std::result::Result<T, CalcError>;
