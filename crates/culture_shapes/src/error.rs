//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! malformed geometry, area partition conflicts, seeding failures, parent lookups,
//! and invalid configuration.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid geometry: {0}")]
    Geometry(String),

    #[error("area '{name}' overlaps existing area '{existing}'")]
    Overlap { name: String, existing: String },

    #[error("degenerate shape: {0}")]
    DegenerateShape(String),

    #[error("no seed count given and the region has no parent")]
    MissingCount,

    #[error("invalid seeding boundary: {0}")]
    InvalidBoundary(String),

    #[error("property '{key}' must be a non-negative real or NaN, got {value}")]
    InvalidProperty { key: String, value: f64 },

    #[error("area '{name}' already exists")]
    DuplicateArea { name: String },

    #[error("area '{name}' does not intersect its region")]
    EmptyArea { name: String },

    #[error("area '{name}' cannot hold sub-areas")]
    NoSubAreas { name: String },

    #[error("parent {0} is not registered or was dropped")]
    ParentUnavailable(String),

    #[error("seeding budget exhausted after {draws} draws ({accepted}/{requested} accepted)")]
    SeedingBudgetExhausted {
        draws: usize,
        accepted: usize,
        requested: usize,
    },

    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
