#![forbid(unsafe_code)]
//! culture_shapes: 2D substrate shapes for neuronal cultures.
//!
//! Modules:
//! - region: regions, their areas, and the partition that keeps areas non-overlapping
//! - seeding: closed-form and rejection seeding of positions inside a shape
//! - parent: registry of aggregators whose entity count drives seeding
//! - properties, units: per-area modulation factors and metric units
//!
//! Geometry is delegated to the `geo` crate; positions are returned as `glam::DVec2`.
pub mod error;
pub mod geometry;
pub mod parent;
pub mod properties;
pub mod region;
pub mod seeding;
pub mod shape;
pub mod units;

/// Convenient re-exports for common types. Import with `use culture_shapes::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::geometry::Bounds;
    pub use crate::parent::{ParentId, ParentRegistry, Population};
    pub use crate::properties::{PropertyMap, NEUTRAL_MODULATION};
    pub use crate::region::{Area, AreaPartition, AreaSpec, Region, RegionOptions, DEFAULT_AREA};
    pub use crate::seeding::{
        convert_positions, seed_positions, SeedRequest, Seeder, DISK_RADIAL_CAP,
    };
    pub use crate::shape::{RegionKind, Shape};
    pub use crate::units::Unit;
}
