//! Seeding: generating entity positions inside a shape.
//!
//! [`seed_positions`] picks a strategy from the shape's [`RegionKind`]:
//! rectangles and disks seeded over their full extent use closed-form draws
//! ([`closed_form`]); everything else, and any masked or bounded request, is
//! seeded by rejection sampling against an eroded mask ([`rejection`]).
use std::fmt;

use glam::DVec2;
use rand::Rng;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geometry::Bounds;
use crate::parent::ParentRegistry;
use crate::shape::{RegionKind, Shape};
use crate::units::Unit;

pub mod closed_form;
pub mod rejection;

pub use closed_form::DISK_RADIAL_CAP;

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Uniform draw in `[low, high)`.
#[inline]
pub(crate) fn uniform(rng: &mut dyn Rng, low: f64, high: f64) -> f64 {
    low + (high - low) * rand01(rng)
}

/// Parameters of a seeding request.
#[non_exhaustive]
#[derive(Clone, Default)]
pub struct SeedRequest<'a> {
    /// Number of positions; ignored when the shape has a parent.
    pub count: Option<usize>,
    /// Mask intersected with the shape.
    pub container: Option<&'a dyn Shape>,
    /// Optional `(min, max)` limits on x.
    pub x_bounds: (Option<f64>, Option<f64>),
    /// Optional `(min, max)` limits on y.
    pub y_bounds: (Option<f64>, Option<f64>),
    /// Minimum clearance from the boundary (soma radius), in the shape's unit.
    pub exclusion_radius: f64,
    /// Unit of the returned positions; defaults to the shape's unit.
    pub output_unit: Option<Unit>,
    /// Maximum number of candidate draws for rejection sampling.
    pub draw_budget: Option<usize>,
}

impl fmt::Debug for SeedRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedRequest")
            .field("count", &self.count)
            .field("container", &self.container.map(|c| c.bounds()))
            .field("x_bounds", &self.x_bounds)
            .field("y_bounds", &self.y_bounds)
            .field("exclusion_radius", &self.exclusion_radius)
            .field("output_unit", &self.output_unit)
            .field("draw_budget", &self.draw_budget)
            .finish()
    }
}

impl<'a> SeedRequest<'a> {
    /// Creates a request for `count` positions.
    pub fn new(count: usize) -> Self {
        Self {
            count: Some(count),
            ..Default::default()
        }
    }

    /// Creates a request whose count comes from the shape's parent.
    pub fn from_parent() -> Self {
        Self::default()
    }

    pub fn with_container(mut self, container: &'a dyn Shape) -> Self {
        self.container = Some(container);
        self
    }

    pub fn with_x_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.x_bounds = (min, max);
        self
    }

    pub fn with_y_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.y_bounds = (min, max);
        self
    }

    pub fn with_exclusion_radius(mut self, exclusion_radius: f64) -> Self {
        self.exclusion_radius = exclusion_radius;
        self
    }

    pub fn with_output_unit(mut self, unit: Unit) -> Self {
        self.output_unit = Some(unit);
        self
    }

    /// Caps rejection sampling at `draws` candidates.
    pub fn with_draw_budget(mut self, draws: usize) -> Self {
        self.draw_budget = Some(draws);
        self
    }

    /// Validates the request, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.exclusion_radius.is_finite() || self.exclusion_radius < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "exclusion_radius must be finite and >= 0, got {}",
                self.exclusion_radius
            )));
        }
        for (axis, (min, max)) in [("x", self.x_bounds), ("y", self.y_bounds)] {
            if min.is_some_and(f64::is_nan) || max.is_some_and(f64::is_nan) {
                return Err(Error::InvalidConfig(format!("{axis} bounds must not be NaN")));
            }
        }
        if self.draw_budget == Some(0) {
            return Err(Error::InvalidConfig("draw_budget must be > 0".into()));
        }
        Ok(())
    }

    /// Requested bounds, with missing limits left infinite.
    fn requested_bounds(&self) -> Bounds {
        Bounds::new(
            self.x_bounds.0.unwrap_or(f64::NEG_INFINITY),
            self.y_bounds.0.unwrap_or(f64::NEG_INFINITY),
            self.x_bounds.1.unwrap_or(f64::INFINITY),
            self.y_bounds.1.unwrap_or(f64::INFINITY),
        )
    }
}

/// Seeds positions with an optional registry for resolving parents.
pub struct Seeder<'a> {
    /// Registry consulted when a shape has a parent.
    pub parents: Option<&'a ParentRegistry>,
}

impl<'a> Seeder<'a> {
    /// A seeder without parents; every request must carry a count.
    pub fn new() -> Self {
        Self { parents: None }
    }

    pub fn with_parents(parents: &'a ParentRegistry) -> Self {
        Self {
            parents: Some(parents),
        }
    }

    /// Seeds `shape` according to `request`.
    pub fn seed<S>(
        &self,
        shape: &S,
        request: &SeedRequest<'_>,
        rng: &mut impl Rng,
    ) -> Result<Vec<DVec2>>
    where
        S: Shape + ?Sized,
    {
        seed_positions(shape, request, self.parents, rng)
    }
}

impl Default for Seeder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates positions inside `shape`.
///
/// Either exactly the requested number of positions is returned or an error
/// is raised; there are no partial results.
pub fn seed_positions<S, R>(
    shape: &S,
    request: &SeedRequest<'_>,
    parents: Option<&ParentRegistry>,
    rng: &mut R,
) -> Result<Vec<DVec2>>
where
    S: Shape + ?Sized,
    R: Rng,
{
    request.validate()?;
    let count = resolve_count(shape, request, parents)?;

    let natural = shape
        .bounds()
        .ok_or_else(|| Error::InvalidBoundary("the shape is empty".into()))?;
    let effective = natural.clip(&request.requested_bounds());
    let radius = request.exclusion_radius;

    let full_extent = request.container.is_none() && effective == natural;
    let mut positions = match (full_extent, shape.kind()) {
        (true, RegionKind::Rectangle) => {
            debug!("Seeding {} positions with the rectangle fast path.", count);
            closed_form::seed_rectangle(effective, radius, count, rng)?
        }
        (true, RegionKind::Disk { radius: r, center }) => {
            debug!("Seeding {} positions with the disk fast path.", count);
            closed_form::seed_disk(center, r, radius, count, rng)?
        }
        _ => {
            let mask = rejection::build_mask(
                shape.geometry(),
                request.container.map(|c| c.geometry()),
                effective,
                radius,
            )?;
            rejection::seed_in_mask(&mask, effective, count, request.draw_budget, rng)?
        }
    };

    if let Some(unit) = request.output_unit {
        convert_positions(&mut positions, shape.unit(), unit);
    }

    Ok(positions)
}

/// Rescales positions expressed in `from` into `to`.
pub fn convert_positions(positions: &mut [DVec2], from: Unit, to: Unit) {
    if from == to {
        return;
    }
    let factor = Unit::conversion_magnitude(to, from);
    for p in positions.iter_mut() {
        *p *= factor;
    }
}

fn resolve_count<S>(
    shape: &S,
    request: &SeedRequest<'_>,
    parents: Option<&ParentRegistry>,
) -> Result<usize>
where
    S: Shape + ?Sized,
{
    let Some(id) = shape.parent() else {
        return request.count.ok_or(Error::MissingCount);
    };

    let registry = parents.ok_or_else(|| Error::ParentUnavailable(id.to_string()))?;
    let required = registry.required_entity_count(id)?;
    match request.count {
        Some(requested) if requested != required => {
            warn!(
                "Requested {} positions but parent {} needs {}; using the parent's count.",
                requested, id, required
            );
        }
        _ => {}
    }
    Ok(required)
}
