//! Closed-form seeding for rectangles and disks.
//!
//! Eroding a rectangle yields a rectangle and eroding a disk yields a disk, so
//! both shapes can be sampled directly without rejection.
use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;

use crate::error::{Error, Result};
use crate::geometry::Bounds;
use crate::seeding::{rand01, uniform};

/// Upper limit of the squared-radius draw for disks.
///
/// Radii are drawn as `R * sqrt(u)` with `u` in `[0, DISK_RADIAL_CAP)` rather
/// than `[0, 1)`, keeping points off the polygonal outline of the disk. The
/// outermost shell of the disk (about 0.5% of its radius) is never populated.
pub const DISK_RADIAL_CAP: f64 = 0.99;

/// Uniform positions in `bounds` shrunk by `exclusion_radius` on every side.
pub fn seed_rectangle(
    bounds: Bounds,
    exclusion_radius: f64,
    count: usize,
    rng: &mut dyn Rng,
) -> Result<Vec<DVec2>> {
    let inner = bounds.inset(exclusion_radius);
    if inner.is_empty() {
        return Err(Error::InvalidBoundary(format!(
            "exclusion radius {exclusion_radius} leaves no room in a {} x {} rectangle",
            bounds.width(),
            bounds.height()
        )));
    }

    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let x = uniform(rng, inner.min_x, inner.max_x);
        let y = uniform(rng, inner.min_y, inner.max_y);
        out.push(DVec2::new(x, y));
    }
    Ok(out)
}

/// Area-uniform positions in a disk of `radius - exclusion_radius` around `center`.
pub fn seed_disk(
    center: DVec2,
    radius: f64,
    exclusion_radius: f64,
    count: usize,
    rng: &mut dyn Rng,
) -> Result<Vec<DVec2>> {
    let reach = radius - exclusion_radius;
    if reach <= 0.0 {
        return Err(Error::InvalidBoundary(format!(
            "exclusion radius {exclusion_radius} covers the whole disk of radius {radius}"
        )));
    }

    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let theta = rand01(rng) * TAU;
        let rho = reach * (DISK_RADIAL_CAP * rand01(rng)).sqrt();
        out.push(center + DVec2::new(rho * theta.cos(), rho * theta.sin()));
    }
    Ok(out)
}
