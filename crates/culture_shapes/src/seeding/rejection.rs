//! Rejection sampling inside an arbitrary eroded mask.
//!
//! Candidates are drawn uniformly over the effective bounds and kept when they
//! fall inside the mask. Each batch draws exactly as many candidates as are
//! still missing, so batches shrink as the result fills up. When the mask
//! covers a tiny fraction of the bounds this degrades into many small batches;
//! pass a draw budget to bound the total work.
use geo::{Area as _, BooleanOps, Buffer, Coord, Intersects, MultiPolygon, Polygon};
use glam::DVec2;
use rand::Rng;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::geometry::{ensure_simple, without_slivers, Bounds};
use crate::seeding::uniform;

/// Builds the region seeds may land in.
///
/// The mask is `shape ∩ bounds (∩ container)`, eroded by `exclusion_radius`.
/// It must be a single simple polygon with positive area.
pub fn build_mask(
    shape: &MultiPolygon<f64>,
    container: Option<&MultiPolygon<f64>>,
    bounds: Bounds,
    exclusion_radius: f64,
) -> Result<Polygon<f64>> {
    if bounds.is_empty() {
        return Err(Error::InvalidBoundary(format!(
            "bounds x in [{}, {}], y in [{}, {}] enclose no area; check that they lie inside the shape",
            bounds.min_x, bounds.max_x, bounds.min_y, bounds.max_y
        )));
    }

    let window = MultiPolygon::new(vec![bounds.to_polygon()]);
    let mut masked = shape.intersection(&window);
    if let Some(container) = container {
        masked = masked.intersection(container);
    }
    let reference = masked.unsigned_area();
    if reference <= 0.0 {
        return Err(Error::InvalidBoundary(
            "the shape and the requested mask do not intersect".into(),
        ));
    }

    let eroded = if exclusion_radius > 0.0 {
        without_slivers(masked.buffer(-exclusion_radius), reference)
    } else {
        without_slivers(masked, reference)
    };

    let mut parts = eroded.0.into_iter();
    let mask = match (parts.next(), parts.next()) {
        (Some(polygon), None) => polygon,
        (None, _) => {
            return Err(Error::InvalidBoundary(format!(
                "exclusion radius {exclusion_radius} leaves no seeding area"
            )))
        }
        (Some(_), Some(_)) => {
            return Err(Error::InvalidBoundary(
                "the seeding area is split into several pieces".into(),
            ))
        }
    };
    ensure_simple(&mask).map_err(|e| Error::InvalidBoundary(e.to_string()))?;

    debug!(
        "Seeding mask covers {:.3} of {:.3} ({:.1}% of the bounds).",
        mask.unsigned_area(),
        reference,
        100.0 * mask.unsigned_area() / (bounds.width() * bounds.height())
    );
    Ok(mask)
}

/// Draws `count` positions inside `mask` by rejection over `bounds`.
///
/// Positions are returned in acceptance order. With `draw_budget`, fails with
/// [`Error::SeedingBudgetExhausted`] once that many candidates were drawn.
pub fn seed_in_mask(
    mask: &Polygon<f64>,
    bounds: Bounds,
    count: usize,
    draw_budget: Option<usize>,
    rng: &mut dyn Rng,
) -> Result<Vec<DVec2>> {
    let mut points = Vec::with_capacity(count);
    let mut draws = 0usize;
    let mut batches = 0usize;

    while points.len() < count {
        let mut batch = count - points.len();
        if let Some(budget) = draw_budget {
            if draws >= budget {
                return Err(Error::SeedingBudgetExhausted {
                    draws,
                    accepted: points.len(),
                    requested: count,
                });
            }
            batch = batch.min(budget - draws);
        }

        let before = points.len();
        for _ in 0..batch {
            let x = uniform(rng, bounds.min_x, bounds.max_x);
            let y = uniform(rng, bounds.min_y, bounds.max_y);
            if mask.intersects(&Coord { x, y }) {
                points.push(DVec2::new(x, y));
            }
        }
        draws += batch;
        batches += 1;
        trace!(
            "Batch {}: accepted {}/{} candidates.",
            batches,
            points.len() - before,
            batch
        );
    }

    if count > 0 {
        debug!(
            "Seeded {} positions in {} batches ({} draws, acceptance {:.3}).",
            count,
            batches,
            draws,
            count as f64 / draws as f64
        );
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn square(min: f64, max: f64) -> MultiPolygon<f64> {
        MultiPolygon::new(vec![Bounds::new(min, min, max, max).to_polygon()])
    }

    fn ring_with_hole() -> MultiPolygon<f64> {
        let outer = Bounds::new(0.0, 0.0, 10.0, 10.0).to_polygon();
        let hole = Bounds::new(3.0, 3.0, 7.0, 7.0).to_polygon();
        MultiPolygon::new(vec![Polygon::new(
            outer.exterior().clone(),
            vec![hole.exterior().clone()],
        )])
    }

    #[test]
    fn mask_is_eroded_shape() {
        let shape = square(0.0, 10.0);
        let mask = build_mask(&shape, None, Bounds::new(0.0, 0.0, 10.0, 10.0), 1.0).unwrap();
        assert!((mask.unsigned_area() - 64.0).abs() < 1e-6);
    }

    #[test]
    fn mask_respects_container() {
        let shape = square(0.0, 10.0);
        let container = square(5.0, 20.0);
        let mask = build_mask(
            &shape,
            Some(&container),
            Bounds::new(0.0, 0.0, 10.0, 10.0),
            0.0,
        )
        .unwrap();
        assert!((mask.unsigned_area() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_container_is_invalid_boundary() {
        let shape = square(0.0, 10.0);
        let container = square(50.0, 60.0);
        assert!(matches!(
            build_mask(&shape, Some(&container), Bounds::new(0.0, 0.0, 10.0, 10.0), 0.0),
            Err(Error::InvalidBoundary(_))
        ));
    }

    #[test]
    fn zero_width_bounds_are_invalid_boundary() {
        let shape = square(0.0, 10.0);
        assert!(matches!(
            build_mask(&shape, None, Bounds::new(10.0, 0.0, 10.0, 10.0), 0.0),
            Err(Error::InvalidBoundary(_))
        ));
    }

    #[test]
    fn split_mask_is_invalid_boundary() {
        // Two squares joined by a thin bridge fall apart once eroded.
        let shape = MultiPolygon::new(vec![Polygon::new(
            vec![
                (0.0, 0.0),
                (10.0, 0.0),
                (10.0, 4.5),
                (20.0, 4.5),
                (20.0, 0.0),
                (30.0, 0.0),
                (30.0, 10.0),
                (20.0, 10.0),
                (20.0, 5.5),
                (10.0, 5.5),
                (10.0, 10.0),
                (0.0, 10.0),
            ]
            .into(),
            vec![],
        )]);
        assert!(matches!(
            build_mask(&shape, None, Bounds::new(0.0, 0.0, 30.0, 10.0), 1.0),
            Err(Error::InvalidBoundary(_))
        ));
    }

    #[test]
    fn positions_avoid_holes() {
        let shape = ring_with_hole();
        let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let mask = build_mask(&shape, None, bounds, 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        let pts = seed_in_mask(&mask, bounds, 400, None, &mut rng).unwrap();
        assert_eq!(pts.len(), 400);
        for p in pts {
            let in_hole = p.x > 3.0 && p.x < 7.0 && p.y > 3.0 && p.y < 7.0;
            assert!(!in_hole, "{p:?} fell into the hole");
        }
    }

    #[test]
    fn budget_exhaustion_is_reported() {
        let shape = square(0.0, 1.0);
        let bounds = Bounds::new(0.0, 0.0, 1000.0, 1000.0);
        let mask = build_mask(&shape, None, Bounds::new(0.0, 0.0, 1.0, 1.0), 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let err = seed_in_mask(&mask, bounds, 50, Some(200), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            Error::SeedingBudgetExhausted { draws: 200, requested: 50, .. }
        ));
    }

    #[test]
    fn same_seed_same_order() {
        let shape = ring_with_hole();
        let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let mask = build_mask(&shape, None, bounds, 0.5).unwrap();
        let a = seed_in_mask(&mask, bounds, 32, None, &mut StdRng::seed_from_u64(3)).unwrap();
        let b = seed_in_mask(&mask, bounds, 32, None, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_count_draws_nothing() {
        let shape = square(0.0, 10.0);
        let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let mask = build_mask(&shape, None, bounds, 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(seed_in_mask(&mask, bounds, 0, Some(1), &mut rng)
            .unwrap()
            .is_empty());
    }
}
