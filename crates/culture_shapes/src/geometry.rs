//! Thin helpers over the `geo` crate used by regions, areas, and the seeder.
//!
//! Every shape stores a [`MultiPolygon`]. Constructors produce a single part;
//! boolean operations may split a shape into several.
use geo::{
    Area, BooleanOps, BoundingRect, Coord, LineString, MultiPolygon, Polygon, Rect, Scale,
    Translate, Validation,
};

use crate::error::{Error, Result};

/// Relative tolerance used when deciding whether an area is "positive".
pub const AREA_EPSILON: f64 = 1e-9;

/// Axis-aligned bounds `(min_x, min_y, max_x, max_y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Unbounded in every direction.
    pub fn infinite() -> Self {
        Self::new(
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::INFINITY,
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Overlap of two bounds; may be inverted when they are disjoint.
    pub fn clip(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.max(other.min_x),
            self.min_y.max(other.min_y),
            self.max_x.min(other.max_x),
            self.max_y.min(other.max_y),
        )
    }

    /// Shrinks every side by `margin`.
    pub fn inset(&self, margin: f64) -> Bounds {
        Bounds::new(
            self.min_x + margin,
            self.min_y + margin,
            self.max_x - margin,
            self.max_y - margin,
        )
    }

    /// True when the bounds enclose no positive area.
    pub fn is_empty(&self) -> bool {
        !(self.max_x > self.min_x && self.max_y > self.min_y)
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        Rect::new(
            Coord {
                x: self.min_x,
                y: self.min_y,
            },
            Coord {
                x: self.max_x,
                y: self.max_y,
            },
        )
        .to_polygon()
    }
}

impl From<Rect<f64>> for Bounds {
    fn from(rect: Rect<f64>) -> Self {
        Bounds::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }
}

/// Bounding box of a geometry, `None` when it is empty.
pub fn bounds_of(geometry: &MultiPolygon<f64>) -> Option<Bounds> {
    geometry.bounding_rect().map(Bounds::from)
}

/// Builds a ring from points; needs at least three distinct finite vertices.
pub fn ring_from_points<I, C>(points: I) -> Result<LineString<f64>>
where
    I: IntoIterator<Item = C>,
    C: Into<Coord<f64>>,
{
    let coords: Vec<Coord<f64>> = points.into_iter().map(Into::into).collect();
    if let Some(bad) = coords.iter().find(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err(Error::Geometry(format!(
            "non-finite vertex ({}, {})",
            bad.x, bad.y
        )));
    }

    let mut distinct: Vec<Coord<f64>> = Vec::with_capacity(coords.len());
    for c in &coords {
        if !distinct.contains(c) {
            distinct.push(*c);
        }
    }
    if distinct.len() < 3 {
        return Err(Error::Geometry(format!(
            "a ring needs at least 3 distinct vertices, got {}",
            distinct.len()
        )));
    }

    Ok(LineString::from(coords))
}

/// Builds a validated polygon from a shell and holes.
pub fn polygon_from_points<S, H, C>(shell: S, holes: H) -> Result<Polygon<f64>>
where
    S: IntoIterator<Item = C>,
    H: IntoIterator,
    H::Item: IntoIterator<Item = C>,
    C: Into<Coord<f64>>,
{
    let exterior = ring_from_points(shell)?;
    let interiors = holes
        .into_iter()
        .map(ring_from_points)
        .collect::<Result<Vec<_>>>()?;
    let polygon = Polygon::new(exterior, interiors);
    ensure_simple(&polygon)?;
    Ok(polygon)
}

/// Fails with [`Error::Geometry`] unless `polygon` is a valid simple polygon
/// with positive area.
pub fn ensure_simple(polygon: &Polygon<f64>) -> Result<()> {
    if !polygon.is_valid() {
        return Err(Error::Geometry(
            "polygon is not simple (self-intersecting or malformed rings)".into(),
        ));
    }
    if polygon.unsigned_area() <= 0.0 {
        return Err(Error::Geometry("polygon has zero area".into()));
    }
    Ok(())
}

/// Horizontal extent of the exterior rings.
pub fn exterior_x_extent(geometry: &MultiPolygon<f64>) -> Option<(f64, f64)> {
    geometry
        .iter()
        .flat_map(|p| p.exterior().coords())
        .fold(None, |acc, c| match acc {
            None => Some((c.x, c.x)),
            Some((lo, hi)) => Some((lo.min(c.x), hi.max(c.x))),
        })
}

/// Scales `geometry` isotropically so its exterior spans exactly `[min_x, max_x]`.
///
/// Scaling happens about the bounding-box centre, then the result is shifted
/// horizontally so the leftmost vertex lands on `min_x`.
pub fn rescale_to_x_extent(
    geometry: &MultiPolygon<f64>,
    min_x: f64,
    max_x: f64,
) -> Result<MultiPolygon<f64>> {
    let (leftmost, rightmost) = exterior_x_extent(geometry)
        .ok_or_else(|| Error::Geometry("cannot rescale an empty geometry".into()))?;
    if rightmost == leftmost {
        return Err(Error::DegenerateShape(format!(
            "zero horizontal extent at x = {leftmost}"
        )));
    }
    if !(max_x > min_x) {
        return Err(Error::DegenerateShape(format!(
            "target extent [{min_x}, {max_x}] is empty"
        )));
    }

    let factor = (max_x - min_x) / (rightmost - leftmost);
    let scaled = geometry.scale(factor);
    let shift = exterior_x_extent(&scaled).map_or(0.0, |(lo, _)| min_x - lo);
    Ok(scaled.translate(shift, 0.0))
}

/// Surface of the positive-area intersection of two geometries.
pub fn overlap_area(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> f64 {
    a.intersection(b).unsigned_area()
}

/// Whether two geometries share interior with a positive area.
pub fn overlaps(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> bool {
    let scale = a.unsigned_area().min(b.unsigned_area()).max(f64::MIN_POSITIVE);
    overlap_area(a, b) > AREA_EPSILON * scale
}

/// Drops sliver parts left over by boolean operations.
pub fn without_slivers(geometry: MultiPolygon<f64>, reference_area: f64) -> MultiPolygon<f64> {
    let threshold = AREA_EPSILON * reference_area.max(f64::MIN_POSITIVE);
    MultiPolygon::new(
        geometry
            .into_iter()
            .filter(|p| p.unsigned_area() > threshold)
            .collect(),
    )
}
