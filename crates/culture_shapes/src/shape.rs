//! The read-only surface shared by regions and areas.
use std::collections::BTreeMap;

use geo::{Area as _, Centroid, Coord, Intersects, MultiPolygon};
use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{bounds_of, Bounds};
use crate::parent::ParentId;
use crate::region::Area;
use crate::units::Unit;

/// Geometry kind recorded by the constructor that built a shape.
///
/// The tag is never re-derived from the geometry; it only unlocks the
/// closed-form seeding paths.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum RegionKind {
    #[default]
    Generic,
    Rectangle,
    Disk {
        radius: f64,
        center: DVec2,
    },
    Ellipse {
        radii: (f64, f64),
        center: DVec2,
    },
}

/// Common queries on a 2D shape.
pub trait Shape {
    fn geometry(&self) -> &MultiPolygon<f64>;

    fn unit(&self) -> Unit;

    fn kind(&self) -> RegionKind {
        RegionKind::Generic
    }

    fn parent(&self) -> Option<ParentId> {
        None
    }

    /// Snapshot of the shape's areas, keyed by name.
    fn areas(&self) -> Result<BTreeMap<String, Area>>;

    /// Axis-aligned bounds, `None` for an empty shape.
    fn bounds(&self) -> Option<Bounds> {
        bounds_of(self.geometry())
    }

    /// Surface in squared [`Shape::unit`].
    fn surface(&self) -> f64 {
        self.geometry().unsigned_area()
    }

    fn centroid(&self) -> Option<DVec2> {
        self.geometry()
            .centroid()
            .map(|p| DVec2::new(p.x(), p.y()))
    }

    /// Containment test; boundary points count as inside.
    fn contains_point(&self, point: DVec2) -> bool {
        self.geometry().intersects(&Coord {
            x: point.x,
            y: point.y,
        })
    }
}
