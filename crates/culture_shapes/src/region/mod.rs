//! Regions: the substrate shapes neurons are seeded on.
//!
//! A [`Region`] owns its geometry and an [`AreaPartition`] that tiles it. Use
//! the canonical constructors ([`Region::rectangle`], [`Region::disk`],
//! [`Region::ellipse`]) to unlock the closed-form seeding paths; shapes built
//! with [`Region::new`] or [`Region::from_polygon`] are seeded by rejection.
use std::collections::BTreeMap;

use geo::{Buffer, Coord, MultiPolygon, Point, Polygon, Scale};
use glam::DVec2;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{ensure_simple, polygon_from_points, rescale_to_x_extent};
use crate::parent::ParentId;
use crate::properties::PropertyMap;
use crate::shape::{RegionKind, Shape};
use crate::units::Unit;

pub mod area;
pub mod partition;

pub use area::{Area, AreaSpec};
pub use partition::{AreaPartition, DEFAULT_AREA};

/// Options shared by every region constructor.
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct RegionOptions {
    /// Unit of the coordinates.
    pub unit: Unit,
    /// Aggregator whose entity count drives seeding.
    pub parent: Option<ParentId>,
    /// Properties of the default area.
    pub default_properties: PropertyMap,
}

impl RegionOptions {
    pub fn new(unit: Unit) -> Self {
        Self {
            unit,
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent: ParentId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_default_properties(mut self, properties: PropertyMap) -> Self {
        self.default_properties = properties;
        self
    }
}

/// A 2D substrate shape partitioned into areas.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    geometry: MultiPolygon<f64>,
    unit: Unit,
    kind: RegionKind,
    parent: Option<ParentId>,
    partition: AreaPartition,
}

impl Region {
    /// Builds a generic region from a shell and optional holes.
    pub fn new<S, H, C>(shell: S, holes: H, options: RegionOptions) -> Result<Self>
    where
        S: IntoIterator<Item = C>,
        H: IntoIterator,
        H::Item: IntoIterator<Item = C>,
        C: Into<Coord<f64>>,
    {
        let polygon = polygon_from_points(shell, holes)?;
        Ok(Self::assemble(
            MultiPolygon::new(vec![polygon]),
            RegionKind::Generic,
            options,
        ))
    }

    /// Builds a generic region from a polygon.
    ///
    /// With `x_extent = Some((min_x, max_x))` the polygon is scaled uniformly
    /// so its exterior spans exactly `[min_x, max_x]`; the aspect ratio is kept.
    pub fn from_polygon(
        polygon: Polygon<f64>,
        x_extent: Option<(f64, f64)>,
        options: RegionOptions,
    ) -> Result<Self> {
        ensure_simple(&polygon)?;
        let geometry = MultiPolygon::new(vec![polygon]);
        let geometry = match x_extent {
            Some((min_x, max_x)) => rescale_to_x_extent(&geometry, min_x, max_x)?,
            None => geometry,
        };
        Ok(Self::assemble(geometry, RegionKind::Generic, options))
    }

    /// Axis-aligned rectangle of the given size around `centroid`.
    pub fn rectangle(
        height: f64,
        width: f64,
        centroid: impl Into<DVec2>,
        options: RegionOptions,
    ) -> Result<Self> {
        ensure_positive("height", height)?;
        ensure_positive("width", width)?;
        let c = centroid.into();
        let half = DVec2::new(0.5 * width, 0.5 * height);
        let corners = [
            c + half,
            c + DVec2::new(half.x, -half.y),
            c - half,
            c - DVec2::new(half.x, -half.y),
        ];
        let polygon =
            polygon_from_points(corners.map(|p| (p.x, p.y)), Vec::<Vec<(f64, f64)>>::new())?;
        Ok(Self::assemble(
            MultiPolygon::new(vec![polygon]),
            RegionKind::Rectangle,
            options,
        ))
    }

    /// Disk of `radius` around `centroid`.
    pub fn disk(radius: f64, centroid: impl Into<DVec2>, options: RegionOptions) -> Result<Self> {
        ensure_positive("radius", radius)?;
        let center = centroid.into();
        let outline = single_part(Point::new(center.x, center.y).buffer(radius))?;
        let mut disk = Self::from_polygon(
            outline,
            Some((center.x - radius, center.x + radius)),
            options,
        )?;
        disk.kind = RegionKind::Disk { radius, center };
        Ok(disk)
    }

    /// Ellipse with semi-axes `radii = (rx, ry)` around `centroid`.
    pub fn ellipse(
        radii: (f64, f64),
        centroid: impl Into<DVec2>,
        options: RegionOptions,
    ) -> Result<Self> {
        let (rx, ry) = radii;
        ensure_positive("rx", rx)?;
        ensure_positive("ry", ry)?;
        let center = centroid.into();
        let unit_disk = single_part(Point::new(center.x, center.y).buffer(1.0))?;
        let mut ellipse = Self::from_polygon(
            unit_disk.scale_xy(rx, ry),
            Some((center.x - rx, center.x + rx)),
            options,
        )?;
        ellipse.kind = RegionKind::Ellipse { radii, center };
        Ok(ellipse)
    }

    fn assemble(geometry: MultiPolygon<f64>, kind: RegionKind, options: RegionOptions) -> Self {
        let RegionOptions {
            unit,
            parent,
            default_properties,
        } = options;
        let partition = AreaPartition::new(&geometry, unit, default_properties);
        debug!(
            "Built {:?} region ({} part(s), unit {}).",
            kind,
            geometry.0.len(),
            unit
        );
        Self {
            geometry,
            unit,
            kind,
            parent,
            partition,
        }
    }

    /// Relabels the coordinates' unit on the region and all of its areas.
    pub fn set_unit(&mut self, unit: Unit) {
        self.unit = unit;
        self.partition.set_unit(unit);
    }

    pub fn set_parent(&mut self, parent: Option<ParentId>) {
        self.parent = parent;
    }

    /// Borrowed view of the partition.
    pub fn partition(&self) -> &AreaPartition {
        &self.partition
    }

    /// Snapshot of a single area.
    pub fn area(&self, name: &str) -> Option<Area> {
        self.partition.get(name).cloned()
    }

    pub fn area_names(&self) -> Vec<String> {
        self.partition.names().map(str::to_owned).collect()
    }

    /// Adds a named area carved out of the default area.
    ///
    /// Only the part of the new geometry inside this region is kept. Fails
    /// with [`Error::Overlap`] when it overlaps another named area, and leaves
    /// the partition unchanged on any error.
    pub fn add_area(&mut self, spec: impl Into<AreaSpec>) -> Result<Area> {
        self.partition
            .add(&self.geometry, spec.into())
            .map(Clone::clone)
    }

    /// Removes every named area; the default area covers the region again.
    pub fn reset_areas(&mut self) {
        self.partition.reset(&self.geometry);
    }
}

impl Shape for Region {
    fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    fn unit(&self) -> Unit {
        self.unit
    }

    fn kind(&self) -> RegionKind {
        self.kind
    }

    fn parent(&self) -> Option<ParentId> {
        self.parent
    }

    fn areas(&self) -> Result<BTreeMap<String, Area>> {
        Ok(self.partition.snapshot())
    }
}

impl From<&Region> for AreaSpec {
    /// Uses the region's outline; height and properties start unset.
    fn from(region: &Region) -> Self {
        AreaSpec::from_geometry(region.geometry.clone())
    }
}

fn ensure_positive(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::DegenerateShape(format!(
            "{what} must be finite and > 0, got {value}"
        )))
    }
}

fn single_part(geometry: MultiPolygon<f64>) -> Result<Polygon<f64>> {
    let mut parts = geometry.0.into_iter();
    match (parts.next(), parts.next()) {
        (Some(polygon), None) => Ok(polygon),
        (None, _) => Err(Error::Geometry("buffer produced an empty outline".into())),
        (Some(_), Some(_)) => Err(Error::Geometry(
            "buffer produced a multi-part outline".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::parent::ParentRegistry;

    fn square_shell() -> Vec<(f64, f64)> {
        vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]
    }

    fn no_holes() -> Vec<Vec<(f64, f64)>> {
        Vec::new()
    }

    #[test]
    fn new_region_has_one_default_area_spanning_it() {
        let region = Region::new(square_shell(), no_holes(), RegionOptions::default()).unwrap();
        let areas = region.areas().unwrap();
        assert_eq!(areas.len(), 1);
        let default = &areas[DEFAULT_AREA];
        assert_eq!(default.geometry(), region.geometry());
        assert_eq!(default.height(), 0.0);
        assert!(default.properties().is_empty());
        assert_eq!(region.kind(), RegionKind::Generic);
        assert_eq!(region.unit(), Unit::Micrometer);
    }

    #[test]
    fn malformed_shell_is_a_geometry_error() {
        let err = Region::new(
            vec![(0.0, 0.0), (1.0, 1.0)],
            no_holes(),
            RegionOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Geometry(_)));
    }

    #[test]
    fn from_polygon_rescales_isotropically() {
        let polygon = Polygon::new(
            vec![(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)].into(),
            vec![],
        );
        let region =
            Region::from_polygon(polygon, Some((-5000.0, 5000.0)), RegionOptions::default())
                .unwrap();
        let b = region.bounds().unwrap();
        assert!((b.min_x + 5000.0).abs() < 1e-6);
        assert!((b.max_x - 5000.0).abs() < 1e-6);
        assert!((b.height() - 5000.0).abs() < 1e-6);
        assert_eq!(region.kind(), RegionKind::Generic);
    }

    #[test]
    fn from_polygon_without_extent_keeps_coordinates() {
        let polygon = Polygon::new(
            vec![(3.0, 3.0), (5.0, 3.0), (5.0, 4.0), (3.0, 4.0)].into(),
            vec![],
        );
        let region = Region::from_polygon(polygon.clone(), None, RegionOptions::default()).unwrap();
        assert_eq!(region.geometry(), &MultiPolygon::new(vec![polygon]));
    }

    #[test]
    fn rectangle_corners_follow_centroid() {
        let region =
            Region::rectangle(4.0, 10.0, (1.0, 2.0), RegionOptions::new(Unit::Millimeter))
                .unwrap();
        let b = region.bounds().unwrap();
        assert_eq!((b.min_x, b.max_x), (-4.0, 6.0));
        assert_eq!((b.min_y, b.max_y), (0.0, 4.0));
        assert_eq!(region.kind(), RegionKind::Rectangle);
        assert_eq!(region.unit(), Unit::Millimeter);
        assert!((region.surface() - 40.0).abs() < 1e-12);
    }

    #[test]
    fn rectangle_rejects_zero_width() {
        assert!(matches!(
            Region::rectangle(1.0, 0.0, DVec2::ZERO, RegionOptions::default()),
            Err(Error::DegenerateShape(_))
        ));
    }

    #[test]
    fn disk_spans_its_diameter_and_records_kind() {
        let region = Region::disk(100.0, (10.0, -5.0), RegionOptions::default()).unwrap();
        let b = region.bounds().unwrap();
        assert!((b.min_x + 90.0).abs() < 1e-6);
        assert!((b.max_x - 110.0).abs() < 1e-6);
        assert!((region.surface() - PI * 100.0 * 100.0).abs() / (PI * 1e4) < 0.05);
        assert_eq!(
            region.kind(),
            RegionKind::Disk {
                radius: 100.0,
                center: DVec2::new(10.0, -5.0)
            }
        );
        let c = region.centroid().unwrap();
        assert!((c - DVec2::new(10.0, -5.0)).length() < 1e-3);
    }

    #[test]
    fn ellipse_is_stretched_along_both_axes() {
        let region = Region::ellipse((20.0, 5.0), DVec2::ZERO, RegionOptions::default()).unwrap();
        let b = region.bounds().unwrap();
        assert!((b.width() - 40.0).abs() < 1e-6);
        assert!((b.height() - 10.0).abs() < 0.5);
        assert!((region.surface() - PI * 100.0).abs() / (PI * 100.0) < 0.05);
        assert!(matches!(region.kind(), RegionKind::Ellipse { radii, .. } if radii == (20.0, 5.0)));
    }

    #[test]
    fn areas_snapshot_is_independent() {
        let mut region =
            Region::rectangle(10.0, 10.0, DVec2::ZERO, RegionOptions::default()).unwrap();
        let mut snapshot = region.areas().unwrap();
        snapshot.clear();
        assert_eq!(region.areas().unwrap().len(), 1);

        region
            .add_area(Polygon::new(
                vec![(0.0, 0.0), (5.0, 0.0), (5.0, 5.0), (0.0, 5.0)].into(),
                vec![],
            ))
            .unwrap();
        assert_eq!(region.areas().unwrap().len(), 2);
        assert_eq!(region.area_names(), vec!["area1", DEFAULT_AREA]);
        assert!((region.area(DEFAULT_AREA).unwrap().surface() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn default_properties_reach_default_area() {
        let props = PropertyMap::new().with("speed", 0.3).unwrap();
        let region = Region::disk(
            5.0,
            DVec2::ZERO,
            RegionOptions::default().with_default_properties(props.clone()),
        )
        .unwrap();
        assert_eq!(region.area(DEFAULT_AREA).unwrap().properties(), &props);
    }

    #[test]
    fn parent_handle_is_stored_and_replaceable() {
        let mut registry = ParentRegistry::new();
        let id = registry.register(12usize);
        let mut region = Region::rectangle(
            1.0,
            1.0,
            DVec2::ZERO,
            RegionOptions::default().with_parent(id),
        )
        .unwrap();
        assert_eq!(region.parent(), Some(id));
        region.set_parent(None);
        assert_eq!(region.parent(), None);
    }

    #[test]
    fn set_unit_relabels_areas() {
        let mut region =
            Region::rectangle(2.0, 2.0, DVec2::ZERO, RegionOptions::default()).unwrap();
        region.set_unit(Unit::Centimeter);
        assert_eq!(region.area(DEFAULT_AREA).unwrap().unit(), Unit::Centimeter);
    }

    #[test]
    fn region_can_be_added_as_an_area() {
        let mut chamber =
            Region::rectangle(40.0, 40.0, DVec2::ZERO, RegionOptions::default()).unwrap();
        let well = Region::disk(5.0, (10.0, 10.0), RegionOptions::default()).unwrap();

        let area = chamber.add_area(&well).unwrap();
        assert_eq!(area.name(), "area1");
        assert!((area.surface() - well.surface()).abs() < 1e-6);
        assert!(
            (chamber.area(DEFAULT_AREA).unwrap().surface() - (1600.0 - well.surface())).abs()
                < 1e-6
        );

        // A second region at the same spot collides with the first one.
        let twin = Region::disk(5.0, (10.0, 10.0), RegionOptions::default()).unwrap();
        assert!(matches!(
            chamber.add_area(AreaSpec::from(&twin).with_name("twin")),
            Err(Error::Overlap { .. })
        ));
    }

    #[test]
    fn reset_areas_restores_initial_state() {
        let mut region =
            Region::rectangle(10.0, 10.0, DVec2::ZERO, RegionOptions::default()).unwrap();
        let pristine = region.clone();
        region
            .add_area(Polygon::new(
                vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)].into(),
                vec![],
            ))
            .unwrap();
        region.reset_areas();
        assert_eq!(region, pristine);
    }
}
