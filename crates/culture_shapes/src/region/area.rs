//! Named sub-regions carrying a height and modulation properties.
use std::collections::BTreeMap;

use geo::{Coord, MultiPolygon, Polygon};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{polygon_from_points, rescale_to_x_extent};
use crate::properties::PropertyMap;
use crate::shape::Shape;
use crate::units::Unit;

/// A homogeneous piece of substrate.
///
/// Neurons interact with an area the same way wherever they sit inside it:
/// the area's [`PropertyMap`] describes how it modulates their default
/// behaviour. Areas are leaves and cannot be subdivided further.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Area {
    name: String,
    geometry: MultiPolygon<f64>,
    unit: Unit,
    height: f64,
    properties: PropertyMap,
}

impl Area {
    /// Builds an area from a shell and optional holes.
    pub fn new<S, H, C>(name: impl Into<String>, shell: S, holes: H) -> Result<Self>
    where
        S: IntoIterator<Item = C>,
        H: IntoIterator,
        H::Item: IntoIterator<Item = C>,
        C: Into<Coord<f64>>,
    {
        let polygon = polygon_from_points(shell, holes)?;
        Ok(Self::from_geometry(name, MultiPolygon::new(vec![polygon])))
    }

    /// Wraps an existing geometry without validation.
    pub fn from_geometry(name: impl Into<String>, geometry: MultiPolygon<f64>) -> Self {
        Self {
            name: name.into(),
            geometry,
            unit: Unit::default(),
            height: 0.0,
            properties: PropertyMap::new(),
        }
    }

    /// Builds an area covering `shape`, optionally rescaled so its exterior
    /// spans `[min_x, max_x]`.
    pub fn from_shape<S>(
        name: impl Into<String>,
        shape: &S,
        x_extent: Option<(f64, f64)>,
    ) -> Result<Self>
    where
        S: Shape + ?Sized,
    {
        let geometry = match x_extent {
            Some((min_x, max_x)) => rescale_to_x_extent(shape.geometry(), min_x, max_x)?,
            None => shape.geometry().clone(),
        };
        Ok(Self::from_geometry(name, geometry).with_unit(shape.unit()))
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn with_properties(mut self, properties: PropertyMap) -> Self {
        self.properties = properties;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// Modulation factor for `property`; `1.0` when the area leaves it untouched.
    pub fn modulation(&self, property: &str) -> f64 {
        self.properties.get(property)
    }

    /// Same area data on a new geometry.
    pub(crate) fn with_geometry(&self, geometry: MultiPolygon<f64>) -> Self {
        Self {
            name: self.name.clone(),
            geometry,
            unit: self.unit,
            height: self.height,
            properties: self.properties.clone(),
        }
    }
}

impl Shape for Area {
    fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    fn unit(&self) -> Unit {
        self.unit
    }

    fn areas(&self) -> Result<BTreeMap<String, Area>> {
        Err(Error::NoSubAreas {
            name: self.name.clone(),
        })
    }
}

/// Input to [`crate::region::Region::add_area`].
///
/// Height and properties left unset fall back to the source area's values
/// (for [`AreaSpec::from_area`]) or to `0` and an empty map.
#[derive(Clone, Debug)]
pub struct AreaSpec {
    pub(crate) geometry: MultiPolygon<f64>,
    pub(crate) name: Option<String>,
    pub(crate) height: Option<f64>,
    pub(crate) properties: Option<PropertyMap>,
}

impl AreaSpec {
    pub fn from_geometry(geometry: MultiPolygon<f64>) -> Self {
        Self {
            geometry,
            name: None,
            height: None,
            properties: None,
        }
    }

    pub fn from_polygon(polygon: Polygon<f64>) -> Self {
        Self::from_geometry(MultiPolygon::new(vec![polygon]))
    }

    /// Uses an existing area's outline, inheriting its height and properties.
    pub fn from_area(area: &Area) -> Self {
        Self {
            geometry: area.geometry.clone(),
            name: None,
            height: Some(area.height),
            properties: Some(area.properties.clone()),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_properties(mut self, properties: PropertyMap) -> Self {
        self.properties = Some(properties);
        self
    }
}

impl From<Polygon<f64>> for AreaSpec {
    fn from(polygon: Polygon<f64>) -> Self {
        Self::from_polygon(polygon)
    }
}

impl From<MultiPolygon<f64>> for AreaSpec {
    fn from(geometry: MultiPolygon<f64>) -> Self {
        Self::from_geometry(geometry)
    }
}

impl From<&Area> for AreaSpec {
    fn from(area: &Area) -> Self {
        Self::from_area(area)
    }
}

impl From<Area> for AreaSpec {
    fn from(area: Area) -> Self {
        Self {
            geometry: area.geometry,
            name: None,
            height: Some(area.height),
            properties: Some(area.properties),
        }
    }
}
