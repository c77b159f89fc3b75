//! Non-overlapping tiling of a region into named areas.
//!
//! A partition always holds [`DEFAULT_AREA`], which covers whatever the named
//! areas leave unclaimed. Adding an area carves it out of the default area;
//! named areas may never overlap each other.
use std::collections::BTreeMap;

use geo::{Area as _, BooleanOps, MultiPolygon};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{overlaps, without_slivers, AREA_EPSILON};
use crate::properties::PropertyMap;
use crate::region::area::{Area, AreaSpec};
use crate::shape::Shape;
use crate::units::Unit;

/// Name of the area covering the unclaimed remainder of a region.
pub const DEFAULT_AREA: &str = "default_area";

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPartition"))]
#[derive(Clone, Debug, PartialEq)]
pub struct AreaPartition {
    areas: BTreeMap<String, Area>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawPartition {
    areas: BTreeMap<String, Area>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPartition> for AreaPartition {
    type Error = Error;

    fn try_from(raw: RawPartition) -> Result<Self> {
        Self::try_from(raw.areas)
    }
}

/// Rebuilds a partition from named areas.
///
/// Fails unless a [`DEFAULT_AREA`] entry is present and every key matches the
/// name of the area stored under it.
impl TryFrom<BTreeMap<String, Area>> for AreaPartition {
    type Error = Error;

    fn try_from(areas: BTreeMap<String, Area>) -> Result<Self> {
        if !areas.contains_key(DEFAULT_AREA) {
            return Err(Error::InvalidConfig(format!(
                "partition has no '{DEFAULT_AREA}' entry"
            )));
        }
        if let Some((key, area)) = areas.iter().find(|(key, area)| key.as_str() != area.name()) {
            return Err(Error::InvalidConfig(format!(
                "area '{}' is stored under '{}'",
                area.name(),
                key
            )));
        }
        Ok(Self { areas })
    }
}

impl AreaPartition {
    /// A partition holding only the default area, spanning `owner`.
    pub(crate) fn new(owner: &MultiPolygon<f64>, unit: Unit, defaults: PropertyMap) -> Self {
        let default = Area::from_geometry(DEFAULT_AREA, owner.clone())
            .with_unit(unit)
            .with_properties(defaults);
        let mut areas = BTreeMap::new();
        areas.insert(DEFAULT_AREA.to_owned(), default);
        Self { areas }
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Always `false`: the default area is never removed.
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Area> {
        self.areas.get(name)
    }

    pub fn default_area(&self) -> &Area {
        &self.areas[DEFAULT_AREA]
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.areas.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Area> {
        self.areas.values()
    }

    /// Independent copy of every area.
    pub fn snapshot(&self) -> BTreeMap<String, Area> {
        self.areas.clone()
    }

    pub(crate) fn set_unit(&mut self, unit: Unit) {
        for area in self.areas.values_mut() {
            *area = area.clone().with_unit(unit);
        }
    }

    /// Carves a new area out of the default area.
    ///
    /// Only the part of `spec` inside `owner` is kept. The partition is left
    /// untouched when any check fails.
    pub(crate) fn add(&mut self, owner: &MultiPolygon<f64>, spec: AreaSpec) -> Result<&Area> {
        let name = match spec.name {
            Some(name) => name,
            None => self.next_free_name(),
        };
        if self.areas.contains_key(&name) {
            return Err(Error::DuplicateArea { name });
        }

        let owner_surface = owner.unsigned_area();
        let candidate = without_slivers(owner.intersection(&spec.geometry), owner_surface);
        if candidate.unsigned_area() <= AREA_EPSILON * owner_surface {
            return Err(Error::EmptyArea { name });
        }

        if let Some(existing) = self
            .areas
            .iter()
            .filter(|(key, _)| key.as_str() != DEFAULT_AREA)
            .find(|(_, area)| overlaps(&candidate, area.geometry()))
            .map(|(key, _)| key.clone())
        {
            return Err(Error::Overlap { name, existing });
        }

        let default = self.default_area();
        let new_area = Area::from_geometry(name.clone(), candidate)
            .with_unit(default.unit())
            .with_height(spec.height.unwrap_or(0.0))
            .with_properties(spec.properties.unwrap_or_default());
        let remainder = without_slivers(
            default.geometry().difference(new_area.geometry()),
            owner_surface,
        );
        let new_default = default.with_geometry(remainder);

        debug!(
            "Added area '{}' ({:.3} of {:.3}); default area now {:.3}.",
            name,
            new_area.surface(),
            owner_surface,
            new_default.surface()
        );

        self.areas.insert(DEFAULT_AREA.to_owned(), new_default);
        self.areas.insert(name.clone(), new_area);
        Ok(&self.areas[&name])
    }

    /// Drops every named area; the default area spans `owner` again.
    pub(crate) fn reset(&mut self, owner: &MultiPolygon<f64>) {
        let default = self.default_area().with_geometry(owner.clone());
        self.areas.clear();
        self.areas.insert(DEFAULT_AREA.to_owned(), default);
    }

    fn next_free_name(&self) -> String {
        (self.areas.len()..)
            .map(|n| format!("area{n}"))
            .find(|candidate| !self.areas.contains_key(candidate))
            .unwrap_or_else(|| format!("area{}", self.areas.len()))
    }
}
