//! Metric length units and conversion between them.
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Unit of length attached to a shape's coordinates.
///
/// The unit is a label: it never changes stored coordinates, it only drives
/// [`Unit::conversion_magnitude`] when positions are reported in another unit.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Unit {
    #[default]
    Micrometer,
    Millimeter,
    Centimeter,
    Decimeter,
    Meter,
}

impl Unit {
    /// Length of one unit expressed in meters.
    pub const fn meters(self) -> f64 {
        match self {
            Unit::Micrometer => 1e-6,
            Unit::Millimeter => 1e-3,
            Unit::Centimeter => 1e-2,
            Unit::Decimeter => 1e-1,
            Unit::Meter => 1.0,
        }
    }

    /// Short symbol (`um`, `mm`, `cm`, `dm`, `m`).
    pub const fn symbol(self) -> &'static str {
        match self {
            Unit::Micrometer => "um",
            Unit::Millimeter => "mm",
            Unit::Centimeter => "cm",
            Unit::Decimeter => "dm",
            Unit::Meter => "m",
        }
    }

    /// Factor converting a length expressed in `from` into `to`.
    ///
    /// `x_to = x_from * Unit::conversion_magnitude(to, from)`.
    pub fn conversion_magnitude(to: Unit, from: Unit) -> f64 {
        if to == from {
            return 1.0;
        }
        from.meters() / to.meters()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "um" | "µm" | "μm" | "micrometer" => Ok(Unit::Micrometer),
            "mm" | "millimeter" => Ok(Unit::Millimeter),
            "cm" | "centimeter" => Ok(Unit::Centimeter),
            "dm" | "decimeter" => Ok(Unit::Decimeter),
            "m" | "meter" => Ok(Unit::Meter),
            other => Err(Error::UnknownUnit(other.to_owned())),
        }
    }
}
