//! Per-area modulation factors.
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Factor returned for properties an area does not modulate.
pub const NEUTRAL_MODULATION: f64 = 1.0;

/// Mapping from property name to modulation factor.
///
/// Absent keys read as [`NEUTRAL_MODULATION`]. Stored values are non-negative
/// reals or NaN.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyMap {
    values: BTreeMap<String, f64>,
}

impl PropertyMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Builds a map from `(key, value)` pairs, validating every value.
    pub fn try_from_pairs<I, K>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut map = Self::new();
        for (key, value) in pairs {
            map.set(key, value)?;
        }
        Ok(map)
    }

    /// Returns the factor for `key`, or [`NEUTRAL_MODULATION`] when absent.
    pub fn get(&self, key: &str) -> f64 {
        self.values.get(key).copied().unwrap_or(NEUTRAL_MODULATION)
    }

    /// Sets the factor for `key`. Fails for negative values; NaN is accepted.
    pub fn set(&mut self, key: impl Into<String>, value: f64) -> Result<()> {
        let key = key.into();
        if value < 0.0 {
            return Err(Error::InvalidProperty { key, value });
        }
        self.values.insert(key, value);
        Ok(())
    }

    /// Sets the factor and returns the map.
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Result<Self> {
        self.set(key, value)?;
        Ok(self)
    }

    /// Removes `key`, returning the stored factor if there was one.
    pub fn remove(&mut self, key: &str) -> Option<f64> {
        self.values.remove(key)
    }

    /// Whether `key` has an explicit factor.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates explicit entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
