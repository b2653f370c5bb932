//! Index configuration.
//!
//! [`IndexConfig`] fixes the grid granularity and how malformed points are
//! treated at build time. It can be loaded from JSON (and TOML with the
//! `toml` feature) so services can keep it alongside their other settings.

use crate::error::{ProximityError, Result};
use serde::de::Error;

/// Default bucket granularity, roughly 1.1 km of latitude.
pub const DEFAULT_CELL_SIZE_DEGREES: f64 = 0.01;

/// Finest accepted granularity. Smaller cells overflow 32-bit cell coordinates.
pub const MIN_CELL_SIZE_DEGREES: f64 = 1e-7;

/// What `build` does with a point whose coordinates are non-finite or out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidPointPolicy {
    /// Fail the whole build with `InvalidConfiguration`.
    #[default]
    Reject,
    /// Drop the point, log a warning and count it in `IndexStats::skipped_points`.
    Skip,
}

/// Proximity index configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    #[serde(default = "IndexConfig::default_cell_size_degrees")]
    pub cell_size_degrees: f64,

    #[serde(default)]
    pub invalid_points: InvalidPointPolicy,

    /// Upper bound on query radius in km. `None` means unbounded.
    #[serde(default)]
    pub max_radius_km: Option<f64>,

    /// Widen the longitude span of the cell neighbourhood by `1 / cos(lat)`.
    ///
    /// Off, the neighbourhood is square in cells and can miss points east or
    /// west of the center away from the equator. On, every point within the
    /// radius is found except across the antimeridian.
    #[serde(default)]
    pub scale_longitude_cells: bool,
}

impl IndexConfig {
    const fn default_cell_size_degrees() -> f64 {
        DEFAULT_CELL_SIZE_DEGREES
    }

    pub fn with_cell_size_degrees(mut self, cell_size_degrees: f64) -> Self {
        self.cell_size_degrees = cell_size_degrees;
        self
    }

    pub fn with_invalid_points(mut self, policy: InvalidPointPolicy) -> Self {
        self.invalid_points = policy;
        self
    }

    pub fn with_max_radius_km(mut self, max_radius_km: f64) -> Self {
        self.max_radius_km = Some(max_radius_km);
        self
    }

    pub fn with_scale_longitude_cells(mut self, enabled: bool) -> Self {
        self.scale_longitude_cells = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let cell = self.cell_size_degrees;
        if !cell.is_finite() || cell <= 0.0 {
            return Err(ProximityError::InvalidConfiguration(format!(
                "cell_size_degrees must be a finite number greater than zero, got: {}",
                cell
            )));
        }

        if cell < MIN_CELL_SIZE_DEGREES {
            return Err(ProximityError::InvalidConfiguration(format!(
                "cell_size_degrees must be at least {}, got: {}",
                MIN_CELL_SIZE_DEGREES, cell
            )));
        }

        if let Some(max) = self.max_radius_km
            && (!max.is_finite() || max <= 0.0)
        {
            return Err(ProximityError::InvalidConfiguration(format!(
                "max_radius_km must be a finite number greater than zero, got: {}",
                max
            )));
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: IndexConfig = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: IndexConfig = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            cell_size_degrees: Self::default_cell_size_degrees(),
            invalid_points: InvalidPointPolicy::default(),
            max_radius_km: None,
            scale_longitude_cells: false,
        }
    }
}
