//! Index builder for flexible configuration
//!
//! Collects configuration and points step by step, then validates everything
//! at once in [`IndexBuilder::build`].

use crate::config::{IndexConfig, InvalidPointPolicy};
use crate::error::Result;
use crate::index::ProximityIndex;
use crate::types::PointOfInterest;

/// Builder for a [`ProximityIndex`].
///
/// ```rust
/// use proxigrid::{IndexBuilder, InvalidPointPolicy, Point};
///
/// let index = IndexBuilder::new()
///     .cell_size_degrees(0.02)
///     .invalid_points(InvalidPointPolicy::Skip)
///     .point("demo_1", 40.7589, -73.9851, "hospital", "Central Hospital")
///     .point("bad", 123.0, 0.0, "hospital", "Nowhere")
///     .build()?;
///
/// assert_eq!(index.len(), 1);
/// assert_eq!(index.stats().skipped_points, 1);
/// # Ok::<(), proxigrid::ProximityError>(())
/// ```
#[derive(Debug)]
pub struct IndexBuilder<T> {
    config: IndexConfig,
    points: Vec<PointOfInterest<T>>,
}

impl<T> IndexBuilder<T> {
    /// Create a new builder with the default configuration and no points.
    pub fn new() -> Self {
        Self {
            config: IndexConfig::default(),
            points: Vec::new(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: IndexConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the grid cell size in degrees. Validated on `build`.
    pub fn cell_size_degrees(mut self, cell_size_degrees: f64) -> Self {
        self.config = self.config.with_cell_size_degrees(cell_size_degrees);
        self
    }

    pub fn invalid_points(mut self, policy: InvalidPointPolicy) -> Self {
        self.config = self.config.with_invalid_points(policy);
        self
    }

    /// Cap query radii at `max_radius_km`.
    pub fn max_radius_km(mut self, max_radius_km: f64) -> Self {
        self.config = self.config.with_max_radius_km(max_radius_km);
        self
    }

    /// Widen the longitude span of each query neighbourhood with latitude.
    pub fn scale_longitude_cells(mut self, enabled: bool) -> Self {
        self.config = self.config.with_scale_longitude_cells(enabled);
        self
    }

    /// Add one point from latitude/longitude in degrees.
    pub fn point(
        mut self,
        id: impl Into<String>,
        latitude: f64,
        longitude: f64,
        category: impl Into<String>,
        payload: T,
    ) -> Self {
        self.points
            .push(PointOfInterest::new(id, latitude, longitude, category, payload));
        self
    }

    /// Add points, keeping their order after any already added.
    pub fn points<I>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = PointOfInterest<T>>,
    {
        self.points.extend(points);
        self
    }

    /// Build the index.
    pub fn build(self) -> Result<ProximityIndex<T>> {
        ProximityIndex::build(self.points, self.config)
    }
}

impl<T> Default for IndexBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
