//! Core data types: points of interest, query hits and statistics.

use crate::compute::spatial::distance::round_km;
use geo::Point;
use serde::{Deserialize, Serialize};

/// A located item stored in a [`ProximityIndex`](crate::ProximityIndex).
///
/// `location` follows the `geo` convention: x is longitude, y is latitude.
///
/// # Examples
///
/// ```
/// use proxigrid::PointOfInterest;
///
/// let hospital = PointOfInterest::new("demo_1", 40.7589, -73.9851, "hospital", "Central Hospital");
/// assert_eq!(hospital.latitude(), 40.7589);
/// assert_eq!(hospital.longitude(), -73.9851);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest<T> {
    pub id: String,
    pub location: Point<f64>,
    pub category: String,
    pub payload: T,
}

impl<T> PointOfInterest<T> {
    /// Create a point from latitude/longitude in degrees.
    pub fn new(
        id: impl Into<String>,
        latitude: f64,
        longitude: f64,
        category: impl Into<String>,
        payload: T,
    ) -> Self {
        Self {
            id: id.into(),
            location: Point::new(longitude, latitude),
            category: category.into(),
            payload,
        }
    }

    /// Create a point from an existing `geo::Point` (x = longitude, y = latitude).
    pub fn at(
        id: impl Into<String>,
        location: Point<f64>,
        category: impl Into<String>,
        payload: T,
    ) -> Self {
        Self {
            id: id.into(),
            location,
            category: category.into(),
            payload,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.location.y()
    }

    pub fn longitude(&self) -> f64 {
        self.location.x()
    }
}

/// A single query result.
#[derive(Debug, PartialEq)]
pub struct ProximityHit<'a, T> {
    pub point: &'a PointOfInterest<T>,

    /// Great-circle distance to the query center in km, full precision.
    pub distance_km: f64,
}

impl<'a, T> ProximityHit<'a, T> {
    /// Distance rounded to two decimals, the display convention for results.
    pub fn rounded_distance_km(&self) -> f64 {
        round_km(self.distance_km)
    }

    pub fn id(&self) -> &'a str {
        &self.point.id
    }
}

impl<T> Clone for ProximityHit<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ProximityHit<'_, T> {}

/// Shape of a built index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub point_count: usize,
    pub cell_count: usize,
    /// Number of points in the most populated cell
    pub largest_cell: usize,
    /// Malformed points dropped under `InvalidPointPolicy::Skip`
    pub skipped_points: usize,
}

/// Statistics about a query execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryStats {
    /// Half-width of the cell neighbourhood in latitude bands
    pub cell_radius: i64,

    /// Half-width in longitude bands. Equals `cell_radius` unless
    /// `scale_longitude_cells` is enabled.
    pub longitude_cell_radius: i64,

    /// Number of non-empty cells visited
    pub cells_examined: usize,

    /// Number of candidate points considered (before filtering)
    pub candidates_examined: usize,

    /// Number of results returned (after filtering)
    pub results_returned: usize,
}
