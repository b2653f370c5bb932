//! In-memory grid-bucketed proximity index for geo-tagged points.
//!
//! Build an immutable [`ProximityIndex`] once, then ask for every point within
//! a radius of a location, optionally restricted to one category. Results come
//! back nearest first with great-circle (haversine) distances in km.
//!
//! ```rust
//! use proxigrid::{IndexConfig, Point, PointOfInterest, ProximityIndex};
//!
//! let index = ProximityIndex::build(
//!     vec![
//!         PointOfInterest::new("demo_1", 40.7589, -73.9851, "hospital", "Central Hospital"),
//!         PointOfInterest::new("demo_3", 40.7505, -73.9934, "restaurant", "Coffee Shop"),
//!     ],
//!     IndexConfig::default(),
//! )?;
//!
//! let here = Point::new(-73.9850, 40.7580);
//! for hit in index.query(&here, 5.0, None)? {
//!     println!("{} at {:.2} km", hit.point.id, hit.distance_km);
//! }
//! # Ok::<(), proxigrid::ProximityError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod index;
pub mod types;

pub use builder::IndexBuilder;
pub use config::{DEFAULT_CELL_SIZE_DEGREES, IndexConfig, InvalidPointPolicy, MIN_CELL_SIZE_DEGREES};
pub use error::{ProximityError, Result};
pub use index::ProximityIndex;
pub use types::{IndexStats, PointOfInterest, ProximityHit, QueryStats};

pub use compute::spatial::{EARTH_RADIUS_KM, haversine_km, round_km};
pub use compute::validation;

#[cfg(feature = "geojson")]
pub use compute::geojson;

pub use geo::Point;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{IndexBuilder, IndexConfig, InvalidPointPolicy, Result, ProximityError};

    pub use crate::{PointOfInterest, ProximityHit, ProximityIndex};

    pub use crate::haversine_km;

    pub use geo::Point;
}
