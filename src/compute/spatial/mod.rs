//! Spatial primitives: great-circle distance and grid cell arithmetic.

pub mod distance;
pub(crate) mod grid;

pub use distance::{EARTH_RADIUS_KM, haversine_km, round_km};
