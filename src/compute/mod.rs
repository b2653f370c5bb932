//! Compute layer: geometry, validation and result conversion.
//!
//! Pure functions with no index state. The index module composes them into
//! the two-phase (grid lookup, exact distance) query.

#[cfg(feature = "geojson")]
pub mod geojson;
pub mod spatial;
pub mod validation;
