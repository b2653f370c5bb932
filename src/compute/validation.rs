//! Validation for geographic coordinates and index parameters.
//!
//! Returns bare reasons as `String`; callers wrap them in the error kind that
//! matches the phase (build-time configuration or query-time argument).

use geo::Point;

/// Validates a point has finite, in-range longitude and latitude.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
///
/// # Examples
///
/// ```
/// use proxigrid::compute::validation::validate_geographic_point;
/// use geo::Point;
///
/// let nyc = Point::new(-74.0060, 40.7128);
/// assert!(validate_geographic_point(&nyc).is_ok());
///
/// // Invalid latitude
/// let invalid = Point::new(-74.0, 95.0);
/// assert!(validate_geographic_point(&invalid).is_err());
/// ```
pub fn validate_geographic_point(point: &Point) -> Result<(), String> {
    let (x, y) = (point.x(), point.y());

    if !x.is_finite() {
        return Err(format!("Longitude must be finite, got: {}", x));
    }

    if !y.is_finite() {
        return Err(format!("Latitude must be finite, got: {}", y));
    }

    if !(-180.0..=180.0).contains(&x) {
        return Err(format!("Longitude out of range [-180.0, 180.0]: {}", x));
    }

    if !(-90.0..=90.0).contains(&y) {
        return Err(format!("Latitude out of range [-90.0, 90.0]: {}", y));
    }

    Ok(())
}

/// Validates a search radius in km, optionally against an upper bound.
pub fn validate_radius_km(radius_km: f64, max_radius_km: Option<f64>) -> Result<(), String> {
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(format!(
            "Radius must be a finite number greater than zero, got: {}",
            radius_km
        ));
    }

    if let Some(max) = max_radius_km
        && radius_km > max
    {
        return Err(format!(
            "Radius {} km exceeds the configured maximum of {} km",
            radius_km, max
        ));
    }

    Ok(())
}
