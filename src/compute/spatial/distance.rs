//! Great-circle distance on a spherical Earth.

/// Earth radius used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in km between two latitude/longitude pairs in degrees.
///
/// Uses a sphere of radius 6371 km. `geo::Haversine` uses the IUGG mean
/// radius instead, which shifts results in the fourth significant digit.
///
/// # Examples
///
/// ```
/// use proxigrid::haversine_km;
///
/// let d = haversine_km(40.7580, -73.9850, 40.7589, -73.9851);
/// assert!((d - 0.1).abs() < 0.01);
/// ```
#[inline]
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Round a distance to two decimals.
#[inline]
pub fn round_km(distance_km: f64) -> f64 {
    (distance_km * 100.0).round() / 100.0
}
