//! Grid cell arithmetic for the bucket index.
//!
//! A cell is `(floor(lat / size), floor(lon / size))`. Both coordinates fit in
//! `i32` for every accepted cell size and are packed into one `u64` map key.

/// Approximate km per degree of latitude, used to turn a radius into cells.
pub(crate) const KM_PER_DEGREE: f64 = 111.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct GridCell {
    /// Latitude band
    pub x: i32,
    /// Longitude band
    pub y: i32,
}

impl GridCell {
    pub fn containing(latitude: f64, longitude: f64, cell_size_degrees: f64) -> Self {
        Self {
            x: (latitude / cell_size_degrees).floor() as i32,
            y: (longitude / cell_size_degrees).floor() as i32,
        }
    }

    #[inline]
    pub fn key(self) -> u64 {
        ((self.x as u32 as u64) << 32) | (self.y as u32 as u64)
    }

    #[inline]
    pub fn from_key(key: u64) -> Self {
        Self {
            x: (key >> 32) as u32 as i32,
            y: key as u32 as i32,
        }
    }
}

/// Number of cells to scan on each side of the center cell.
///
/// At least one ring: a positive radius can always reach a neighbouring cell,
/// even when `cell_size_degrees * 111` overflows to infinity.
pub(crate) fn cell_radius(radius_km: f64, cell_size_degrees: f64) -> i64 {
    ((radius_km / (cell_size_degrees * KM_PER_DEGREE)).ceil() as i64).max(1)
}

/// Longitude half-width that covers every point within `radius_km`.
///
/// A degree of longitude spans `111 * cos(lat)` km, so the bound uses the
/// highest latitude the circle can reach. Saturates once that reaches a pole.
pub(crate) fn scaled_longitude_cell_radius(
    radius_km: f64,
    cell_size_degrees: f64,
    center_latitude: f64,
) -> i64 {
    let reach = (center_latitude.abs() + radius_km / KM_PER_DEGREE).min(90.0);
    let km_per_degree = KM_PER_DEGREE * reach.to_radians().cos();
    let scaled = (radius_km / (cell_size_degrees * km_per_degree)).ceil() as i64;
    scaled.max(cell_radius(radius_km, cell_size_degrees))
}

/// Block of cells `[cx - rx, cx + rx] x [cy - ry, cy + ry]`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Neighbourhood {
    pub center: GridCell,
    /// Half-width in latitude bands
    pub lat_radius: i64,
    /// Half-width in longitude bands
    pub lon_radius: i64,
}

impl Neighbourhood {
    /// Square block, the same half-width on both axes.
    pub fn square(center: GridCell, radius: i64) -> Self {
        Self::new(center, radius, radius)
    }

    pub fn new(center: GridCell, lat_radius: i64, lon_radius: i64) -> Self {
        Self {
            center,
            lat_radius,
            lon_radius,
        }
    }

    pub fn contains(&self, cell: GridCell) -> bool {
        (i64::from(cell.x) - i64::from(self.center.x)).abs() <= self.lat_radius
            && (i64::from(cell.y) - i64::from(self.center.y)).abs() <= self.lon_radius
    }

    /// Cells in the block, saturating instead of overflowing for huge radii.
    pub fn cell_count(&self) -> u128 {
        let side = |radius: i64| (radius as u128).saturating_mul(2).saturating_add(1);
        side(self.lat_radius).saturating_mul(side(self.lon_radius))
    }

    /// Row-major walk of the block, clamped to the `i32` coordinate space.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + use<> {
        let (x_lo, x_hi) = Self::span(self.center.x, self.lat_radius);
        let (y_lo, y_hi) = Self::span(self.center.y, self.lon_radius);
        (x_lo..=x_hi).flat_map(move |x| (y_lo..=y_hi).map(move |y| GridCell { x, y }))
    }

    fn span(center: i32, radius: i64) -> (i32, i32) {
        let lo = i64::from(center).saturating_sub(radius).max(i64::from(i32::MIN));
        let hi = i64::from(center).saturating_add(radius).min(i64::from(i32::MAX));
        (lo as i32, hi as i32)
    }
}
