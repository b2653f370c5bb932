//! Grid-bucketed proximity index.
//!
//! Points are grouped into fixed-size latitude/longitude cells at build time.
//! A radius query runs in two phases:
//!
//! 1. **Coarse**: collect every point in the square block of cells around the
//!    query center. The block half-width is `ceil(radius_km / (cell * 111))`,
//!    so it over-collects near its corners.
//! 2. **Exact**: apply the category filter, compute the haversine distance of
//!    each candidate and keep those with `distance <= radius_km`.
//!
//! Results are sorted by distance; equal distances keep input order.
//!
//! The km-per-degree conversion holds for latitude only. Longitude degrees
//! shrink towards the poles, so away from the equator the square block can
//! miss points east or west of the center unless
//! [`IndexConfig::scale_longitude_cells`] is set. The grid never wraps at the
//! antimeridian.

use crate::compute::spatial::distance::haversine_km;
use crate::compute::spatial::grid::{
    GridCell, Neighbourhood, cell_radius, scaled_longitude_cell_radius,
};
use crate::compute::validation::{validate_geographic_point, validate_radius_km};
use crate::config::{IndexConfig, InvalidPointPolicy};
use crate::error::{ProximityError, Result};
use crate::types::{IndexStats, PointOfInterest, ProximityHit, QueryStats};
use geo::Point;
use rustc_hash::{FxHashMap, FxHashSet};

/// Immutable proximity index over one snapshot of points.
///
/// Build once, query many times. To reflect a changed point set, build a new
/// index; an existing one is never modified.
///
/// # Examples
///
/// ```rust
/// use proxigrid::{IndexConfig, Point, PointOfInterest, ProximityIndex};
///
/// let points = vec![
///     PointOfInterest::new("demo_1", 40.7589, -73.9851, "hospital", "Central Hospital"),
///     PointOfInterest::new("demo_3", 40.7505, -73.9934, "restaurant", "Coffee Shop"),
/// ];
/// let index = ProximityIndex::build(points, IndexConfig::default())?;
///
/// let center = Point::new(-73.9850, 40.7580);
/// let hits = index.query(&center, 5.0, None)?;
/// assert_eq!(hits.len(), 2);
/// assert_eq!(hits[0].point.id, "demo_1");
///
/// let hospitals = index.query(&center, 5.0, Some("hospital"))?;
/// assert_eq!(hospitals.len(), 1);
/// # Ok::<(), proxigrid::ProximityError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ProximityIndex<T> {
    config: IndexConfig,
    /// Accepted points in input order
    points: Vec<PointOfInterest<T>>,
    /// Packed cell key -> positions in `points`, ascending
    cells: FxHashMap<u64, Vec<usize>>,
    skipped: usize,
}

impl<T> ProximityIndex<T> {
    /// Build an index over `points`.
    ///
    /// Fails with `InvalidConfiguration` if `config` does not validate, or if a
    /// point has non-finite or out-of-range coordinates while
    /// [`InvalidPointPolicy::Reject`] is in effect.
    pub fn build<I>(points: I, config: IndexConfig) -> Result<Self>
    where
        I: IntoIterator<Item = PointOfInterest<T>>,
    {
        config.validate()?;

        let cell_size = config.cell_size_degrees;
        let points = points.into_iter();
        let mut kept = Vec::with_capacity(points.size_hint().0);
        let mut cells: FxHashMap<u64, Vec<usize>> = FxHashMap::default();
        let mut skipped = 0;

        for (position, point) in points.enumerate() {
            if let Err(reason) = validate_geographic_point(&point.location) {
                match config.invalid_points {
                    InvalidPointPolicy::Reject => {
                        return Err(ProximityError::InvalidConfiguration(format!(
                            "Point at index {} ('{}'): {}",
                            position, point.id, reason
                        )));
                    }
                    InvalidPointPolicy::Skip => {
                        log::warn!(
                            "Skipping point at index {} ('{}'): {}",
                            position,
                            point.id,
                            reason
                        );
                        skipped += 1;
                        continue;
                    }
                }
            }

            let cell = GridCell::containing(point.latitude(), point.longitude(), cell_size);
            cells.entry(cell.key()).or_default().push(kept.len());
            kept.push(point);
        }

        log::debug!(
            "Built proximity index: {} points in {} cells (cell size {}°, {} skipped)",
            kept.len(),
            cells.len(),
            cell_size,
            skipped
        );

        Ok(Self {
            config,
            points: kept,
            cells,
            skipped,
        })
    }

    /// Build with the default configuration and the given cell size.
    pub fn with_cell_size<I>(points: I, cell_size_degrees: f64) -> Result<Self>
    where
        I: IntoIterator<Item = PointOfInterest<T>>,
    {
        Self::build(
            points,
            IndexConfig::default().with_cell_size_degrees(cell_size_degrees),
        )
    }

    /// All points within `radius_km` of `center`, nearest first.
    ///
    /// `center` follows the `geo` convention (x = longitude, y = latitude).
    /// A `category` of `None` or `Some("")` disables the filter; otherwise
    /// only points whose category equals it exactly are returned.
    ///
    /// Fails with `InvalidArgument` for an out-of-range center, a non-positive
    /// radius, or a radius above the configured maximum.
    pub fn query(
        &self,
        center: &Point,
        radius_km: f64,
        category: Option<&str>,
    ) -> Result<Vec<ProximityHit<'_, T>>> {
        self.execute(center, radius_km, category)
            .map(|(hits, _)| hits)
    }

    /// Like [`query`](Self::query), also reporting how much work each phase did.
    pub fn query_with_stats(
        &self,
        center: &Point,
        radius_km: f64,
        category: Option<&str>,
    ) -> Result<(Vec<ProximityHit<'_, T>>, QueryStats)> {
        self.execute(center, radius_km, category)
    }

    /// The `limit` nearest points within `radius_km`.
    pub fn query_nearest(
        &self,
        center: &Point,
        radius_km: f64,
        category: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ProximityHit<'_, T>>> {
        let mut hits = self.query(center, radius_km, category)?;
        hits.truncate(limit);
        Ok(hits)
    }

    fn execute(
        &self,
        center: &Point,
        radius_km: f64,
        category: Option<&str>,
    ) -> Result<(Vec<ProximityHit<'_, T>>, QueryStats)> {
        validate_geographic_point(center)
            .map_err(|e| ProximityError::InvalidArgument(format!("Query center: {}", e)))?;
        validate_radius_km(radius_km, self.config.max_radius_km)
            .map_err(ProximityError::InvalidArgument)?;

        let cell_size = self.config.cell_size_degrees;
        let center_cell = GridCell::containing(center.y(), center.x(), cell_size);
        let radius = cell_radius(radius_km, cell_size);
        let hood = if self.config.scale_longitude_cells {
            let lon_radius = scaled_longitude_cell_radius(radius_km, cell_size, center.y());
            Neighbourhood::new(center_cell, radius, lon_radius)
        } else {
            Neighbourhood::square(center_cell, radius)
        };

        let mut stats = QueryStats {
            cell_radius: hood.lat_radius,
            longitude_cell_radius: hood.lon_radius,
            ..QueryStats::default()
        };
        let mut candidates: Vec<usize> = Vec::new();

        if hood.cell_count() <= self.cells.len() as u128 {
            for cell in hood.cells() {
                if let Some(bucket) = self.cells.get(&cell.key()) {
                    stats.cells_examined += 1;
                    candidates.extend_from_slice(bucket);
                }
            }
        } else {
            // Block is larger than the occupied grid: test occupied cells instead.
            log::debug!(
                "Neighbourhood of {} cells exceeds {} occupied cells, scanning occupied cells",
                hood.cell_count(),
                self.cells.len()
            );
            for (key, bucket) in &self.cells {
                if hood.contains(GridCell::from_key(*key)) {
                    stats.cells_examined += 1;
                    candidates.extend_from_slice(bucket);
                }
            }
        }

        // Input order, so the stable sort below breaks distance ties by it.
        candidates.sort_unstable();
        stats.candidates_examined = candidates.len();

        let category = category.filter(|c| !c.is_empty());
        let (lat, lon) = (center.y(), center.x());

        let mut hits: Vec<ProximityHit<'_, T>> = candidates
            .into_iter()
            .map(|position| &self.points[position])
            .filter(|point| category.is_none_or(|c| point.category == c))
            .filter_map(|point| {
                let distance_km = haversine_km(lat, lon, point.latitude(), point.longitude());
                (distance_km <= radius_km).then_some(ProximityHit { point, distance_km })
            })
            .collect();

        hits.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        stats.results_returned = hits.len();

        log::debug!(
            "Radius query ({}, {}) r={} km category={:?}: {} cells, {} candidates, {} results",
            lat,
            lon,
            radius_km,
            category,
            stats.cells_examined,
            stats.candidates_examined,
            stats.results_returned
        );

        Ok((hits, stats))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of non-empty grid cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Indexed points in input order.
    pub fn points(&self) -> &[PointOfInterest<T>] {
        &self.points
    }

    /// First point with the given id. Ids are not required to be unique.
    ///
    /// Linear scan over all points; the grid only indexes by location.
    pub fn get(&self, id: &str) -> Option<&PointOfInterest<T>> {
        self.points.iter().find(|point| point.id == id)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        self.points
            .iter()
            .map(|point| point.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            point_count: self.points.len(),
            cell_count: self.cells.len(),
            largest_cell: self.cells.values().map(Vec::len).max().unwrap_or(0),
            skipped_points: self.skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_points() -> Vec<PointOfInterest<&'static str>> {
        vec![
            PointOfInterest::new("demo_1", 40.7589, -73.9851, "hospital", "Central Hospital"),
            PointOfInterest::new("demo_2", 40.7614, -73.9776, "education", "City Library"),
            PointOfInterest::new("demo_3", 40.7505, -73.9934, "restaurant", "Coffee Shop"),
            PointOfInterest::new("demo_4", 40.7580, -73.9855, "safety", "Police Station"),
            PointOfInterest::new("demo_5", 40.7595, -73.9845, "safety", "Fire Department"),
        ]
    }

    #[test]
    fn test_every_point_in_exactly_one_bucket() {
        let index = ProximityIndex::build(demo_points(), IndexConfig::default()).unwrap();

        let mut seen: Vec<usize> = index.cells.values().flatten().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..index.len()).collect::<Vec<_>>());

        for (key, bucket) in &index.cells {
            let cell = GridCell::from_key(*key);
            for &position in bucket {
                let point = &index.points[position];
                assert_eq!(
                    GridCell::containing(point.latitude(), point.longitude(), 0.01),
                    cell
                );
            }
        }
    }

    #[test]
    fn test_buckets_preserve_input_order() {
        let index = ProximityIndex::build(demo_points(), IndexConfig::default()).unwrap();
        for bucket in index.cells.values() {
            assert!(bucket.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_query_sorted_by_distance() {
        let index = ProximityIndex::build(demo_points(), IndexConfig::default()).unwrap();
        let center = Point::new(-73.9850, 40.7580);
        let hits = index.query(&center, 5.0, None).unwrap();

        assert_eq!(hits.len(), 5);
        assert!(hits.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
        assert_eq!(hits.last().unwrap().point.id, "demo_3");
    }

    #[test]
    fn test_category_filter_exact_match() {
        let index = ProximityIndex::build(demo_points(), IndexConfig::default()).unwrap();
        let center = Point::new(-73.9850, 40.7580);

        let safety = index.query(&center, 5.0, Some("safety")).unwrap();
        let ids: Vec<&str> = safety.iter().map(|h| h.id()).collect();
        assert_eq!(ids, vec!["demo_4", "demo_5"]);

        assert!(index.query(&center, 5.0, Some("Safety")).unwrap().is_empty());
        assert_eq!(index.query(&center, 5.0, Some("")).unwrap().len(), 5);
    }

    #[test]
    fn test_equal_distances_keep_input_order() {
        // One cell, one distance.
        let points = vec![
            PointOfInterest::new("b", 10.0, 10.0, "x", ()),
            PointOfInterest::new("a", 10.0, 10.0, "x", ()),
            PointOfInterest::new("c", 10.0, 10.0, "x", ()),
        ];
        let index = ProximityIndex::build(points, IndexConfig::default()).unwrap();
        let hits = index.query(&Point::new(10.001, 10.0), 1.0, None).unwrap();
        let ids: Vec<&str> = hits.iter().map(|h| h.id()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_equal_distances_across_cells_keep_input_order() {
        // Mirror images about the center land in different cells at equal distance.
        let points = vec![
            PointOfInterest::new("east", 0.5, 0.02, "x", ()),
            PointOfInterest::new("west", 0.5, -0.02, "x", ()),
        ];
        let index = ProximityIndex::build(points, IndexConfig::default()).unwrap();
        let hits = index.query(&Point::new(0.0, 0.5), 5.0, None).unwrap();
        let ids: Vec<&str> = hits.iter().map(|h| h.id()).collect();
        assert_eq!(ids, vec!["east", "west"]);
        assert_eq!(hits[0].distance_km, hits[1].distance_km);
    }

    #[test]
    fn test_query_with_stats() {
        let index = ProximityIndex::build(demo_points(), IndexConfig::default()).unwrap();
        let center = Point::new(-73.9850, 40.7580);
        let (hits, stats) = index
            .query_with_stats(&center, 0.3, Some("safety"))
            .unwrap();

        assert_eq!(stats.cell_radius, 1);
        assert_eq!(stats.longitude_cell_radius, 1);
        assert!(stats.cells_examined >= 1);
        assert!(stats.candidates_examined >= hits.len());
        assert_eq!(stats.results_returned, hits.len());
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_oversized_neighbourhood_scans_occupied_cells() {
        let index = ProximityIndex::build(demo_points(), IndexConfig::default()).unwrap();
        let center = Point::new(-73.9850, 40.7580);
        let (hits, stats) = index.query_with_stats(&center, 10_000.0, None).unwrap();
        assert_eq!(hits.len(), 5);
        assert_eq!(stats.cells_examined, index.cell_count());
    }

    #[test]
    fn test_query_nearest() {
        let index = ProximityIndex::build(demo_points(), IndexConfig::default()).unwrap();
        let center = Point::new(-73.9850, 40.7580);
        let all = index.query(&center, 5.0, None).unwrap();
        let top2 = index.query_nearest(&center, 5.0, None, 2).unwrap();
        assert_eq!(top2, all[..2].to_vec());
        assert!(index.query_nearest(&center, 5.0, None, 0).unwrap().is_empty());
    }

    #[test]
    fn test_accessors() {
        let index = ProximityIndex::build(demo_points(), IndexConfig::default()).unwrap();
        assert_eq!(index.len(), 5);
        assert!(!index.is_empty());
        assert_eq!(index.get("demo_2").unwrap().payload, "City Library");
        assert!(index.get("missing").is_none());
        assert_eq!(
            index.categories(),
            vec!["hospital", "education", "restaurant", "safety"]
        );

        let stats = index.stats();
        assert_eq!(stats.point_count, 5);
        assert_eq!(stats.cell_count, index.cell_count());
        assert!(stats.largest_cell >= 1);
        assert_eq!(stats.skipped_points, 0);
    }

    #[test]
    fn test_skip_policy_counts_malformed_points() {
        let mut points = demo_points();
        points.insert(1, PointOfInterest::new("bad_lat", 95.0, 0.0, "x", ""));
        points.push(PointOfInterest::new("nan", f64::NAN, 0.0, "x", ""));

        let config = IndexConfig::default().with_invalid_points(InvalidPointPolicy::Skip);
        let index = ProximityIndex::build(points, config).unwrap();
        assert_eq!(index.len(), 5);
        assert_eq!(index.stats().skipped_points, 2);
        assert!(index.get("bad_lat").is_none());
    }

    #[test]
    fn test_reject_policy_names_the_point() {
        let mut points = demo_points();
        points.insert(2, PointOfInterest::new("broken", 0.0, 181.0, "x", ""));

        let err = ProximityIndex::build(points, IndexConfig::default()).unwrap_err();
        assert!(err.is_invalid_configuration());
        assert!(err.to_string().contains("index 2"));
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_square_block_misses_far_east_at_high_latitude() {
        // 4.4 km due east at 60N is 8 longitude cells away; the square block spans 5.
        let points = vec![PointOfInterest::new("east", 60.0, 0.0805, "x", ())];
        let center = Point::new(0.0005, 60.0);

        let square = ProximityIndex::build(points.clone(), IndexConfig::default()).unwrap();
        assert!(square.query(&center, 5.0, None).unwrap().is_empty());

        let config = IndexConfig::default().with_scale_longitude_cells(true);
        let scaled = ProximityIndex::build(points, config).unwrap();
        let (hits, stats) = scaled.query_with_stats(&center, 5.0, None).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(stats.cell_radius, 5);
        assert!(stats.longitude_cell_radius >= 9);
    }

    #[test]
    fn test_huge_cell_size_still_scans_neighbours() {
        // Both points sit in the center cell's neighbours across the zero line.
        let points = vec![
            PointOfInterest::new("south", -0.001, 0.0, "x", ()),
            PointOfInterest::new("west", 0.0005, -0.001, "x", ()),
        ];
        let index = ProximityIndex::with_cell_size(points, 1e307).unwrap();
        let (hits, stats) = index
            .query_with_stats(&Point::new(0.0, 0.001), 1.0, None)
            .unwrap();

        assert_eq!(stats.cell_radius, 1);
        let ids: Vec<&str> = hits.iter().map(|h| h.id()).collect();
        assert_eq!(ids, vec!["west", "south"]);
    }

    #[test]
    fn test_max_radius() {
        let config = IndexConfig::default().with_max_radius_km(50.0);
        let index = ProximityIndex::build(demo_points(), config).unwrap();
        let center = Point::new(-73.9850, 40.7580);
        assert!(index.query(&center, 50.0, None).is_ok());
        assert!(
            index
                .query(&center, 50.5, None)
                .unwrap_err()
                .is_invalid_argument()
        );
    }
}
