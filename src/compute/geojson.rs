//! GeoJSON export of query results.
//!
//! Each hit becomes a `Point` feature whose properties carry the category,
//! the rounded distance and the serialized payload.

use crate::types::ProximityHit;
use ::geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value, feature::Id};
use serde::Serialize;

/// Converts one hit to a GeoJSON feature.
pub fn hit_to_feature<T: Serialize>(hit: &ProximityHit<'_, T>) -> serde_json::Result<Feature> {
    let point = hit.point;
    let mut properties = JsonObject::new();
    properties.insert("category".to_string(), point.category.clone().into());
    properties.insert(
        "distance_km".to_string(),
        serde_json::to_value(hit.rounded_distance_km())?,
    );
    properties.insert("payload".to_string(), serde_json::to_value(&point.payload)?);

    Ok(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![
            point.longitude(),
            point.latitude(),
        ]))),
        id: Some(Id::String(point.id.clone())),
        properties: Some(properties),
        foreign_members: None,
    })
}

/// Converts query hits, in order, to a GeoJSON feature collection.
///
/// # Examples
///
/// ```rust
/// use proxigrid::{IndexConfig, Point, PointOfInterest, ProximityIndex};
/// use proxigrid::geojson::hits_to_feature_collection;
///
/// let index = ProximityIndex::build(
///     vec![PointOfInterest::new("demo_1", 40.7589, -73.9851, "hospital", "Central Hospital")],
///     IndexConfig::default(),
/// )?;
/// let hits = index.query(&Point::new(-73.9850, 40.7580), 1.0, None)?;
///
/// let collection = hits_to_feature_collection(&hits).unwrap();
/// assert_eq!(collection.features.len(), 1);
/// # Ok::<(), proxigrid::ProximityError>(())
/// ```
pub fn hits_to_feature_collection<T: Serialize>(
    hits: &[ProximityHit<'_, T>],
) -> serde_json::Result<FeatureCollection> {
    let features = hits
        .iter()
        .map(hit_to_feature)
        .collect::<serde_json::Result<Vec<_>>>()?;

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

/// Converts query hits to a GeoJSON string.
pub fn to_geojson_string<T: Serialize>(hits: &[ProximityHit<'_, T>]) -> serde_json::Result<String> {
    serde_json::to_string(&hits_to_feature_collection(hits)?)
}
