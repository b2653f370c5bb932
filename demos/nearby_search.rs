use proxigrid::{IndexBuilder, InvalidPointPolicy, Point, PointOfInterest};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
struct Place {
    name: &'static str,
    description: &'static str,
}

fn demo_places() -> Vec<PointOfInterest<Place>> {
    [
        ("demo_1", 40.7589, -73.9851, "hospital", "Central Hospital", "24/7 emergency services available"),
        ("demo_2", 40.7614, -73.9776, "education", "City Library", "Public library with free WiFi"),
        ("demo_3", 40.7505, -73.9934, "restaurant", "Coffee Shop", "Local coffee and pastries"),
        ("demo_4", 40.7580, -73.9855, "safety", "Police Station", "Local police station"),
        ("demo_5", 40.7595, -73.9845, "safety", "Fire Department", "Emergency fire services"),
    ]
    .into_iter()
    .map(|(id, lat, lon, category, name, description)| {
        PointOfInterest::new(id, lat, lon, category, Place { name, description })
    })
    .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug to see index and query details)
    env_logger::init();

    println!("=== proxigrid - Nearby Search ===\n");

    let index = IndexBuilder::new()
        .max_radius_km(50.0)
        .invalid_points(InvalidPointPolicy::Skip)
        .points(demo_places())
        .build()?;

    let stats = index.stats();
    println!(
        "Indexed {} places in {} cells (categories: {})\n",
        stats.point_count,
        stats.cell_count,
        index.categories().join(", ")
    );

    // Longitude first, as everywhere in geo
    let here = Point::new(-73.9850, 40.7580);

    println!("1. Everything within 5 km");
    println!("-------------------------");
    for hit in index.query(&here, 5.0, None)? {
        println!(
            "   {:<16} {:<10} {:.2} km",
            hit.point.payload.name,
            hit.point.category,
            hit.rounded_distance_km()
        );
    }
    println!();

    println!("2. Safety services within 1 km");
    println!("------------------------------");
    let (hits, query_stats) = index.query_with_stats(&here, 1.0, Some("safety"))?;
    for hit in &hits {
        println!(
            "   {:<16} {:.2} km",
            hit.point.payload.name,
            hit.rounded_distance_km()
        );
    }
    println!(
        "   ({} cells, {} candidates examined)\n",
        query_stats.cells_examined, query_stats.candidates_examined
    );

    println!("3. Rejected queries");
    println!("-------------------");
    if let Err(e) = index.query(&here, 75.0, None) {
        println!("   radius 75 km: {}", e);
    }
    if let Err(e) = index.query(&Point::new(-73.9850, 95.0), 5.0, None) {
        println!("   latitude 95: {}", e);
    }
    println!();

    #[cfg(feature = "geojson")]
    {
        println!("4. Nearest two as GeoJSON");
        println!("-------------------------");
        let nearest = index.query_nearest(&here, 5.0, None, 2)?;
        println!("   {}", proxigrid::geojson::to_geojson_string(&nearest)?);
    }

    Ok(())
}
