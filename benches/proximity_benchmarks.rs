use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use proxigrid::{IndexConfig, Point, PointOfInterest, ProximityIndex};

const CATEGORIES: [&str; 4] = ["hospital", "education", "restaurant", "safety"];

/// Points on a regular lattice around midtown Manhattan.
fn lattice(count: usize) -> Vec<PointOfInterest<usize>> {
    let side = (count as f64).sqrt().ceil() as usize;
    (0..count)
        .map(|i| {
            let lat = 40.70 + (i / side) as f64 * 0.001;
            let lon = -74.02 + (i % side) as f64 * 0.001;
            PointOfInterest::new(format!("poi:{}", i), lat, lon, CATEGORIES[i % 4], i)
        })
        .collect()
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for size in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let points = lattice(size);
            b.iter(|| {
                ProximityIndex::build(black_box(points.clone()), IndexConfig::default()).unwrap()
            })
        });
    }

    group.finish();
}

fn benchmark_radius_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("radius_query");

    let index = ProximityIndex::build(lattice(10_000), IndexConfig::default()).unwrap();
    let center = Point::new(-73.9850, 40.7580);

    for radius in [0.5f64, 2.0, 10.0] {
        group.bench_with_input(BenchmarkId::new("all", radius), &radius, |b, &radius| {
            b.iter(|| index.query(black_box(&center), black_box(radius), None).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("hospital", radius), &radius, |b, &radius| {
            b.iter(|| {
                index
                    .query(black_box(&center), black_box(radius), Some("hospital"))
                    .unwrap()
            })
        });
    }

    group.bench_function("nearest_10_within_5km", |b| {
        b.iter(|| {
            index
                .query_nearest(black_box(&center), black_box(5.0), None, 10)
                .unwrap()
        })
    });

    group.finish();
}

fn benchmark_cell_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("cell_size");

    let points = lattice(10_000);
    let center = Point::new(-73.9850, 40.7580);

    for cell in [0.001f64, 0.01, 0.1] {
        let index = ProximityIndex::with_cell_size(points.clone(), cell).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(cell), &cell, |b, _| {
            b.iter(|| index.query(black_box(&center), black_box(2.0), None).unwrap())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_build,
    benchmark_radius_queries,
    benchmark_cell_size
);

criterion_main!(benches);
