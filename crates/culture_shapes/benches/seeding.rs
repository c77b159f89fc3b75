mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use culture_shapes::prelude::*;
use geo::Polygon;
use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

const COUNTS: [usize; 3] = [100, 1_000, 10_000];
const EXCLUSION_RADII: [f64; 3] = [0.0, 10.0, 50.0];

fn star(points: usize, outer: f64, inner: f64) -> Polygon<f64> {
    let ring: Vec<(f64, f64)> = (0..points * 2)
        .map(|i| {
            let angle = std::f64::consts::PI * i as f64 / points as f64;
            let r = if i % 2 == 0 { outer } else { inner };
            (r * angle.cos(), r * angle.sin())
        })
        .collect();
    Polygon::new(ring.into(), vec![])
}

fn seeding_fast_path_benches(c: &mut Criterion) {
    let rectangle =
        Region::rectangle(1000.0, 2000.0, DVec2::ZERO, RegionOptions::default()).unwrap();
    let disk = Region::disk(1000.0, DVec2::ZERO, RegionOptions::default()).unwrap();

    for (name, region) in [("rectangle", &rectangle), ("disk", &disk)] {
        let mut group = c.benchmark_group(format!("seeding/fast_path/{name}"));
        for &count in &COUNTS {
            group.throughput(common::elements_throughput(count));
            let request = SeedRequest::new(count).with_exclusion_radius(10.0);
            let mut rng = StdRng::seed_from_u64(0xC0FFEE_u64 ^ count as u64);

            group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
                b.iter(|| {
                    let pts = seed_positions(region, &request, None, &mut rng).unwrap();
                    black_box(pts.len());
                });
            });
        }
        group.finish();
    }
}

fn seeding_rejection_benches(c: &mut Criterion) {
    let region =
        Region::from_polygon(star(7, 1000.0, 350.0), None, RegionOptions::default()).unwrap();

    for &radius in &EXCLUSION_RADII {
        let mut group = c.benchmark_group(format!("seeding/rejection/star_r_{radius:.0}"));
        for &count in &COUNTS {
            group.throughput(common::elements_throughput(count));
            let request = SeedRequest::new(count).with_exclusion_radius(radius);
            let mut rng = StdRng::seed_from_u64(0xBEEF_u64 ^ count as u64);

            group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
                b.iter(|| {
                    let pts = seed_positions(&region, &request, None, &mut rng).unwrap();
                    black_box(pts.len());
                });
            });
        }
        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = seeding_fast_path_benches, seeding_rejection_benches
}
criterion_main!(benches);
