//! Range query benchmarks over a populated grid.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use cell_grid::{KeyFilter, SpatialGrid};

/// Grid with `count` random points split across four layers.
fn populated(count: usize) -> SpatialGrid {
  let mut rng = StdRng::seed_from_u64(7);
  let mut grid = SpatialGrid::with_cell_size(1.0).unwrap();
  for i in 0..count {
    let p = DVec3::new(
      rng.random_range(-64.0..64.0),
      rng.random_range(-64.0..64.0),
      rng.random_range(-64.0..64.0),
    );
    grid.mark_point(p, format!("layer{}", i % 4)).unwrap();
  }
  grid
}

fn bench_query_sphere(c: &mut Criterion) {
  let mut group = c.benchmark_group("query_sphere");
  let mut grid = populated(20_000);
  let filter = KeyFilter::all();

  for radius in [2.0, 8.0, 32.0] {
    for exact in [false, true] {
      group.bench_with_input(
        BenchmarkId::new(if exact { "exact" } else { "aabb" }, format!("r={}", radius)),
        &radius,
        |b, &radius| b.iter(|| grid.query_sphere(black_box(DVec3::ZERO), radius, exact, &filter)),
      );
    }
  }

  group.finish();
}

fn bench_query_aabb_filtered(c: &mut Criterion) {
  let mut grid = populated(20_000);
  let filter = KeyFilter::all().with_include(["layer0", "layer2"]);

  c.bench_function("query_aabb_filtered", |b| {
    b.iter(|| grid.query_aabb(black_box(DVec3::splat(-8.0)), black_box(DVec3::splat(8.0)), &filter))
  });
}

criterion_group!(benches, bench_query_sphere, bench_query_aabb_filtered);
criterion_main!(benches);
