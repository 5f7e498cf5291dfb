//! Measure a NavigationGrid calculation over an open map and over a map
//! broken up by rivers
//!
//! Maps are 100 tiles by 100 tiles
//!

use bevy_flowfield_steering_plugin::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Side of the benchmark maps
const MAP_SIDE: usize = 100;

/// Grass everywhere
fn open_map() -> TerrainMap {
	TerrainMap::new_filled(MAP_SIDE, MAP_SIDE, Tile::Grass).unwrap()
}

/// Grass with a river every 20 columns, each with a ford in a different row
fn river_map() -> TerrainMap {
	let mut codes = vec![vec![Tile::Grass.code(); MAP_SIDE]; MAP_SIDE];
	for x in (10..MAP_SIDE).step_by(20) {
		let ford = (x * 7) % MAP_SIDE;
		for (y, code) in codes[x].iter_mut().enumerate() {
			if y != ford {
				*code = Tile::Water.code();
			}
		}
	}
	TerrainMap::from_codes(&codes).unwrap()
}

/// Calculate a grid to the bottom left corner
fn calc_grid(terrain: &TerrainMap, model: &TileCostModel, kernel: &DirectionKernel) {
	let target = DVec2::new(-49.5, -49.5);
	let _grid = calculate_navigation_grid(terrain, model, kernel, target, false, 0).unwrap();
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let kernel = DirectionKernel::new(DEFAULT_KERNEL_RADIUS).unwrap();
	let model = TileCostModel::placeholder();
	let open = open_map();
	let rivers = river_map();
	let mut group = c.benchmark_group("algorithm_use");
	group.significance_level(0.05).sample_size(10);
	group.bench_function("calc_navigation_grid_open", |b| {
		b.iter(|| calc_grid(black_box(&open), black_box(&model), black_box(&kernel)))
	});
	group.bench_function("calc_navigation_grid_rivers", |b| {
		b.iter(|| calc_grid(black_box(&rivers), black_box(&model), black_box(&kernel)))
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
