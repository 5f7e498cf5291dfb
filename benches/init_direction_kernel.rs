//! Measure building the DirectionKernel used by every grid calculation
//!

use bevy_flowfield_steering_plugin::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Build a kernel
fn init_kernel(radius: u32) {
	let _kernel = DirectionKernel::new(radius).unwrap();
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("data_initialisation");
	group.significance_level(0.05).sample_size(100);
	group.bench_function("init_direction_kernel_r5", |b| {
		b.iter(|| init_kernel(black_box(DEFAULT_KERNEL_RADIUS)))
	});
	group.bench_function("init_direction_kernel_r10", |b| {
		b.iter(|| init_kernel(black_box(10)))
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
