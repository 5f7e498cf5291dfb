//! A [DirectionKernel] is the set of candidate steering directions a cell
//! can choose from. For a radius `R` every integer offset `(dx, dy)` of the
//! `(2R+1)x(2R+1)` neighbourhood around a cell (except the cell itself) is a
//! direction. Each direction carries a list of weighted sample offsets that
//! approximate the integral of cost along the line from the cell to the
//! offset.
//!
//! The line is cut wherever it crosses the half-integer boundary between
//! cells, each piece becomes a sample at the cell containing its midpoint,
//! weighted by its length. For the offset `(3, 1)`:
//!
//! ```text
//!        0.5       1.5       2.5
//!  ___________________________________
//! |         |         |         |  ___|--- (3, 1)
//! |         |         |       __|-'   |
//! |_________|_________|____.-'__|_____|  0.5
//! |         |      __.-'    |         |
//! |       __|__.-''    |    |         |
//! | (0,0)-''|         |         |     |
//! |_________|_________|_________|_____|
//! ```
//!
//! Where the line passes exactly through a cell corner the two crossings
//! meet and leave a piece of zero length. Its sample is kept with weight
//! `0`, it adds nothing to a cost but still ties the direction to the cell
//! behind the corner.
//!
//! The samples of a direction always weigh exactly the length of its
//! offset. A kernel depends on nothing but `R` so it is built once and
//! shared between every recomputation through [DirectionKernels].
//!

use std::collections::HashMap;
use std::sync::Arc;

use crate::prelude::*;
use bevy::prelude::*;

/// A single weighted sample along a kernel direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelSample {
	/// Offset from the evaluated cell
	offset: (i32, i32),
	/// Length of the line segment the sample stands for
	weight: f64,
}

impl KernelSample {
	/// Offset `(dx, dy)` from the evaluated cell
	pub fn get_offset(&self) -> (i32, i32) {
		self.offset
	}
	/// Weight of the sample
	pub fn get_weight(&self) -> f64 {
		self.weight
	}
}

/// A candidate steering direction
#[derive(Clone, Debug, PartialEq)]
pub struct KernelDirection {
	/// Integer offset the direction points at
	offset: (i32, i32),
	/// Normalised `offset`
	unit: DVec2,
	/// Ordered samples from the cell outward
	samples: Vec<KernelSample>,
}

impl KernelDirection {
	/// Build the direction towards `(dx, dy)`, which must not be the origin
	fn new(dx: i32, dy: i32) -> Self {
		let end = DVec2::new(dx as f64, dy as f64);
		let mut points = vec![DVec2::ZERO, end];
		// crossings of horizontal cell boundaries
		let sy = dy.signum() as f64;
		for k in 0..dy.unsigned_abs() {
			let y = sy * (k as f64 + 0.5);
			points.push(DVec2::new(y * dx as f64 / dy as f64, y));
		}
		// crossings of vertical cell boundaries, a true diagonal crosses both
		// at the same points so only one set is needed
		if dx.abs() != dy.abs() {
			let sx = dx.signum() as f64;
			for k in 0..dx.unsigned_abs() {
				let x = sx * (k as f64 + 0.5);
				points.push(DVec2::new(x, x * dy as f64 / dx as f64));
			}
		}
		if dy.abs() > dx.abs() {
			points.sort_by(|a, b| a.y.total_cmp(&b.y));
		} else {
			points.sort_by(|a, b| a.x.total_cmp(&b.x));
		}
		let mut samples = Vec::with_capacity(points.len());
		for pair in points.windows(2) {
			let segment = pair[1] - pair[0];
			let weight = segment.length();
			let mid = pair[0] + segment / 2.0;
			samples.push(KernelSample {
				offset: ((mid.x + 0.5).floor() as i32, (mid.y + 0.5).floor() as i32),
				weight,
			});
		}
		KernelDirection {
			offset: (dx, dy),
			unit: end.normalize(),
			samples,
		}
	}
	/// Integer offset `(dx, dy)` of the direction
	pub fn get_offset(&self) -> (i32, i32) {
		self.offset
	}
	/// Unit vector of the direction
	pub fn get_unit_vector(&self) -> DVec2 {
		self.unit
	}
	/// Weighted samples along the direction
	pub fn get_samples(&self) -> &[KernelSample] {
		&self.samples
	}
}

/// Every candidate direction for a radius, in the order they're evaluated:
/// increasing `dx`, then increasing `dy`
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionKernel {
	/// Radius `R` of the neighbourhood
	radius: u32,
	/// Directions, `(2R+1)^2 - 1` of them
	directions: Vec<KernelDirection>,
}

impl DirectionKernel {
	/// Build the kernel for `radius`, which must lie in `1..=MAX_KERNEL_RADIUS`
	pub fn new(radius: u32) -> Result<Self, NavigationError> {
		if radius == 0 || radius > MAX_KERNEL_RADIUS {
			return Err(NavigationError::InvalidKernelRadius {
				radius,
				max: MAX_KERNEL_RADIUS,
			});
		}
		trace!("Building direction kernel of radius {}", radius);
		let r = radius as i32;
		let side = (2 * radius as usize + 1).pow(2);
		let mut directions = Vec::with_capacity(side.saturating_sub(1));
		for dx in -r..=r {
			for dy in -r..=r {
				if dx == 0 && dy == 0 {
					continue;
				}
				directions.push(KernelDirection::new(dx, dy));
			}
		}
		Ok(DirectionKernel { radius, directions })
	}
	/// Radius of the kernel
	pub fn get_radius(&self) -> u32 {
		self.radius
	}
	/// All directions in evaluation order
	pub fn get_directions(&self) -> &[KernelDirection] {
		&self.directions
	}
}

/// Cache of kernels keyed by radius, shared by every World
#[derive(Resource, Default, Debug)]
pub struct DirectionKernels(HashMap<u32, Arc<DirectionKernel>>);

impl DirectionKernels {
	/// Get the kernel of `radius`, building it the first time it's asked for
	pub fn get_or_build(&mut self, radius: u32) -> Result<Arc<DirectionKernel>, NavigationError> {
		if let Some(kernel) = self.0.get(&radius) {
			return Ok(kernel.clone());
		}
		let kernel = Arc::new(DirectionKernel::new(radius)?);
		self.0.insert(radius, kernel.clone());
		debug!("Cached direction kernel of radius {}, {} cached", radius, self.0.len());
		Ok(kernel)
	}
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn direction_count() {
		let kernel = DirectionKernel::new(5).unwrap();
		assert_eq!(120, kernel.get_directions().len());
		assert_eq!((-5, -5), kernel.get_directions()[0].get_offset());
		assert_eq!((-5, -4), kernel.get_directions()[1].get_offset());
		assert_eq!((5, 5), kernel.get_directions()[119].get_offset());
	}
	#[test]
	fn no_origin_direction() {
		let kernel = DirectionKernel::new(3).unwrap();
		assert!(kernel.get_directions().iter().all(|d| d.get_offset() != (0, 0)));
	}
	#[test]
	fn weights_sum_to_offset_length() {
		let kernel = DirectionKernel::new(5).unwrap();
		for direction in kernel.get_directions() {
			let (dx, dy) = direction.get_offset();
			let length = ((dx * dx + dy * dy) as f64).sqrt();
			let sum: f64 = direction.get_samples().iter().map(|s| s.get_weight()).sum();
			assert!((length - sum).abs() < 1e-9, "{:?} weighs {} not {}", direction.get_offset(), sum, length);
		}
	}
	#[test]
	fn unit_vectors_are_normalised() {
		let kernel = DirectionKernel::new(5).unwrap();
		for direction in kernel.get_directions() {
			assert!((direction.get_unit_vector().length() - 1.0).abs() < 1e-12);
		}
	}
	#[test]
	fn axis_aligned_samples() {
		let direction = KernelDirection::new(2, 0);
		let result: Vec<((i32, i32), f64)> = direction.get_samples().iter().map(|s| (s.get_offset(), s.get_weight())).collect();
		let actual = vec![
			((0, 0), 0.5),
			((1, 0), 1.0),
			((2, 0), 0.5),
		];
		assert_eq!(actual, result);
	}
	#[test]
	fn negative_axis_samples() {
		let direction = KernelDirection::new(0, -2);
		let result: Vec<((i32, i32), f64)> = direction.get_samples().iter().map(|s| (s.get_offset(), s.get_weight())).collect();
		let actual = vec![
			((0, -2), 0.5),
			((0, -1), 1.0),
			((0, 0), 0.5),
		];
		assert_eq!(actual, result);
	}
	#[test]
	fn diagonal_samples() {
		let direction = KernelDirection::new(1, 1);
		let offsets: Vec<(i32, i32)> = direction.get_samples().iter().map(|s| s.get_offset()).collect();
		assert_eq!(vec![(0, 0), (1, 1)], offsets);
		for s in direction.get_samples() {
			assert!((s.get_weight() - 0.5_f64.sqrt()).abs() < 1e-12);
		}
	}
	#[test]
	fn shallow_samples() {
		let direction = KernelDirection::new(3, 1);
		let offsets: Vec<(i32, i32)> = direction.get_samples().iter().map(|s| s.get_offset()).collect();
		assert_eq!(vec![(0, 0), (1, 0), (2, 1), (2, 1), (3, 1)], offsets);
	}
	#[test]
	fn corner_crossing_keeps_zero_weight_sample() {
		let direction = KernelDirection::new(3, 1);
		let result: Vec<((i32, i32), f64)> = direction.get_samples().iter().map(|s| (s.get_offset(), s.get_weight())).collect();
		assert!(result.contains(&((2, 1), 0.0)), "{:?}", result);
	}
	#[test]
	fn corner_crossing_samples_the_cell_behind_the_corner() {
		let direction = KernelDirection::new(3, -1);
		let zero: Vec<(i32, i32)> = direction.get_samples().iter().filter(|s| s.get_weight() == 0.0).map(|s| s.get_offset()).collect();
		assert_eq!(vec![(2, 0)], zero);
		let offsets: Vec<(i32, i32)> = direction.get_samples().iter().map(|s| s.get_offset()).collect();
		assert_eq!(vec![(0, 0), (1, 0), (2, 0), (2, -1), (3, -1)], offsets);
	}
	#[test]
	fn kernels_are_cached() {
		let mut kernels = DirectionKernels::default();
		let a = kernels.get_or_build(5).unwrap();
		let b = kernels.get_or_build(5).unwrap();
		assert!(Arc::ptr_eq(&a, &b));
		kernels.get_or_build(2).unwrap();
		assert!(kernels.0.contains_key(&2));
		assert!(!kernels.0.contains_key(&3));
	}
	#[test]
	fn radius_zero_rejected() {
		assert_eq!(
			Err(NavigationError::InvalidKernelRadius { radius: 0, max: MAX_KERNEL_RADIUS }),
			DirectionKernel::new(0)
		);
	}
	#[test]
	fn oversized_radius_rejected() {
		assert!(DirectionKernel::new(MAX_KERNEL_RADIUS).is_ok());
		assert!(DirectionKernel::new(MAX_KERNEL_RADIUS + 1).is_err());
		assert!(DirectionKernel::new(u32::MAX).is_err());
		let mut kernels = DirectionKernels::default();
		assert!(kernels.get_or_build(0).is_err());
		assert!(!kernels.0.contains_key(&0));
	}
}
