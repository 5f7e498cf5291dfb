//! Useful structures and tools used by the fields
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Default radius `R` of the [DirectionKernel], candidate directions are drawn from a `(2R+1)x(2R+1)` neighbourhood
pub const DEFAULT_KERNEL_RADIUS: u32 = 5;
/// Largest radius a [DirectionKernel] can be built with
pub const MAX_KERNEL_RADIUS: u32 = 64;
/// Number of simulation ticks per second
pub const TICKS_PER_SEC: u32 = 20;
/// Length of a simulation tick in seconds
pub const TIMESTEP: f64 = 1.0 / TICKS_PER_SEC as f64;
/// Steering vector assigned to the target cell itself, it has no meaningful direction of its own
pub const TARGET_CELL_VECTOR: DVec2 = DVec2::new(1.0, 0.0);

/// The number of columns `x` and rows `y` of a grid. Every field covering a
/// map shares the dimensions of the terrain
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Reflect)]
pub struct GridDimensions {
	/// Number of columns
	width: usize,
	/// Number of rows
	height: usize,
}

impl GridDimensions {
	/// Create a new instance of [GridDimensions], both sides must be non-zero
	pub fn new(width: usize, height: usize) -> Result<Self, NavigationError> {
		if width == 0 || height == 0 {
			return Err(NavigationError::InvalidDimensions(format!(
				"map must not be empty, got {}x{}",
				width, height
			)));
		}
		Ok(GridDimensions { width, height })
	}
	/// Number of columns
	pub fn get_width(&self) -> usize {
		self.width
	}
	/// Number of rows
	pub fn get_height(&self) -> usize {
		self.height
	}
	/// Check if signed indices are inside the grid
	pub fn contains_index(&self, column: i64, row: i64) -> bool {
		column >= 0 && row >= 0 && (column as usize) < self.width && (row as usize) < self.height
	}
	/// Check if a world point is inside the grid. The world is centred on the
	/// origin so valid points lie strictly between `-width/2` and `width/2`
	/// (likewise for `y`)
	pub fn contains_point(&self, position: DVec2) -> bool {
		let half_w = self.width as f64 / 2.0;
		let half_h = self.height as f64 / 2.0;
		position.x > -half_w && position.y > -half_h && position.x < half_w && position.y < half_h
	}
	/// Convert a world position into the [FieldCell] containing it, [None] if
	/// the point is outside of the grid
	pub fn get_field_cell_from_xy(&self, position: DVec2) -> Option<FieldCell> {
		let column = (position.x + self.width as f64 / 2.0).floor();
		let row = (position.y + self.height as f64 / 2.0).floor();
		if !column.is_finite() || !row.is_finite() {
			return None;
		}
		let (column, row) = (column as i64, row as i64);
		if self.contains_index(column, row) {
			Some(FieldCell::new(column as usize, row as usize))
		} else {
			None
		}
	}
	/// Shift a [FieldCell] by a signed offset, [None] if the result leaves the grid
	pub fn offset_cell(&self, field_cell: FieldCell, offset: (i32, i32)) -> Option<FieldCell> {
		let column = field_cell.get_column() as i64 + offset.0 as i64;
		let row = field_cell.get_row() as i64 + offset.1 as i64;
		if self.contains_index(column, row) {
			Some(FieldCell::new(column as usize, row as usize))
		} else {
			None
		}
	}
	/// Based on a cells `(column, row)` position find its orthogonal
	/// neighbours (up to 4). They are always listed in the order west, north,
	/// south, east which fixes the expansion order of a [CostField] wavefront
	pub fn get_orthogonal_cell_neighbours(&self, field_cell: FieldCell) -> Vec<FieldCell> {
		let mut neighbours = Vec::with_capacity(4);
		for offset in [(-1, 0), (0, -1), (0, 1), (1, 0)] {
			if let Some(n) = self.offset_cell(field_cell, offset) {
				neighbours.push(n);
			}
		}
		neighbours
	}
}
