//! The kinds of fields used by the algorithm. Every field is a dense 2D
//! array laid over the whole terrain, indexed column first by a [FieldCell]
//!
//! ```text
//!  column ->
//!  _________________
//! | 0,0 | 1,0 | 2,0 |  row
//! |_____|_____|_____|   |
//! | 0,1 | 1,1 | 2,1 |   v
//! |_____|_____|_____|
//! ```
//!

pub mod cost_field;
pub mod direction_kernel;
pub mod vector_field;

use crate::prelude::*;
use bevy::prelude::*;

/// Defines required access to field arrays
pub trait Field<T> {
	/// Get a reference to the field array
	fn get_field(&self) -> &Vec<Vec<T>>;
	/// Dimensions of the field, always equal to those of the terrain it was built from
	fn get_dimensions(&self) -> GridDimensions;
	/// Retrieve a field cell value
	fn get_field_cell_value(&self, field_cell: FieldCell) -> T;
	/// Set a field cell to a value
	fn set_field_cell_value(&mut self, value: T, field_cell: FieldCell);
}

/// ID of a cell within a field
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct FieldCell((usize, usize));

impl FieldCell {
	/// Create a new instance of [FieldCell]
	pub fn new(column: usize, row: usize) -> Self {
		FieldCell((column, row))
	}
	/// Get the `(column, row)` tuple
	pub fn get_column_row(&self) -> (usize, usize) {
		self.0
	}
	/// Get the column
	pub fn get_column(&self) -> usize {
		self.0 .0
	}
	/// Get the row
	pub fn get_row(&self) -> usize {
		self.0 .1
	}
	/// World position of the centre of the cell in a grid of `dimensions`,
	/// the world origin sits at the geometric centre of the grid
	pub fn get_centre_xy(&self, dimensions: &GridDimensions) -> DVec2 {
		DVec2::new(
			self.get_column() as f64 + 0.5 - dimensions.get_width() as f64 / 2.0,
			self.get_row() as f64 + 0.5 - dimensions.get_height() as f64 / 2.0,
		)
	}
}

/// Allocate a column-major array of `value` covering `dimensions`
pub(crate) fn new_field_array<T: Clone>(dimensions: &GridDimensions, value: T) -> Vec<Vec<T>> {
	vec![vec![value; dimensions.get_height()]; dimensions.get_width()]
}

/// Panic with a consistent message when a field is accessed outside of its bounds
pub(crate) fn check_field_bounds(name: &str, op: &str, dimensions: &GridDimensions, field_cell: FieldCell) {
	if field_cell.get_column() >= dimensions.get_width() || field_cell.get_row() >= dimensions.get_height() {
		panic!(
			"Cannot {} a {} value, index out of bounds. Asked for column {}, row {}, field column length is {}, field row length is {}",
			op,
			name,
			field_cell.get_column(),
			field_cell.get_row(),
			dimensions.get_width(),
			dimensions.get_height()
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn cell_centre() {
		let dims = GridDimensions::new(4, 2).unwrap();
		assert_eq!(DVec2::new(-1.5, -0.5), FieldCell::new(0, 0).get_centre_xy(&dims));
		assert_eq!(DVec2::new(1.5, 0.5), FieldCell::new(3, 1).get_centre_xy(&dims));
	}
	#[test]
	fn centre_maps_back_to_cell() {
		let dims = GridDimensions::new(7, 5).unwrap();
		for column in 0..7 {
			for row in 0..5 {
				let cell = FieldCell::new(column, row);
				let xy = cell.get_centre_xy(&dims);
				assert_eq!(Some(cell), dims.get_field_cell_from_xy(xy));
			}
		}
	}
}
