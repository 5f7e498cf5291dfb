//! The VectorField holds the steering vector of every cell. Each cell tries
//! every direction of a [DirectionKernel] against the [CostField] and keeps
//! the one with the lowest weighted average cost:
//!
//! ```text
//! average = Σ cost(cell + sample.offset) * sample.weight / Σ sample.weight
//! ```
//!
//! Samples falling off the map are left out of both sums. A direction whose
//! samples touch an unvisited cell is not a candidate at all, nor is one
//! with no sample left on the map. When two directions have the same
//! average the first in kernel order wins.
//!
//! Cells the [CostField] never reached have no vector. The target cell has
//! no meaningful direction either and is given [TARGET_CELL_VECTOR].
//!

use crate::prelude::*;

/// Unit steering vector for every cell, [None] where there is no data
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct VectorField {
	/// Size of the field
	dimensions: GridDimensions,
	/// Vectors indexed `[column][row]`
	vectors: Vec<Vec<Option<DVec2>>>,
}

impl Field<Option<DVec2>> for VectorField {
	/// Get a reference to the field array
	fn get_field(&self) -> &Vec<Vec<Option<DVec2>>> {
		&self.vectors
	}
	/// Dimensions of the field
	fn get_dimensions(&self) -> GridDimensions {
		self.dimensions
	}
	/// Retrieve a field cell value
	fn get_field_cell_value(&self, field_cell: FieldCell) -> Option<DVec2> {
		check_field_bounds("VectorField", "get", &self.dimensions, field_cell);
		self.vectors[field_cell.get_column()][field_cell.get_row()]
	}
	/// Set a field cell to a value
	fn set_field_cell_value(&mut self, value: Option<DVec2>, field_cell: FieldCell) {
		check_field_bounds("VectorField", "set", &self.dimensions, field_cell);
		self.vectors[field_cell.get_column()][field_cell.get_row()] = value;
	}
}

impl VectorField {
	/// Evaluate every direction of the `kernel` for every cell of the `cost_field`
	pub fn calculate(cost_field: &CostField, kernel: &DirectionKernel) -> Self {
		let dimensions = cost_field.get_dimensions();
		let mut field = VectorField {
			dimensions,
			vectors: new_field_array(&dimensions, None),
		};
		let target = cost_field.get_target();
		for column in 0..dimensions.get_width() {
			for row in 0..dimensions.get_height() {
				let cell = FieldCell::new(column, row);
				if !cost_field.is_visited(cell) {
					continue;
				}
				if cell == target {
					field.set_field_cell_value(Some(TARGET_CELL_VECTOR), cell);
					continue;
				}
				let vector = best_direction(cost_field, kernel, cell);
				field.set_field_cell_value(vector, cell);
			}
		}
		field
	}
	/// Steering vector under a world `position`, [None] when the position is
	/// off the map or the cell has no data
	pub fn get_vector_at_xy(&self, position: DVec2) -> Option<DVec2> {
		let cell = self.dimensions.get_field_cell_from_xy(position)?;
		self.get_field_cell_value(cell)
	}
	/// Number of cells holding a vector
	pub fn count_navigable(&self) -> usize {
		self.vectors.iter().flatten().filter(|v| v.is_some()).count()
	}
}

/// Find the unit vector of the cheapest kernel direction out of `cell`
fn best_direction(cost_field: &CostField, kernel: &DirectionKernel, cell: FieldCell) -> Option<DVec2> {
	let dimensions = cost_field.get_dimensions();
	let column = cell.get_column() as i64;
	let row = cell.get_row() as i64;
	let mut best: Option<(f64, DVec2)> = None;
	'directions: for direction in kernel.get_directions() {
		let mut cost = 0.0;
		let mut applied_weight = 0.0;
		for sample in direction.get_samples() {
			let (dx, dy) = sample.get_offset();
			let (c, r) = (column + dx as i64, row + dy as i64);
			if !dimensions.contains_index(c, r) {
				continue;
			}
			match cost_field.get_signed(c, r) {
				Some(value) => {
					cost += value * sample.get_weight();
					applied_weight += sample.get_weight();
				}
				None => continue 'directions,
			}
		}
		if applied_weight <= 0.0 {
			continue;
		}
		let average = cost / applied_weight;
		if best.is_none_or(|(min, _)| average < min) {
			best = Some((average, direction.get_unit_vector()));
		}
	}
	best.map(|(_, vector)| vector)
}
