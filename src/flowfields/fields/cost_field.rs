//! The CostField holds, for a single target cell, the accumulated cost of
//! travelling from every reachable cell to the target. It is built by a
//! wavefront spreading outward from the target over orthogonal neighbours.
//!
//! A neighbour is only admitted to the wavefront when it has not been
//! visited yet and its own traversal cost is at least that of the cell the
//! wave is coming from. The rule keeps the expansion cheap but it is not a
//! shortest path search, terrain that gets cheaper on the far side of
//! something expensive is never reached. Cells the wave never reaches stay
//! [None] and become "no data" in the [VectorField].
//!
//! A flat map of cost `1` with the target in the centre:
//!
//! ```text
//!  _____________________________
//! |     |     |     |     |     |
//! |  4  |  3  |  2  |  3  |  4  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  3  |  2  |  1  |  2  |  3  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  2  |  1  |  0  |  1  |  2  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  3  |  2  |  1  |  2  |  3  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  4  |  3  |  2  |  3  |  4  |
//! |_____|_____|_____|_____|_____|
//! ```
//!

use std::collections::VecDeque;

use crate::prelude::*;

/// Accumulated cost to the target for every cell, [None] where unvisited
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct CostField {
	/// Size of the field
	dimensions: GridDimensions,
	/// The cell all costs are accumulated towards
	target: FieldCell,
	/// Costs indexed `[column][row]`
	costs: Vec<Vec<Option<f64>>>,
}

impl Field<Option<f64>> for CostField {
	/// Get a reference to the field array
	fn get_field(&self) -> &Vec<Vec<Option<f64>>> {
		&self.costs
	}
	/// Dimensions of the field
	fn get_dimensions(&self) -> GridDimensions {
		self.dimensions
	}
	/// Retrieve a field cell value
	fn get_field_cell_value(&self, field_cell: FieldCell) -> Option<f64> {
		check_field_bounds("CostField", "get", &self.dimensions, field_cell);
		self.costs[field_cell.get_column()][field_cell.get_row()]
	}
	/// Set a field cell to a value
	fn set_field_cell_value(&mut self, value: Option<f64>, field_cell: FieldCell) {
		check_field_bounds("CostField", "set", &self.dimensions, field_cell);
		self.costs[field_cell.get_column()][field_cell.get_row()] = value;
	}
}

impl CostField {
	/// Spread a wavefront from `target` across the `terrain`, costing each
	/// tile with `model`. The target always gets a cost of `0`, even when it
	/// sits on a tile the model can't cross, in which case nothing else is
	/// reached
	pub fn calculate(
		terrain: &TerrainMap,
		model: &TileCostModel,
		target: FieldCell,
	) -> Result<Self, NavigationError> {
		let dimensions = terrain.get_dimensions();
		if !dimensions.contains_index(target.get_column() as i64, target.get_row() as i64) {
			return Err(NavigationError::OutOfRange {
				column: target.get_column() as i64,
				row: target.get_row() as i64,
				width: dimensions.get_width(),
				height: dimensions.get_height(),
			});
		}
		let mut field = CostField {
			dimensions,
			target,
			costs: new_field_array(&dimensions, None),
		};
		field.set_field_cell_value(Some(0.0), target);
		let mut frontier = VecDeque::from([target]);
		while let Some(cell) = frontier.pop_front() {
			let Some(current_cost) = field.get_field_cell_value(cell) else {
				continue;
			};
			// nothing spreads out of an impassable cell
			let Some(current_nav) = model.cost(terrain.get_field_cell_tile(cell)) else {
				continue;
			};
			for n in dimensions.get_orthogonal_cell_neighbours(cell) {
				if field.get_field_cell_value(n).is_some() {
					continue;
				}
				if let Some(next_nav) = model.cost(terrain.get_field_cell_tile(n)) {
					if next_nav >= current_nav {
						field.set_field_cell_value(Some(current_cost + next_nav), n);
						frontier.push_back(n);
					}
				}
			}
		}
		Ok(field)
	}
	/// The cell the field was built towards
	pub fn get_target(&self) -> FieldCell {
		self.target
	}
	/// Whether the wavefront reached a cell
	pub fn is_visited(&self, field_cell: FieldCell) -> bool {
		self.get_field_cell_value(field_cell).is_some()
	}
	/// Cost at signed indices, [None] when outside of the field or unvisited
	pub fn get_signed(&self, column: i64, row: i64) -> Option<f64> {
		if self.dimensions.contains_index(column, row) {
			self.costs[column as usize][row as usize]
		} else {
			None
		}
	}
}
