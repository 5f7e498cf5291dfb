//! A [NavigationGrid] is the complete result of a target request: the
//! [VectorField] leading to the target along with the target itself, whether
//! agents should cluster on it, and the generation of the request it
//! answers. Grids are immutable once built, a new target produces a new
//! grid which replaces the old one whole.
//!

use std::sync::Arc;

use crate::prelude::*;

/// Steering data towards a single target
#[derive(Clone, Debug, PartialEq)]
pub struct NavigationGrid {
	/// World position of the target
	target: DVec2,
	/// Cell containing the target
	target_cell: FieldCell,
	/// When `true` agents keep full speed at the target instead of easing down to a stop
	cluster: bool,
	/// Generation of the request the grid was built for
	generation: u64,
	/// Steering vectors
	vector_field: VectorField,
}

impl NavigationGrid {
	/// World position of the target
	pub fn get_target(&self) -> DVec2 {
		self.target
	}
	/// Cell containing the target
	pub fn get_target_cell(&self) -> FieldCell {
		self.target_cell
	}
	/// Whether agents cluster on the target
	pub fn is_cluster(&self) -> bool {
		self.cluster
	}
	/// Generation of the request the grid answers
	pub fn get_generation(&self) -> u64 {
		self.generation
	}
	/// The steering vectors
	pub fn get_vector_field(&self) -> &VectorField {
		&self.vector_field
	}
}

/// Inputs of a grid calculation, owned so that it can be moved onto a worker thread
#[derive(Clone, Debug)]
pub struct NavigationGridRequest {
	/// Map to navigate over
	pub terrain: Arc<TerrainMap>,
	/// Costs used to build the [CostField]
	pub cost_model: TileCostModel,
	/// Candidate directions
	pub kernel: Arc<DirectionKernel>,
	/// World position of the target
	pub target: DVec2,
	/// Cluster on the target
	pub cluster: bool,
	/// Generation the result will be tagged with
	pub generation: u64,
}

impl NavigationGridRequest {
	/// Run the calculation
	pub fn calculate(&self) -> Result<NavigationGrid, NavigationError> {
		calculate_navigation_grid(
			&self.terrain,
			&self.cost_model,
			&self.kernel,
			self.target,
			self.cluster,
			self.generation,
		)
	}
}

/// Build the [NavigationGrid] leading to the world point `target`. Fails
/// with [NavigationError::OutOfBoundsTarget] when the point isn't strictly
/// inside the map
pub fn calculate_navigation_grid(
	terrain: &TerrainMap,
	cost_model: &TileCostModel,
	kernel: &DirectionKernel,
	target: DVec2,
	cluster: bool,
	generation: u64,
) -> Result<NavigationGrid, NavigationError> {
	let dimensions = terrain.get_dimensions();
	let out_of_bounds = NavigationError::OutOfBoundsTarget {
		x: target.x,
		y: target.y,
	};
	if !terrain.contains_point(target) {
		return Err(out_of_bounds);
	}
	let target_cell = dimensions.get_field_cell_from_xy(target).ok_or(out_of_bounds)?;
	let cost_field = CostField::calculate(terrain, cost_model, target_cell)?;
	let vector_field = VectorField::calculate(&cost_field, kernel);
	Ok(NavigationGrid {
		target,
		target_cell,
		cluster,
		generation,
		vector_field,
	})
}
