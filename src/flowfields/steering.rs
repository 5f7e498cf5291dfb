//! Per-tick movement of a single agent over a [NavigationGrid]
//!
//! An agent looks up the steering vector of the cell it stands in and moves
//! along it at its base speed divided by the traversal cost of its tile.
//! Agents that don't cluster slow down as they close in on the target:
//!
//! ```text
//! d² < arrival_radius²  =>  speed = min(base, max(d² - stop², 0))
//! ```
//!
//! so with the defaults an agent starts braking 4 units out and halts
//! about 3.46 units from the target. An agent standing where the grid has no
//! data, off the map, or on a tile its own cost model can't cross keeps the
//! velocity it already had.
//!

use crate::prelude::*;

/// The parts of [NavigationSettings] steering depends on
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteeringParameters {
	/// Squared distance at which easing down begins
	pub arrival_radius_squared: f64,
	/// Squared distance at which the agent stops
	pub arrival_stop_squared: f64,
	/// Seconds per tick
	pub timestep: f64,
}

impl From<&NavigationSettings> for SteeringParameters {
	fn from(settings: &NavigationSettings) -> Self {
		SteeringParameters {
			arrival_radius_squared: settings.arrival_radius_squared,
			arrival_stop_squared: settings.arrival_stop_squared,
			timestep: settings.timestep,
		}
	}
}

/// Speed an agent should travel at before terrain cost is applied
pub fn eased_speed(base_speed: f64, distance_squared: f64, cluster: bool, params: &SteeringParameters) -> f64 {
	if !cluster && distance_squared < params.arrival_radius_squared {
		base_speed.min((distance_squared - params.arrival_stop_squared).max(0.0))
	} else {
		base_speed
	}
}

/// Velocity an agent at `position` wants this tick, [None] when it should
/// keep its current velocity
pub fn desired_velocity(
	position: DVec2,
	base_speed: f64,
	cost_model: &TileCostModel,
	terrain: &TerrainMap,
	grid: &NavigationGrid,
	params: &SteeringParameters,
) -> Option<DVec2> {
	let vector = grid.get_vector_field().get_vector_at_xy(position)?;
	let tile_cost = terrain.get_cost_at_xy(position, cost_model)?;
	let distance_squared = position.distance_squared(grid.get_target());
	let speed = eased_speed(base_speed, distance_squared, grid.is_cluster(), params) / tile_cost;
	Some(vector * speed)
}

/// Advance an agent by one tick, returning its new position and velocity
pub fn steer(
	position: DVec2,
	velocity: DVec2,
	base_speed: f64,
	cost_model: &TileCostModel,
	terrain: &TerrainMap,
	grid: Option<&NavigationGrid>,
	params: &SteeringParameters,
) -> (DVec2, DVec2) {
	let velocity = grid
		.and_then(|g| desired_velocity(position, base_speed, cost_model, terrain, g, params))
		.unwrap_or(velocity);
	(position + velocity * params.timestep, velocity)
}

#[cfg(test)]
mod tests {
	use super::*;
	/// Default steering parameters
	fn params() -> SteeringParameters {
		SteeringParameters::from(&NavigationSettings::default())
	}
	/// Grid on a flat map towards `target`
	fn flat_grid(terrain: &TerrainMap, target: DVec2, cluster: bool) -> NavigationGrid {
		let kernel = DirectionKernel::new(5).unwrap();
		calculate_navigation_grid(terrain, &TileCostModel::placeholder(), &kernel, target, cluster, 0).unwrap()
	}
	#[test]
	fn full_speed_far_from_target() {
		let p = params();
		assert_eq!(5.0, eased_speed(5.0, 100.0, false, &p));
		assert_eq!(5.0, eased_speed(5.0, 16.0, false, &p));
	}
	#[test]
	fn easing_down() {
		let p = params();
		assert_eq!(3.0, eased_speed(5.0, 15.0, false, &p));
		assert_eq!(0.0, eased_speed(5.0, 12.0, false, &p));
		assert_eq!(0.0, eased_speed(5.0, 1.0, false, &p));
		assert_eq!(1.0, eased_speed(1.0, 15.0, false, &p));
	}
	#[test]
	fn clustering_never_eases() {
		let p = params();
		assert_eq!(5.0, eased_speed(5.0, 0.5, true, &p));
	}
	#[test]
	fn moves_along_vector() {
		let terrain = TerrainMap::new_filled(20, 1, Tile::Grass).unwrap();
		let grid = flat_grid(&terrain, DVec2::new(9.5, 0.0), false);
		let model = TileCostModel::soldier();
		let (position, velocity) = steer(DVec2::new(-9.5, 0.0), DVec2::ZERO, 5.0, &model, &terrain, Some(&grid), &params());
		assert_eq!(DVec2::new(5.0, 0.0), velocity);
		assert_eq!(DVec2::new(-9.25, 0.0), position);
	}
	#[test]
	fn terrain_cost_slows_agent() {
		let terrain = TerrainMap::new_filled(20, 1, Tile::Water).unwrap();
		let grid = flat_grid(&terrain, DVec2::new(9.5, 0.0), false);
		let model = TileCostModel::soldier();
		let (_, velocity) = steer(DVec2::new(-9.5, 0.0), DVec2::ZERO, 5.0, &model, &terrain, Some(&grid), &params());
		assert_eq!(DVec2::new(1.0, 0.0), velocity);
	}
	#[test]
	fn holds_velocity_without_grid() {
		let terrain = TerrainMap::new_filled(4, 4, Tile::Grass).unwrap();
		let model = TileCostModel::soldier();
		let velocity = DVec2::new(0.0, 2.0);
		let (position, result) = steer(DVec2::ZERO, velocity, 5.0, &model, &terrain, None, &params());
		assert_eq!(velocity, result);
		assert_eq!(DVec2::new(0.0, 0.1), position);
	}
	#[test]
	fn holds_velocity_off_map() {
		let terrain = TerrainMap::new_filled(4, 4, Tile::Grass).unwrap();
		let grid = flat_grid(&terrain, DVec2::ZERO, false);
		let model = TileCostModel::soldier();
		let (_, result) = steer(DVec2::new(3.0, 0.0), DVec2::ZERO, 5.0, &model, &terrain, Some(&grid), &params());
		assert_eq!(DVec2::ZERO, result);
	}
	#[test]
	fn holds_velocity_on_tile_impassable_to_agent() {
		let terrain = TerrainMap::new_filled(10, 1, Tile::Water).unwrap();
		let grid = flat_grid(&terrain, DVec2::new(4.5, 0.0), false);
		let model = TileCostModel::soldier().with_impassable(Tile::Water);
		let velocity = DVec2::new(-1.0, 0.0);
		let (_, result) = steer(DVec2::new(-4.5, 0.0), velocity, 5.0, &model, &terrain, Some(&grid), &params());
		assert_eq!(velocity, result);
	}
}
