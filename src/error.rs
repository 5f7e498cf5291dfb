//! Errors raised while loading terrain, building navigation data or handling
//! inbound commands
//!
//! None of these are fatal to a running simulation. A failed request is
//! rejected and reported back to whoever sent it, the state of the World it
//! was aimed at is left untouched
//!

use thiserror::Error;

/// Everything that can go wrong inside the navigation engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavigationError {
	/// A target point lies outside of the world bounds so no
	/// [crate::prelude::NavigationGrid] can be computed for it
	#[error("Can't calculate a navigation grid to point ({x}, {y}) outside of the map")]
	OutOfBoundsTarget {
		/// World `x` coordinate of the rejected target
		x: f64,
		/// World `y` coordinate of the rejected target
		y: f64,
	},
	/// Agents cannot be placed around a point outside of the world bounds
	#[error("Can't place agents around point ({x}, {y}) outside of the map")]
	OutOfBoundsPlacement {
		/// World `x` coordinate of the rejected placement
		x: f64,
		/// World `y` coordinate of the rejected placement
		y: f64,
	},
	/// A terrain lookup was made outside of the grid
	#[error("Tile ({column}, {row}) is out of range of a {width}x{height} map")]
	OutOfRange {
		/// Requested column
		column: i64,
		/// Requested row
		row: i64,
		/// Number of columns in the map
		width: usize,
		/// Number of rows in the map
		height: usize,
	},
	/// A raw tile code does not correspond to any [crate::prelude::Tile]
	#[error("Unknown tile code {0}")]
	UnknownTileCode(u8),
	/// Traversal costs must be positive and finite
	#[error("Invalid traversal cost {cost} for tile {tile}")]
	InvalidTileCost {
		/// Name of the tile the cost was meant for
		tile: &'static str,
		/// The rejected cost
		cost: f64,
	},
	/// A [crate::prelude::DirectionKernel] needs at least one direction and
	/// a bounded neighbourhood
	#[error("Kernel radius {radius} must be between 1 and {max}")]
	InvalidKernelRadius {
		/// The rejected radius
		radius: u32,
		/// Largest radius allowed
		max: u32,
	},
	/// Terrain must be a non-empty rectangle
	#[error("Invalid map dimensions: {0}")]
	InvalidDimensions(String),
	/// An inbound message could not be decoded into a command
	#[error("Malformed command: {0}")]
	MalformedCommand(String),
	/// A command referenced an entity which isn't a navigation World
	#[error("Entity {0} is not a navigation world")]
	UnknownWorld(String),
	/// Terrain data could not be read from disk
	#[error("Failed loading terrain: {0}")]
	TerrainLoad(String),
	/// Settings could not be read from disk
	#[error("Failed loading settings: {0}")]
	SettingsLoad(String),
}
