//! Terrain is made of a closed set of [Tile] kinds. How hard a [Tile] is to
//! cross depends on who is crossing it, so traversal costs live in a
//! [TileCostModel] which is handed to every calculation rather than being a
//! property of the tile itself.
//!
//! ```text
//!  Tile    | placeholder | soldier
//! ---------|-------------|---------
//!  Water   |     10      |    5
//!  Grass   |      1      |    1
//! ```
//!
//! A tile missing from a model is impassable to it.
//!

use std::collections::BTreeMap;

use crate::prelude::*;
use bevy::prelude::*;

/// The kinds of terrain a map can be built from
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Reflect)]
pub enum Tile {
	/// Open water
	Water,
	/// Grassland
	Grass,
}

impl Tile {
	/// Every kind of [Tile]
	pub const ALL: [Tile; 2] = [Tile::Water, Tile::Grass];
	/// The raw code used by terrain sources
	pub fn code(&self) -> u8 {
		match self {
			Tile::Water => 0,
			Tile::Grass => 1,
		}
	}
	/// Human readable name
	pub fn name(&self) -> &'static str {
		match self {
			Tile::Water => "water",
			Tile::Grass => "grass",
		}
	}
}

impl TryFrom<u8> for Tile {
	type Error = NavigationError;

	fn try_from(code: u8) -> Result<Self, Self::Error> {
		match code {
			0 => Ok(Tile::Water),
			1 => Ok(Tile::Grass),
			_ => Err(NavigationError::UnknownTileCode(code)),
		}
	}
}

/// Maps each [Tile] to a positive traversal cost. Tiles without an entry
/// are impassable
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TileCostModel(BTreeMap<Tile, f64>);

impl TileCostModel {
	/// A model where every tile is impassable, populate it with [TileCostModel::with_cost]
	pub fn new() -> Self {
		TileCostModel(BTreeMap::new())
	}
	/// World-level model used when a target request doesn't specify one
	pub fn placeholder() -> Self {
		TileCostModel(BTreeMap::from([(Tile::Water, 10.0), (Tile::Grass, 1.0)]))
	}
	/// Costs for infantry, wading through water is slow but possible
	pub fn soldier() -> Self {
		TileCostModel(BTreeMap::from([(Tile::Water, 5.0), (Tile::Grass, 1.0)]))
	}
	/// Every tile costs the same
	pub fn uniform(cost: f64) -> Result<Self, NavigationError> {
		let mut model = TileCostModel::new();
		for tile in Tile::ALL {
			model = model.with_cost(tile, cost)?;
		}
		Ok(model)
	}
	/// Set the cost of crossing a `tile`, it must be positive and finite
	pub fn with_cost(mut self, tile: Tile, cost: f64) -> Result<Self, NavigationError> {
		if !cost.is_finite() || cost <= 0.0 {
			return Err(NavigationError::InvalidTileCost {
				tile: tile.name(),
				cost,
			});
		}
		self.0.insert(tile, cost);
		Ok(self)
	}
	/// Mark a `tile` as impassable
	pub fn with_impassable(mut self, tile: Tile) -> Self {
		self.0.remove(&tile);
		self
	}
	/// Traversal cost of a `tile`, [None] when it is impassable
	pub fn cost(&self, tile: Tile) -> Option<f64> {
		self.0.get(&tile).copied()
	}
	/// Traversal cost of a raw tile code, unknown codes are impassable
	pub fn cost_of_code(&self, code: u8) -> Option<f64> {
		Tile::try_from(code).ok().and_then(|tile| self.cost(tile))
	}
	/// Whether a `tile` can be crossed at all
	pub fn is_passable(&self, tile: Tile) -> bool {
		self.0.contains_key(&tile)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn tile_codes() {
		for tile in Tile::ALL {
			assert_eq!(Ok(tile), Tile::try_from(tile.code()));
		}
		assert_eq!(Err(NavigationError::UnknownTileCode(7)), Tile::try_from(7));
	}
	#[test]
	fn soldier_costs() {
		let model = TileCostModel::soldier();
		assert_eq!(Some(5.0), model.cost(Tile::Water));
		assert_eq!(Some(1.0), model.cost(Tile::Grass));
	}
	#[test]
	fn impassable_tile() {
		let model = TileCostModel::soldier().with_impassable(Tile::Water);
		assert_eq!(None, model.cost(Tile::Water));
		assert!(!model.is_passable(Tile::Water));
		assert!(model.is_passable(Tile::Grass));
	}
	#[test]
	fn unknown_code_is_impassable() {
		let model = TileCostModel::placeholder();
		assert_eq!(Some(10.0), model.cost_of_code(0));
		assert_eq!(None, model.cost_of_code(200));
	}
	#[test]
	fn reject_bad_costs() {
		assert!(TileCostModel::new().with_cost(Tile::Grass, 0.0).is_err());
		assert!(TileCostModel::new().with_cost(Tile::Grass, -1.0).is_err());
		assert!(TileCostModel::new().with_cost(Tile::Grass, f64::NAN).is_err());
		assert!(TileCostModel::new().with_cost(Tile::Grass, f64::INFINITY).is_err());
	}
	#[test]
	fn uniform_model() {
		let model = TileCostModel::uniform(3.0).unwrap();
		for tile in Tile::ALL {
			assert_eq!(Some(3.0), model.cost(tile));
		}
	}
}
