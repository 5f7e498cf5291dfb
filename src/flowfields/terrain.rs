//! The static terrain a World is built on. A [TerrainMap] is a rectangle of
//! [Tile]s loaded once and never modified, every field is computed against
//! a borrow of it.
//!
//! Tiles are stored column-major (`[x][y]`) and the map is centred on the
//! world origin, so a `10x6` map spans `-5 < x < 5` and `-3 < y < 3`.
//!

use crate::prelude::*;

/// Read-only grid of [Tile]s describing a World
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainMap {
	/// Number of columns and rows
	dimensions: GridDimensions,
	/// Tiles indexed `[column][row]`
	tiles: Vec<Vec<Tile>>,
}

impl TerrainMap {
	/// A map of `width` by `height` covered in a single kind of `tile`
	pub fn new_filled(width: usize, height: usize, tile: Tile) -> Result<Self, NavigationError> {
		let dimensions = GridDimensions::new(width, height)?;
		Ok(TerrainMap {
			dimensions,
			tiles: vec![vec![tile; height]; width],
		})
	}
	/// Build a map from raw tile codes laid out column-major, `codes[x][y]`.
	/// Every column must have the same length and every code must be known
	pub fn from_codes(codes: &[Vec<u8>]) -> Result<Self, NavigationError> {
		let width = codes.len();
		let height = codes.first().map(|c| c.len()).unwrap_or(0);
		let dimensions = GridDimensions::new(width, height)?;
		let mut tiles = Vec::with_capacity(width);
		for (x, column) in codes.iter().enumerate() {
			if column.len() != height {
				return Err(NavigationError::InvalidDimensions(format!(
					"column {} has {} tiles, expected {}",
					x,
					column.len(),
					height
				)));
			}
			let column = column
				.iter()
				.map(|code| Tile::try_from(*code))
				.collect::<Result<Vec<Tile>, NavigationError>>()?;
			tiles.push(column);
		}
		Ok(TerrainMap { dimensions, tiles })
	}
	/// Build a map from rows of raw tile codes, `rows[y][x]`, which is how
	/// text sources are usually written
	pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, NavigationError> {
		let height = rows.len();
		let width = rows.first().map(|r| r.len()).unwrap_or(0);
		let mut codes = vec![Vec::with_capacity(height); width];
		for (y, row) in rows.iter().enumerate() {
			if row.len() != width {
				return Err(NavigationError::InvalidDimensions(format!(
					"row {} has {} tiles, expected {}",
					y,
					row.len(),
					width
				)));
			}
			for (x, code) in row.iter().enumerate() {
				codes[x].push(*code);
			}
		}
		TerrainMap::from_codes(&codes)
	}
	/// Load a map from a `.ron` file containing column-major tile codes
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str) -> Result<Self, NavigationError> {
		let file = std::fs::File::open(path)
			.map_err(|e| NavigationError::TerrainLoad(format!("{}: {}", path, e)))?;
		let codes: Vec<Vec<u8>> = ron::de::from_reader(file)
			.map_err(|e| NavigationError::TerrainLoad(format!("{}: {}", path, e)))?;
		TerrainMap::from_codes(&codes)
	}
	/// Load a map from a headerless `.csv` file, one line per row `y`
	#[cfg(feature = "csv")]
	pub fn from_csv(path: &str) -> Result<Self, NavigationError> {
		let file = std::fs::File::open(path)
			.map_err(|e| NavigationError::TerrainLoad(format!("{}: {}", path, e)))?;
		TerrainMap::from_csv_reader(file)
	}
	/// Read a headerless csv of tile codes, one line per row `y`
	#[cfg(feature = "csv")]
	pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<Self, NavigationError> {
		let mut rdr = csv::ReaderBuilder::new()
			.has_headers(false)
			.trim(csv::Trim::All)
			.from_reader(reader);
		let mut rows = Vec::new();
		for record in rdr.records() {
			let record = record.map_err(|e| NavigationError::TerrainLoad(e.to_string()))?;
			let row = record
				.iter()
				.map(|field| {
					field.parse::<u8>().map_err(|e| {
						NavigationError::TerrainLoad(format!("bad tile code '{}': {}", field, e))
					})
				})
				.collect::<Result<Vec<u8>, NavigationError>>()?;
			rows.push(row);
		}
		TerrainMap::from_rows(&rows)
	}
	/// Number of columns and rows
	pub fn get_dimensions(&self) -> GridDimensions {
		self.dimensions
	}
	/// Look up the [Tile] at grid index `(x, y)`
	pub fn get_tile(&self, x: i64, y: i64) -> Result<Tile, NavigationError> {
		if !self.dimensions.contains_index(x, y) {
			return Err(NavigationError::OutOfRange {
				column: x,
				row: y,
				width: self.dimensions.get_width(),
				height: self.dimensions.get_height(),
			});
		}
		Ok(self.tiles[x as usize][y as usize])
	}
	/// Look up the [Tile] under a [FieldCell]. The cell must come from a field of the same dimensions
	pub fn get_field_cell_tile(&self, field_cell: FieldCell) -> Tile {
		check_field_bounds("TerrainMap", "get", &self.dimensions, field_cell);
		self.tiles[field_cell.get_column()][field_cell.get_row()]
	}
	/// Check if signed indices are inside the map
	pub fn contains_index(&self, x: i64, y: i64) -> bool {
		self.dimensions.contains_index(x, y)
	}
	/// Check if a world point lies strictly inside the map
	pub fn contains_point(&self, position: DVec2) -> bool {
		self.dimensions.contains_point(position)
	}
	/// Traversal cost of the tile under a world `position` for a cost `model`,
	/// [None] if the position is off the map or the tile is impassable
	pub fn get_cost_at_xy(&self, position: DVec2, model: &TileCostModel) -> Option<f64> {
		let cell = self.dimensions.get_field_cell_from_xy(position)?;
		model.cost(self.get_field_cell_tile(cell))
	}
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn codes_are_column_major() {
		let codes = vec![
			vec![0, 1, 1],
			vec![1, 1, 0],
		];
		let map = TerrainMap::from_codes(&codes).unwrap();
		assert_eq!(GridDimensions::new(2, 3).unwrap(), map.get_dimensions());
		assert_eq!(Ok(Tile::Water), map.get_tile(0, 0));
		assert_eq!(Ok(Tile::Water), map.get_tile(1, 2));
		assert_eq!(Ok(Tile::Grass), map.get_tile(0, 2));
	}
	#[test]
	fn rows_transpose() {
		let rows = vec![
			vec![0, 1],
			vec![1, 1],
			vec![1, 0],
		];
		let from_rows = TerrainMap::from_rows(&rows).unwrap();
		let codes = vec![
			vec![0, 1, 1],
			vec![1, 1, 0],
		];
		let from_codes = TerrainMap::from_codes(&codes).unwrap();
		assert_eq!(from_codes, from_rows);
	}
	#[test]
	fn out_of_range_lookup() {
		let map = TerrainMap::new_filled(3, 3, Tile::Grass).unwrap();
		let result = map.get_tile(3, 0);
		let actual = Err(NavigationError::OutOfRange { column: 3, row: 0, width: 3, height: 3 });
		assert_eq!(actual, result);
		assert!(map.get_tile(0, -1).is_err());
	}
	#[test]
	fn ragged_codes_rejected() {
		let codes = vec![
			vec![1, 1, 1],
			vec![1, 1],
		];
		assert!(matches!(TerrainMap::from_codes(&codes), Err(NavigationError::InvalidDimensions(_))));
	}
	#[test]
	fn unknown_code_rejected() {
		let codes = vec![vec![1, 9]];
		assert_eq!(Err(NavigationError::UnknownTileCode(9)), TerrainMap::from_codes(&codes));
	}
	#[test]
	fn empty_rejected() {
		assert!(TerrainMap::from_codes(&[]).is_err());
	}
	#[test]
	fn cost_under_point() {
		let codes = vec![
			vec![0, 0],
			vec![1, 1],
		];
		let map = TerrainMap::from_codes(&codes).unwrap();
		let model = TileCostModel::soldier();
		assert_eq!(Some(5.0), map.get_cost_at_xy(DVec2::new(-0.5, 0.5), &model));
		assert_eq!(Some(1.0), map.get_cost_at_xy(DVec2::new(0.5, -0.5), &model));
		assert_eq!(None, map.get_cost_at_xy(DVec2::new(1.5, 0.0), &model));
	}
	#[cfg(feature = "csv")]
	#[test]
	fn csv_rows() {
		let text = "1, 1, 0\n0, 1, 1\n";
		let map = TerrainMap::from_csv_reader(text.as_bytes()).unwrap();
		assert_eq!(GridDimensions::new(3, 2).unwrap(), map.get_dimensions());
		assert_eq!(Ok(Tile::Water), map.get_tile(2, 0));
		assert_eq!(Ok(Tile::Water), map.get_tile(0, 1));
	}
	#[cfg(feature = "csv")]
	#[test]
	fn csv_bad_code() {
		let text = "1,x\n";
		assert!(matches!(TerrainMap::from_csv_reader(text.as_bytes()), Err(NavigationError::TerrainLoad(_))));
	}
	#[cfg(feature = "csv")]
	#[test]
	fn csv_from_disk() {
		let map = TerrainMap::from_csv("assets/terrain.csv").unwrap();
		assert_eq!(GridDimensions::new(10, 6).unwrap(), map.get_dimensions());
	}
	#[cfg(feature = "ron")]
	#[test]
	fn ron_from_disk() {
		let map = TerrainMap::from_ron("assets/terrain.ron").unwrap();
		assert_eq!(GridDimensions::new(10, 6).unwrap(), map.get_dimensions());
	}
}
