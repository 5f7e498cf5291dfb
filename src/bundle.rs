//! Components and bundles making up a navigation World and the agents
//! living in it.
//!
//! A World is a single entity spawned from [FlowFieldWorldBundle]. Agents
//! are separate entities spawned from [AgentBundle] which point back at the
//! World they belong to, so any number of Worlds can be simulated side by
//! side.
//!

use std::sync::Arc;

use crate::prelude::*;
use bevy::prelude::*;
use bevy::tasks::Task;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// The terrain of a World, shared with background grid calculations
#[derive(Component, Clone, Debug)]
pub struct WorldTerrain(Arc<TerrainMap>);

impl WorldTerrain {
	/// Wrap a [TerrainMap]
	pub fn new(terrain: TerrainMap) -> Self {
		WorldTerrain(Arc::new(terrain))
	}
	/// Borrow the terrain
	pub fn get(&self) -> &TerrainMap {
		&self.0
	}
	/// Shared handle to the terrain
	pub fn get_shared(&self) -> Arc<TerrainMap> {
		self.0.clone()
	}
}

/// Cost model a World builds its grids with
#[derive(Component, Clone, Debug, PartialEq)]
pub struct WorldCostModel(pub TileCostModel);

/// The grid agents of a World currently steer by. It's swapped out whole
/// when a newer grid is installed
#[derive(Component, Clone, Debug, Default)]
pub struct ActiveNavigationGrid(Option<Arc<NavigationGrid>>);

impl ActiveNavigationGrid {
	/// The installed grid, if any target has been set yet
	pub fn get(&self) -> Option<&NavigationGrid> {
		self.0.as_deref()
	}
	/// Replace the installed grid
	pub fn install(&mut self, grid: NavigationGrid) {
		self.0 = Some(Arc::new(grid));
	}
	/// Generation of the installed grid
	pub fn get_generation(&self) -> Option<u64> {
		self.0.as_ref().map(|g| g.get_generation())
	}
}

/// A grid calculation running on the async compute pool
pub struct PendingGrid {
	/// Generation the result belongs to
	pub generation: u64,
	/// Client that asked for the target
	pub requester: Option<ClientId>,
	/// The running calculation
	pub task: Task<Result<NavigationGrid, NavigationError>>,
}

/// Tracks target requests of a World. Every request takes the next
/// generation, only the result of the latest generation may be installed
#[derive(Component, Default)]
pub struct PendingRecompute {
	/// Generation handed to the most recent request
	latest_generation: u64,
	/// Background calculation in flight
	pending: Option<PendingGrid>,
}

impl PendingRecompute {
	/// Allocate the generation of a new request
	pub fn next_generation(&mut self) -> u64 {
		self.latest_generation += 1;
		self.latest_generation
	}
	/// Generation of the most recent request
	pub fn get_latest_generation(&self) -> u64 {
		self.latest_generation
	}
	/// Track a background calculation, anything already in flight is
	/// superseded and dropped, which cancels it
	pub fn set_pending(&mut self, pending: PendingGrid) -> Option<u64> {
		self.pending.replace(pending).map(|p| p.generation)
	}
	/// Mutable access to the calculation in flight
	pub fn get_pending_mut(&mut self) -> Option<&mut PendingGrid> {
		self.pending.as_mut()
	}
	/// Stop tracking the calculation in flight
	pub fn take_pending(&mut self) -> Option<PendingGrid> {
		self.pending.take()
	}
}

/// Hands out agent ids, starting at `1`
#[derive(Component, Debug, Default)]
pub struct AgentIdAllocator(u64);

impl AgentIdAllocator {
	/// Take the next id
	pub fn next_id(&mut self) -> AgentId {
		self.0 += 1;
		AgentId(self.0)
	}
}

/// Randomness used to scatter placed agents. It's seeded on first use from
/// [NavigationSettings::scatter_seed] unless the World was given its own seed
#[derive(Component, Debug, Default)]
pub struct ScatterRng(Option<ChaCha12Rng>);

impl ScatterRng {
	/// Rng seeded with `seed`
	pub fn seeded(seed: u64) -> Self {
		ScatterRng(Some(ChaCha12Rng::seed_from_u64(seed)))
	}
	/// Get the rng, seeding it with `seed` (or randomly when [None]) if it hasn't been yet
	pub fn get_or_seed(&mut self, seed: Option<u64>) -> &mut ChaCha12Rng {
		self.0.get_or_insert_with(|| {
			let seed = seed.unwrap_or_else(rand::random);
			ChaCha12Rng::seed_from_u64(seed)
		})
	}
}

/// Number of ticks a World has been simulated for
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorldTick(pub u64);

/// Everything a navigation World needs
#[derive(Bundle)]
pub struct FlowFieldWorldBundle {
	/// Map
	terrain: WorldTerrain,
	/// Cost model of grid calculations
	cost_model: WorldCostModel,
	/// Grid in use
	grid: ActiveNavigationGrid,
	/// Target request bookkeeping
	pending: PendingRecompute,
	/// Agent ids
	ids: AgentIdAllocator,
	/// Placement scatter
	rng: ScatterRng,
	/// Tick counter
	tick: WorldTick,
}

impl FlowFieldWorldBundle {
	/// Create a new instance of [FlowFieldWorldBundle] over `terrain`, using
	/// [TileCostModel::placeholder] for its grids
	pub fn new(terrain: TerrainMap) -> Self {
		FlowFieldWorldBundle::new_with_cost_model(terrain, TileCostModel::placeholder())
	}
	/// Create a new instance of [FlowFieldWorldBundle] with a custom grid cost model
	pub fn new_with_cost_model(terrain: TerrainMap, cost_model: TileCostModel) -> Self {
		FlowFieldWorldBundle {
			terrain: WorldTerrain::new(terrain),
			cost_model: WorldCostModel(cost_model),
			grid: ActiveNavigationGrid::default(),
			pending: PendingRecompute::default(),
			ids: AgentIdAllocator::default(),
			rng: ScatterRng::default(),
			tick: WorldTick::default(),
		}
	}
	/// Create a new instance of [FlowFieldWorldBundle] from a `.ron` terrain file
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str) -> Result<Self, NavigationError> {
		Ok(FlowFieldWorldBundle::new(TerrainMap::from_ron(path)?))
	}
	/// Create a new instance of [FlowFieldWorldBundle] from a `.csv` terrain file
	#[cfg(feature = "csv")]
	pub fn from_csv(path: &str) -> Result<Self, NavigationError> {
		Ok(FlowFieldWorldBundle::new(TerrainMap::from_csv(path)?))
	}
	/// Scatter agents of this World with its own `seed` rather than the one in [NavigationSettings]
	pub fn with_scatter_seed(mut self, seed: u64) -> Self {
		self.rng = ScatterRng::seeded(seed);
		self
	}
}

/// Identity of an agent within its World
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Reflect)]
pub struct AgentId(pub u64);

/// Physical traits shared by a kind of agent
#[derive(Clone, Debug, PartialEq)]
pub struct AgentArchetype {
	/// Collision radius
	pub radius: f64,
	/// Speed over terrain of cost `1`
	pub base_speed: f64,
	/// How the agent perceives terrain
	pub cost_model: TileCostModel,
}

impl AgentArchetype {
	/// Infantry
	pub fn soldier() -> Self {
		AgentArchetype {
			radius: 0.5,
			base_speed: 5.0,
			cost_model: TileCostModel::soldier(),
		}
	}
}

/// An agent steered by the grid of its World
#[derive(Component, Clone, Debug)]
pub struct Agent {
	/// World entity the agent belongs to
	world: Entity,
	/// Identity within the World
	id: AgentId,
	/// Physical traits
	archetype: AgentArchetype,
}

impl Agent {
	/// World entity the agent belongs to
	pub fn get_world(&self) -> Entity {
		self.world
	}
	/// Identity within the World
	pub fn get_id(&self) -> AgentId {
		self.id
	}
	/// Collision radius
	pub fn get_radius(&self) -> f64 {
		self.archetype.radius
	}
	/// Speed over terrain of cost `1`
	pub fn get_base_speed(&self) -> f64 {
		self.archetype.base_speed
	}
	/// The agent's own view of terrain costs
	pub fn get_cost_model(&self) -> &TileCostModel {
		&self.archetype.cost_model
	}
}

/// Continuous world position
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Position(pub DVec2);

/// Velocity in units per second
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity(pub DVec2);

/// An agent at rest
#[derive(Bundle)]
pub struct AgentBundle {
	/// Identity and traits
	agent: Agent,
	/// Where it stands
	position: Position,
	/// Starts at zero
	velocity: Velocity,
}

impl AgentBundle {
	/// Create a new instance of [AgentBundle]
	pub fn new(world: Entity, id: AgentId, archetype: AgentArchetype, position: DVec2) -> Self {
		AgentBundle {
			agent: Agent { world, id, archetype },
			position: Position(position),
			velocity: Velocity::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::Rng;
	#[test]
	fn ids_start_at_one() {
		let mut ids = AgentIdAllocator::default();
		assert_eq!(AgentId(1), ids.next_id());
		assert_eq!(AgentId(2), ids.next_id());
	}
	#[test]
	fn generations_increase() {
		let mut pending = PendingRecompute::default();
		assert_eq!(0, pending.get_latest_generation());
		assert_eq!(1, pending.next_generation());
		assert_eq!(2, pending.next_generation());
		assert!(pending.get_pending_mut().is_none());
	}
	#[test]
	fn seeded_scatter_is_reproducible() {
		let mut a = ScatterRng::seeded(3);
		let mut b = ScatterRng::default();
		let xa: f64 = a.get_or_seed(None).random_range(0.0..1.0);
		let xb: f64 = b.get_or_seed(Some(3)).random_range(0.0..1.0);
		assert_eq!(xa, xb);
	}
	#[test]
	fn own_seed_wins_over_settings() {
		let mut a = ScatterRng::seeded(3);
		let mut b = ScatterRng::seeded(3);
		let xa: f64 = a.get_or_seed(Some(99)).random_range(0.0..1.0);
		let xb: f64 = b.get_or_seed(None).random_range(0.0..1.0);
		assert_eq!(xa, xb);
	}
	#[test]
	fn grid_installs() {
		let terrain = TerrainMap::new_filled(4, 4, Tile::Grass).unwrap();
		let kernel = DirectionKernel::new(2).unwrap();
		let grid = calculate_navigation_grid(&terrain, &TileCostModel::placeholder(), &kernel, DVec2::ZERO, false, 3).unwrap();
		let mut active = ActiveNavigationGrid::default();
		assert!(active.get().is_none());
		active.install(grid);
		assert_eq!(Some(3), active.get_generation());
	}
	#[test]
	fn new_agents_are_still() {
		let world = Entity::from_raw(7);
		let bundle = AgentBundle::new(world, AgentId(1), AgentArchetype::soldier(), DVec2::new(1.0, 2.0));
		assert_eq!(Velocity(DVec2::ZERO), bundle.velocity);
		assert_eq!(world, bundle.agent.get_world());
		assert_eq!(5.0, bundle.agent.get_base_speed());
		assert_eq!(0.5, bundle.agent.get_radius());
	}
}
