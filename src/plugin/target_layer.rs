//! Logic relating to setting a World's target and keeping its
//! [NavigationGrid] current
//!

use bevy::tasks::{block_on, futures_lite::future, AsyncComputeTaskPool, TaskPool};

use crate::prelude::*;
use bevy::prelude::*;

/// Ask a World to steer its agents towards a new target
#[derive(Event, Clone, Debug)]
pub struct EventSetTarget {
	/// World entity
	world: Entity,
	/// World position of the target
	target: DVec2,
	/// Keep full speed at the target
	cluster: bool,
	/// Costs to build the grid with, the World's own model when [None]
	cost_model: Option<TileCostModel>,
	/// Client the request came from
	requester: Option<ClientId>,
}

impl EventSetTarget {
	/// Create a new instance of [EventSetTarget]
	pub fn new(world: Entity, target: DVec2, cluster: bool) -> Self {
		EventSetTarget {
			world,
			target,
			cluster,
			cost_model: None,
			requester: None,
		}
	}
	/// Build the grid with `cost_model` instead of the World's own
	pub fn with_cost_model(mut self, cost_model: TileCostModel) -> Self {
		self.cost_model = Some(cost_model);
		self
	}
	/// Mark which client asked, rejections are addressed to it
	pub fn with_requester(mut self, requester: ClientId) -> Self {
		self.requester = Some(requester);
		self
	}
	/// World entity
	pub fn get_world(&self) -> Entity {
		self.world
	}
	/// World position of the target
	pub fn get_target(&self) -> DVec2 {
		self.target
	}
}

/// A new [NavigationGrid] is in use
#[derive(Event, Clone, Debug, PartialEq)]
pub struct EventNavigationGridInstalled {
	/// World entity
	pub world: Entity,
	/// World position of the target
	pub target: DVec2,
	/// Generation of the request it answers
	pub generation: u64,
}

/// A command was refused, the World it was aimed at is unchanged
#[derive(Event, Clone, Debug, PartialEq)]
pub struct EventRequestRejected {
	/// World entity
	pub world: Entity,
	/// Client to notify
	pub requester: Option<ClientId>,
	/// Why
	pub error: NavigationError,
}

/// Process [EventSetTarget]. Out of bounds targets are rejected, otherwise
/// the request takes the next generation of its World and the grid is
/// either calculated on the spot or handed to the async compute pool
#[cfg(not(tarpaulin_include))]
pub fn handle_set_target(
	mut events: EventReader<EventSetTarget>,
	mut world_q: Query<(
		&WorldTerrain,
		&WorldCostModel,
		&mut ActiveNavigationGrid,
		&mut PendingRecompute,
	)>,
	mut kernels: ResMut<DirectionKernels>,
	settings: Res<NavigationSettings>,
	mut installed: EventWriter<EventNavigationGridInstalled>,
	mut rejected: EventWriter<EventRequestRejected>,
) {
	for event in events.read() {
		let Ok((terrain, world_model, mut active, mut pending)) = world_q.get_mut(event.world) else {
			warn!("Target set on {:?} which is not a navigation world", event.world);
			rejected.write(EventRequestRejected {
				world: event.world,
				requester: event.requester,
				error: NavigationError::UnknownWorld(format!("{:?}", event.world)),
			});
			continue;
		};
		if !terrain.get().contains_point(event.target) {
			let error = NavigationError::OutOfBoundsTarget {
				x: event.target.x,
				y: event.target.y,
			};
			warn!("Rejected target for {:?}: {}", event.world, error);
			rejected.write(EventRequestRejected {
				world: event.world,
				requester: event.requester,
				error,
			});
			continue;
		}
		let kernel = match kernels.get_or_build(settings.kernel_radius) {
			Ok(kernel) => kernel,
			Err(error) => {
				warn!("Rejected target for {:?}: {}", event.world, error);
				rejected.write(EventRequestRejected {
					world: event.world,
					requester: event.requester,
					error,
				});
				continue;
			}
		};
		let generation = pending.next_generation();
		let request = NavigationGridRequest {
			terrain: terrain.get_shared(),
			cost_model: event.cost_model.clone().unwrap_or_else(|| world_model.0.clone()),
			kernel,
			target: event.target,
			cluster: event.cluster,
			generation,
		};
		match settings.recompute_mode {
			RecomputeMode::Inline => {
				if let Some(superseded) = pending.take_pending() {
					debug!("Discarding grid generation {} of {:?}", superseded.generation, event.world);
				}
				match request.calculate() {
					Ok(grid) => {
						debug!(
							"Installing grid generation {} of {:?} towards {}",
							generation, event.world, event.target
						);
						active.install(grid);
						installed.write(EventNavigationGridInstalled {
							world: event.world,
							target: event.target,
							generation,
						});
					}
					Err(error) => {
						warn!("Failed calculating grid for {:?}: {}", event.world, error);
						rejected.write(EventRequestRejected {
							world: event.world,
							requester: event.requester,
							error,
						});
					}
				}
			}
			RecomputeMode::Background => {
				let pool = AsyncComputeTaskPool::get_or_init(TaskPool::default);
				let task = pool.spawn(async move { request.calculate() });
				let superseded = pending.set_pending(PendingGrid {
					generation,
					requester: event.requester,
					task,
				});
				if let Some(old) = superseded {
					debug!("Discarding grid generation {} of {:?}", old, event.world);
				}
			}
		}
	}
}

/// Install grids finished by the async compute pool. Only a result for the
/// latest generation of a World is installed
#[cfg(not(tarpaulin_include))]
pub fn install_background_grids(
	mut world_q: Query<(Entity, &mut ActiveNavigationGrid, &mut PendingRecompute)>,
	mut installed: EventWriter<EventNavigationGridInstalled>,
	mut rejected: EventWriter<EventRequestRejected>,
) {
	for (world, mut active, mut pending) in world_q.iter_mut() {
		let Some(in_flight) = pending.get_pending_mut() else {
			continue;
		};
		let Some(result) = block_on(future::poll_once(&mut in_flight.task)) else {
			continue;
		};
		let generation = in_flight.generation;
		let requester = in_flight.requester;
		pending.take_pending();
		if generation != pending.get_latest_generation() {
			debug!("Discarding grid generation {} of {:?}", generation, world);
			continue;
		}
		match result {
			Ok(grid) => {
				debug!(
					"Installing grid generation {} of {:?} towards {}",
					generation,
					world,
					grid.get_target()
				);
				let target = grid.get_target();
				active.install(grid);
				installed.write(EventNavigationGridInstalled {
					world,
					target,
					generation,
				});
			}
			Err(error) => {
				warn!("Failed calculating grid for {:?}: {}", world, error);
				rejected.write(EventRequestRejected {
					world,
					requester,
					error,
				});
			}
		}
	}
}
