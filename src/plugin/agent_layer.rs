//! Logic relating to the agents of a World: placing and removing them,
//! steering them each tick and reporting where they are
//!

use std::f64::consts::TAU;

use rand::Rng;

use crate::prelude::*;
use bevy::prelude::*;

/// Place a group of agents scattered around a point
#[derive(Event, Clone, Debug)]
pub struct EventPlaceAgents {
	/// World entity
	world: Entity,
	/// Centre of the scatter
	position: DVec2,
	/// How many, [NavigationSettings::default_agent_count] when [None]
	count: Option<u32>,
	/// Kind of agent
	archetype: AgentArchetype,
	/// Client the request came from
	requester: Option<ClientId>,
}

impl EventPlaceAgents {
	/// Create a new instance of [EventPlaceAgents]
	pub fn new(world: Entity, position: DVec2, count: Option<u32>, archetype: AgentArchetype) -> Self {
		EventPlaceAgents {
			world,
			position,
			count,
			archetype,
			requester: None,
		}
	}
	/// Mark which client asked, rejections are addressed to it
	pub fn with_requester(mut self, requester: ClientId) -> Self {
		self.requester = Some(requester);
		self
	}
}

/// Remove an agent from its World
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub struct EventRemoveAgent {
	/// World entity
	pub world: Entity,
	/// Agent to remove
	pub id: AgentId,
}

/// An agent was placed
#[derive(Event, Clone, Debug, PartialEq)]
pub struct EventAgentCreated {
	/// World entity
	pub world: Entity,
	/// Agent entity
	pub entity: Entity,
	/// State of the agent at creation
	pub agent: AgentSnapshot,
}

/// Public state of an agent
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentSnapshot {
	/// Identity
	pub id: AgentId,
	/// Position
	pub position: DVec2,
	/// Velocity
	pub velocity: DVec2,
	/// Collision radius
	pub radius: f64,
}

/// State of every agent of a World at the end of a tick, ordered by id
#[derive(Event, Clone, Debug, PartialEq)]
pub struct EventWorldSnapshot {
	/// World entity
	pub world: Entity,
	/// Ticks simulated so far
	pub tick: u64,
	/// Agents
	pub agents: Vec<AgentSnapshot>,
}

/// Process [EventPlaceAgents], spawning agents at a random angle and
/// distance around the requested point
#[cfg(not(tarpaulin_include))]
pub fn handle_place_agents(
	mut events: EventReader<EventPlaceAgents>,
	mut world_q: Query<(&WorldTerrain, &mut AgentIdAllocator, &mut ScatterRng)>,
	settings: Res<NavigationSettings>,
	mut commands: Commands,
	mut created: EventWriter<EventAgentCreated>,
	mut rejected: EventWriter<EventRequestRejected>,
) {
	for event in events.read() {
		let Ok((terrain, mut ids, mut rng)) = world_q.get_mut(event.world) else {
			warn!("Placement on {:?} which is not a navigation world", event.world);
			rejected.write(EventRequestRejected {
				world: event.world,
				requester: event.requester,
				error: NavigationError::UnknownWorld(format!("{:?}", event.world)),
			});
			continue;
		};
		if !terrain.get().contains_point(event.position) {
			let error = NavigationError::OutOfBoundsPlacement {
				x: event.position.x,
				y: event.position.y,
			};
			warn!("Rejected placement for {:?}: {}", event.world, error);
			rejected.write(EventRequestRejected {
				world: event.world,
				requester: event.requester,
				error,
			});
			continue;
		}
		let count = event.count.unwrap_or(settings.default_agent_count);
		let rng = rng.get_or_seed(settings.scatter_seed);
		for _ in 0..count {
			let angle = rng.random_range(0.0..TAU);
			let distance = if settings.scatter_radius > 0.0 {
				rng.random_range(0.0..settings.scatter_radius)
			} else {
				0.0
			};
			let position = event.position + DVec2::from_angle(angle) * distance;
			let id = ids.next_id();
			let bundle = AgentBundle::new(event.world, id, event.archetype.clone(), position);
			let entity = commands.spawn(bundle).id();
			trace!("Placed agent {:?} at {}", id, position);
			created.write(EventAgentCreated {
				world: event.world,
				entity,
				agent: AgentSnapshot {
					id,
					position,
					velocity: DVec2::ZERO,
					radius: event.archetype.radius,
				},
			});
		}
		debug!("Placed {} agents around {} in {:?}", count, event.position, event.world);
	}
}

/// Process [EventRemoveAgent]
#[cfg(not(tarpaulin_include))]
pub fn handle_remove_agent(
	mut events: EventReader<EventRemoveAgent>,
	agent_q: Query<(Entity, &Agent)>,
	mut commands: Commands,
) {
	for event in events.read() {
		let found = agent_q
			.iter()
			.find(|(_, agent)| agent.get_world() == event.world && agent.get_id() == event.id);
		match found {
			Some((entity, _)) => {
				trace!("Removing agent {:?} from {:?}", event.id, event.world);
				commands.entity(entity).despawn();
			}
			None => debug!("No agent {:?} in {:?} to remove", event.id, event.world),
		}
	}
}

/// Move every agent one tick along the active grid of its World
#[cfg(not(tarpaulin_include))]
pub fn steer_agents(
	mut agent_q: Query<(&Agent, &mut Position, &mut Velocity)>,
	world_q: Query<(&WorldTerrain, &ActiveNavigationGrid)>,
	settings: Res<NavigationSettings>,
) {
	let params = SteeringParameters::from(settings.as_ref());
	for (agent, mut position, mut velocity) in agent_q.iter_mut() {
		let Ok((terrain, grid)) = world_q.get(agent.get_world()) else {
			continue;
		};
		let (p, v) = steer(
			position.0,
			velocity.0,
			agent.get_base_speed(),
			agent.get_cost_model(),
			terrain.get(),
			grid.get(),
			&params,
		);
		position.0 = p;
		velocity.0 = v;
	}
}

/// Advance the tick of every World and report the state of its agents
#[cfg(not(tarpaulin_include))]
pub fn broadcast_snapshots(
	mut world_q: Query<(Entity, &mut WorldTick), With<WorldTerrain>>,
	agent_q: Query<(&Agent, &Position, &Velocity)>,
	mut snapshots: EventWriter<EventWorldSnapshot>,
) {
	for (world, mut tick) in world_q.iter_mut() {
		tick.0 += 1;
		let mut agents: Vec<AgentSnapshot> = agent_q
			.iter()
			.filter(|(agent, _, _)| agent.get_world() == world)
			.map(|(agent, position, velocity)| AgentSnapshot {
				id: agent.get_id(),
				position: position.0,
				velocity: velocity.0,
				radius: agent.get_radius(),
			})
			.collect();
		agents.sort_by_key(|a| a.id);
		snapshots.write(EventWorldSnapshot {
			world,
			tick: tick.0,
			agents,
		});
	}
}
