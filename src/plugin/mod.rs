//! Defines the Bevy [Plugin] for flow field steering
//!
//! Each [FixedUpdate] tick runs four chained stages:
//!
//! ```text
//! Commands ──> Install ──> Steer ──> Broadcast
//! ```
//!
//! Commands drains target, placement and removal requests. Install swaps
//! in any grid finished by the background pool. Steer moves every agent and
//! Broadcast reports the new state of every World.
//!

use crate::prelude::*;
use bevy::prelude::*;

#[cfg(feature = "json")]
pub mod message_layer;
pub mod agent_layer;
pub mod target_layer;

/// Identifies a connected client of the message bus
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Reflect)]
pub struct ClientId(pub u64);

/// Stages of a simulation tick
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum NavigationSet {
	/// Apply inbound commands
	Commands,
	/// Install grids calculated in the background
	Install,
	/// Move agents
	Steer,
	/// Report World state
	Broadcast,
}

/// Steers agents of every navigation World over its terrain
#[derive(Default)]
pub struct FlowFieldSteeringPlugin;

impl Plugin for FlowFieldSteeringPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.init_resource::<NavigationSettings>();
		let settings = app.world().resource::<NavigationSettings>();
		if let Err(e) = settings.validate() {
			warn!("Target requests will be rejected: {}", e);
		}
		let tick_period = settings.tick_period;
		app.insert_resource(Time::<Fixed>::from_duration(tick_period))
			.init_resource::<DirectionKernels>()
			.register_type::<FieldCell>()
			.register_type::<GridDimensions>()
			.register_type::<Tile>()
			.register_type::<AgentId>()
			.register_type::<ClientId>()
			.register_type::<RecomputeMode>()
			.add_event::<target_layer::EventSetTarget>()
			.add_event::<target_layer::EventNavigationGridInstalled>()
			.add_event::<target_layer::EventRequestRejected>()
			.add_event::<agent_layer::EventPlaceAgents>()
			.add_event::<agent_layer::EventRemoveAgent>()
			.add_event::<agent_layer::EventAgentCreated>()
			.add_event::<agent_layer::EventWorldSnapshot>()
			.configure_sets(
				FixedUpdate,
				(
					NavigationSet::Commands,
					NavigationSet::Install,
					NavigationSet::Steer,
					NavigationSet::Broadcast,
				)
					.chain(),
			)
			.add_systems(
				FixedUpdate,
				(
					(
						target_layer::handle_set_target,
						agent_layer::handle_place_agents,
						agent_layer::handle_remove_agent,
					)
						.chain()
						.in_set(NavigationSet::Commands),
					target_layer::install_background_grids.in_set(NavigationSet::Install),
					agent_layer::steer_agents.in_set(NavigationSet::Steer),
					agent_layer::broadcast_snapshots.in_set(NavigationSet::Broadcast),
				),
			);
		#[cfg(feature = "json")]
		app.add_event::<message_layer::EventInboundMessage>()
			.add_event::<message_layer::EventOutboundMessage>()
			.add_systems(
				FixedUpdate,
				(
					message_layer::decode_inbound_messages
						.in_set(NavigationSet::Commands)
						.before(target_layer::handle_set_target),
					message_layer::encode_outbound_messages
						.in_set(NavigationSet::Broadcast)
						.after(agent_layer::broadcast_snapshots),
				),
			);
	}
}
