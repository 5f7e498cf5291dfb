//! Runs a World without any rendering. A pretend client sends JSON commands
//! and every message the plugin would send back is logged
//!

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_flowfield_steering_plugin::prelude::*;

/// The only client
const CLIENT: ClientId = ClientId(1);
/// Ticks to simulate before exiting
const RUN_TICKS: u64 = 100;

fn main() {
	App::new()
		.add_plugins((
			MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_millis(10))),
			LogPlugin {
				level: bevy::log::Level::DEBUG,
				filter: "wgpu=error,bevy_flowfield_steering_plugin=debug".to_string(),
				..default()
			},
		))
		.insert_resource(NavigationSettings {
			recompute_mode: RecomputeMode::Background,
			..NavigationSettings::default().with_scatter_seed(1)
		})
		.add_plugins(FlowFieldSteeringPlugin)
		.add_systems(Startup, setup)
		.add_systems(Update, (log_outbound, exit_after_run))
		.run();
}

/// Spawn a World with a river down the middle and queue up some commands
fn setup(mut commands: Commands, mut inbound: EventWriter<EventInboundMessage>) {
	let mut rows = vec![vec![Tile::Grass.code(); 40]; 20];
	for (y, row) in rows.iter_mut().enumerate() {
		if y != 10 {
			row[19] = Tile::Water.code();
			row[20] = Tile::Water.code();
		}
	}
	let terrain = match TerrainMap::from_rows(&rows) {
		Ok(t) => t,
		Err(e) => {
			error!("Bad demo map: {}", e);
			return;
		}
	};
	let world = commands.spawn(FlowFieldWorldBundle::new(terrain)).id();
	for text in [
		r#"{"type":"placeUnit","x":-15,"y":-5,"count":5,"unitType":"LightInfantry"}"#,
		r#"{"type":"setTarget","x":15.5,"y":4.5}"#,
		r#"{"type":"setTarget","x":55,"y":0}"#,
		r#"{"type":"launchMissiles"}"#,
	] {
		inbound.write(EventInboundMessage {
			world,
			client: CLIENT,
			text: text.to_string(),
		});
	}
}

/// Print what a transport would send
fn log_outbound(mut outbound: EventReader<EventOutboundMessage>) {
	for message in outbound.read() {
		match message.recipient {
			Recipient::All => info!("to all: {}", message.text),
			Recipient::Client(c) => info!("to {:?}: {}", c, message.text),
		}
	}
}

/// Stop once enough ticks have run
fn exit_after_run(world_q: Query<&WorldTick>, mut exit: EventWriter<AppExit>) {
	if world_q.iter().any(|t| t.0 >= RUN_TICKS) {
		exit.write(AppExit::Success);
	}
}
