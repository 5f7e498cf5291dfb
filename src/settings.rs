//! Tunables of the simulation
//!

use std::time::Duration;

use crate::prelude::*;
use bevy::prelude::*;

/// How a [NavigationGrid] is recalculated after a new target is set
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum RecomputeMode {
	/// Calculate on the simulation thread within the tick the target arrives in
	#[default]
	Inline,
	/// Calculate on the async compute pool and install the result on a later tick
	Background,
}

/// Simulation settings shared by every World
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct NavigationSettings {
	/// Radius of the [DirectionKernel]
	pub kernel_radius: u32,
	/// Wall clock period of a tick
	pub tick_period: Duration,
	/// Simulated seconds that pass per tick
	pub timestep: f64,
	/// Squared distance to the target under which non-clustering agents ease down
	pub arrival_radius_squared: f64,
	/// Squared distance to the target at which non-clustering agents stop
	pub arrival_stop_squared: f64,
	/// Agents are scattered up to this distance around a placement point
	pub scatter_radius: f64,
	/// Seed of the placement scatter, random when [None]
	pub scatter_seed: Option<u64>,
	/// Number of agents placed when a command doesn't say
	pub default_agent_count: u32,
	/// Where grids are recalculated
	pub recompute_mode: RecomputeMode,
}

impl Default for NavigationSettings {
	fn default() -> Self {
		NavigationSettings {
			kernel_radius: DEFAULT_KERNEL_RADIUS,
			tick_period: Duration::from_millis(1000 / TICKS_PER_SEC as u64),
			timestep: TIMESTEP,
			arrival_radius_squared: 16.0,
			arrival_stop_squared: 12.0,
			scatter_radius: 5.0,
			scatter_seed: None,
			default_agent_count: 10,
			recompute_mode: RecomputeMode::Inline,
		}
	}
}

impl NavigationSettings {
	/// Load settings from a `.ron` file, fields left out take their default
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str) -> Result<Self, NavigationError> {
		let file = std::fs::File::open(path)
			.map_err(|e| NavigationError::SettingsLoad(format!("{}: {}", path, e)))?;
		let settings: NavigationSettings = ron::de::from_reader(file)
			.map_err(|e| NavigationError::SettingsLoad(format!("{}: {}", path, e)))?;
		settings.validate()?;
		Ok(settings)
	}
	/// Check the settings can build a [DirectionKernel]
	pub fn validate(&self) -> Result<(), NavigationError> {
		if self.kernel_radius == 0 || self.kernel_radius > MAX_KERNEL_RADIUS {
			return Err(NavigationError::InvalidKernelRadius {
				radius: self.kernel_radius,
				max: MAX_KERNEL_RADIUS,
			});
		}
		Ok(())
	}
	/// Settings with a different [DirectionKernel] radius
	pub fn with_kernel_radius(mut self, radius: u32) -> Result<Self, NavigationError> {
		self.kernel_radius = radius;
		self.validate()?;
		Ok(self)
	}
	/// Settings with a fixed scatter seed, placement becomes reproducible
	pub fn with_scatter_seed(mut self, seed: u64) -> Self {
		self.scatter_seed = Some(seed);
		self
	}
	/// Settings with a different [RecomputeMode]
	pub fn with_recompute_mode(mut self, mode: RecomputeMode) -> Self {
		self.recompute_mode = mode;
		self
	}
}
