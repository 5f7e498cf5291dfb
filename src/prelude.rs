//! `use bevy_flowfield_steering_plugin::prelude::*;` to import common structures and methods
//!

pub use bevy::math::DVec2;

#[doc(hidden)]
pub use crate::flowfields::{
	fields::{cost_field::*, direction_kernel::*, vector_field::*, *},
	navigation_grid::*,
	steering::*,
	terrain::*,
	tiles::*,
	utilities::*,
};

#[cfg(feature = "json")]
#[doc(hidden)]
pub use crate::{plugin::message_layer::*, protocol::*};

#[doc(hidden)]
pub use crate::{
	bundle::*,
	error::*,
	plugin::{agent_layer::*, target_layer::*, *},
	settings::*,
};
