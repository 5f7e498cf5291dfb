//! This is a plugin for Bevy game engine to steer crowds of agents across tile terrain towards a target using FlowFields
//!

pub mod bundle;
pub mod error;
pub mod flowfields;
pub mod plugin;
#[cfg(feature = "json")]
pub mod protocol;
pub mod settings;

pub mod prelude;
