//! JSON messages exchanged with clients over the message bus. Every message
//! is an object tagged by its `type`:
//!
//! ```text
//! in:  {"type":"setTarget","x":1.5,"y":-2,"cluster":false}
//! in:  {"type":"placeUnit","x":0,"y":0,"count":10,"unitType":"LightInfantry"}
//! out: {"type":"addObject","id":1,"object":{"type":"Soldier","x":0.3,"y":-1.2,"dx":0,"dy":0}}
//! out: {"type":"updateObjects","objects":[...]}
//! out: {"type":"requestRejected","reason":"..."}
//! ```
//!

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Unit type every placement spawns when it doesn't name one
pub const LIGHT_INFANTRY: &str = "LightInfantry";

/// Commands a client can send
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InboundMessage {
	/// Move every agent towards a point
	SetTarget {
		/// World `x`
		x: f64,
		/// World `y`
		y: f64,
		/// Keep full speed at the target
		#[serde(default)]
		cluster: bool,
	},
	/// Place agents around a point
	PlaceUnit {
		/// World `x`
		x: f64,
		/// World `y`
		y: f64,
		/// Number of agents
		#[serde(default)]
		count: Option<u32>,
		/// Kind of unit
		#[serde(default, rename = "unitType")]
		unit_type: Option<String>,
	},
}

/// Public view of an agent
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ObjectState {
	/// Kind of object
	#[serde(rename = "type")]
	pub kind: String,
	/// World `x`
	pub x: f64,
	/// World `y`
	pub y: f64,
	/// Velocity along `x`
	pub dx: f64,
	/// Velocity along `y`
	pub dy: f64,
}

/// Object state keyed by agent id
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct IdentifiedObject {
	/// Agent id
	pub id: u64,
	/// State
	#[serde(flatten)]
	pub object: ObjectState,
}

impl From<&AgentSnapshot> for ObjectState {
	fn from(snapshot: &AgentSnapshot) -> Self {
		ObjectState {
			kind: "Soldier".to_string(),
			x: snapshot.position.x,
			y: snapshot.position.y,
			dx: snapshot.velocity.x,
			dy: snapshot.velocity.y,
		}
	}
}

/// Messages sent to clients
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundMessage {
	/// An agent was created
	AddObject {
		/// Agent id
		id: u64,
		/// State at creation
		object: ObjectState,
	},
	/// Every agent after a tick
	UpdateObjects {
		/// Agents ordered by id
		objects: Vec<IdentifiedObject>,
	},
	/// A command of the recipient was refused
	RequestRejected {
		/// Why
		reason: String,
	},
}

impl OutboundMessage {
	/// Announce a new agent
	pub fn add_object(snapshot: &AgentSnapshot) -> Self {
		OutboundMessage::AddObject {
			id: snapshot.id.0,
			object: ObjectState::from(snapshot),
		}
	}
	/// Report every agent
	pub fn update_objects(agents: &[AgentSnapshot]) -> Self {
		OutboundMessage::UpdateObjects {
			objects: agents
				.iter()
				.map(|a| IdentifiedObject {
					id: a.id.0,
					object: ObjectState::from(a),
				})
				.collect(),
		}
	}
	/// Tell a client its command was refused
	pub fn request_rejected(error: &NavigationError) -> Self {
		OutboundMessage::RequestRejected {
			reason: error.to_string(),
		}
	}
}

/// Parse a raw inbound message
pub fn decode_inbound(text: &str) -> Result<InboundMessage, NavigationError> {
	serde_json::from_str(text).map_err(|e| NavigationError::MalformedCommand(e.to_string()))
}

/// Serialise an outbound message
pub fn encode_outbound(message: &OutboundMessage) -> Result<String, NavigationError> {
	serde_json::to_string(message).map_err(|e| NavigationError::MalformedCommand(e.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn decode_set_target() {
		let result = decode_inbound(r#"{"type":"setTarget","x":1.5,"y":-2}"#).unwrap();
		let actual = InboundMessage::SetTarget {
			x: 1.5,
			y: -2.0,
			cluster: false,
		};
		assert_eq!(actual, result);
	}
	#[test]
	fn decode_set_target_cluster() {
		let result = decode_inbound(r#"{"type":"setTarget","x":0,"y":0,"cluster":true}"#).unwrap();
		assert!(matches!(result, InboundMessage::SetTarget { cluster: true, .. }));
	}
	#[test]
	fn decode_place_unit() {
		let result =
			decode_inbound(r#"{"type":"placeUnit","x":3,"y":4,"unitType":"LightInfantry"}"#).unwrap();
		let actual = InboundMessage::PlaceUnit {
			x: 3.0,
			y: 4.0,
			count: None,
			unit_type: Some(LIGHT_INFANTRY.to_string()),
		};
		assert_eq!(actual, result);
	}
	#[test]
	fn unknown_type_is_malformed() {
		let result = decode_inbound(r#"{"type":"chatMessage","message":"hi"}"#);
		assert!(matches!(result, Err(NavigationError::MalformedCommand(_))));
	}
	#[test]
	fn broken_json_is_malformed() {
		assert!(decode_inbound("{\"type\":").is_err());
		assert!(decode_inbound(r#"{"type":"setTarget","x":"left","y":0}"#).is_err());
	}
	#[test]
	fn encode_add_object() {
		let snapshot = AgentSnapshot {
			id: AgentId(3),
			position: DVec2::new(0.5, -1.0),
			velocity: DVec2::ZERO,
			radius: 0.5,
		};
		let text = encode_outbound(&OutboundMessage::add_object(&snapshot)).unwrap();
		let value: serde_json::Value = serde_json::from_str(&text).unwrap();
		assert_eq!("addObject", value["type"]);
		assert_eq!(3, value["id"]);
		assert_eq!("Soldier", value["object"]["type"]);
		assert_eq!(0.5, value["object"]["x"]);
		assert_eq!(-1.0, value["object"]["y"]);
	}
	#[test]
	fn encode_update_objects() {
		let agents = vec![
			AgentSnapshot { id: AgentId(1), position: DVec2::ZERO, velocity: DVec2::new(1.0, 0.0), radius: 0.5 },
			AgentSnapshot { id: AgentId(2), position: DVec2::ONE, velocity: DVec2::ZERO, radius: 0.5 },
		];
		let text = encode_outbound(&OutboundMessage::update_objects(&agents)).unwrap();
		let value: serde_json::Value = serde_json::from_str(&text).unwrap();
		assert_eq!("updateObjects", value["type"]);
		assert_eq!(2, value["objects"].as_array().unwrap().len());
		assert_eq!(2, value["objects"][1]["id"]);
		assert_eq!(1.0, value["objects"][0]["dx"]);
	}
	#[test]
	fn encode_rejection() {
		let error = NavigationError::OutOfBoundsTarget { x: 9.0, y: 0.0 };
		let text = encode_outbound(&OutboundMessage::request_rejected(&error)).unwrap();
		let value: serde_json::Value = serde_json::from_str(&text).unwrap();
		assert_eq!("requestRejected", value["type"]);
		assert_eq!(error.to_string(), value["reason"]);
	}
}
