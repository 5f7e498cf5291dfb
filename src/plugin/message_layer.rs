//! Bridges the plugin to a text message bus. A transport writes each raw
//! message it receives as an [EventInboundMessage] and sends on whatever it
//! reads from [EventOutboundMessage]
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Raw text from a client, aimed at a World
#[derive(Event, Clone, Debug)]
pub struct EventInboundMessage {
	/// World entity the client plays in
	pub world: Entity,
	/// Sender
	pub client: ClientId,
	/// JSON text
	pub text: String,
}

/// Who an outbound message is for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recipient {
	/// Every connected client
	All,
	/// A single client
	Client(ClientId),
}

/// Encoded text for the transport to deliver
#[derive(Event, Clone, Debug)]
pub struct EventOutboundMessage {
	/// World entity the message concerns
	pub world: Entity,
	/// Who to deliver to
	pub recipient: Recipient,
	/// JSON text
	pub text: String,
}

/// Decode [EventInboundMessage] into command events, anything malformed is
/// logged and dropped
#[cfg(not(tarpaulin_include))]
pub fn decode_inbound_messages(
	mut events: EventReader<EventInboundMessage>,
	mut targets: EventWriter<EventSetTarget>,
	mut placements: EventWriter<EventPlaceAgents>,
) {
	for event in events.read() {
		let message = match decode_inbound(&event.text) {
			Ok(m) => m,
			Err(e) => {
				warn!("Ignoring message from {:?}: {}", event.client, e);
				continue;
			}
		};
		match message {
			InboundMessage::SetTarget { x, y, cluster } => {
				targets.write(
					EventSetTarget::new(event.world, DVec2::new(x, y), cluster)
						.with_requester(event.client),
				);
			}
			InboundMessage::PlaceUnit {
				x,
				y,
				count,
				unit_type,
			} => {
				if let Some(kind) = unit_type.filter(|k| k != LIGHT_INFANTRY) {
					warn!("Ignoring placement of unknown unit type {} from {:?}", kind, event.client);
					continue;
				}
				placements.write(
					EventPlaceAgents::new(
						event.world,
						DVec2::new(x, y),
						count,
						AgentArchetype::soldier(),
					)
					.with_requester(event.client),
				);
			}
		}
	}
}

/// Encode agent creations, snapshots and rejections for the transport
#[cfg(not(tarpaulin_include))]
pub fn encode_outbound_messages(
	mut created: EventReader<EventAgentCreated>,
	mut snapshots: EventReader<EventWorldSnapshot>,
	mut rejected: EventReader<EventRequestRejected>,
	mut outbound: EventWriter<EventOutboundMessage>,
) {
	let mut send = |world: Entity, recipient: Recipient, message: OutboundMessage| {
		match encode_outbound(&message) {
			Ok(text) => {
				outbound.write(EventOutboundMessage {
					world,
					recipient,
					text,
				});
			}
			Err(e) => error!("Failed encoding {:?}: {}", message, e),
		}
	};
	for event in created.read() {
		send(event.world, Recipient::All, OutboundMessage::add_object(&event.agent));
	}
	for event in rejected.read() {
		if let Some(client) = event.requester {
			send(
				event.world,
				Recipient::Client(client),
				OutboundMessage::request_rejected(&event.error),
			);
		}
	}
	for event in snapshots.read() {
		send(event.world, Recipient::All, OutboundMessage::update_objects(&event.agents));
	}
}
