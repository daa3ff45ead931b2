//! Host interfaces - what the leash logic needs from the running game server
//!
//! The server owns entities, players, navigation and chat. The core only
//! reads snapshots and issues fire-and-forget commands through these traits.

pub mod memory;

pub use memory::MemoryHost;

use crate::types::{EntityId, PlayerId};
use glam::Vec3;
use thiserror::Error;

/// Point-in-time view of a host entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySnapshot {
    /// Short prefab name, e.g. "patrolhelicopter"
    pub short_type_name: String,
    pub position: Vec3,
    pub health: f32,
    pub alive: bool,
    /// Whether a navigation controller (the helicopter AI) is attached
    pub has_navigator: bool,
}

/// Point-in-time view of a player
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub display_name: String,
    pub position: Vec3,
    pub alive: bool,
    pub connected: bool,
}

/// A chat line plus its styling metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    /// Opaque color hint, passed through untouched
    pub color: String,
}

/// Failure to deliver a chat line to a single recipient
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("{0} is no longer connected")]
    Disconnected(PlayerId),
    #[error("unknown chat recipient {0}")]
    UnknownRecipient(PlayerId),
}

/// Read access to the simulation state
pub trait WorldQuery {
    /// Snapshot of an entity, or `None` if the handle no longer refers to one
    fn entity(&self, id: EntityId) -> Option<EntitySnapshot>;

    /// Snapshot of a player, or `None` if the handle is unknown
    fn player(&self, id: PlayerId) -> Option<PlayerSnapshot>;

    /// Every player currently connected to the server
    fn connected_players(&self) -> Vec<PlayerId>;
}

/// Motion control for AI-piloted entities
pub trait Navigator {
    /// Point the entity's AI at a new destination. The result is not observed.
    fn set_navigation_target(&mut self, entity: EntityId, target: Vec3);
}

/// Per-player chat delivery
pub trait ChatSink {
    fn send_chat(&mut self, recipient: PlayerId, message: &ChatMessage) -> Result<(), DeliveryError>;
}

/// Everything the router needs from a host
pub trait Host: WorldQuery + Navigator + ChatSink {}

impl<T: WorldQuery + Navigator + ChatSink> Host for T {}
