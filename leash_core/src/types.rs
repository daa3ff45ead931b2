//! Core types shared by the tracker, the leash enforcer and the router

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle for a host entity (helicopter, vehicle, ...)
///
/// Handles are small integers issued by the host. They are never reused
/// while the entity is alive, so they are safe to use as map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Stable handle for a connected (or once-connected) player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

/// A combat-damage event delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageEvent {
    /// The entity that took damage
    pub entity: EntityId,
    /// The player that initiated the hit, if any
    pub attacker: Option<PlayerId>,
}

impl DamageEvent {
    /// Damage dealt by a player
    pub fn new(entity: EntityId, attacker: PlayerId) -> Self {
        DamageEvent {
            entity,
            attacker: Some(attacker),
        }
    }

    /// Damage with no player behind it (fall damage, decay, NPC fire)
    pub fn environmental(entity: EntityId) -> Self {
        DamageEvent {
            entity,
            attacker: None,
        }
    }
}
