//! MemoryHost - In-process host used by tests and the scenario runner

use super::{ChatMessage, ChatSink, DeliveryError, EntitySnapshot, Navigator, PlayerSnapshot, WorldQuery};
use crate::types::{EntityId, PlayerId};
use glam::Vec3;
use std::collections::{BTreeMap, HashSet};

/// Short prefab name of the patrol helicopter
pub const PATROL_HELICOPTER: &str = "patrolhelicopter";

/// A navigation command received from the core
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationCommand {
    pub entity: EntityId,
    pub target: Vec3,
}

/// A chat line delivered to one player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredChat {
    pub recipient: PlayerId,
    pub message: ChatMessage,
}

/// In-memory world with integer handles
///
/// Handles are issued from monotonically increasing counters and never
/// reused, so a handle for a destroyed entity stays invalid forever.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    entities: BTreeMap<EntityId, EntitySnapshot>,
    players: BTreeMap<PlayerId, PlayerSnapshot>,
    next_entity: u32,
    next_player: u32,
    navigation_targets: BTreeMap<EntityId, Vec3>,
    navigation_log: Vec<NavigationCommand>,
    chat_log: Vec<DeliveredChat>,
    failing_recipients: HashSet<PlayerId>,
}

impl MemoryHost {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an entity and return its handle
    pub fn spawn_entity(&mut self, short_type_name: &str, position: Vec3, health: f32) -> EntityId {
        let id = EntityId(self.next_entity);
        self.next_entity += 1;
        self.entities.insert(
            id,
            EntitySnapshot {
                short_type_name: short_type_name.to_string(),
                position,
                health,
                alive: true,
                has_navigator: false,
            },
        );
        id
    }

    /// Spawn a patrol helicopter with its AI attached
    pub fn spawn_helicopter(&mut self, position: Vec3, health: f32) -> EntityId {
        let id = self.spawn_entity(PATROL_HELICOPTER, position, health);
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.has_navigator = true;
        }
        id
    }

    /// Connect a new player
    pub fn add_player(&mut self, display_name: &str, position: Vec3) -> PlayerId {
        let id = PlayerId(self.next_player);
        self.next_player += 1;
        self.players.insert(
            id,
            PlayerSnapshot {
                display_name: display_name.to_string(),
                position,
                alive: true,
                connected: true,
            },
        );
        id
    }

    /// Mutable access to an entity
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut EntitySnapshot> {
        self.entities.get_mut(&id)
    }

    /// Mutable access to a player
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerSnapshot> {
        self.players.get_mut(&id)
    }

    /// Subtract health from an entity, returning what is left
    pub fn damage_entity(&mut self, id: EntityId, amount: f32) -> Option<f32> {
        let entity = self.entities.get_mut(&id)?;
        entity.health = (entity.health - amount).max(0.0);
        if entity.health <= 0.0 {
            entity.alive = false;
        }
        Some(entity.health)
    }

    /// Remove an entity. Its handle becomes permanently invalid.
    pub fn destroy_entity(&mut self, id: EntityId) -> bool {
        self.navigation_targets.remove(&id);
        self.entities.remove(&id).is_some()
    }

    /// Mark a player as disconnected
    pub fn disconnect(&mut self, id: PlayerId) {
        if let Some(player) = self.players.get_mut(&id) {
            player.connected = false;
        }
    }

    /// Make chat delivery to a player fail, as if they dropped mid-broadcast
    pub fn fail_delivery_to(&mut self, id: PlayerId) {
        self.failing_recipients.insert(id);
    }

    /// Current navigation target for an entity
    pub fn navigation_target(&self, id: EntityId) -> Option<Vec3> {
        self.navigation_targets.get(&id).copied()
    }

    /// Every navigation command issued so far
    pub fn navigation_log(&self) -> &[NavigationCommand] {
        &self.navigation_log
    }

    /// Every chat line delivered so far
    pub fn chat_log(&self) -> &[DeliveredChat] {
        &self.chat_log
    }

    /// Forget recorded commands and chat
    pub fn clear_logs(&mut self) {
        self.navigation_log.clear();
        self.chat_log.clear();
    }
}

impl WorldQuery for MemoryHost {
    fn entity(&self, id: EntityId) -> Option<EntitySnapshot> {
        self.entities.get(&id).cloned()
    }

    fn player(&self, id: PlayerId) -> Option<PlayerSnapshot> {
        self.players.get(&id).cloned()
    }

    fn connected_players(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|(_, p)| p.connected)
            .map(|(id, _)| *id)
            .collect()
    }
}

impl Navigator for MemoryHost {
    fn set_navigation_target(&mut self, entity: EntityId, target: Vec3) {
        if !self.entities.contains_key(&entity) {
            return;
        }
        self.navigation_targets.insert(entity, target);
        self.navigation_log.push(NavigationCommand { entity, target });
    }
}

impl ChatSink for MemoryHost {
    fn send_chat(&mut self, recipient: PlayerId, message: &ChatMessage) -> Result<(), DeliveryError> {
        let player = self
            .players
            .get(&recipient)
            .ok_or(DeliveryError::UnknownRecipient(recipient))?;

        if !player.connected || self.failing_recipients.contains(&recipient) {
            return Err(DeliveryError::Disconnected(recipient));
        }

        self.chat_log.push(DeliveredChat {
            recipient,
            message: message.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_not_reused() {
        let mut host = MemoryHost::new();
        let first = host.spawn_helicopter(Vec3::ZERO, 1000.0);
        assert!(host.destroy_entity(first));

        let second = host.spawn_helicopter(Vec3::ZERO, 1000.0);
        assert_ne!(first, second);
        assert!(host.entity(first).is_none());
        assert!(host.entity(second).is_some());
    }

    #[test]
    fn test_damage_kills_at_zero() {
        let mut host = MemoryHost::new();
        let heli = host.spawn_helicopter(Vec3::ZERO, 100.0);

        assert_eq!(host.damage_entity(heli, 40.0), Some(60.0));
        assert!(host.entity(heli).unwrap().alive);

        assert_eq!(host.damage_entity(heli, 100.0), Some(0.0));
        assert!(!host.entity(heli).unwrap().alive);
    }

    #[test]
    fn test_connected_players_excludes_disconnected() {
        let mut host = MemoryHost::new();
        let a = host.add_player("a", Vec3::ZERO);
        let b = host.add_player("b", Vec3::ZERO);
        host.disconnect(a);

        assert_eq!(host.connected_players(), vec![b]);
    }

    #[test]
    fn test_send_chat_failures() {
        let mut host = MemoryHost::new();
        let a = host.add_player("a", Vec3::ZERO);
        let message = ChatMessage {
            text: "hello".to_string(),
            color: "#ffffff".to_string(),
        };

        assert!(host.send_chat(a, &message).is_ok());
        assert_eq!(
            host.send_chat(PlayerId(99), &message),
            Err(DeliveryError::UnknownRecipient(PlayerId(99)))
        );

        host.fail_delivery_to(a);
        assert_eq!(host.send_chat(a, &message), Err(DeliveryError::Disconnected(a)));
        assert_eq!(host.chat_log().len(), 1);
    }

    #[test]
    fn test_navigation_ignores_missing_entities() {
        let mut host = MemoryHost::new();
        host.set_navigation_target(EntityId(5), Vec3::ONE);
        assert!(host.navigation_log().is_empty());

        let heli = host.spawn_helicopter(Vec3::ZERO, 100.0);
        host.set_navigation_target(heli, Vec3::ONE);
        assert_eq!(host.navigation_target(heli), Some(Vec3::ONE));
    }

    #[test]
    fn test_clear_logs_keeps_world_state() {
        let mut host = MemoryHost::new();
        let heli = host.spawn_helicopter(Vec3::ZERO, 100.0);
        let a = host.add_player("a", Vec3::ZERO);
        host.set_navigation_target(heli, Vec3::ONE);
        let message = ChatMessage {
            text: "hello".to_string(),
            color: "#ffffff".to_string(),
        };
        host.send_chat(a, &message).unwrap();

        host.clear_logs();

        assert!(host.navigation_log().is_empty());
        assert!(host.chat_log().is_empty());
        assert_eq!(host.navigation_target(heli), Some(Vec3::ONE));
        assert!(host.entity(heli).is_some());
    }
}
