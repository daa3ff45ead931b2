//! LeashService - Owns the leash state and routes host events into it
//!
//! Created when the host starts the feature and torn down when it stops.
//! The service is `Send`; a host that dispatches events from several threads
//! should wrap it in `Arc<Mutex<_>>`.

use crate::config::Settings;
use crate::host::Host;
use crate::leash::{evaluate, LeashOutcome};
use crate::logging::LOG_TARGET;
use crate::tracker::AttackerTracker;
use crate::types::{DamageEvent, EntityId, PlayerId};
use log::info;

/// Short prefab names of entities the leash applies to
pub const HELICOPTER_PREFABS: &[&str] = &["patrolhelicopter"];

/// Whether an entity type is subject to the leash
pub fn is_tracked_type(short_type_name: &str) -> bool {
    HELICOPTER_PREFABS.contains(&short_type_name)
}

/// What the router did with a damage event
#[derive(Debug, Clone, PartialEq)]
pub enum DamageOutcome {
    /// The entity handle no longer refers to anything
    InvalidEntity,
    /// Not a tracked entity type
    Ignored,
    /// No known player behind the hit; association left unchanged
    NoAttacker,
    /// Attacker recorded; health still above the threshold
    Recorded,
    /// Attacker recorded and the leash evaluated
    Evaluated(LeashOutcome),
}

/// Leash state for one running server
#[derive(Debug)]
pub struct LeashService {
    settings: Settings,
    tracker: AttackerTracker,
}

impl LeashService {
    /// Start the service with resolved settings
    pub fn start(settings: Settings) -> Self {
        if settings.leash.enable_leash {
            info!(
                target: LOG_TARGET,
                "HeliLeashControl initialized. Leash active below {} HP, Max distance: {}m.",
                settings.leash.health_threshold,
                settings.leash.max_distance
            );
        } else {
            info!(target: LOG_TARGET, "HeliLeashControl is disabled in config.");
        }

        LeashService {
            settings,
            tracker: AttackerTracker::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Swap in new settings. Recorded attackers are kept.
    pub fn reload(&mut self, settings: Settings) {
        info!(target: LOG_TARGET, "Configuration reloaded.");
        self.settings = settings;
    }

    pub fn tracker(&self) -> &AttackerTracker {
        &self.tracker
    }

    /// Most recent attacker of `entity`
    pub fn current_attacker(&self, entity: EntityId) -> Option<PlayerId> {
        self.tracker.current_attacker(entity)
    }

    /// Handle a combat-damage event
    pub fn on_entity_damaged(&mut self, host: &mut impl Host, event: DamageEvent) -> DamageOutcome {
        let Some(entity) = host.entity(event.entity) else {
            return DamageOutcome::InvalidEntity;
        };
        if !is_tracked_type(&entity.short_type_name) {
            return DamageOutcome::Ignored;
        }

        let attacker = event.attacker.filter(|&id| host.player(id).is_some());
        let Some(attacker) = attacker else {
            return DamageOutcome::NoAttacker;
        };
        self.tracker.record(event.entity, Some(attacker));

        if entity.health > self.settings.leash.health_threshold {
            return DamageOutcome::Recorded;
        }

        DamageOutcome::Evaluated(evaluate(host, event.entity, attacker, &self.settings))
    }

    /// Handle an entity being destroyed or despawned
    pub fn on_entity_destroyed(&mut self, entity: EntityId) -> Option<PlayerId> {
        self.tracker.forget(entity)
    }

    /// Stop the service, dropping every association. Returns how many were held.
    pub fn shutdown(mut self) -> usize {
        let dropped = self.tracker.len();
        self.tracker.clear();
        info!(target: LOG_TARGET, "HeliLeashControl unloaded, released {} tracked helicopter(s).", dropped);
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use glam::Vec3;

    #[test]
    fn test_tracked_types() {
        assert!(is_tracked_type("patrolhelicopter"));
        assert!(!is_tracked_type("minicopter.entity"));
    }

    #[test]
    fn test_healthy_heli_is_only_recorded() {
        let mut host = MemoryHost::new();
        let heli = host.spawn_helicopter(Vec3::new(0.0, 0.0, 1000.0), 10_000.0);
        let alice = host.add_player("Alice", Vec3::ZERO);

        let mut service = LeashService::start(Settings::default());
        let outcome = service.on_entity_damaged(&mut host, DamageEvent::new(heli, alice));

        assert_eq!(outcome, DamageOutcome::Recorded);
        assert_eq!(service.current_attacker(heli), Some(alice));
        assert!(host.navigation_log().is_empty());
    }

    #[test]
    fn test_other_entities_are_ignored() {
        let mut host = MemoryHost::new();
        let car = host.spawn_entity("minicopter.entity", Vec3::ZERO, 50.0);
        let alice = host.add_player("Alice", Vec3::ZERO);

        let mut service = LeashService::start(Settings::default());
        let outcome = service.on_entity_damaged(&mut host, DamageEvent::new(car, alice));

        assert_eq!(outcome, DamageOutcome::Ignored);
        assert!(service.tracker().is_empty());
    }

    #[test]
    fn test_unknown_attacker_keeps_previous() {
        let mut host = MemoryHost::new();
        let heli = host.spawn_helicopter(Vec3::ZERO, 10_000.0);
        let alice = host.add_player("Alice", Vec3::ZERO);

        let mut service = LeashService::start(Settings::default());
        service.on_entity_damaged(&mut host, DamageEvent::new(heli, alice));

        let outcome = service.on_entity_damaged(&mut host, DamageEvent::environmental(heli));
        assert_eq!(outcome, DamageOutcome::NoAttacker);

        let outcome = service.on_entity_damaged(&mut host, DamageEvent::new(heli, PlayerId(99)));
        assert_eq!(outcome, DamageOutcome::NoAttacker);

        assert_eq!(service.current_attacker(heli), Some(alice));
    }

    #[test]
    fn test_disabled_still_records() {
        let mut host = MemoryHost::new();
        let heli = host.spawn_helicopter(Vec3::new(0.0, 0.0, 1000.0), 100.0);
        let alice = host.add_player("Alice", Vec3::ZERO);

        let mut settings = Settings::default();
        settings.leash.enable_leash = false;
        let mut service = LeashService::start(settings);

        let outcome = service.on_entity_damaged(&mut host, DamageEvent::new(heli, alice));
        assert!(matches!(outcome, DamageOutcome::Evaluated(LeashOutcome::Skipped(_))));
        assert_eq!(service.current_attacker(heli), Some(alice));
        assert!(host.navigation_log().is_empty());
    }

    #[test]
    fn test_reload_and_shutdown() {
        let mut host = MemoryHost::new();
        let heli = host.spawn_helicopter(Vec3::new(0.0, 0.0, 1000.0), 100.0);
        let alice = host.add_player("Alice", Vec3::ZERO);

        let mut service = LeashService::start(Settings::default());
        service.on_entity_damaged(&mut host, DamageEvent::new(heli, alice));

        let mut settings = Settings::default();
        settings.leash.max_distance = 2000.0;
        service.reload(settings);

        let outcome = service.on_entity_damaged(&mut host, DamageEvent::new(heli, alice));
        assert!(matches!(outcome, DamageOutcome::Evaluated(LeashOutcome::WithinLeash { .. })));

        assert_eq!(service.shutdown(), 1);
    }
}
