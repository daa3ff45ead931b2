//! Tick-based helicopter fight against the in-memory host

use crate::scenario::Scenario;
use glam::Vec3;
use leash_core::config::Settings;
use leash_core::host::{MemoryHost, WorldQuery};
use leash_core::leash::LeashOutcome;
use leash_core::logging::LOG_TARGET;
use leash_core::router::{DamageOutcome, LeashService};
use leash_core::types::{DamageEvent, EntityId, PlayerId};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// What happened over a whole run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimStats {
    pub ticks_run: u32,
    pub hits: u32,
    pub retargets: u32,
    pub broadcasts: u32,
    pub messages_delivered: usize,
    /// Tick on which the helicopter went down
    pub destroyed_at: Option<u32>,
    /// Heli to last attacker distance at the end of the run
    pub final_distance: Option<f32>,
}

struct SimPlayer {
    id: PlayerId,
    velocity: Vec3,
    disconnect_at: Option<u32>,
}

/// A running scenario
pub struct Simulation {
    host: MemoryHost,
    service: LeashService,
    heli: Option<EntityId>,
    players: Vec<SimPlayer>,
    rng: StdRng,
    tick: u32,
    ticks: u32,
    speed: f32,
    damage_min: f32,
    damage_max: f32,
    stats: SimStats,
}

impl Simulation {
    pub fn new(scenario: &Scenario, settings: Settings) -> Self {
        let mut host = MemoryHost::new();
        let heli = host.spawn_helicopter(scenario.heli.position, scenario.heli.health);

        let players = scenario
            .players
            .iter()
            .map(|player| SimPlayer {
                id: host.add_player(&player.name, player.position),
                velocity: player.velocity,
                disconnect_at: player.disconnect_at,
            })
            .collect();

        Simulation {
            host,
            service: LeashService::start(settings),
            heli: Some(heli),
            players,
            rng: StdRng::seed_from_u64(scenario.seed),
            tick: 0,
            ticks: scenario.ticks,
            speed: scenario.heli.speed,
            damage_min: scenario.heli.damage_min,
            damage_max: scenario.heli.damage_max,
            stats: SimStats::default(),
        }
    }

    /// Advance one tick
    pub fn step(&mut self) {
        self.tick += 1;
        self.move_players();

        let Some(heli) = self.heli else {
            return;
        };

        let shooters = self.host.connected_players();
        if !shooters.is_empty() {
            let shooter = shooters[self.rng.gen_range(0..shooters.len())];
            self.fire(heli, shooter);
        }

        if self.heli.is_some() {
            self.fly(heli);
        }
    }

    /// Run every tick and return the totals
    pub fn run(mut self) -> SimStats {
        while self.tick < self.ticks {
            self.step();
        }
        self.finish()
    }

    fn finish(mut self) -> SimStats {
        self.stats.ticks_run = self.tick;
        self.stats.final_distance = self.heli.and_then(|heli| {
            let attacker = self.service.current_attacker(heli)?;
            let heli = self.host.entity(heli)?;
            let player = self.host.player(attacker)?;
            Some(heli.position.distance(player.position))
        });
        self.service.shutdown();
        self.stats
    }

    fn move_players(&mut self) {
        for player in &self.players {
            if player.disconnect_at == Some(self.tick) {
                self.host.disconnect(player.id);
                info!(target: LOG_TARGET, "[tick {}] {} disconnected", self.tick, player.id);
            }
            if let Some(state) = self.host.player_mut(player.id) {
                state.position += player.velocity;
            }
        }
    }

    fn fire(&mut self, heli: EntityId, shooter: PlayerId) {
        self.stats.hits += 1;

        // The host reports the hit before the damage lands
        let outcome = self.service.on_entity_damaged(&mut self.host, DamageEvent::new(heli, shooter));
        if let DamageOutcome::Evaluated(leash) = &outcome {
            info!(target: LOG_TARGET, "[tick {}] {} hit heli: {}", self.tick, shooter, leash.summary());
        }
        if let DamageOutcome::Evaluated(LeashOutcome::Retargeted { broadcast, .. }) = outcome {
            self.stats.retargets += 1;
            if let Some(report) = broadcast {
                self.stats.broadcasts += 1;
                self.stats.messages_delivered += report.delivered;
            }
        }

        let damage = self.rng.gen_range(self.damage_min..=self.damage_max);
        let remaining = self.host.damage_entity(heli, damage).unwrap_or(0.0);
        if remaining <= 0.0 {
            self.host.destroy_entity(heli);
            self.service.on_entity_destroyed(heli);
            self.heli = None;
            self.stats.destroyed_at = Some(self.tick);
            info!(target: LOG_TARGET, "[tick {}] heli destroyed", self.tick);
        }
    }

    fn fly(&mut self, heli: EntityId) {
        let Some(target) = self.host.navigation_target(heli) else {
            return;
        };
        let speed = self.speed;
        if let Some(entity) = self.host.entity_mut(heli) {
            let delta = target - entity.position;
            entity.position = if delta.length() <= speed {
                target
            } else {
                entity.position + delta.normalize_or_zero() * speed
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin_run(seed: u64) -> SimStats {
        let mut scenario = Scenario::builtin().unwrap();
        scenario.seed = seed;
        let settings = scenario.resolve_settings().unwrap();
        Simulation::new(&scenario, settings).run()
    }

    #[test]
    fn test_same_seed_same_result() {
        assert_eq!(builtin_run(7), builtin_run(7));
    }

    #[test]
    fn test_builtin_scenario_leashes_and_kills() {
        let stats = builtin_run(42);

        assert_eq!(stats.ticks_run, 60);
        assert!(stats.retargets >= 1);
        assert!(stats.broadcasts >= 1);
        assert!(stats.messages_delivered >= stats.broadcasts as usize);
        // 1000 HP at no less than 40 per hit goes down within 25 hits
        assert!(stats.destroyed_at.unwrap() <= 25);
        assert!(stats.final_distance.is_none());
    }

    #[test]
    fn test_heli_flies_toward_target() {
        let scenario = Scenario::builtin().unwrap();
        let mut settings = scenario.resolve_settings().unwrap();
        settings.leash.health_threshold = 10_000.0;

        let mut sim = Simulation::new(&scenario, settings);
        let start = sim.host.entity(EntityId(0)).unwrap().position;
        sim.step();

        let target = sim.host.navigation_target(EntityId(0)).unwrap();
        let now = sim.host.entity(EntityId(0)).unwrap().position;
        assert!(now.distance(target) < start.distance(target));
    }
}
