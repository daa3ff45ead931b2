//! Leash enforcement - Pull a damaged helicopter back toward its attacker
//!
//! Once the helicopter is at or below the health threshold and further than
//! `max_distance` from the player who last hit it, its navigation target is
//! moved to a point between the two, `max_distance / 2` short of the
//! attacker, and the server is told about it.

use crate::broadcast::{announce, BroadcastReport};
use crate::config::Settings;
use crate::host::Host;
use crate::logging::LOG_TARGET;
use crate::types::{EntityId, PlayerId};
use glam::Vec3;
use log::info;

/// Why an evaluation did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Leash behaviour is turned off in settings
    Disabled,
    /// Entity handle no longer valid
    EntityMissing,
    EntityDead,
    /// Attacker handle no longer valid
    AttackerMissing,
    AttackerDead,
    AttackerDisconnected,
    /// Entity health is still above the threshold
    AboveThreshold,
    /// Entity has no navigation controller to command
    NoNavigator,
    /// Entity and attacker positions give no usable direction
    DegenerateGeometry,
}

/// Result of one leash evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum LeashOutcome {
    /// A precondition failed; nothing was done
    Skipped(SkipReason),
    /// Entity is close enough to its attacker
    WithinLeash { distance: f32 },
    /// A new navigation target was issued
    Retargeted {
        target: Vec3,
        distance: f32,
        /// `None` when chat is disabled or the attacker could not be announced
        broadcast: Option<BroadcastReport>,
    },
}

impl LeashOutcome {
    /// Whether a navigation command was issued
    pub fn is_retarget(&self) -> bool {
        matches!(self, LeashOutcome::Retargeted { .. })
    }

    /// The commanded target, if any
    pub fn target(&self) -> Option<Vec3> {
        match self {
            LeashOutcome::Retargeted { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// The measured distance, if the evaluation got that far
    pub fn distance(&self) -> Option<f32> {
        match self {
            LeashOutcome::WithinLeash { distance } | LeashOutcome::Retargeted { distance, .. } => Some(*distance),
            LeashOutcome::Skipped(_) => None,
        }
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        match self {
            LeashOutcome::Skipped(reason) => format!("skipped ({:?})", reason),
            LeashOutcome::WithinLeash { distance } => format!("within leash at {:.1}m", distance),
            LeashOutcome::Retargeted { target, distance, broadcast } => {
                let mut summary = format!(
                    "retargeted to ({:.1}, {:.1}, {:.1}) from {:.1}m",
                    target.x, target.y, target.z, distance
                );
                if let Some(report) = broadcast {
                    summary.push_str(&format!(", announced to {}", report.delivered));
                }
                summary
            }
        }
    }
}

/// Point `offset` units short of the attacker on the line from the entity
///
/// Returns `None` when the two positions coincide or are not finite.
pub fn retarget_point(entity: Vec3, attacker: Vec3, offset: f32) -> Option<Vec3> {
    let direction = (attacker - entity).try_normalize()?;
    Some(attacker - direction * offset)
}

/// Decide whether `entity` has strayed too far from `attacker` and pull it back
pub fn evaluate(host: &mut impl Host, entity: EntityId, attacker: PlayerId, settings: &Settings) -> LeashOutcome {
    let leash = &settings.leash;
    if !leash.enable_leash {
        return LeashOutcome::Skipped(SkipReason::Disabled);
    }

    let Some(heli) = host.entity(entity) else {
        return LeashOutcome::Skipped(SkipReason::EntityMissing);
    };
    if !heli.alive {
        return LeashOutcome::Skipped(SkipReason::EntityDead);
    }

    let Some(player) = host.player(attacker) else {
        return LeashOutcome::Skipped(SkipReason::AttackerMissing);
    };
    if !player.alive {
        return LeashOutcome::Skipped(SkipReason::AttackerDead);
    }
    if !player.connected {
        return LeashOutcome::Skipped(SkipReason::AttackerDisconnected);
    }

    if heli.health > leash.health_threshold {
        return LeashOutcome::Skipped(SkipReason::AboveThreshold);
    }

    let distance = heli.position.distance(player.position);
    if distance <= leash.max_distance {
        return LeashOutcome::WithinLeash { distance };
    }

    if !heli.has_navigator {
        return LeashOutcome::Skipped(SkipReason::NoNavigator);
    }

    let Some(target) = retarget_point(heli.position, player.position, leash.retarget_offset()) else {
        return LeashOutcome::Skipped(SkipReason::DegenerateGeometry);
    };

    host.set_navigation_target(entity, target);

    if leash.enable_debug {
        info!(
            target: LOG_TARGET,
            "Pulled heli back to {}, distance was {:.1}m.", player.display_name, distance
        );
    }

    let broadcast = announce(host, attacker, &settings.notification);

    LeashOutcome::Retargeted {
        target,
        distance,
        broadcast,
    }
}
