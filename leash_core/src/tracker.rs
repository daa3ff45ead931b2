//! AttackerTracker - Most recent attacker per tracked entity

use crate::types::{EntityId, PlayerId};
use std::collections::HashMap;

/// Mapping from a tracked entity to the player who last damaged it
///
/// An association exists for an entity only if it has taken damage from a
/// known player since it spawned or was last forgotten. Each new hit
/// overwrites the previous attacker.
#[derive(Debug, Clone, Default)]
pub struct AttackerTracker {
    associations: HashMap<EntityId, PlayerId>,
}

impl AttackerTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        AttackerTracker {
            associations: HashMap::new(),
        }
    }

    /// Record a hit on `entity`
    ///
    /// An absent attacker is ignored and leaves any existing association in
    /// place. Returns `true` if the attacker was recorded.
    pub fn record(&mut self, entity: EntityId, attacker: Option<PlayerId>) -> bool {
        let Some(attacker) = attacker else {
            return false;
        };
        self.associations.insert(entity, attacker);
        true
    }

    /// Drop the association for `entity`, returning the attacker it held
    pub fn forget(&mut self, entity: EntityId) -> Option<PlayerId> {
        self.associations.remove(&entity)
    }

    /// The most recent attacker of `entity`
    pub fn current_attacker(&self, entity: EntityId) -> Option<PlayerId> {
        self.associations.get(&entity).copied()
    }

    /// Number of entities with a recorded attacker
    pub fn len(&self) -> usize {
        self.associations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.associations.is_empty()
    }

    /// Drop every association
    pub fn clear(&mut self) {
        self.associations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_record_and_lookup() {
        let mut tracker = AttackerTracker::new();
        assert!(tracker.record(EntityId(1), Some(PlayerId(10))));
        assert_eq!(tracker.current_attacker(EntityId(1)), Some(PlayerId(10)));
        assert_eq!(tracker.current_attacker(EntityId(2)), None);
    }

    #[test]
    fn test_latest_attacker_wins() {
        let mut tracker = AttackerTracker::new();
        tracker.record(EntityId(1), Some(PlayerId(10)));
        tracker.record(EntityId(1), Some(PlayerId(11)));
        tracker.record(EntityId(1), Some(PlayerId(12)));

        assert_eq!(tracker.current_attacker(EntityId(1)), Some(PlayerId(12)));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_missing_attacker_is_ignored() {
        let mut tracker = AttackerTracker::new();
        tracker.record(EntityId(1), Some(PlayerId(10)));

        assert!(!tracker.record(EntityId(1), None));
        assert_eq!(tracker.current_attacker(EntityId(1)), Some(PlayerId(10)));

        assert!(!tracker.record(EntityId(2), None));
        assert_eq!(tracker.current_attacker(EntityId(2)), None);
    }

    #[test]
    fn test_forget_then_record() {
        let mut tracker = AttackerTracker::new();
        tracker.record(EntityId(1), Some(PlayerId(10)));

        assert_eq!(tracker.forget(EntityId(1)), Some(PlayerId(10)));
        assert_eq!(tracker.current_attacker(EntityId(1)), None);

        // Forgetting twice is harmless
        assert_eq!(tracker.forget(EntityId(1)), None);

        tracker.record(EntityId(1), Some(PlayerId(20)));
        assert_eq!(tracker.current_attacker(EntityId(1)), Some(PlayerId(20)));
    }

    #[test]
    fn test_entities_are_independent() {
        let mut tracker = AttackerTracker::new();
        tracker.record(EntityId(1), Some(PlayerId(10)));
        tracker.record(EntityId(2), Some(PlayerId(20)));
        tracker.forget(EntityId(1));

        assert_eq!(tracker.current_attacker(EntityId(2)), Some(PlayerId(20)));
        assert_eq!(tracker.len(), 1);

        tracker.clear();
        assert!(tracker.is_empty());
    }

    proptest! {
        #[test]
        fn most_recent_record_wins(attackers in proptest::collection::vec(0u32..50, 1..20)) {
            let mut tracker = AttackerTracker::new();
            for &attacker in &attackers {
                tracker.record(EntityId(1), Some(PlayerId(attacker)));
            }
            let last = attackers.last().copied().map(PlayerId);
            prop_assert_eq!(tracker.current_attacker(EntityId(1)), last);
        }
    }
}
