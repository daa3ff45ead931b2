//! leash_core - Keeps a damaged patrol helicopter close to its attacker
//!
//! This library provides:
//! - AttackerTracker: Most recent attacker per helicopter
//! - Leash enforcement: Distance check and retarget point calculation
//! - Grid labels: World position to map grid reference
//! - Announcements: Server-wide chat when the leash engages
//! - LeashService: Event routing and lifecycle over a host implementation

pub mod broadcast;
pub mod config;
pub mod grid;
pub mod host;
pub mod leash;
pub mod logging;
pub mod prelude;
pub mod router;
pub mod tracker;
pub mod types;

// Re-export core types for convenience
pub use broadcast::{announce, format_message, BroadcastReport};
pub use config::{ConfigError, ConfigStore, LeashConfig, NotificationConfig, Settings};
pub use grid::{grid_label, GridCell};
pub use host::{ChatMessage, ChatSink, DeliveryError, EntitySnapshot, Host, MemoryHost, Navigator, PlayerSnapshot, WorldQuery};
pub use leash::{evaluate, retarget_point, LeashOutcome, SkipReason};
pub use router::{DamageOutcome, LeashService};
pub use tracker::AttackerTracker;
pub use types::{DamageEvent, EntityId, PlayerId};

// Re-export glam so hosts use the same vector type
pub use glam::Vec3;
