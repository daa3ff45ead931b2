//! Prelude module for convenient imports
//!
//! ```rust
//! use leash_core::prelude::*;
//! ```

// Core types
pub use crate::types::{DamageEvent, EntityId, PlayerId};
pub use glam::Vec3;

// Service and outcomes
pub use crate::leash::{LeashOutcome, SkipReason};
pub use crate::router::{DamageOutcome, LeashService};

// Host interfaces
pub use crate::host::{ChatMessage, ChatSink, DeliveryError, EntitySnapshot, Host, Navigator, PlayerSnapshot, WorldQuery};

// Config
pub use crate::config::{ConfigStore, Settings};
