//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per call
//! - Seeded RNG only
//! - Stable iteration order (segment index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod crawler;
pub mod field;
pub mod player;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod wanderer;

pub use collision::{ProjectileHit, player_hits_crawler, player_hits_wanderer, resolve_projectile};
pub use crawler::{Crawler, CrawlerStep, Segment};
pub use field::ObstacleField;
pub use player::{Player, Projectile};
pub use snapshot::{SegmentView, Snapshot};
pub use state::{GameEvent, GamePhase, GameState, HitCause};
pub use tick::{Command, tick};
pub use wanderer::{Wanderer, WandererStep};
