//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the `dt` handed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (pool slot order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod notify;
pub mod player;
pub mod pool;
pub mod scoring;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CollisionCooldown, HitOutcome, apply_hit};
pub use notify::{
    ADVISORY_TEXT, AdvisoryTicker, DISTRACTIONS, DistractionScheduler, Notice, NoticeChannel,
    ScrollingMessage,
};
pub use player::{DirectionKeys, Player, PointerState};
pub use pool::{EntityCategory, EntityPool, EntityPools, HazardKind, PooledEntity};
pub use scoring::{Difficulty, ScoreClock};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
