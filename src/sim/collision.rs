//! Overlap detection and cooldown-gated collision penalties
//!
//! Overlap is binary: two sprites either intersect or they don't. There is no
//! impulse response, only a score penalty that at most one hit per cooldown
//! window may apply.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Millis;

/// Axis-aligned bounding box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box of `size` centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict intersection: boxes that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Last penalised collision plus the window during which further hits are ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionCooldown {
    /// Unarmed until the first penalised hit
    pub last_hit: Option<Millis>,
    pub duration_ms: Millis,
}

impl CollisionCooldown {
    pub fn new(duration_ms: Millis) -> Self {
        Self {
            last_hit: None,
            duration_ms,
        }
    }

    /// True while a hit at `now` must be ignored
    pub fn is_active(&self, now: Millis) -> bool {
        match self.last_hit {
            Some(last) => now.saturating_sub(last) < self.duration_ms,
            None => false,
        }
    }

    pub fn arm(&mut self, now: Millis) {
        self.last_hit = Some(now);
    }

    pub fn reset(&mut self) {
        self.last_hit = None;
    }
}

/// What a single overlap did to the score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Inside the cooldown window: no score change, no warning
    Ignored,
    /// Penalty applied; `score` is the new value (may be <= 0)
    Penalized { score: i32 },
}

/// Apply one overlap event at `now`.
///
/// Simultaneous overlaps are fed in one at a time, so only the first hit of a
/// cooldown window has any effect no matter which pool it came from.
pub fn apply_hit(
    cooldown: &mut CollisionCooldown,
    score: &mut i32,
    penalty: i32,
    now: Millis,
) -> HitOutcome {
    if cooldown.is_active(now) {
        return HitOutcome::Ignored;
    }
    cooldown.arm(now);
    *score = score.saturating_sub(penalty);
    HitOutcome::Penalized { score: *score }
}
