//! Player car and its controller
//!
//! No velocity model: each tick the held keys (and an active drag) displace
//! the car directly, then the position is clamped to the drivable region.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;
use crate::tuning::{DragAnchor, DragTuning};

/// Level state of the four direction keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionKeys {
    /// Unit step per axis. Left beats right and up beats down when both are held.
    pub fn axis(&self) -> Vec2 {
        let x = if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        };
        let y = if self.up {
            -1.0
        } else if self.down {
            1.0
        } else {
            0.0
        };
        Vec2::new(x, y)
    }
}

/// Touch/mouse drag state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub active: bool,
    /// Where the current press started
    pub start: Vec2,
    /// Latest pointer position
    pub pos: Vec2,
}

impl PointerState {
    /// Per-tick displacement requested by the drag, if any
    pub fn drag_delta(&self, drag: &DragTuning) -> Option<Vec2> {
        if !self.active || !drag.enabled {
            return None;
        }
        let anchor = match drag.anchor {
            DragAnchor::PressPoint => self.start,
            DragAnchor::ScreenCenter => PLAYFIELD_CENTER,
        };
        Some((self.pos - anchor) / drag.divisor * drag.gain)
    }
}

/// The single player car, reused across restarts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
}

impl Default for Player {
    fn default() -> Self {
        Self { pos: PLAYER_START }
    }
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the start position
    pub fn reset(&mut self) {
        self.pos = PLAYER_START;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, CAR_SIZE * SPRITE_SCALE)
    }

    /// Apply one tick of keyboard and drag movement, then clamp
    pub fn steer(&mut self, keys: &DirectionKeys, step: f32, pointer: &PointerState, drag: &DragTuning) {
        self.pos += keys.axis() * step;
        if let Some(delta) = pointer.drag_delta(drag) {
            self.pos += delta;
        }
        self.clamp();
    }

    /// Keep the car inside the drivable region
    pub fn clamp(&mut self) {
        self.pos = self.pos.clamp(PLAYER_MIN, PLAYER_MAX);
    }
}
