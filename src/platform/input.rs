//! Input event folding
//!
//! Hosts report key and pointer events as they arrive; the simulation wants
//! level state once per tick. `InputState` sits in between.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{DirectionKeys, PointerState, TickInput};

/// One of the four steering directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a DOM `KeyboardEvent.key` / `code` name
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "KeyW" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "KeyS" | "s" | "S" => Some(Direction::Down),
            "ArrowLeft" | "KeyA" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "KeyD" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Raw input from the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Key { direction: Direction, pressed: bool },
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp,
    /// Start / Play Again button
    Start,
}

/// Accumulated input between ticks
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    keys: DirectionKeys,
    pointer: PointerState,
    start_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key { direction, pressed } => {
                let slot = match direction {
                    Direction::Up => &mut self.keys.up,
                    Direction::Down => &mut self.keys.down,
                    Direction::Left => &mut self.keys.left,
                    Direction::Right => &mut self.keys.right,
                };
                *slot = pressed;
            }
            InputEvent::PointerDown(pos) => {
                self.pointer = PointerState {
                    active: true,
                    start: pos,
                    pos,
                };
            }
            InputEvent::PointerMove(pos) => {
                if self.pointer.active {
                    self.pointer.pos = pos;
                }
            }
            InputEvent::PointerUp => self.pointer.active = false,
            InputEvent::Start => self.start_requested = true,
        }
    }

    pub fn keys(&self) -> DirectionKeys {
        self.keys
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Input for the next tick. The start press is consumed.
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            keys: self.keys,
            pointer: self.pointer,
            start: std::mem::take(&mut self.start_requested),
        }
    }

    /// Release everything (focus lost)
    pub fn release_all(&mut self) {
        self.keys = DirectionKeys::default();
        self.pointer.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_press_and_release() {
        let mut input = InputState::new();
        input.apply(InputEvent::Key {
            direction: Direction::Left,
            pressed: true,
        });
        input.apply(InputEvent::Key {
            direction: Direction::Up,
            pressed: true,
        });
        assert!(input.keys().left && input.keys().up);

        input.apply(InputEvent::Key {
            direction: Direction::Left,
            pressed: false,
        });
        assert!(!input.keys().left);
        assert!(input.keys().up);
    }

    #[test]
    fn test_start_is_an_edge() {
        let mut input = InputState::new();
        input.apply(InputEvent::Start);
        assert!(input.take_tick_input().start);
        assert!(!input.take_tick_input().start);
    }

    #[test]
    fn test_pointer_drag_lifecycle() {
        let mut input = InputState::new();
        // Moves without a press are ignored
        input.apply(InputEvent::PointerMove(Vec2::new(10.0, 10.0)));
        assert!(!input.pointer().active);

        input.apply(InputEvent::PointerDown(Vec2::new(100.0, 200.0)));
        input.apply(InputEvent::PointerMove(Vec2::new(150.0, 180.0)));
        let p = input.pointer();
        assert!(p.active);
        assert_eq!(p.start, Vec2::new(100.0, 200.0));
        assert_eq!(p.pos, Vec2::new(150.0, 180.0));

        input.apply(InputEvent::PointerUp);
        assert!(!input.take_tick_input().pointer.active);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("KeyS"), Some(Direction::Down));
        assert_eq!(Direction::from_key("Space"), None);
    }

    #[test]
    fn test_release_all() {
        let mut input = InputState::new();
        input.apply(InputEvent::Key {
            direction: Direction::Right,
            pressed: true,
        });
        input.apply(InputEvent::PointerDown(Vec2::ZERO));
        input.release_all();
        let tick = input.take_tick_input();
        assert_eq!(tick.keys, DirectionKeys::default());
        assert!(!tick.pointer.active);
    }
}
