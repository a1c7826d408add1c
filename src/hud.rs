//! Presentation-facing snapshot of the simulation
//!
//! A renderer reads one `Hud` per frame and syncs its sprites and text
//! objects to it. Nothing here feeds back into the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{EntityCategory, GamePhase, GameState};

pub const MENU_TITLE: &str = "Driver Safety Game";
pub const START_BUTTON: &str = "Start Game";
pub const RESTART_BUTTON: &str = "Play Again";

/// Viewports narrower than this get the compact font sizes
pub const NARROW_VIEWPORT: f32 = 600.0;

/// Title and button shown over the road outside of play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlay {
    pub title: String,
    pub button: String,
}

impl Overlay {
    pub fn for_phase(phase: GamePhase, score: i32) -> Option<Self> {
        match phase {
            GamePhase::Menu => Some(Self {
                title: MENU_TITLE.to_string(),
                button: START_BUTTON.to_string(),
            }),
            GamePhase::GameOver => Some(Self {
                title: format!("Game Over!\nFinal Score: {}", score),
                button: RESTART_BUTTON.to_string(),
            }),
            GamePhase::Playing => None,
        }
    }
}

/// Font sizes in px for the current viewport width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudStyle {
    pub score_px: u32,
    pub warning_px: u32,
    pub message_px: u32,
}

impl HudStyle {
    pub fn for_width(width: f32) -> Self {
        if width < NARROW_VIEWPORT {
            Self {
                score_px: 18,
                warning_px: 24,
                message_px: 24,
            }
        } else {
            Self {
                score_px: 24,
                warning_px: 32,
                message_px: 32,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteView {
    pub id: u32,
    pub category: EntityCategory,
    pub sprite: &'static str,
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextView {
    pub id: u32,
    pub text: String,
    pub pos: Vec2,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub phase: GamePhase,
    pub score: i32,
    pub score_text: String,
    pub overlay: Option<Overlay>,
    /// Collision warning, while visible
    pub warning: Option<String>,
    /// Distraction message, while visible
    pub message: Option<String>,
    pub player: Vec2,
    pub entities: Vec<SpriteView>,
    pub scrolling: Vec<TextView>,
}

impl Hud {
    pub fn capture(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            score_text: format!("Score: {}", state.score),
            overlay: Overlay::for_phase(state.phase, state.score),
            warning: state.warning.text().map(str::to_string),
            message: state.message.text().map(str::to_string),
            player: state.player.pos,
            entities: state
                .pools
                .iter()
                .map(|e| SpriteView {
                    id: e.id,
                    category: e.category,
                    sprite: e.sprite_key(),
                    pos: e.pos,
                })
                .collect(),
            scrolling: state
                .advisories
                .messages()
                .iter()
                .map(|m| TextView {
                    id: m.id,
                    text: m.text.clone(),
                    pos: m.pos,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
