//! Data-driven game balance
//!
//! Every number that shapes a run lives here so a host can override it from
//! JSON without rebuilding. Missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::Millis;
use crate::error::TuningError;

/// Upper bound for any score-valued setting
pub const MAX_SCORE_SETTING: i32 = 1_000_000;
/// Upper bound for any duration setting (one hour)
pub const MAX_DURATION_MS: Millis = 60 * 60 * 1000;

/// When the difficulty ramp fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RampMode {
    /// Once per new multiple-of-step band the score climbs into
    #[default]
    Crossing,
    /// Every tick the score sits on an exact multiple of the step
    ExactMultiple,
}

/// Reference point the touch-drag vector is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DragAnchor {
    /// Where the pointer first went down
    #[default]
    PressPoint,
    /// Centre of the playfield
    ScreenCenter,
}

impl RampMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RampMode::Crossing => "Crossing",
            RampMode::ExactMultiple => "ExactMultiple",
        }
    }
}

/// Touch-drag controls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragTuning {
    pub enabled: bool,
    pub anchor: DragAnchor,
    /// Pointer offset is divided by this...
    pub divisor: f32,
    /// ...then multiplied by this, per tick
    pub gain: f32,
}

impl Default for DragTuning {
    fn default() -> Self {
        Self {
            enabled: true,
            anchor: DragAnchor::PressPoint,
            divisor: 50.0,
            gain: 2.0,
        }
    }
}

/// Game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Score ===
    /// Score on every entry into Playing
    pub start_score: i32,
    /// Survival bonus cadence
    pub score_interval_ms: Millis,
    pub score_bonus: i32,
    pub collision_penalty: i32,
    /// Penalised collisions are at least this far apart (0 = every overlap counts)
    pub collision_cooldown_ms: Millis,

    // === Difficulty ===
    pub base_speed: f32,
    pub text_scroll_speed: f32,
    pub text_spawn_interval_ms: Millis,
    pub min_text_spawn_interval_ms: Millis,
    pub ramp_mode: RampMode,
    pub ramp_score_step: i32,
    pub ramp_speed_step: f32,
    pub ramp_text_speed_step: f32,
    pub ramp_interval_step_ms: Millis,

    // === Controls ===
    /// Keyboard displacement per tick per axis
    pub player_step: f32,
    pub drag: DragTuning,

    // === Notifications ===
    pub warning_ms: Millis,
    pub message_ms: Millis,
    pub distraction_interval_ms: Millis,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            start_score: 100,
            score_interval_ms: 1000,
            score_bonus: 5,
            collision_penalty: 20,
            collision_cooldown_ms: 1000,

            base_speed: 1.2,
            text_scroll_speed: 2.0,
            text_spawn_interval_ms: 2000,
            min_text_spawn_interval_ms: 500,
            ramp_mode: RampMode::Crossing,
            ramp_score_step: 100,
            ramp_speed_step: 0.05,
            ramp_text_speed_step: 0.1,
            ramp_interval_step_ms: 100,

            player_step: 4.0,
            drag: DragTuning::default(),

            warning_ms: 2000,
            message_ms: 3000,
            distraction_interval_ms: 8000,
        }
    }
}

impl Tuning {
    /// Keyboard-only variant where every overlap is penalised
    pub fn simple_variant() -> Self {
        Self {
            collision_cooldown_ms: 0,
            drag: DragTuning {
                enabled: false,
                ..DragTuning::default()
            },
            ..Self::default()
        }
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a JSON file from disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.start_score <= 0 {
            return Err(TuningError::invalid(
                "start_score",
                format!("must be positive, got {}", self.start_score),
            ));
        }
        for (field, value) in [
            ("start_score", self.start_score),
            ("score_bonus", self.score_bonus),
            ("collision_penalty", self.collision_penalty),
        ] {
            if !(0..=MAX_SCORE_SETTING).contains(&value) {
                return Err(TuningError::invalid(
                    field,
                    format!("must be within 0..={}, got {}", MAX_SCORE_SETTING, value),
                ));
            }
        }
        for (field, value) in [
            ("score_interval_ms", self.score_interval_ms),
            ("collision_cooldown_ms", self.collision_cooldown_ms),
            ("text_spawn_interval_ms", self.text_spawn_interval_ms),
            ("ramp_interval_step_ms", self.ramp_interval_step_ms),
            ("warning_ms", self.warning_ms),
            ("message_ms", self.message_ms),
            ("distraction_interval_ms", self.distraction_interval_ms),
        ] {
            if value > MAX_DURATION_MS {
                return Err(TuningError::invalid(
                    field,
                    format!("must be at most {}ms, got {}", MAX_DURATION_MS, value),
                ));
            }
        }
        if self.score_interval_ms == 0 {
            return Err(TuningError::invalid("score_interval_ms", "must be non-zero"));
        }
        if self.ramp_score_step <= 0 {
            return Err(TuningError::invalid(
                "ramp_score_step",
                format!("must be positive, got {}", self.ramp_score_step),
            ));
        }
        if self.min_text_spawn_interval_ms == 0 {
            return Err(TuningError::invalid(
                "min_text_spawn_interval_ms",
                "must be non-zero",
            ));
        }
        if self.text_spawn_interval_ms < self.min_text_spawn_interval_ms {
            return Err(TuningError::invalid(
                "text_spawn_interval_ms",
                format!(
                    "{} is below the floor of {}",
                    self.text_spawn_interval_ms, self.min_text_spawn_interval_ms
                ),
            ));
        }
        for (field, value) in [
            ("base_speed", self.base_speed),
            ("text_scroll_speed", self.text_scroll_speed),
            ("ramp_speed_step", self.ramp_speed_step),
            ("ramp_text_speed_step", self.ramp_text_speed_step),
            ("player_step", self.player_step),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::invalid(
                    field,
                    format!("must be finite and non-negative, got {}", value),
                ));
            }
        }
        if !self.drag.divisor.is_finite() || self.drag.divisor <= 0.0 {
            return Err(TuningError::invalid(
                "drag.divisor",
                format!("must be positive, got {}", self.drag.divisor),
            ));
        }
        if !self.drag.gain.is_finite() {
            return Err(TuningError::invalid("drag.gain", "must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.start_score, 100);
        assert_eq!(tuning.collision_cooldown_ms, 1000);
        assert!(tuning.drag.enabled);
    }

    #[test]
    fn test_simple_variant_is_a_subset() {
        let simple = Tuning::simple_variant();
        assert_eq!(simple.collision_cooldown_ms, 0);
        assert!(!simple.drag.enabled);
        // Everything else matches the canonical variant
        assert_eq!(simple.base_speed, Tuning::default().base_speed);
        assert!(simple.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "base_speed": 2.5, "drag": { "gain": 3.0 } }"#)
            .expect("valid tuning");
        assert_eq!(tuning.base_speed, 2.5);
        assert_eq!(tuning.drag.gain, 3.0);
        assert_eq!(tuning.drag.divisor, 50.0);
        assert_eq!(tuning.start_score, 100);
        assert_eq!(tuning.ramp_mode, RampMode::Crossing);
    }

    #[test]
    fn test_ramp_mode_from_json() {
        let tuning = Tuning::from_json(r#"{ "ramp_mode": "ExactMultiple" }"#).expect("valid");
        assert_eq!(tuning.ramp_mode, RampMode::ExactMultiple);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json("{ base_speed: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_spawn_interval_below_floor_rejected() {
        let err = Tuning::from_json(r#"{ "text_spawn_interval_ms": 100 }"#).unwrap_err();
        match err {
            TuningError::Invalid { field, .. } => assert_eq!(field, "text_spawn_interval_ms"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let mut tuning = Tuning::default();
        tuning.drag.divisor = 0.0;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Invalid { field: "drag.divisor", .. })
        ));
    }

    fn rejected_field(json: &str) -> &'static str {
        match Tuning::from_json(json) {
            Err(TuningError::Invalid { field, .. }) => field,
            other => panic!("expected Invalid for {json}, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert_eq!(
            rejected_field(r#"{ "message_ms": 18446744073709551615 }"#),
            "message_ms"
        );
        assert_eq!(rejected_field(r#"{ "warning_ms": 3600001 }"#), "warning_ms");
        assert_eq!(
            rejected_field(r#"{ "distraction_interval_ms": 99999999999 }"#),
            "distraction_interval_ms"
        );
        assert_eq!(rejected_field(r#"{ "score_bonus": -5 }"#), "score_bonus");
        assert_eq!(
            rejected_field(r#"{ "collision_penalty": -20 }"#),
            "collision_penalty"
        );
        assert_eq!(rejected_field(r#"{ "start_score": 2147483647 }"#), "start_score");
    }

    #[test]
    fn test_limits_themselves_are_accepted() {
        let json = format!(
            r#"{{ "message_ms": {}, "score_bonus": {} }}"#,
            MAX_DURATION_MS, MAX_SCORE_SETTING
        );
        assert!(Tuning::from_json(&json).is_ok());
    }

    #[test]
    fn test_json_round_trip_preserves_values() {
        let mut tuning = Tuning::default();
        tuning.collision_cooldown_ms = 750;
        let json = tuning.to_json().expect("serializable");
        assert_eq!(Tuning::from_json(&json).expect("valid"), tuning);
    }
}
