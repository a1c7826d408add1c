//! Survival score and difficulty ramp

use serde::{Deserialize, Serialize};

use crate::Millis;
use crate::tuning::{RampMode, Tuning};

/// Time-based score accrual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreClock {
    /// Reference point for the next bonus
    pub last_update: Millis,
}

impl ScoreClock {
    pub fn new(now: Millis) -> Self {
        Self { last_update: now }
    }

    pub fn reset(&mut self, now: Millis) {
        self.last_update = now;
    }

    /// Add `bonus` if at least `interval` has passed since the last one.
    /// The reference restarts at `now`, so late frames are not caught up.
    pub fn tick(&mut self, now: Millis, interval: Millis, bonus: i32, score: &mut i32) -> bool {
        if now.saturating_sub(self.last_update) >= interval {
            *score = score.saturating_add(bonus);
            self.last_update = now;
            true
        } else {
            false
        }
    }
}

/// Global scroll/spawn parameters that intensify with score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Pooled entity scroll per tick
    pub base_speed: f32,
    /// Advisory text scroll per tick
    pub text_scroll_speed: f32,
    pub text_spawn_interval_ms: Millis,
    /// Highest score band (score / step) reached this run
    pub band: i32,
    /// Ramps applied this run
    pub level: u32,
}

impl Difficulty {
    /// Base values for a fresh run
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            base_speed: tuning.base_speed,
            text_scroll_speed: tuning.text_scroll_speed,
            text_spawn_interval_ms: tuning.text_spawn_interval_ms,
            band: tuning.start_score.div_euclid(tuning.ramp_score_step),
            level: 0,
        }
    }

    /// One intensification step
    pub fn ramp(&mut self, tuning: &Tuning) {
        self.base_speed += tuning.ramp_speed_step;
        self.text_scroll_speed += tuning.ramp_text_speed_step;
        self.text_spawn_interval_ms = self
            .text_spawn_interval_ms
            .saturating_sub(tuning.ramp_interval_step_ms)
            .max(tuning.min_text_spawn_interval_ms);
        self.level += 1;
    }

    /// Ramp for the current score. Returns how many steps were applied.
    pub fn check_ramp(&mut self, score: i32, tuning: &Tuning) -> u32 {
        let step = tuning.ramp_score_step;
        match tuning.ramp_mode {
            RampMode::ExactMultiple => {
                if score.rem_euclid(step) == 0 {
                    self.ramp(tuning);
                    1
                } else {
                    0
                }
            }
            RampMode::Crossing => {
                let band = score.div_euclid(step);
                let mut applied = 0;
                while self.band < band {
                    self.band += 1;
                    self.ramp(tuning);
                    applied += 1;
                }
                applied
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bonus_every_interval() {
        let mut clock = ScoreClock::new(0);
        let mut score = 100;
        for t in (100..=5000).step_by(100) {
            clock.tick(t, 1000, 5, &mut score);
        }
        assert_eq!(score, 125);
    }

    #[test]
    fn test_bonus_saturates_score() {
        let mut clock = ScoreClock::new(0);
        let mut score = i32::MAX - 1;
        assert!(clock.tick(1000, 1000, 5, &mut score));
        assert_eq!(score, i32::MAX);
    }

    #[test]
    fn test_no_bonus_before_interval() {
        let mut clock = ScoreClock::new(0);
        let mut score = 100;
        assert!(!clock.tick(999, 1000, 5, &mut score));
        assert_eq!(score, 100);
        assert!(clock.tick(1000, 1000, 5, &mut score));
        assert_eq!(score, 105);
    }

    #[test]
    fn test_late_frame_resets_reference() {
        let mut clock = ScoreClock::new(0);
        let mut score = 0;
        clock.tick(1700, 1000, 5, &mut score);
        assert_eq!(clock.last_update, 1700);
        assert!(!clock.tick(2500, 1000, 5, &mut score));
        assert!(clock.tick(2700, 1000, 5, &mut score));
        assert_eq!(score, 10);
    }

    #[test]
    fn test_ramp_step_values() {
        let tuning = Tuning::default();
        let mut d = Difficulty::new(&tuning);
        d.ramp(&tuning);
        assert!((d.base_speed - 1.25).abs() < 1e-6);
        assert!((d.text_scroll_speed - 2.1).abs() < 1e-6);
        assert_eq!(d.text_spawn_interval_ms, 1900);
        assert_eq!(d.level, 1);
    }

    #[test]
    fn test_spawn_interval_floors_at_minimum() {
        let tuning = Tuning::default();
        let mut d = Difficulty::new(&tuning);
        for _ in 0..40 {
            d.ramp(&tuning);
        }
        assert_eq!(d.text_spawn_interval_ms, 500);
    }

    #[test]
    fn test_crossing_fires_once_per_new_band() {
        let tuning = Tuning::default();
        let mut d = Difficulty::new(&tuning);
        // Starting band (100) never fires
        assert_eq!(d.check_ramp(100, &tuning), 0);
        assert_eq!(d.check_ramp(195, &tuning), 0);
        assert_eq!(d.check_ramp(205, &tuning), 1);
        // Staying in, or dropping out of and back into, the band does nothing
        assert_eq!(d.check_ramp(210, &tuning), 0);
        assert_eq!(d.check_ramp(185, &tuning), 0);
        assert_eq!(d.check_ramp(200, &tuning), 0);
        assert_eq!(d.check_ramp(300, &tuning), 1);
        assert_eq!(d.level, 2);
    }

    #[test]
    fn test_crossing_catches_up_multiple_bands() {
        let tuning = Tuning::default();
        let mut d = Difficulty::new(&tuning);
        assert_eq!(d.check_ramp(420, &tuning), 3);
        assert_eq!(d.band, 4);
    }

    #[test]
    fn test_exact_multiple_refires_every_check() {
        let tuning = Tuning {
            ramp_mode: RampMode::ExactMultiple,
            ..Tuning::default()
        };
        let mut d = Difficulty::new(&tuning);
        assert_eq!(d.check_ramp(100, &tuning), 1);
        assert_eq!(d.check_ramp(100, &tuning), 1);
        assert_eq!(d.check_ramp(105, &tuning), 0);
        assert_eq!(d.level, 2);
    }
}
