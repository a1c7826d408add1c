//! Transient notices, distraction messages and scrolling advisory text
//!
//! Hide timers are modelled as values with an expiry time that the tick
//! compares against the clock, so no callbacks outlive the state they touch.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::Millis;
use crate::consts::{ADVISORY_DESPAWN_Y, ADVISORY_ORIGIN};

/// Phone notifications that pop up to distract the driver
pub const DISTRACTIONS: [&str; 4] = [
    "📱 Incoming Text Message",
    "📞 Incoming Call",
    "📧 Incoming Email",
    "💬 Incoming Message",
];

/// Text that scrolls down the road as the run goes on
pub const ADVISORY_TEXT: &str =
    "295/75R22.5, 11R22.5, 11R24.5, 285/75R24.5, 315/80R22.5, 12R22.5, 385/65R22.5, 425/65R22.5";

/// Warning text for a penalised collision
pub fn violation_text(penalty: i32) -> String {
    format!("Safety Violation! -{} points", penalty)
}

/// Text with a hide deadline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub text: String,
    pub expires_at: Millis,
}

/// A single-slot display channel; the newest notice replaces the old one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeChannel {
    current: Option<Notice>,
    duration_ms: Millis,
}

impl NoticeChannel {
    pub fn new(duration_ms: Millis) -> Self {
        Self {
            current: None,
            duration_ms,
        }
    }

    /// Show `text` until `now + duration`, cancelling any pending hide
    pub fn show(&mut self, text: impl Into<String>, now: Millis) {
        self.current = Some(Notice {
            text: text.into(),
            expires_at: now.saturating_add(self.duration_ms),
        });
    }

    /// Drop the notice once its deadline has passed
    pub fn expire(&mut self, now: Millis) {
        if self.current.as_ref().is_some_and(|n| now >= n.expires_at) {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    pub fn text(&self) -> Option<&str> {
        self.current.as_ref().map(|n| n.text.as_str())
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

/// Fires a random distraction whenever the interval has elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistractionScheduler {
    /// `None` fires on the next poll
    last: Option<Millis>,
    interval_ms: Millis,
}

impl DistractionScheduler {
    pub fn new(interval_ms: Millis) -> Self {
        Self {
            last: None,
            interval_ms,
        }
    }

    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn poll(&mut self, now: Millis, rng: &mut Pcg32) -> Option<&'static str> {
        let due = match self.last {
            Some(last) => now.saturating_sub(last) > self.interval_ms,
            None => true,
        };
        if !due {
            return None;
        }
        self.last = Some(now);
        Some(DISTRACTIONS[rng.random_range(0..DISTRACTIONS.len())])
    }
}

/// A line of advisory text scrolling down the playfield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollingMessage {
    pub id: u32,
    pub text: String,
    pub pos: Vec2,
}

/// Spawns advisory text on the difficulty-controlled interval and scrolls it
#[derive(Debug, Clone, Default)]
pub struct AdvisoryTicker {
    messages: Vec<ScrollingMessage>,
    last_spawn: Option<Millis>,
    next_id: u32,
}

impl AdvisoryTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ScrollingMessage] {
        &self.messages
    }

    /// Append a new line if `interval` has elapsed since the previous one
    pub fn poll_spawn(&mut self, now: Millis, interval_ms: Millis) -> bool {
        let due = match self.last_spawn {
            Some(last) => now.saturating_sub(last) >= interval_ms,
            None => true,
        };
        if due {
            self.next_id += 1;
            self.messages.push(ScrollingMessage {
                id: self.next_id,
                text: ADVISORY_TEXT.to_string(),
                pos: ADVISORY_ORIGIN,
            });
            self.last_spawn = Some(now);
        }
        due
    }

    /// Move every line down by `speed`; drop those past the bottom.
    /// Returns how many were removed.
    pub fn scroll(&mut self, speed: f32) -> usize {
        let before = self.messages.len();
        for msg in &mut self.messages {
            msg.pos.y += speed;
        }
        self.messages.retain(|m| m.pos.y <= ADVISORY_DESPAWN_Y);
        before - self.messages.len()
    }

    /// Remove every line; the spawn cadence carries on
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
