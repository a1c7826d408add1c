//! Monotonic clock and frame timing

use std::cell::Cell;

use crate::Millis;
use crate::consts::MAX_FRAME_MS;

/// Source of monotonic milliseconds
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

/// Wall-clock backed monotonic clock, zeroed at construction
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for MonotonicClock {
    fn now_ms(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// `performance.now()` backed clock, zeroed at construction
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: f64,
}

#[cfg(target_arch = "wasm32")]
impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Self::performance_now(),
        }
    }

    fn performance_now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }
}

#[cfg(target_arch = "wasm32")]
impl Clock for MonotonicClock {
    fn now_ms(&self) -> Millis {
        (Self::performance_now() - self.origin).max(0.0) as Millis
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Hand-driven clock for tests and headless runs
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, ms: Millis) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: Millis) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}

/// Converts clock readings into per-frame `dt`
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameTimer {
    last: Option<Millis>,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the previous call (0 on the first), capped to
    /// avoid one giant step after the host was suspended
    pub fn dt(&mut self, clock: &impl Clock) -> Millis {
        let now = clock.now_ms();
        let dt = match self.last {
            Some(last) => now.saturating_sub(last),
            None => 0,
        };
        self.last = Some(now);
        if dt > MAX_FRAME_MS {
            log::debug!("Frame of {}ms clamped to {}ms", dt, MAX_FRAME_MS);
            MAX_FRAME_MS
        } else {
            dt
        }
    }
}
