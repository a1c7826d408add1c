//! Browser entry point
//!
//! Exposes a session to a JavaScript rendering engine. The engine forwards
//! key/pointer events, calls `frame()` from its update callback and draws
//! the returned HUD JSON.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::hud::HudStyle;
use crate::platform::{Direction, FrameTimer, InputEvent, MonotonicClock};
use crate::session::{LatestHud, Scene, Session};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Driver Safety starting...");
}

#[wasm_bindgen]
pub struct WebSession {
    session: Session<LatestHud>,
    clock: MonotonicClock,
    timer: FrameTimer,
}

#[wasm_bindgen]
impl WebSession {
    /// `seed` of `None` seeds from the clock; `tuning_json` overrides balance
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>, tuning_json: Option<String>) -> Result<WebSession, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Tuning::default(),
        };
        let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
        let mut session = Session::new(seed, tuning, LatestHud::default());
        session.initialize();
        Ok(WebSession {
            session,
            clock: MonotonicClock::new(),
            timer: FrameTimer::new(),
        })
    }

    /// Keyboard event; `key` is a DOM key or code name
    pub fn key(&mut self, key: &str, pressed: bool) -> bool {
        match Direction::from_key(key) {
            Some(direction) => {
                self.session.on_input(InputEvent::Key { direction, pressed });
                true
            }
            None => false,
        }
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.session.on_input(InputEvent::PointerDown(Vec2::new(x, y)));
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.session.on_input(InputEvent::PointerMove(Vec2::new(x, y)));
    }

    pub fn pointer_up(&mut self) {
        self.session.on_input(InputEvent::PointerUp);
    }

    /// Start / Play Again button
    pub fn press_start(&mut self) {
        self.session.on_input(InputEvent::Start);
    }

    /// Window lost focus
    pub fn blur(&mut self) {
        self.session.release_input();
    }

    /// Advance by the real time since the last frame and return the HUD JSON
    pub fn frame(&mut self) -> Result<String, JsValue> {
        let dt = self.timer.dt(&self.clock);
        self.session.tick(dt);
        self.hud_json()
    }

    pub fn hud_json(&self) -> Result<String, JsValue> {
        let hud = self
            .session
            .presenter()
            .hud
            .as_ref()
            .ok_or_else(|| JsValue::from_str("no frame presented yet"))?;
        hud.to_json().map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Events since the last call, as a JSON array. Only the newest
    /// `EVENT_BUFFER_CAPACITY` are kept between calls.
    pub fn take_events_json(&mut self) -> Result<String, JsValue> {
        let events = std::mem::take(&mut self.session.presenter_mut().events);
        serde_json::to_string(&events).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Font sizes for a viewport width, as JSON
    pub fn style_json(width: f32) -> Result<String, JsValue> {
        serde_json::to_string(&HudStyle::for_width(width))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn score(&self) -> i32 {
        self.session.state().score
    }

    pub fn phase(&self) -> String {
        self.session.state().phase.as_str().to_string()
    }

    /// Simulation clock in ms (sum of the capped frame deltas)
    pub fn now(&self) -> f64 {
        self.session.state().now as f64
    }
}
