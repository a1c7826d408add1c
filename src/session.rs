//! Scene lifecycle and the seam to the rendering engine
//!
//! The host engine drives a `Scene` with input events and frame ticks; after
//! every tick the session hands its `Presenter` the events and a fresh HUD.

use std::collections::VecDeque;

use crate::Millis;
use crate::hud::Hud;
use crate::platform::{InputEvent, InputState};
use crate::sim::{GameEvent, GameState, tick};
use crate::tuning::Tuning;

/// Lifecycle a host engine drives
pub trait Scene {
    /// Called once before the first tick
    fn initialize(&mut self);
    /// Called for every raw input event, between ticks
    fn on_input(&mut self, event: InputEvent);
    /// Advance by `dt` milliseconds
    fn tick(&mut self, dt: Millis);
}

/// Rendering/audio collaborator, injected at construction
pub trait Presenter {
    /// React to a simulation event (sound cue, screen flash)
    fn on_event(&mut self, _event: &GameEvent) {}
    /// Sync visuals to the latest snapshot
    fn present(&mut self, hud: &Hud);
}

/// Events a `LatestHud` holds before dropping the oldest
pub const EVENT_BUFFER_CAPACITY: usize = 256;

/// Presenter that keeps the most recent snapshot and a bounded backlog of
/// events. Hosts drain `events` when they want them; once the backlog is full
/// the oldest events are dropped and counted in `dropped_events`.
#[derive(Debug, Default)]
pub struct LatestHud {
    pub hud: Option<Hud>,
    pub events: VecDeque<GameEvent>,
    pub dropped_events: u64,
}

impl Presenter for LatestHud {
    fn on_event(&mut self, event: &GameEvent) {
        if self.events.len() >= EVENT_BUFFER_CAPACITY {
            self.events.pop_front();
            self.dropped_events += 1;
        }
        self.events.push_back(event.clone());
    }

    fn present(&mut self, hud: &Hud) {
        self.hud = Some(hud.clone());
    }
}

/// A game session: state, pending input and its presenter
#[derive(Debug)]
pub struct Session<P: Presenter> {
    state: GameState,
    input: InputState,
    presenter: P,
}

impl<P: Presenter> Session<P> {
    pub fn new(seed: u64, tuning: Tuning, presenter: P) -> Self {
        Self {
            state: GameState::new(seed, tuning),
            input: InputState::new(),
            presenter,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Drop held keys and any drag (focus lost)
    pub fn release_input(&mut self) {
        self.input.release_all();
    }

    fn publish(&mut self) {
        for event in self.state.drain_events() {
            self.presenter.on_event(&event);
        }
        self.presenter.present(&Hud::capture(&self.state));
    }
}

impl<P: Presenter> Scene for Session<P> {
    fn initialize(&mut self) {
        log::info!(
            "Session initialized (seed {}, cooldown {}ms, touch {})",
            self.state.seed,
            self.state.tuning.collision_cooldown_ms,
            if self.state.tuning.drag.enabled { "on" } else { "off" }
        );
        self.publish();
    }

    fn on_input(&mut self, event: InputEvent) {
        self.input.apply(event);
    }

    fn tick(&mut self, dt: Millis) {
        let input = self.input.take_tick_input();
        tick(&mut self.state, &input, dt);
        self.publish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Direction;
    use crate::sim::GamePhase;

    fn session() -> Session<LatestHud> {
        let mut session = Session::new(8, Tuning::default(), LatestHud::default());
        session.initialize();
        session
    }

    #[test]
    fn test_initialize_presents_menu() {
        let session = session();
        let hud = session.presenter().hud.as_ref().expect("presented");
        assert_eq!(hud.phase, GamePhase::Menu);
    }

    #[test]
    fn test_start_event_reaches_presenter() {
        let mut session = session();
        session.on_input(InputEvent::Start);
        session.tick(16);
        assert_eq!(session.state().phase, GamePhase::Playing);
        assert!(
            session
                .presenter()
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::GameStarted { run: 1 }))
        );
        // Events are handed over, not kept in the state
        assert!(session.state().events().is_empty());
    }

    #[test]
    fn test_event_backlog_is_bounded() {
        let mut session = session();
        session.on_input(InputEvent::Start);
        session.tick(0);
        // A car parked on the player reports a collision every frame
        for _ in 0..3600 {
            let pos = session.state().player.pos;
            if let Some(car) = session.state_mut().pools.traffic.iter_mut().next() {
                car.pos = pos;
            }
            session.tick(16);
            if session.state().phase != GamePhase::Playing {
                session.on_input(InputEvent::Start);
            }
        }
        let presenter = session.presenter();
        assert_eq!(presenter.events.len(), EVENT_BUFFER_CAPACITY);
        assert!(presenter.dropped_events > 0);
    }

    #[test]
    fn test_held_key_applies_every_tick() {
        let mut session = session();
        session.on_input(InputEvent::Start);
        session.tick(0);
        session.on_input(InputEvent::Key {
            direction: Direction::Right,
            pressed: true,
        });
        session.tick(16);
        session.tick(16);
        assert_eq!(session.state().player.pos.x, 408.0);

        session.release_input();
        session.tick(16);
        assert_eq!(session.state().player.pos.x, 408.0);
    }
}
