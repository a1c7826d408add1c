//! End-to-end scenarios driven through the public session API

use driver_safety::platform::{Direction, InputEvent};
use driver_safety::sim::{GameEvent, GamePhase, GameState};
use driver_safety::{LatestHud, Scene, Session, Tuning};

fn started_session(tuning: Tuning) -> Session<LatestHud> {
    let mut session = Session::new(2024, tuning, LatestHud::default());
    session.initialize();
    session.on_input(InputEvent::Start);
    session.tick(0);
    assert_eq!(session.state().phase, GamePhase::Playing);
    session.presenter_mut().events.clear();
    session
}

/// Put the first traffic car on top of the player
fn force_overlap(state: &mut GameState) {
    let pos = state.player.pos;
    if let Some(car) = state.pools.traffic.iter_mut().next() {
        car.pos = pos;
    }
}

fn penalty_scores(session: &Session<LatestHud>) -> Vec<i32> {
    session
        .presenter()
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Collision { score, .. } => Some(*score),
            _ => None,
        })
        .collect()
}

#[test]
fn collision_penalty_respects_cooldown() {
    let mut session = started_session(Tuning::default());

    force_overlap(session.state_mut());
    session.tick(0);
    assert_eq!(session.state().score, 80);
    let hud = session.presenter().hud.as_ref().expect("hud");
    assert_eq!(hud.warning.as_deref(), Some("Safety Violation! -20 points"));

    force_overlap(session.state_mut());
    session.tick(500);
    assert_eq!(session.state().score, 80);

    force_overlap(session.state_mut());
    session.tick(1000);
    assert_eq!(penalty_scores(&session), vec![80, 60]);
}

#[test]
fn five_seconds_without_collisions() {
    let mut session = started_session(Tuning::default());
    for _ in 0..50 {
        session.tick(100);
    }
    assert_eq!(session.state().score, 125);
    let hud = session.presenter().hud.as_ref().expect("hud");
    assert_eq!(hud.score_text, "Score: 125");
}

#[test]
fn score_to_zero_shows_final_score() {
    let mut session = started_session(Tuning::simple_variant());
    // Five penalties of 20 take 100 to exactly 0
    for _ in 0..5 {
        force_overlap(session.state_mut());
        session.tick(0);
    }
    assert_eq!(session.state().score, 0);
    assert_eq!(session.state().phase, GamePhase::GameOver);

    let hud = session.presenter().hud.as_ref().expect("hud");
    let overlay = hud.overlay.as_ref().expect("game over overlay");
    assert_eq!(overlay.title, "Game Over!\nFinal Score: 0");
    assert_eq!(overlay.button, "Play Again");

    let game_overs = session
        .presenter()
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::GameOver { final_score: 0 }))
        .count();
    assert_eq!(game_overs, 1);
}

#[test]
fn restart_resets_everything() {
    let mut session = started_session(Tuning::default());
    session.on_input(InputEvent::Key {
        direction: Direction::Left,
        pressed: true,
    });
    for _ in 0..30 {
        session.tick(16);
    }
    {
        let state = session.state_mut();
        state.difficulty.base_speed = 4.0;
        state.difficulty.text_scroll_speed = 7.0;
        state.difficulty.text_spawn_interval_ms = 500;
        state.score = 20;
    }
    force_overlap(session.state_mut());
    session.tick(16);
    assert_eq!(session.state().phase, GamePhase::GameOver);

    session.on_input(InputEvent::Key {
        direction: Direction::Left,
        pressed: false,
    });
    session.on_input(InputEvent::Start);
    session.tick(16);

    let state = session.state();
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.score, 100);
    assert!((state.difficulty.base_speed - 1.2).abs() < 1e-6);
    assert!((state.difficulty.text_scroll_speed - 2.0).abs() < 1e-6);
    assert_eq!(state.difficulty.text_spawn_interval_ms, 2000);
    assert_eq!(state.pools.traffic.len(), 3);
    assert_eq!(state.pools.pedestrians.len(), 2);
    assert_eq!(state.pools.hazards.len(), 3);
    assert_eq!(state.player.pos, driver_safety::consts::PLAYER_START);
}

#[test]
fn touch_drag_steers_the_car() {
    let mut session = started_session(Tuning::default());
    session.on_input(InputEvent::PointerDown(glam::Vec2::new(400.0, 300.0)));
    session.on_input(InputEvent::PointerMove(glam::Vec2::new(500.0, 300.0)));
    session.tick(16);
    // (100 / 50) * 2 = 4 px to the right
    assert_eq!(session.state().player.pos.x, 404.0);

    session.on_input(InputEvent::PointerUp);
    session.tick(16);
    assert_eq!(session.state().player.pos.x, 404.0);
}

#[test]
fn simple_variant_ignores_touch() {
    let mut session = started_session(Tuning::simple_variant());
    session.on_input(InputEvent::PointerDown(glam::Vec2::new(400.0, 300.0)));
    session.on_input(InputEvent::PointerMove(glam::Vec2::new(500.0, 300.0)));
    session.tick(16);
    assert_eq!(session.state().player.pos.x, 400.0);
}
