//! Per-frame simulation tick
//!
//! Order within a Playing tick: player, pools, collisions, survival bonus,
//! notifications, difficulty ramp, terminal check. A collision that ends the
//! run ends the tick.

use super::collision::{HitOutcome, apply_hit};
use super::notify::violation_text;
use super::player::{DirectionKeys, PointerState};
use super::pool::EntityCategory;
use super::state::{GameEvent, GamePhase, GameState};
use crate::Millis;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Held direction keys
    pub keys: DirectionKeys,
    /// Touch/mouse drag
    pub pointer: PointerState,
    /// Start / Play Again button pressed since the last tick
    pub start: bool,
}

/// Advance the game by `dt` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: Millis) {
    state.now += dt;
    let now = state.now;

    // Hide timers run in every phase
    state.warning.expire(now);
    state.message.expire(now);

    match state.phase {
        GamePhase::Menu | GamePhase::GameOver => {
            if input.start {
                state.start();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    state.player.steer(
        &input.keys,
        state.tuning.player_step,
        &input.pointer,
        &state.tuning.drag,
    );

    let recycled = state
        .pools
        .advance(state.difficulty.base_speed, &mut state.rng);
    if recycled > 0 {
        log::trace!("Recycled {} entities at t={}ms", recycled, now);
    }

    if resolve_collisions(state) {
        return;
    }

    if state.score_clock.tick(
        now,
        state.tuning.score_interval_ms,
        state.tuning.score_bonus,
        &mut state.score,
    ) {
        let score = state.score;
        state.push_event(GameEvent::ScoreBonus { score });
    }

    if let Some(text) = state.distractions.poll(now, &mut state.rng) {
        state.message.show(text, now);
        state.push_event(GameEvent::Distraction {
            text: text.to_string(),
        });
    }

    if state
        .advisories
        .poll_spawn(now, state.difficulty.text_spawn_interval_ms)
    {
        state.push_event(GameEvent::AdvisorySpawned);
    }
    state.advisories.scroll(state.difficulty.text_scroll_speed);

    let ramps = state.difficulty.check_ramp(state.score, &state.tuning);
    if ramps > 0 {
        let difficulty = state.difficulty;
        log::info!(
            "Difficulty {} ({}): speed={:.2} text_speed={:.2} spawn={}ms",
            difficulty.level,
            state.tuning.ramp_mode.as_str(),
            difficulty.base_speed,
            difficulty.text_scroll_speed,
            difficulty.text_spawn_interval_ms
        );
        state.push_event(GameEvent::DifficultyRamped {
            level: difficulty.level,
            base_speed: difficulty.base_speed,
        });
    }

    if state.score <= 0 {
        state.end_game();
    }
}

/// Test the player against every pool and apply cooldown-gated penalties.
/// Returns true if a penalty ended the run.
fn resolve_collisions(state: &mut GameState) -> bool {
    let player = state.player.bounds();
    let player = &player;
    let hits: Vec<(EntityCategory, u32)> = state
        .pools
        .pools()
        .into_iter()
        .flat_map(|pool| pool.overlapping(player).map(|e| (e.category, e.id)))
        .collect();

    let now = state.now;
    let penalty = state.tuning.collision_penalty;
    for (category, entity_id) in hits {
        match apply_hit(&mut state.cooldown, &mut state.score, penalty, now) {
            HitOutcome::Ignored => {
                log::trace!("Collision with {} #{} inside cooldown", category.as_str(), entity_id);
                state.push_event(GameEvent::CollisionIgnored {
                    category,
                    entity_id,
                });
            }
            HitOutcome::Penalized { score } => {
                log::debug!(
                    "Collision with {} #{} at t={}ms, score now {}",
                    category.as_str(),
                    entity_id,
                    now,
                    score
                );
                state.warning.show(violation_text(penalty), now);
                state.push_event(GameEvent::Collision {
                    category,
                    entity_id,
                    score,
                });
                if score <= 0 {
                    state.end_game();
                    return true;
                }
            }
        }
    }
    false
}
