//! Game state and the menu/playing/game-over state machine
//!
//! `GameState` owns everything a run mutates: the player, the pools, the
//! score, timers and notices. There are no globals; the host holds one of
//! these and feeds it ticks.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::CollisionCooldown;
use super::notify::{AdvisoryTicker, DistractionScheduler, NoticeChannel};
use super::player::Player;
use super::pool::{EntityCategory, EntityPools};
use super::scoring::{Difficulty, ScoreClock};
use crate::Millis;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title overlay, waiting for the start button
    #[default]
    Menu,
    /// Active driving
    Playing,
    /// Run ended, waiting for "Play Again"
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "gameover",
        }
    }
}

/// Something the presentation layer may want to react to (sound, flash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted { run: u32 },
    /// Penalised hit; `score` is after the penalty
    Collision {
        category: EntityCategory,
        entity_id: u32,
        score: i32,
    },
    /// Overlap swallowed by the cooldown
    CollisionIgnored {
        category: EntityCategory,
        entity_id: u32,
    },
    ScoreBonus { score: i32 },
    DifficultyRamped { level: u32, base_speed: f32 },
    Distraction { text: String },
    AdvisorySpawned,
    GameOver { final_score: i32 },
}

/// Complete game session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub(super) rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Game clock, advanced by every tick's `dt`
    pub now: Millis,
    /// Ticks simulated while Playing
    pub time_ticks: u64,
    /// Runs started so far
    pub runs: u32,
    pub score: i32,
    pub player: Player,
    pub pools: EntityPools,
    pub difficulty: Difficulty,
    pub score_clock: ScoreClock,
    pub cooldown: CollisionCooldown,
    pub warning: NoticeChannel,
    pub message: NoticeChannel,
    pub distractions: DistractionScheduler,
    pub advisories: AdvisoryTicker,
    events: Vec<GameEvent>,
}

impl GameState {
    /// New session in the Menu phase
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            now: 0,
            time_ticks: 0,
            runs: 0,
            score: tuning.start_score,
            player: Player::new(),
            pools: EntityPools::new(),
            difficulty: Difficulty::new(&tuning),
            score_clock: ScoreClock::new(0),
            cooldown: CollisionCooldown::new(tuning.collision_cooldown_ms),
            warning: NoticeChannel::new(tuning.warning_ms),
            message: NoticeChannel::new(tuning.message_ms),
            distractions: DistractionScheduler::new(tuning.distraction_interval_ms),
            advisories: AdvisoryTicker::new(),
            events: Vec::new(),
            tuning,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Menu/GameOver -> Playing. Resets the run and respawns the pools.
    /// Returns false (and does nothing) while already Playing.
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::Playing {
            return false;
        }
        let now = self.now;
        self.phase = GamePhase::Playing;
        self.runs += 1;
        self.score = self.tuning.start_score;
        self.difficulty = Difficulty::new(&self.tuning);
        self.score_clock.reset(now);
        self.cooldown.reset();
        self.distractions.reset();
        self.player.reset();
        self.pools.clear();
        self.pools.spawn_batch(&mut self.rng);
        self.advisories.clear();

        log::info!("Run {} started (seed {}, t={}ms)", self.runs, self.seed, now);
        self.push_event(GameEvent::GameStarted { run: self.runs });
        true
    }

    /// Playing -> GameOver. Only the first call per run transitions.
    pub fn end_game(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::GameOver;
        log::info!("Game over: final score {} after {} ticks", self.score, self.time_ticks);
        self.push_event(GameEvent::GameOver {
            final_score: self.score,
        });
        true
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
