//! Driver Safety entry point
//!
//! The browser build is driven from JavaScript through `web::WebSession`.
//! Natively this runs a headless session with a simple autopilot, which is
//! handy for checking balance changes.
//!
//! Usage: `driver-safety [tuning.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use driver_safety::consts::*;
    use driver_safety::platform::{Clock, Direction, FrameTimer, InputEvent, ManualClock};
    use driver_safety::sim::{GameEvent, GamePhase, GameState};
    use driver_safety::{Hud, Presenter, Scene, Session, Tuning};

    /// Simulated frame length (~60 Hz)
    const FRAME_MS: u64 = 16;
    /// Give up after this much simulated time
    const MAX_RUN_MS: u64 = 10 * 60 * 1000;
    /// How far ahead of the car the autopilot looks
    const LOOKAHEAD: f32 = 220.0;

    /// Logs events and keeps the last snapshot
    #[derive(Default)]
    struct LogPresenter {
        collisions: u32,
        last: Option<Hud>,
    }

    impl Presenter for LogPresenter {
        fn on_event(&mut self, event: &GameEvent) {
            match event {
                GameEvent::Collision {
                    category, score, ..
                } => {
                    self.collisions += 1;
                    log::info!("Hit {} -> score {}", category.as_str(), score);
                }
                GameEvent::Distraction { text } => log::info!("Distraction: {}", text),
                GameEvent::DifficultyRamped { level, base_speed } => {
                    log::info!("Difficulty level {} (speed {:.2})", level, base_speed)
                }
                GameEvent::GameOver { final_score } => log::info!("Final score {}", final_score),
                _ => log::trace!("{:?}", event),
            }
        }

        fn present(&mut self, hud: &Hud) {
            self.last = Some(hud.clone());
        }
    }

    /// Steer away from the nearest entity coming down the car's column
    fn autopilot(state: &GameState) -> (bool, bool) {
        let player = state.player.pos;
        let threat = state
            .pools
            .iter()
            .filter(|e| e.pos.y < player.y && player.y - e.pos.y < LOOKAHEAD)
            .filter(|e| (e.pos.x - player.x).abs() < 70.0)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
        match threat {
            Some(e) if e.pos.x >= player.x && player.x > PLAYER_MIN.x + 10.0 => (true, false),
            Some(_) if player.x < PLAYER_MAX.x - 10.0 => (false, true),
            Some(_) => (true, false),
            None => (false, false),
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let args: Vec<String> = std::env::args().collect();
        let tuning = match args.get(1) {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };
        let seed = match args.get(2) {
            Some(s) => s.parse()?,
            None => std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)?
                .as_millis() as u64,
        };

        let clock = ManualClock::new(0);
        let mut timer = FrameTimer::new();
        let mut session = Session::new(seed, tuning, LogPresenter::default());
        session.initialize();
        session.on_input(InputEvent::Start);

        let (mut left, mut right) = (false, false);
        while clock.now_ms() < MAX_RUN_MS {
            let dt = timer.dt(&clock);
            session.tick(dt);
            if session.state().phase == GamePhase::GameOver {
                break;
            }

            let (want_left, want_right) = autopilot(session.state());
            if want_left != left {
                session.on_input(InputEvent::Key {
                    direction: Direction::Left,
                    pressed: want_left,
                });
                left = want_left;
            }
            if want_right != right {
                session.on_input(InputEvent::Key {
                    direction: Direction::Right,
                    pressed: want_right,
                });
                right = want_right;
            }
            clock.advance(FRAME_MS);
        }

        let state = session.state();
        let presenter = session.presenter();
        let overlay = presenter
            .last
            .as_ref()
            .and_then(|hud| hud.overlay.as_ref())
            .map(|o| o.title.replace('\n', " "))
            .unwrap_or_else(|| format!("Still driving, score {}", state.score));
        println!(
            "{} | seed {} | {:.1}s | {} collisions | difficulty level {}",
            overlay,
            seed,
            state.now as f64 / 1000.0,
            presenter.collisions,
            state.difficulty.level
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Driver Safety (headless) starting...");
    if let Err(e) = headless::run() {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
