//! Top-level state machine: `Playing` until a collision, then `GameOver`
//! until the player restarts or quits.

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{error, info, warn};

use crate::canvas::Canvas;
use crate::config::{Settings, Variant};
use crate::draw::{self, Look};
use crate::game::{Cause, Game, Rules, Step};
use crate::input::{self, HeldKeys, InputEvent, InputSnapshot, Key};
use crate::scores::Ledger;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Playing,
    GameOver { score: u32, cause: Cause },
    Terminated,
}

pub struct Session<R = SmallRng> {
    settings: Settings,
    rules: Rules,
    game: Game,
    state: State,
    paused: bool,
    input: InputSnapshot,
    ledger: Ledger,
    high_scores: Vec<u32>,
    rng: R,
}

impl Session<SmallRng> {
    pub fn new(settings: Settings) -> Self {
        let rng = match settings.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let ledger = Ledger::new(&settings.high_score_path);
        Self::with_rng(settings, ledger, rng)
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(settings: Settings, ledger: Ledger, mut rng: R) -> Self {
        let rules = Rules::from(&settings);
        let high_scores = ledger.load().unwrap_or_else(|e| {
            warn!("could not read high scores: {e}");
            Vec::new()
        });
        let game = Game::new(rules, &mut rng);
        Self {
            settings,
            rules,
            game,
            state: State::Playing,
            paused: false,
            input: InputSnapshot::default(),
            ledger,
            high_scores,
            rng,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn high_scores(&self) -> &[u32] {
        &self.high_scores
    }

    pub fn is_playing(&self) -> bool {
        self.state == State::Playing
    }

    pub fn is_terminated(&self) -> bool {
        self.state == State::Terminated
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Time between frames at the current speed.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.game.frame_rate().max(1)
    }

    pub fn set_held(&mut self, held: HeldKeys) {
        self.input.held = held;
    }

    /// Feeds one event. Quit is honoured in every state; in `GameOver` only
    /// restart and quit do anything, though stick positions are still
    /// tracked so the next game starts from where the stick actually is.
    pub fn handle_event(&mut self, event: InputEvent) {
        match (self.state, event) {
            (State::Terminated, _) => {}
            (_, InputEvent::Quit | InputEvent::KeyPress(Key::Quit)) => {
                info!(score = self.game.score, "quit");
                self.state = State::Terminated;
            }
            (State::GameOver { .. }, InputEvent::KeyPress(Key::Restart)) => self.restart(),
            (State::GameOver { .. }, ev @ InputEvent::AxisMove(..)) => self.input.apply(&ev),
            (State::GameOver { .. }, _) => {}
            (State::Playing, InputEvent::KeyPress(Key::Pause)) => self.paused = !self.paused,
            (State::Playing, ev) => self.input.apply(&ev),
        }
    }

    /// Runs one frame: resolve input, step the game, and on a collision save
    /// the score and switch to `GameOver`. Returns whether anything ran.
    pub fn frame(&mut self) -> bool {
        if self.state != State::Playing || self.paused {
            return false;
        }

        self.game.velocity = if self.settings.autoplay {
            input::steer_towards(self.game.head(), self.game.food)
        } else {
            input::resolve(self.game.velocity, &self.input)
        };
        self.input.end_frame();

        if let Step::Died(cause) = self.game.step(&mut self.rng) {
            self.game_over(cause);
        }
        true
    }

    fn game_over(&mut self, cause: Cause) {
        let score = self.game.score;
        info!(score, ?cause, frames = self.game.frame, "game over");
        match self.ledger.record(score) {
            Ok(saved) => self.high_scores = saved,
            Err(e) => {
                error!("could not save high score: {e}");
                self.high_scores = crate::scores::merge(std::mem::take(&mut self.high_scores), score);
            }
        }
        self.state = State::GameOver { score, cause };
    }

    fn restart(&mut self) {
        info!("restarting");
        self.game = Game::new(self.rules, &mut self.rng);
        self.input.end_frame();
        self.paused = false;
        self.state = State::Playing;
    }

    pub fn render(&self, canvas: &mut impl Canvas) {
        match self.state {
            State::GameOver { score, .. } => draw::render_game_over(canvas, score, &self.high_scores),
            _ => {
                let look = Look {
                    color_cycle: self.settings.color_cycle,
                    show_speed: self.settings.variant == Variant::Neon && self.settings.dynamic_speed,
                    paused: self.paused,
                    autoplay: self.settings.autoplay,
                };
                draw::render_playing(canvas, &self.game, look);
            }
        }
    }
}
