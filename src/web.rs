//! Browser bindings
//!
//! The JS host owns rendering, audio and input decoding. Each animation
//! frame it calls `tick` with the frame delta and the held directions, then
//! applies the returned JSON events to its scene.

use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::consts::MAX_DT;
use crate::highscores::BestScore;
use crate::sim::{GameState, TickInput, tick};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// One run plus the persisted best score
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    best: BestScore,
}

#[wasm_bindgen]
impl WebGame {
    /// Start a run. `config_json` may be empty for the default three-lane game.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WebGame, JsError> {
        let config = if config_json.trim().is_empty() {
            GameConfig::default()
        } else {
            GameConfig::from_json(config_json)?
        };
        Ok(Self {
            state: GameState::new(config)?,
            best: BestScore::load(),
        })
    }

    /// Advance by `dt` seconds; returns the tick result as JSON
    pub fn tick(&mut self, dt: f32, move_left: bool, move_right: bool, idle_mode: bool) -> Result<String, JsError> {
        let was_over = self.state.is_game_over();
        let input = TickInput {
            move_left,
            move_right,
            idle_mode,
        };
        let result = tick(&mut self.state, &input, dt.min(MAX_DT));

        if !was_over && result.game_over && !idle_mode && self.best.record(result.score) {
            self.best.save();
        }

        Ok(serde_json::to_string(&result)?)
    }

    /// Start over with the same configuration
    pub fn restart(&mut self) -> Result<(), JsError> {
        let mut config = self.state.config.clone();
        config.seed = None;
        self.state = GameState::new(config)?;
        Ok(())
    }

    pub fn score(&self) -> f64 {
        self.state.score as f64
    }

    pub fn car_x(&self) -> f32 {
        self.state.car.lateral()
    }

    /// Lane the car is currently in (0 = leftmost)
    pub fn car_lane(&self) -> u32 {
        self.state.track.lane_of(self.state.car.lateral())
    }

    /// Completed speed-ups so far
    pub fn level(&self) -> u32 {
        self.state.difficulty.level()
    }

    /// Active configuration, including the seed this run was started with
    pub fn config_json(&self) -> Result<String, JsError> {
        let mut config = self.state.config.clone();
        config.seed = Some(self.state.spawner.seed);
        Ok(config.to_json()?)
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.state.speed_multiplier()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Final score once the run has ended, otherwise `undefined`
    pub fn final_score(&self) -> Option<f64> {
        self.state.final_score().map(|s| s as f64)
    }

    pub fn best_score(&self) -> f64 {
        self.best.best as f64
    }

    /// Game-over screen check (ties count)
    pub fn is_new_best(&self) -> bool {
        self.state.is_game_over() && self.best.is_new_best(self.state.score)
    }
}
