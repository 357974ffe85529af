//! JavaScript bindings around [`GameState`].

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

use crate::config::{Automation, GameConfig};
use crate::game::{GameState, Turn};

#[wasm_bindgen]
pub struct WasmGame {
    game: GameState,
    rng: StdRng,
}

#[wasm_bindgen]
impl WasmGame {
    /// New standard game; `seed` drives computer moves.
    #[wasm_bindgen(constructor)]
    pub fn new(size: usize, seed: u64) -> Result<WasmGame, JsError> {
        let config = GameConfig {
            size,
            ..GameConfig::default()
        };
        Ok(Self {
            game: config.new_game()?,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Current [`crate::types::Snapshot`].
    pub fn state(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.game.snapshot())?)
    }

    /// `[{ position: { row, col }, flips }]` for the player to move.
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        let moves = self.game.legal_moves(self.game.current_player());
        Ok(serde_wasm_bindgen::to_value(&moves)?)
    }

    /// Plays move notation such as `"d3"` for the player to move.
    pub fn play(&mut self, notation: &str) -> Result<JsValue, JsError> {
        self.game.apply_move(notation, self.game.current_player())?;
        self.state()
    }

    /// Lets the computer move for the player to move; `mode` is `rand`,
    /// `best` or `skill=<float>`.
    #[wasm_bindgen(js_name = computerMove)]
    pub fn computer_move(&mut self, mode: &str) -> Result<JsValue, JsError> {
        let automation: Automation = mode.parse()?;
        let policy = automation
            .policy()
            .ok_or_else(|| JsError::new("computer move needs rand, best or skill=<float>"))?;

        let candidates = self.game.legal_moves(self.game.current_player());
        let position = policy
            .choose(&candidates, &mut self.rng)
            .ok_or_else(|| JsError::new("no legal moves"))?;
        self.game.play(position)?;
        self.state()
    }

    /// Resolves passes: returns `"await"`, `"pass"` or `"over"`.
    pub fn advance(&mut self) -> String {
        match self.game.advance_turn() {
            Turn::AwaitingMove(_) => "await",
            Turn::Passed(_) => "pass",
            Turn::Terminal => "over",
        }
        .to_string()
    }

    /// Console rendering with score header.
    pub fn render(&self) -> String {
        self.game.to_string()
    }
}
