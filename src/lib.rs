use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod notation;
pub mod play;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::{Automation, GameConfig, Setup};
pub use error::{ConfigError, MoveError};
pub use game::{GameState, HistoryEntry, Turn};
pub use notation::parse_move;
pub use play::Session;
pub use types::{Candidate, Outcome, Player, Position, Score, Snapshot};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
