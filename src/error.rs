use derive_more::Display;

use crate::types::{Player, Position};

/// Why a move was rejected. State is never mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MoveError {
    #[display("space {_0} already occupied")]
    OccupiedCell(Position),

    #[display("illegal move {_0}: must place adjacent to opponent")]
    NoAdjacentOpponent(Position),

    #[display("illegal move {_0}: must sandwich opponent")]
    NoSandwich(Position),

    #[display("could not parse move: \"{_0}\"")]
    InvalidNotation(String),

    #[display("space ({}, {}) is off the board", _0.row, _0.col)]
    OffBoard(Position),

    #[display("it is not Player \"{_0}\"'s turn")]
    OutOfTurn(Player),

    #[display("game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}

/// Invalid game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ConfigError {
    #[display("board size must be an even number between 4 and 8, got {_0}")]
    InvalidSize(usize),

    #[display("unknown player mode \"{_0}\" (expected human, rand, best or skill=<float>)")]
    InvalidAutomation(String),

    #[display("skill must be a finite number, got \"{_0}\"")]
    InvalidSkill(String),
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_move() {
        let pos = Position::new(0, 0);

        assert_eq!(
            MoveError::NoAdjacentOpponent(pos).to_string(),
            "illegal move a1: must place adjacent to opponent"
        );
        assert_eq!(
            MoveError::InvalidNotation("zz".to_string()).to_string(),
            "could not parse move: \"zz\""
        );
    }
}
