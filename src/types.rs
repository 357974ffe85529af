use std::fmt;

use serde::Serialize;

/// One of the two sides. `O` moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Player {
    O,
    X,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::O => Self::X,
            Self::X => Self::O,
        }
    }

    /// Lowercase mark drawn inside the board grid.
    pub fn mark(self) -> char {
        match self {
            Self::O => 'o',
            Self::X => 'x',
        }
    }

    /// Wire code used by [`Snapshot`]: 1=O, 2=X.
    pub fn code(self) -> u8 {
        match self {
            Self::O => 1,
            Self::X => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::O => f.write_str("O"),
            Self::X => f.write_str("X"),
        }
    }
}

/// A board coordinate.
///
/// Displays as move notation: row letter then 1-based column, so `(3, 2)`
/// prints as `d3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = char::from_u32(u32::from(b'a') + u32::from(self.row)).unwrap_or('?');
        write!(f, "{letter}{}", u32::from(self.col) + 1)
    }
}

/// A legal move and the number of pieces it would flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub position: Position,
    pub flips: usize,
}

/// Piece counts for both players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub o: usize,
    pub x: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    Tie,
}

impl Score {
    pub fn total(&self) -> usize {
        self.o + self.x
    }

    pub fn of(&self, player: Player) -> usize {
        match player {
            Player::O => self.o,
            Player::X => self.x,
        }
    }

    pub fn outcome(&self) -> Outcome {
        if self.o > self.x {
            Outcome::Winner(Player::O)
        } else if self.x > self.o {
            Outcome::Winner(Player::X)
        } else {
            Outcome::Tie
        }
    }
}

/// End-of-game report line.
impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome() {
            Outcome::Tie => write!(f, "Final score is a tie: {} - {}.", self.o, self.x),
            Outcome::Winner(winner) => write!(
                f,
                "Player \"{winner}\" wins by {} - {}.",
                self.of(winner),
                self.of(winner.opponent())
            ),
        }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Row-major cells: 0=empty, 1=O, 2=X.
    pub board: Vec<u8>,
    pub size: u8,
    pub current_player: u8,
    pub o_count: usize,
    pub x_count: usize,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` when the previous action was a normal move.
    pub is_pass: bool,
    /// Contract:
    /// - Normal move: row-major indices of the flipped cells.
    /// - Pass: must be an empty list.
    pub flipped: Vec<u8>,
}
