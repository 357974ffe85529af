use std::fmt;

use tracing::debug;

use crate::error::{ConfigError, MoveError};
use crate::types::{Candidate, Player, Position};

pub const DEFAULT_SIZE: usize = 8;
pub const MIN_SIZE: usize = 4;
/// Move notation only addresses rows `a`-`h` and columns `1`-`8`.
pub const MAX_SIZE: usize = 8;

/// Opposite directions sit at mirrored indices: `DIRECTIONS[7 - d] == -DIRECTIONS[d]`.
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Cell {
    owner: Option<Player>,
    /// Arena index of the adjacent cell per direction, `None` past the edge.
    neighbors: [Option<usize>; 8],
}

/// Square Othello board. Cells live in one row-major arena and refer to
/// their neighbours by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates the standard 8x8 opening:
    /// d5=O, d4=X, e4=O, e5=X.
    pub fn new() -> Self {
        let mut board = Self::grid(DEFAULT_SIZE);
        board.seed_opening();
        board
    }

    /// Creates an opening board of the given size.
    pub fn with_size(size: usize) -> Result<Self, ConfigError> {
        validate_size(size)?;
        let mut board = Self::grid(size);
        board.seed_opening();
        Ok(board)
    }

    /// Creates a board with no pieces at all.
    pub fn blank(size: usize) -> Result<Self, ConfigError> {
        validate_size(size)?;
        Ok(Self::grid(size))
    }

    /// Builds a position from text rows: `o`/`O` and `x`/`X` are pieces,
    /// any other character is an empty cell.
    pub fn from_rows(rows: &[&str]) -> Result<Self, ConfigError> {
        let size = rows.len();
        validate_size(size)?;
        if rows.iter().any(|row| row.chars().count() != size) {
            return Err(ConfigError::InvalidSize(size));
        }

        let mut board = Self::grid(size);
        for (cell, mark) in board.cells.iter_mut().zip(rows.iter().flat_map(|r| r.chars())) {
            cell.owner = match mark {
                'o' | 'O' => Some(Player::O),
                'x' | 'X' => Some(Player::X),
                _ => None,
            };
        }
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn owner(&self, position: Position) -> Result<Option<Player>, MoveError> {
        let index = self.index(position)?;
        Ok(self.cells[index].owner)
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(|index| self.position_of(index))
    }

    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.owner == Some(player))
            .count()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.owner.is_none()).count()
    }

    /// Row-major cells where 0=empty, 1=O, 2=X.
    pub fn to_array(&self) -> Vec<u8> {
        self.cells
            .iter()
            .map(|cell| cell.owner.map_or(0, Player::code))
            .collect()
    }

    /// Every legal move for `player` with its flip count, row-major.
    pub fn candidates(&self, player: Player) -> Vec<Candidate> {
        (0..self.cells.len())
            .filter_map(|index| {
                self.check(index, player).ok().map(|flips| Candidate {
                    position: self.position_of(index),
                    flips: flips.len(),
                })
            })
            .collect()
    }

    /// Checks a move without touching the board and returns the cells it
    /// would flip, row-major.
    pub fn evaluate(&self, position: Position, player: Player) -> Result<Vec<Position>, MoveError> {
        let (_, flips) = self.checked(position, player)?;
        Ok(self.positions_of(&flips))
    }

    /// Places a piece for `player` and flips the captured pieces.
    /// Either the whole move happens or the board is left untouched.
    pub fn apply(&mut self, position: Position, player: Player) -> Result<Vec<Position>, MoveError> {
        let (index, flips) = self.checked(position, player)?;
        self.set_owner(index, &flips, player);
        debug!(%position, %player, flipped = flips.len(), "applied move");
        Ok(self.positions_of(&flips))
    }

    /// Places a piece without any legality check, flipping whatever the
    /// directional scan captures. Only used to seed openings.
    pub(crate) fn place_unchecked(
        &mut self,
        position: Position,
        player: Player,
    ) -> Result<Vec<Position>, MoveError> {
        let index = self.index(position)?;
        let flips = scan_flips(self, index, player);
        self.set_owner(index, &flips, player);
        Ok(self.positions_of(&flips))
    }

    fn grid(size: usize) -> Self {
        let cells = (0..size * size)
            .map(|index| {
                let (row, col) = ((index / size) as i32, (index % size) as i32);
                let mut neighbors = [None; 8];
                for (slot, (dr, dc)) in neighbors.iter_mut().zip(DIRECTIONS) {
                    let (r, c) = (row + dr, col + dc);
                    if in_bounds(r, c, size) {
                        *slot = Some(r as usize * size + c as usize);
                    }
                }
                Cell {
                    owner: None,
                    neighbors,
                }
            })
            .collect();

        Self { size, cells }
    }

    fn seed_opening(&mut self) {
        let mid = (self.size / 2) as u8;
        let opening = [
            (Player::O, mid - 1, mid),
            (Player::X, mid - 1, mid - 1),
            (Player::O, mid, mid - 1),
            (Player::X, mid, mid),
        ];
        for (player, row, col) in opening {
            // Every size accepted by `validate_size` has these centre squares.
            if let Err(err) = self.place_unchecked(Position::new(row, col), player) {
                unreachable!("opening square outside a {0}x{0} board: {err}", self.size);
            }
        }
    }

    fn checked(&self, position: Position, player: Player) -> Result<(usize, Vec<usize>), MoveError> {
        self.index(position)
            .and_then(|index| Ok((index, self.check(index, player)?)))
            .inspect_err(|err| debug!(%position, %player, %err, "rejected move"))
    }

    fn check(&self, index: usize, player: Player) -> Result<Vec<usize>, MoveError> {
        let cell = &self.cells[index];
        if cell.owner.is_some() {
            return Err(MoveError::OccupiedCell(self.position_of(index)));
        }

        let opponent = player.opponent();
        let touches_opponent = cell
            .neighbors
            .iter()
            .flatten()
            .any(|&n| self.cells[n].owner == Some(opponent));
        if !touches_opponent {
            return Err(MoveError::NoAdjacentOpponent(self.position_of(index)));
        }

        let flips = scan_flips(self, index, player);
        if flips.is_empty() {
            return Err(MoveError::NoSandwich(self.position_of(index)));
        }

        Ok(flips)
    }

    fn set_owner(&mut self, index: usize, flips: &[usize], player: Player) {
        self.cells[index].owner = Some(player);
        for &flip in flips {
            self.cells[flip].owner = Some(player);
        }
    }

    fn index(&self, position: Position) -> Result<usize, MoveError> {
        let (row, col) = (position.row as usize, position.col as usize);
        if row >= self.size || col >= self.size {
            return Err(MoveError::OffBoard(position));
        }
        Ok(row * self.size + col)
    }

    fn position_of(&self, index: usize) -> Position {
        Position::new((index / self.size) as u8, (index % self.size) as u8)
    }

    fn positions_of(&self, indices: &[usize]) -> Vec<Position> {
        indices.iter().map(|&i| self.position_of(i)).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Rows labelled `a..` on the left, columns `1..` along the bottom.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.chunks(self.size).enumerate() {
            write!(f, "{} ", char::from(b'a' + row as u8))?;
            for cell in cells {
                write!(f, "({})", cell.owner.map_or(' ', Player::mark))?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for col in 1..=self.size {
            write!(f, " {col} ")?;
        }
        Ok(())
    }
}

/// Walks all eight directions from `index` and collects every run of
/// opponent pieces closed off by one of `player`'s pieces. Sorted row-major.
fn scan_flips(board: &Board, index: usize, player: Player) -> Vec<usize> {
    let opponent = player.opponent();
    let mut flips = Vec::new();

    for dir in 0..DIRECTIONS.len() {
        let mut line = Vec::new();
        let mut next = board.cells[index].neighbors[dir];

        while let Some(current) = next {
            match board.cells[current].owner {
                Some(owner) if owner == opponent => {
                    line.push(current);
                    next = board.cells[current].neighbors[dir];
                }
                Some(_) => {
                    flips.append(&mut line);
                    break;
                }
                None => break,
            }
        }
    }

    flips.sort_unstable();
    flips
}

fn validate_size(size: usize) -> Result<(), ConfigError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) && size % 2 == 0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSize(size))
    }
}

fn in_bounds(row: i32, col: i32, size: usize) -> bool {
    (0..size as i32).contains(&row) && (0..size as i32).contains(&col)
}
