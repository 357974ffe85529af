use std::fmt;

use tracing::{info, instrument};

use crate::board::Board;
use crate::error::MoveError;
use crate::notation::parse_move;
use crate::types::{Candidate, Player, Position, Score, Snapshot};

/// Where the game stands after [`GameState::advance_turn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// The player has at least one legal move and must play it.
    AwaitingMove(Player),
    /// The player had no legal move; the opponent is now to move.
    Passed(Player),
    /// Neither side can move, or the game was quit.
    Terminal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEntry {
    Placed {
        player: Player,
        position: Position,
        flipped: Vec<Position>,
    },
    Passed(Player),
}

/// A game in progress: board, side to move and everything played so far.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current_player: Player,
    moves_played: usize,
    history: Vec<HistoryEntry>,
    is_game_over: bool,
}

impl GameState {
    /// Standard 8x8 game with `O` to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Player::O)
    }

    pub fn from_board(board: Board, current_player: Player) -> Self {
        Self {
            board,
            current_player,
            moves_played: 0,
            history: Vec::new(),
            is_game_over: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    /// Legal moves for `player` with their flip counts, row-major.
    pub fn legal_moves(&self, player: Player) -> Vec<Candidate> {
        self.board.candidates(player)
    }

    /// Parses `notation` and plays it for `player`, who must be the player
    /// to move. Returns the flipped cells.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, notation: &str, player: Player) -> Result<Vec<Position>, MoveError> {
        self.ensure_turn(player)?;
        let position = parse_move(notation)?;
        self.place(position, player)
    }

    /// Plays `position` for the player to move.
    pub fn play(&mut self, position: Position) -> Result<Vec<Position>, MoveError> {
        let player = self.current_player;
        self.ensure_turn(player)?;
        self.place(position, player)
    }

    /// Resolves passes and game end before the next move.
    #[instrument(skip(self), fields(current = %self.current_player))]
    pub fn advance_turn(&mut self) -> Turn {
        if self.is_game_over {
            return Turn::Terminal;
        }

        let player = self.current_player;
        if !self.legal_moves(player).is_empty() {
            return Turn::AwaitingMove(player);
        }

        let opponent = player.opponent();
        if self.legal_moves(opponent).is_empty() {
            self.is_game_over = true;
            info!(score = ?self.score(), "no legal moves remain");
            return Turn::Terminal;
        }

        info!(%player, %opponent, "no legal moves, passing");
        self.history.push(HistoryEntry::Passed(player));
        self.current_player = opponent;
        Turn::Passed(player)
    }

    /// Ends the game early, e.g. on end of input.
    pub fn quit(&mut self) {
        if !self.is_game_over {
            info!(moves = self.moves_played, "game quit");
            self.is_game_over = true;
        }
    }

    pub fn score(&self) -> Score {
        Score {
            o: self.board.count(Player::O),
            x: self.board.count(Player::X),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let score = self.score();
        let size = self.board.size();
        let (is_pass, flipped) = match self.history.last() {
            Some(HistoryEntry::Passed(_)) => (true, Vec::new()),
            Some(HistoryEntry::Placed { flipped, .. }) => (
                false,
                flipped
                    .iter()
                    .map(|p| (p.row as usize * size + p.col as usize) as u8)
                    .collect(),
            ),
            None => (false, Vec::new()),
        };

        Snapshot {
            board: self.board.to_array(),
            size: size as u8,
            current_player: self.current_player.code(),
            o_count: score.o,
            x_count: score.x,
            is_game_over: self.is_game_over,
            is_pass,
            flipped,
        }
    }

    fn ensure_turn(&self, player: Player) -> Result<(), MoveError> {
        if self.is_game_over {
            return Err(MoveError::GameOver);
        }
        if player != self.current_player {
            return Err(MoveError::OutOfTurn(player));
        }
        Ok(())
    }

    fn place(&mut self, position: Position, player: Player) -> Result<Vec<Position>, MoveError> {
        let flipped = self.board.apply(position, player)?;

        self.history.push(HistoryEntry::Placed {
            player,
            position,
            flipped: flipped.clone(),
        });
        self.moves_played += 1;
        self.current_player = player.opponent();

        Ok(flipped)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Score header between dividers, then the board.
impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let score = self.score();
        let left = format!("O: {}", score.o);
        let right = format!("X: {}", score.x);
        let width = 2 + 3 * self.board.size();
        let gap = width.saturating_sub(left.len() + right.len());
        let divider = "-".repeat(width);

        writeln!(f, "{divider}")?;
        writeln!(f, "{left}{}{right}", " ".repeat(gap))?;
        writeln!(f, "{divider}")?;
        write!(f, "{}", self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Outcome;

    fn full_rows(first: &str) -> Vec<String> {
        let mut rows = vec![first.to_string()];
        rows.extend(std::iter::repeat_n("xxxxxxxx".to_string(), 7));
        rows
    }

    fn board_from(rows: &[String]) -> Board {
        let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        Board::from_rows(&refs).unwrap()
    }

    #[test]
    fn initial_state_is_correct() {
        let game = GameState::new();
        let state = game.snapshot();

        assert_eq!(state.current_player, Player::O.code());
        assert_eq!(state.o_count, 2);
        assert_eq!(state.x_count, 2);
        assert!(!state.is_game_over);
        assert!(!state.is_pass);
        assert!(state.flipped.is_empty());
        assert_eq!(game.legal_moves(Player::O).len(), 4);
        assert_eq!(game.moves_played(), 0);
    }

    #[test]
    fn t02_illegal_player_move_returns_error_and_keeps_turn() {
        let mut game = GameState::new();

        let err = game.apply_move("a1", Player::O).unwrap_err();

        assert_eq!(err, MoveError::NoAdjacentOpponent(Position::new(0, 0)));
        assert_eq!(game.current_player(), Player::O);
        assert_eq!(game.moves_played(), 0);
        assert!(game.history().is_empty());
    }

    #[test]
    fn unparseable_and_out_of_turn_moves_are_rejected() {
        let mut game = GameState::new();

        assert_eq!(
            game.apply_move("nowhere", Player::O),
            Err(MoveError::InvalidNotation("nowhere".to_string()))
        );
        assert_eq!(game.apply_move("d3", Player::X), Err(MoveError::OutOfTurn(Player::X)));
        assert_eq!(game.board(), &Board::new());
    }

    #[test]
    fn opening_exchange_flips_bridge_back_and_forth() {
        let mut game = GameState::new();

        let first = game.apply_move("d3", Player::O).unwrap();
        assert_eq!(first, vec![Position::new(3, 3)]);
        assert_eq!(game.score(), Score { o: 4, x: 1 });
        assert_eq!(game.current_player(), Player::X);

        let second = game.apply_move("c3", Player::X).unwrap();
        assert_eq!(second, vec![Position::new(3, 3)]);

        let score = game.score();
        assert_eq!(score, Score { o: 3, x: 3 });
        assert_eq!(score.total(), 4 + game.moves_played());
        assert_eq!(game.current_player(), Player::O);
        assert_eq!(game.snapshot().flipped, vec![27]);
    }

    #[test]
    fn t03_player_without_moves_passes_to_opponent() {
        let mut game =
            GameState::from_board(board_from(&full_rows(".oxxxxxx")), Player::O);

        assert!(game.legal_moves(Player::O).is_empty());
        assert_eq!(game.advance_turn(), Turn::Passed(Player::O));

        assert_eq!(game.current_player(), Player::X);
        assert!(!game.is_game_over());
        assert!(game.snapshot().is_pass);
        assert_eq!(game.advance_turn(), Turn::AwaitingMove(Player::X));
        assert_eq!(game.history(), &[HistoryEntry::Passed(Player::O)]);
    }

    #[test]
    fn t04_no_moves_for_either_side_is_terminal() {
        let mut rows = vec![".ooooooo".to_string()];
        rows.extend(std::iter::repeat_n("oooooooo".to_string(), 7));
        let mut game = GameState::from_board(board_from(&rows), Player::O);

        assert_eq!(game.advance_turn(), Turn::Terminal);
        assert!(game.is_game_over());
        assert_eq!(game.advance_turn(), Turn::Terminal);
        assert_eq!(game.score().outcome(), Outcome::Winner(Player::O));
        assert_eq!(game.apply_move("a1", Player::O), Err(MoveError::GameOver));
    }

    #[test]
    fn t05_filling_the_last_square_ends_at_next_advance() {
        let mut game =
            GameState::from_board(board_from(&full_rows(".oxxxxxx")), Player::X);

        let flipped = game.apply_move("a1", Player::X).unwrap();

        assert_eq!(flipped, vec![Position::new(0, 1)]);
        assert_eq!(game.score(), Score { o: 0, x: 64 });
        assert_eq!(game.advance_turn(), Turn::Terminal);
    }

    #[test]
    fn stalemate_with_equal_counts_is_a_tie() {
        let board = Board::from_rows(&["oo..", "....", "....", "..xx"]).unwrap();
        let mut game = GameState::from_board(board, Player::O);

        assert_eq!(game.advance_turn(), Turn::Terminal);
        assert_eq!(game.score().outcome(), Outcome::Tie);
    }

    #[test]
    fn quit_ends_the_game_immediately() {
        let mut game = GameState::new();

        game.quit();

        assert!(game.is_game_over());
        assert_eq!(game.advance_turn(), Turn::Terminal);
        assert_eq!(game.play(Position::new(2, 3)), Err(MoveError::GameOver));
    }

    #[test]
    fn display_shows_score_header_above_board() {
        let game = GameState::from_board(Board::with_size(4).unwrap(), Player::O);

        let text = game.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "-".repeat(14));
        assert_eq!(lines[1], "O: 2      X: 2");
        assert_eq!(lines[2], "-".repeat(14));
        assert_eq!(lines[3], "a ( )( )( )( )");
        assert_eq!(lines.len(), 8);
    }
}
