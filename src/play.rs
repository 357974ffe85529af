//! Turn loop over a text input and output, shared by the console binary
//! and the integration tests.

use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};
use web_time::Instant;

use crate::ai::MoveSelector;
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::game::{GameState, Turn};
use crate::types::{Player, Score};

/// One game between two humans, two computer players, or one of each.
pub struct Session<R, W> {
    game: GameState,
    selectors: [Option<Box<dyn MoveSelector>>; 2],
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(config: &GameConfig, input: R, output: W) -> Result<Self, ConfigError> {
        let mut session = Self::with_game(config.new_game()?, input, output);
        for player in [Player::O, Player::X] {
            if let Some(selector) = config.selector_for(player) {
                session = session.with_selector(player, Box::new(selector));
            }
        }
        Ok(session)
    }

    /// Starts from an existing position with both sides human.
    pub fn with_game(game: GameState, input: R, output: W) -> Self {
        Self {
            game,
            selectors: [None, None],
            input,
            output,
        }
    }

    /// Hands `player`'s moves to a computer selector.
    pub fn with_selector(mut self, player: Player, selector: Box<dyn MoveSelector>) -> Self {
        self.selectors[slot(player)] = Some(selector);
        self
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Plays until nobody can move or the input ends, then reports the score.
    pub fn run(&mut self) -> io::Result<Score> {
        loop {
            writeln!(self.output, "{}", self.game)?;

            let player = match self.game.advance_turn() {
                Turn::AwaitingMove(player) => player,
                Turn::Passed(player) => {
                    writeln!(
                        self.output,
                        "Player \"{player}\" has no moves; passing to Player \"{}\"",
                        player.opponent()
                    )?;
                    player.opponent()
                }
                Turn::Terminal => {
                    writeln!(self.output, "No legal moves remain!")?;
                    break;
                }
            };

            let Some(text) = self.next_move(player)? else {
                writeln!(self.output, "\nGame Ended.")?;
                self.game.quit();
                break;
            };
            writeln!(self.output)?;

            if let Err(err) = self.game.apply_move(&text, player) {
                debug!(%player, %err, "move rejected");
                writeln!(self.output, "{err}")?;
            }
        }

        let score = self.game.score();
        info!(o = score.o, x = score.x, moves = self.game.moves_played(), "game finished");
        writeln!(self.output, "{score}")?;
        Ok(score)
    }

    /// The next move text for `player`, or `None` when the game should end.
    fn next_move(&mut self, player: Player) -> io::Result<Option<String>> {
        if let Some(selector) = self.selectors[slot(player)].as_mut() {
            let candidates = self.game.legal_moves(player);
            let started = Instant::now();
            let Some(position) = selector.select_move(&candidates) else {
                warn!(%player, "computer player returned no move");
                return Ok(None);
            };
            debug!(%player, %position, elapsed = ?started.elapsed(), "computer move");
            writeln!(self.output, "{player} => {position} (*computer player*)")?;
            return Ok(Some(position.to_string()));
        }

        write!(self.output, "{player} => ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let line = line.trim_end_matches(['\r', '\n']);
        if is_quit(line) {
            return Ok(None);
        }
        Ok(Some(line.to_string()))
    }
}

/// Empty input or any prefix of `quit`.
fn is_quit(line: &str) -> bool {
    "quit".starts_with(line)
}

fn slot(player: Player) -> usize {
    match player {
        Player::O => 0,
        Player::X => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_accepts_empty_and_prefixes_only() {
        for line in ["", "q", "qu", "qui", "quit"] {
            assert!(is_quit(line), "{line:?}");
        }
        for line in ["quits", "exit", "d3", "u", "   ", " q"] {
            assert!(!is_quit(line), "{line:?}");
        }
    }
}
