//! Command-line interface for the console game.

use clap::Parser;
use othello::board::DEFAULT_SIZE;
use othello::{Automation, GameConfig, Setup};

/// Play Othello in the terminal against a person or the computer
#[derive(Parser, Debug)]
#[command(name = "othello")]
#[command(version, long_about = None)]
pub struct Cli {
    /// Who plays O (moves first): human, rand, best or skill=<float>
    #[arg(short = 'o', long = "o", default_value = "human")]
    pub o: Automation,

    /// Who plays X: human, rand, best or skill=<float>
    #[arg(short = 'x', long = "x", default_value = "human")]
    pub x: Automation,

    /// Board size (even, 4 to 8)
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    pub size: usize,

    /// Start from an empty board instead of the four centre pieces
    #[arg(long)]
    pub blank: bool,

    /// Seed for computer move choices
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    pub fn config(&self) -> GameConfig {
        GameConfig {
            size: self.size,
            setup: if self.blank { Setup::Blank } else { Setup::Standard },
            o: self.o,
            x: self.x,
            seed: self.seed,
        }
    }
}
