//! Game setup shared by the console binary and the WASM facade.

use std::fmt;
use std::str::FromStr;

use web_time::{SystemTime, UNIX_EPOCH};

use crate::ai::{Policy, PolicySelector};
use crate::board::{Board, DEFAULT_SIZE};
use crate::error::ConfigError;
use crate::game::GameState;
use crate::types::Player;

/// Who makes the moves for one side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Automation {
    #[default]
    Human,
    Random,
    Greedy,
    Skill(f64),
}

impl Automation {
    /// The selection policy for a computer player, `None` for a human.
    pub fn policy(self) -> Option<Policy> {
        match self {
            Self::Human => None,
            Self::Random => Some(Policy::Uniform),
            Self::Greedy => Some(Policy::Greedy),
            Self::Skill(skill) => Some(Policy::Weighted { skill }),
        }
    }
}

/// Accepts `human`/`off`, `rand`/`random`, `best`/`greedy` and `skill=<float>`.
impl FromStr for Automation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if let Some(value) = lower.strip_prefix("skill=") {
            return match value.trim().parse::<f64>() {
                Ok(skill) if skill.is_finite() => Ok(Self::Skill(skill)),
                _ => Err(ConfigError::InvalidSkill(value.to_string())),
            };
        }

        match lower.as_str() {
            "human" | "off" => Ok(Self::Human),
            "rand" | "random" => Ok(Self::Random),
            "best" | "greedy" => Ok(Self::Greedy),
            _ => Err(ConfigError::InvalidAutomation(s.to_string())),
        }
    }
}

impl fmt::Display for Automation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Human => f.write_str("human"),
            Self::Random => f.write_str("rand"),
            Self::Greedy => f.write_str("best"),
            Self::Skill(skill) => write!(f, "skill={skill}"),
        }
    }
}

/// Starting position of a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Setup {
    /// The four centre pieces.
    #[default]
    Standard,
    /// No pieces; nobody can ever move.
    Blank,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub size: usize,
    pub setup: Setup,
    pub o: Automation,
    pub x: Automation,
    /// Fixes computer move choices; wall-clock time is used when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            setup: Setup::Standard,
            o: Automation::Human,
            x: Automation::Human,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn automation(&self, player: Player) -> Automation {
        match player {
            Player::O => self.o,
            Player::X => self.x,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Board::blank(self.size).map(|_| ())
    }

    /// Builds the starting game, `O` to move.
    pub fn new_game(&self) -> Result<GameState, ConfigError> {
        let board = match self.setup {
            Setup::Standard => Board::with_size(self.size)?,
            Setup::Blank => Board::blank(self.size)?,
        };
        Ok(GameState::from_board(board, Player::O))
    }

    /// A seeded selector for `player`, or `None` if that side is human.
    pub fn selector_for(&self, player: Player) -> Option<PolicySelector> {
        let policy = self.automation(player).policy()?;
        let base = self.seed.unwrap_or_else(clock_seed);
        Some(PolicySelector::new(policy, base.wrapping_add(u64::from(player.code()))))
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
