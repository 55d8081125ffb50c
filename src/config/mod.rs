pub mod cli;
pub mod toml_config;

pub use cli::LocalStorage;
pub use toml_config::TournamentConfig;

use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "scrabble"))]
#[cfg_attr(feature = "cli", command(about = "Play a single game between two Scrabble strategies"))]
pub struct CliConfig {
    /// Word list file, one word per line.
    #[cfg_attr(feature = "cli", arg(long, default_value = "assets/demo_words.txt"))]
    pub lexicon: String,

    /// Fetch the word list over HTTP instead of reading a file.
    #[cfg_attr(feature = "cli", arg(long))]
    pub lexicon_url: Option<String>,

    /// First player, e.g. "greedy", "conservative", "mcts:50", "human".
    #[cfg_attr(feature = "cli", arg(long, default_value = "greedy"))]
    pub player1: String,

    /// Second player.
    #[cfg_attr(feature = "cli", arg(long, default_value = "conservative"))]
    pub player2: String,

    /// Seed for the tile bag and any randomized strategy.
    #[cfg_attr(feature = "cli", arg(long))]
    pub seed: Option<u64>,

    /// Consecutive passes that end the game.
    #[cfg_attr(feature = "cli", arg(long, default_value = "4"))]
    pub pass_limit: u32,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Log CPU and memory usage"))]
    pub monitor: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("lexicon", &self.lexicon)?;
        if let Some(url) = &self.lexicon_url {
            validation::validate_url("lexicon_url", url)?;
        }
        validation::validate_non_empty_string("player1", &self.player1)?;
        validation::validate_non_empty_string("player2", &self.player2)?;
        validation::validate_range("pass_limit", self.pass_limit, 1, 12)?;
        Ok(())
    }
}
