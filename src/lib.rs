pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{LocalStorage, TournamentConfig};

pub use app::{TournamentManager, TournamentOptions, TournamentResults};
pub use core::game::{GameConfig, ScrabbleGame};
pub use core::solver::legal_moves;
pub use domain::board::Board;
pub use domain::lexicon::Lexicon;
pub use utils::error::{Result, ScrabbleError};
