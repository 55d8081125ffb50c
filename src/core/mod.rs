pub mod game;
pub mod players;
pub mod solver;

pub use crate::domain::model::{Direction, Move, Position, Tile};
pub use crate::domain::ports::{Player, Storage, TurnView};
pub use crate::utils::error::Result;
pub use game::{GameConfig, GameOutcome, ScrabbleGame};
pub use solver::{legal_moves, SolveState};
