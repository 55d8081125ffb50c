pub mod board;
pub mod lexicon;
pub mod model;
pub mod ports;

pub use board::{sample_board, Board, Premium, BOARD_SIZE};
pub use lexicon::{Lexicon, LetterNode};
pub use model::{Direction, Move, Position, Tile};
pub use ports::{Player, Storage, TurnView};
