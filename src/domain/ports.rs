use crate::domain::board::Board;
use crate::domain::lexicon::Lexicon;
use crate::domain::model::{Move, Tile};
use crate::utils::error::Result;

/// Everything a player is allowed to see when choosing a move. Hidden
/// information (the bag order, the opponent's actual rack) stays out;
/// players that want to reason about unseen tiles reconstruct them from
/// the board and the full tile distribution.
pub struct TurnView<'a> {
    pub board: &'a Board,
    pub lexicon: &'a Lexicon,
    pub rack: &'a [Tile],
    pub legal_moves: &'a [Move],
    pub my_score: i32,
    pub opponent_score: i32,
    pub bag_count: usize,
    pub opponent_rack_count: usize,
}

/// A game participant. `choose_move` returns an index into
/// `view.legal_moves`, or `None` to pass the turn.
pub trait Player: Send {
    fn name(&self) -> &str;

    fn choose_move(&mut self, view: &TurnView<'_>) -> Option<usize>;
}

/// Report file storage. Local disk in the binaries, in-memory in tests.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
