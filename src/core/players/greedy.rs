use crate::domain::ports::{Player, TurnView};

/// Always plays the highest-scoring legal move.
pub struct GreedyPlayer {
    name: String,
}

impl GreedyPlayer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Player for GreedyPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, view: &TurnView<'_>) -> Option<usize> {
        let (idx, best) = view
            .legal_moves
            .iter()
            .enumerate()
            .max_by_key(|(_, m)| m.score)?;
        tracing::debug!("{} takes the top-scoring move: {}", self.name, best);
        Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::Board;
    use crate::domain::lexicon::Lexicon;
    use crate::domain::model::{Direction, Move, Position};

    fn mv(word: &str, score: u32) -> Move {
        Move {
            word: word.to_string(),
            start: Position::new(7, 7),
            direction: Direction::Across,
            tiles_used: word.chars().collect(),
            score,
        }
    }

    #[test]
    fn test_greedy_picks_highest_score() {
        let board = Board::new();
        let lexicon = Lexicon::new();
        let moves = vec![mv("at", 4), mv("tea", 12), mv("ate", 6)];
        let view = TurnView {
            board: &board,
            lexicon: &lexicon,
            rack: &['t', 'e', 'a'],
            legal_moves: &moves,
            my_score: 0,
            opponent_score: 0,
            bag_count: 80,
            opponent_rack_count: 7,
        };

        let mut player = GreedyPlayer::new("g");
        assert_eq!(player.choose_move(&view), Some(1));
    }

    #[test]
    fn test_greedy_passes_without_moves() {
        let board = Board::new();
        let lexicon = Lexicon::new();
        let view = TurnView {
            board: &board,
            lexicon: &lexicon,
            rack: &[],
            legal_moves: &[],
            my_score: 0,
            opponent_score: 0,
            bag_count: 0,
            opponent_rack_count: 0,
        };

        let mut player = GreedyPlayer::new("g");
        assert_eq!(player.choose_move(&view), None);
    }
}
