use crate::core::players::{remove_tiles, unseen_tiles};
use crate::core::solver;
use crate::domain::model::{letter_value, Tile};
use crate::domain::ports::{Player, TurnView};

/// Plays defense: assumes the opponent drew the most dangerous rack the
/// unseen tiles allow, and picks the candidate move with the best score
/// margin over that opponent's strongest reply.
pub struct AdversarialPlayer {
    name: String,
    /// How many of the top-scoring moves to examine. Each candidate costs
    /// a full solver run for the opponent.
    candidates: usize,
}

impl AdversarialPlayer {
    pub fn new(name: &str, candidates: usize) -> Self {
        Self {
            name: name.to_string(),
            candidates: candidates.max(1),
        }
    }

    /// Worst-case opponent rack: the seven highest-value unseen tiles.
    fn threat_rack(&self, mut pool: Vec<Tile>) -> Vec<Tile> {
        pool.sort_by(|a, b| letter_value(*b).cmp(&letter_value(*a)));
        pool.truncate(7);
        pool
    }
}

impl Player for AdversarialPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, view: &TurnView<'_>) -> Option<usize> {
        if view.legal_moves.is_empty() {
            return None;
        }

        let mut best: Option<(usize, i64)> = None;

        for (idx, mv) in view.legal_moves.iter().enumerate().take(self.candidates) {
            let mut pool = unseen_tiles(view);
            remove_tiles(&mut pool, &mv.tiles_used);
            let opponent_rack = self.threat_rack(pool);

            let mut test_board = view.board.clone();
            let mut scratch = mv.tiles_used.clone();
            if test_board
                .place_word(&mv.word, mv.start, mv.direction, &mut scratch)
                .is_err()
            {
                continue;
            }

            let best_reply = solver::legal_moves(view.lexicon, &test_board, &opponent_rack)
                .first()
                .map(|m| m.score as i64)
                .unwrap_or(0);
            let net = mv.score as i64 - best_reply;

            if best.map(|(_, n)| net > n).unwrap_or(true) {
                best = Some((idx, net));
            }
        }

        let (idx, net) = best?;
        tracing::debug!(
            "{} plays {} (worst-case margin {:+})",
            self.name,
            view.legal_moves[idx],
            net
        );
        Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::sample_board;
    use crate::domain::lexicon::Lexicon;

    #[test]
    fn test_threat_rack_takes_highest_values() {
        let player = AdversarialPlayer::new("a", 10);
        let rack = player.threat_rack(vec!['e', 'q', 'a', 'z', 'x', 'j', 'k', 'n', 'o']);
        assert_eq!(rack.len(), 7);
        assert!(rack.contains(&'q'));
        assert!(rack.contains(&'z'));
        assert!(!rack.contains(&'o'));
    }

    #[test]
    fn test_chooses_a_valid_index() {
        let lexicon = Lexicon::from_words(["care", "cares", "eat", "eats"]);
        let board = sample_board();
        let rack = ['s', 'e'];
        let moves = solver::legal_moves(&lexicon, &board, &rack);
        assert!(!moves.is_empty());

        let view = TurnView {
            board: &board,
            lexicon: &lexicon,
            rack: &rack,
            legal_moves: &moves,
            my_score: 0,
            opponent_score: 0,
            bag_count: 70,
            opponent_rack_count: 7,
        };

        let mut player = AdversarialPlayer::new("a", 4);
        let choice = player.choose_move(&view).unwrap();
        assert!(choice < moves.len());
    }

    #[test]
    fn test_passes_without_moves() {
        let lexicon = Lexicon::new();
        let board = sample_board();
        let view = TurnView {
            board: &board,
            lexicon: &lexicon,
            rack: &['q'],
            legal_moves: &[],
            my_score: 0,
            opponent_score: 0,
            bag_count: 70,
            opponent_rack_count: 7,
        };
        let mut player = AdversarialPlayer::new("a", 4);
        assert_eq!(player.choose_move(&view), None);
    }
}
