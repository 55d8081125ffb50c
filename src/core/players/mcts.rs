use crate::core::players::{remove_tiles, unseen_tiles};
use crate::core::solver;
use crate::domain::ports::{Player, TurnView};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Two-ply Monte Carlo search: for every legal move, sample plausible
/// opponent racks from the unseen tiles, solve the opponent's best reply
/// on the resulting board, and keep the move with the highest average
/// net score.
pub struct MctsPlayer {
    name: String,
    num_simulations: usize,
    rng: StdRng,
}

impl MctsPlayer {
    pub fn new(name: &str, num_simulations: usize) -> Self {
        Self {
            name: name.to_string(),
            num_simulations: num_simulations.max(1),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(name: &str, num_simulations: usize, seed: u64) -> Self {
        Self {
            name: name.to_string(),
            num_simulations: num_simulations.max(1),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Player for MctsPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, view: &TurnView<'_>) -> Option<usize> {
        if view.legal_moves.is_empty() {
            return None;
        }

        let mut best: Option<(usize, f64)> = None;

        for (idx, mv) in view.legal_moves.iter().enumerate() {
            let mut pool = unseen_tiles(view);
            remove_tiles(&mut pool, &mv.tiles_used);

            let mut test_board = view.board.clone();
            let mut scratch = mv.tiles_used.clone();
            if test_board
                .place_word(&mv.word, mv.start, mv.direction, &mut scratch)
                .is_err()
            {
                continue;
            }

            let mut net_total = 0i64;
            for _ in 0..self.num_simulations {
                let draw = pool.len().min(7);
                let opponent_rack: Vec<char> = pool
                    .choose_multiple(&mut self.rng, draw)
                    .copied()
                    .collect();

                let best_reply = solver::legal_moves(view.lexicon, &test_board, &opponent_rack)
                    .first()
                    .map(|m| m.score as i64)
                    .unwrap_or(0);
                net_total += mv.score as i64 - best_reply;
            }
            let avg_net = net_total as f64 / self.num_simulations as f64;

            if best.map(|(_, n)| avg_net > n).unwrap_or(true) {
                best = Some((idx, avg_net));
            }
        }

        let (idx, avg_net) = best?;
        tracing::debug!(
            "{} plays {} (expected net {:+.1} over {} simulations)",
            self.name,
            view.legal_moves[idx],
            avg_net,
            self.num_simulations
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
    fn test_seeded_mcts_is_deterministic() {
        let lexicon = Lexicon::from_words(["care", "cares", "eat", "eats", "sea", "tea"]);
        let board = sample_board();
        let rack = ['s', 'e', 'a'];
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

        let mut p1 = MctsPlayer::with_seed("m", 5, 99);
        let mut p2 = MctsPlayer::with_seed("m", 5, 99);
        let first = p1.choose_move(&view).unwrap();
        let second = p2.choose_move(&view).unwrap();
        assert_eq!(first, second);
        assert!(first < moves.len());
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
        let mut player = MctsPlayer::new("m", 3);
        assert_eq!(player.choose_move(&view), None);
    }
}
