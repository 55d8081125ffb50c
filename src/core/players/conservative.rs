use crate::core::players::remove_tiles;
use crate::domain::model::{Move, Position, Tile};
use crate::domain::ports::{Player, TurnView};
use std::collections::HashMap;

const VOWELS: [Tile; 5] = ['a', 'e', 'i', 'o', 'u'];

/// High-value tiles worth holding back for a big play.
const POWER_TILES: [Tile; 5] = ['s', 'z', 'q', 'j', 'x'];

const IDEAL_VOWEL_RATIO: f64 = 0.4;

/// Flexibility value of keeping a tile, distinct from its point value:
/// an S or a common vowel sets up future plays, a Q does not.
fn flexibility_value(tile: Tile) -> f64 {
    match tile {
        'a' | 'e' | 'i' | 'o' | 'u' => 3.0,
        's' => 4.0,
        'b' | 'c' | 'd' | 'g' | 'h' | 'l' | 'm' | 'n' | 'p' | 'r' | 't' | 'y' => 2.0,
        _ => 1.0,
    }
}

/// Trades raw points for consistency: keeps the rack balanced, holds power
/// tiles until they pay, and avoids opening the board next to its plays.
pub struct ConservativePlayer {
    name: String,
    min_acceptable_score: u32,
    power_tile_threshold: u32,
}

impl ConservativePlayer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            min_acceptable_score: 8,
            power_tile_threshold: 20,
        }
    }

    /// 0.0..=1.0, where 1.0 is a perfectly balanced rack.
    fn rack_balance(&self, rack: &[Tile]) -> f64 {
        if rack.is_empty() {
            return 0.0;
        }

        let vowel_count = rack.iter().filter(|t| VOWELS.contains(t)).count();
        let current_ratio = vowel_count as f64 / rack.len() as f64;
        let ratio_score = 1.0 - (current_ratio - IDEAL_VOWEL_RATIO).abs();

        let mut letter_counts: HashMap<Tile, usize> = HashMap::new();
        for tile in rack {
            *letter_counts.entry(*tile).or_insert(0) += 1;
        }
        let duplication_penalty: f64 = letter_counts
            .values()
            .map(|count| (count - 1) as f64 * 0.1)
            .sum();

        (ratio_score - duplication_penalty).max(0.0)
    }

    /// Quality of the tiles left behind after a play.
    fn evaluate_leave(&self, remaining_rack: &[Tile]) -> f64 {
        let mut leave_score = self.rack_balance(remaining_rack);

        leave_score += remaining_rack
            .iter()
            .map(|t| flexibility_value(*t) * 0.1)
            .sum::<f64>();

        let power_tile_count = remaining_rack
            .iter()
            .filter(|t| POWER_TILES.contains(t))
            .count();
        leave_score -= power_tile_count as f64 * 0.15;

        leave_score
    }

    fn should_use_power_tile(&self, mv: &Move) -> bool {
        let uses_power_tile = mv.tiles_used.iter().any(|t| POWER_TILES.contains(t));
        if !uses_power_tile {
            return true;
        }

        // An S spent on a decent pluralization is fine.
        if mv.tiles_used.contains(&'s')
            && mv.score as f64 >= self.power_tile_threshold as f64 * 0.75
        {
            return true;
        }

        mv.score >= self.power_tile_threshold
    }

    fn evaluate_move(&self, mv: &Move, view: &TurnView<'_>) -> f64 {
        let mut evaluation = mv.score as f64 * 0.5;

        let mut remaining_rack = view.rack.to_vec();
        remove_tiles(&mut remaining_rack, &mv.tiles_used);
        evaluation += self.evaluate_leave(&remaining_rack) * 15.0;

        if !self.should_use_power_tile(mv) {
            evaluation *= 0.5;
        }

        // Prefer plays that keep the rows around the word closed off.
        let Position { row, col } = mv.start;
        if row > 0 && view.board.is_empty(Position::new(row - 1, col)) {
            evaluation *= 0.8;
        }
        if row < 14 && view.board.is_empty(Position::new(row + 1, col)) {
            evaluation *= 0.8;
        }

        evaluation
    }
}

impl Player for ConservativePlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, view: &TurnView<'_>) -> Option<usize> {
        if view.legal_moves.is_empty() {
            return None;
        }

        let viable: Vec<usize> = view
            .legal_moves
            .iter()
            .enumerate()
            .filter(|(_, m)| m.score >= self.min_acceptable_score)
            .map(|(i, _)| i)
            .collect();

        if viable.is_empty() {
            // Nothing meets the bar; take the best scrap if it scores at all.
            let (idx, best) = view
                .legal_moves
                .iter()
                .enumerate()
                .max_by_key(|(_, m)| m.score)?;
            if best.score > 0 {
                return Some(idx);
            }
            return None;
        }

        let (best_idx, best_eval) = viable
            .into_iter()
            .map(|i| (i, self.evaluate_move(&view.legal_moves[i], view)))
            .max_by(|a, b| a.1.total_cmp(&b.1))?;

        let chosen = &view.legal_moves[best_idx];
        tracing::debug!(
            "{} plays {} (evaluation {:.1}, rack balance {:.2})",
            self.name,
            chosen,
            best_eval,
            self.rack_balance(view.rack)
        );
        Some(best_idx)
    }
}
