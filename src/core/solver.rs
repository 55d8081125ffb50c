use crate::domain::board::Board;
use crate::domain::lexicon::{Lexicon, LetterNode};
use crate::domain::model::{Direction, Move, Position, Tile};
use std::collections::{HashMap, HashSet};

/// Anchor-based move generator. For each play direction it finds the
/// anchor squares (empty squares touching placed tiles; the center square
/// when the board is blank), computes which letters may legally sit on
/// each empty square given the perpendicular words, and then walks the
/// letter tree left and right of every anchor to enumerate placements.
pub struct SolveState<'a> {
    lexicon: &'a Lexicon,
    board: &'a Board,
    rack: Vec<Tile>,
    reference_rack: Vec<Tile>,
    cross_checks: HashMap<Position, Vec<char>>,
    anchors: HashSet<Position>,
    direction: Direction,
    found_moves: Vec<Move>,
}

impl<'a> SolveState<'a> {
    pub fn new(lexicon: &'a Lexicon, board: &'a Board, rack: &[Tile]) -> Self {
        Self {
            lexicon,
            board,
            rack: rack.to_vec(),
            reference_rack: rack.to_vec(),
            cross_checks: HashMap::new(),
            anchors: HashSet::new(),
            direction: Direction::Across,
            found_moves: Vec::new(),
        }
    }

    pub fn find_all_options(&mut self) {
        for direction in [Direction::Across, Direction::Down] {
            self.direction = direction;
            self.anchors = self.find_anchors();
            self.cross_checks = self.cross_check();

            let anchors: Vec<Position> = self.anchors.iter().copied().collect();
            for anchor in anchors {
                if self.board.is_filled(direction.prev(anchor)) {
                    // Tiles already sit before the anchor: walk that prefix
                    // through the tree, then extend past the anchor.
                    let mut scan = direction.prev(anchor);
                    let mut partial = String::new();
                    partial.push(self.board.get_tile(scan).unwrap_or_default());
                    while self.board.is_filled(direction.prev(scan)) {
                        scan = direction.prev(scan);
                        partial.insert(0, self.board.get_tile(scan).unwrap_or_default());
                    }
                    let lexicon = self.lexicon;
                    if let Some(node) = lexicon.lookup(&partial) {
                        self.extend_after(&mut partial, node, anchor, false);
                    }
                } else {
                    // Build prefixes from the rack, bounded by the run of
                    // free non-anchor squares before this anchor.
                    let mut limit = 0;
                    let mut scan = anchor;
                    while self.board.is_empty(direction.prev(scan))
                        && !self.anchors.contains(&direction.prev(scan))
                    {
                        limit += 1;
                        scan = direction.prev(scan);
                    }
                    let root = self.lexicon.root();
                    let mut partial = String::new();
                    self.before_part(&mut partial, root, anchor, limit);
                }
            }
        }
    }

    pub fn into_moves(self) -> Vec<Move> {
        self.found_moves
    }

    pub fn moves(&self) -> &[Move] {
        &self.found_moves
    }

    /// Anchors are empty squares with at least one placed neighbor. A blank
    /// board has no placed tiles, so the center opening square stands in.
    fn find_anchors(&self) -> HashSet<Position> {
        let mut anchors = HashSet::new();
        if self.board.is_blank() {
            anchors.insert(self.board.center());
            return anchors;
        }
        for pos in self.board.all_positions() {
            let neighbor_filled = self.board.is_filled(self.direction.prev(pos))
                || self.board.is_filled(self.direction.next(pos))
                || self.board.is_filled(self.direction.cross_prev(pos))
                || self.board.is_filled(self.direction.cross_next(pos));
            if self.board.is_empty(pos) && neighbor_filled {
                anchors.insert(pos);
            }
        }
        anchors
    }

    /// For every empty square, the set of letters that keep the
    /// perpendicular word (if any) legal.
    fn cross_check(&self) -> HashMap<Position, Vec<char>> {
        let mut result = HashMap::new();
        for pos in self.board.all_positions() {
            if self.board.is_filled(pos) {
                continue;
            }

            let mut letters_before = String::new();
            let mut scan = pos;
            while self.board.is_filled(self.direction.cross_prev(scan)) {
                scan = self.direction.cross_prev(scan);
                letters_before.insert(0, self.board.get_tile(scan).unwrap_or_default());
            }

            let mut letters_after = String::new();
            let mut scan = pos;
            while self.board.is_filled(self.direction.cross_next(scan)) {
                scan = self.direction.cross_next(scan);
                letters_after.push(self.board.get_tile(scan).unwrap_or_default());
            }

            let legal_here: Vec<char> = if letters_before.is_empty() && letters_after.is_empty() {
                ('a'..='z').collect()
            } else {
                ('a'..='z')
                    .filter(|letter| {
                        let word = format!("{}{}{}", letters_before, letter, letters_after);
                        self.lexicon.is_word(&word)
                    })
                    .collect()
            };
            result.insert(pos, legal_here);
        }
        result
    }

    fn before_part(
        &mut self,
        partial: &mut String,
        node: &'a LetterNode,
        anchor: Position,
        limit: usize,
    ) {
        self.extend_after(partial, node, anchor, false);
        if limit > 0 {
            let children: Vec<(char, &'a LetterNode)> = node.children().collect();
            for (letter, child) in children {
                if let Some(idx) = self.rack.iter().position(|t| *t == letter) {
                    self.rack.remove(idx);
                    partial.push(letter);
                    self.before_part(partial, child, anchor, limit - 1);
                    partial.pop();
                    self.rack.push(letter);
                }
            }
        }
    }

    fn extend_after(
        &mut self,
        partial: &mut String,
        node: &'a LetterNode,
        next_pos: Position,
        anchor_filled: bool,
    ) {
        if !self.board.is_filled(next_pos) && node.is_word() && anchor_filled {
            self.record_move(partial, self.direction.prev(next_pos));
        }
        if !self.board.in_bounds(next_pos) {
            return;
        }
        if self.board.is_empty(next_pos) {
            let legal_here = self
                .cross_checks
                .get(&next_pos)
                .cloned()
                .unwrap_or_default();
            let children: Vec<(char, &'a LetterNode)> = node.children().collect();
            for (letter, child) in children {
                if !legal_here.contains(&letter) {
                    continue;
                }
                if let Some(idx) = self.rack.iter().position(|t| *t == letter) {
                    self.rack.remove(idx);
                    partial.push(letter);
                    self.extend_after(partial, child, self.direction.next(next_pos), true);
                    partial.pop();
                    self.rack.push(letter);
                }
            }
        } else if let Some(existing) = self.board.get_tile(next_pos) {
            if let Some(child) = node.child(existing) {
                partial.push(existing);
                self.extend_after(partial, child, self.direction.next(next_pos), true);
                partial.pop();
            }
        }
    }

    fn record_move(&mut self, word: &str, last_pos: Position) {
        let mut start = last_pos;
        for _ in 1..word.chars().count() {
            start = self.direction.prev(start);
        }

        match self.board.score_move(word, start, self.direction) {
            Ok((score, _)) => {
                // Tiles consumed = reference rack minus what is still held.
                let mut tiles_used = self.reference_rack.clone();
                for tile in &self.rack {
                    if let Some(idx) = tiles_used.iter().position(|t| t == tile) {
                        tiles_used.remove(idx);
                    }
                }
                self.found_moves.push(Move {
                    word: word.to_string(),
                    start,
                    direction: self.direction,
                    tiles_used,
                    score,
                });
            }
            Err(e) => {
                // The generator should only propose placeable words.
                tracing::warn!("Discarding unscorable candidate '{}': {}", word, e);
            }
        }
    }
}

/// All legal moves for `rack` on `board`, highest score first.
pub fn legal_moves(lexicon: &Lexicon, board: &Board, rack: &[Tile]) -> Vec<Move> {
    let mut state = SolveState::new(lexicon, board, rack);
    state.find_all_options();
    let mut moves = state.into_moves();
    moves.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.word.cmp(&b.word))
            .then_with(|| (a.start.row, a.start.col).cmp(&(b.start.row, b.start.col)))
            .then_with(|| (a.direction == Direction::Down).cmp(&(b.direction == Direction::Down)))
    });
    moves.dedup();
    moves
}
