use crate::domain::model::{letter_value, Direction, Position, Tile};
use crate::utils::error::{Result, ScrabbleError};
use std::path::Path;

pub const BOARD_SIZE: i32 = 15;

/// Premium square layout, standard Scrabble pattern.
/// `T`/`D` = triple/double word, `t`/`d` = triple/double letter.
const PREMIUM_LAYOUT: [&str; 15] = [
    "T..d...T...d..T",
    ".D...t...t...D.",
    "..D...d.d...D..",
    "d..D...d...D..d",
    "....D.....D....",
    ".t...t...t...t.",
    "..d...d.d...d..",
    "T..d...D...d..T",
    "..d...d.d...d..",
    ".t...t...t...t.",
    "....D.....D....",
    "d..D...d...D..d",
    "..D...d.d...D..",
    ".D...t...t...D.",
    "T..d...T...d..T",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Premium {
    Plain,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
}

impl Premium {
    pub fn letter_multiplier(self) -> u32 {
        match self {
            Premium::DoubleLetter => 2,
            Premium::TripleLetter => 3,
            _ => 1,
        }
    }

    pub fn word_multiplier(self) -> u32 {
        match self {
            Premium::DoubleWord => 2,
            Premium::TripleWord => 3,
            _ => 1,
        }
    }
}

pub fn premium_at(pos: Position) -> Premium {
    if !in_bounds(pos) {
        return Premium::Plain;
    }
    let ch = PREMIUM_LAYOUT[pos.row as usize].as_bytes()[pos.col as usize];
    match ch {
        b'T' => Premium::TripleWord,
        b'D' => Premium::DoubleWord,
        b't' => Premium::TripleLetter,
        b'd' => Premium::DoubleLetter,
        _ => Premium::Plain,
    }
}

pub fn in_bounds(pos: Position) -> bool {
    pos.row >= 0 && pos.row < BOARD_SIZE && pos.col >= 0 && pos.col < BOARD_SIZE
}

/// 15x15 tile grid. Out-of-bounds reads are empty and unfilled, which the
/// solver relies on when scanning past the edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<Tile>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            grid: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
        }
    }

    /// Parse a board from 15 rows of 15 characters, `.` for empty squares.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        if rows.len() != BOARD_SIZE as usize {
            return Err(ScrabbleError::GameError {
                message: format!("expected {} board rows, got {}", BOARD_SIZE, rows.len()),
            });
        }
        let mut board = Board::new();
        for (r, row) in rows.iter().enumerate() {
            let chars: Vec<char> = row.chars().collect();
            if chars.len() != BOARD_SIZE as usize {
                return Err(ScrabbleError::GameError {
                    message: format!("board row {} has {} squares, expected {}", r, chars.len(), BOARD_SIZE),
                });
            }
            for (c, ch) in chars.iter().enumerate() {
                match ch {
                    '.' => {}
                    'a'..='z' => board.grid[r][c] = Some(*ch),
                    'A'..='Z' => board.grid[r][c] = Some(ch.to_ascii_lowercase()),
                    other => {
                        return Err(ScrabbleError::GameError {
                            message: format!("invalid board character '{}'", other),
                        })
                    }
                }
            }
        }
        Ok(board)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let rows: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
        Self::from_rows(&rows)
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        in_bounds(pos)
    }

    pub fn is_filled(&self, pos: Position) -> bool {
        self.get_tile(pos).is_some()
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        in_bounds(pos) && self.grid[pos.row as usize][pos.col as usize].is_none()
    }

    pub fn get_tile(&self, pos: Position) -> Option<Tile> {
        if !in_bounds(pos) {
            return None;
        }
        self.grid[pos.row as usize][pos.col as usize]
    }

    pub fn set_tile(&mut self, pos: Position, tile: Tile) {
        if in_bounds(pos) {
            self.grid[pos.row as usize][pos.col as usize] = Some(tile);
        }
    }

    pub fn all_positions(&self) -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
    }

    pub fn center(&self) -> Position {
        Position::new(BOARD_SIZE / 2, BOARD_SIZE / 2)
    }

    pub fn is_blank(&self) -> bool {
        self.all_positions().all(|pos| !self.is_filled(pos))
    }

    /// Tiles currently on the board, one entry per occupied square.
    pub fn placed_tiles(&self) -> Vec<Tile> {
        self.all_positions()
            .filter_map(|pos| self.get_tile(pos))
            .collect()
    }

    /// Score `word` played at `start` in `direction` without mutating the
    /// board. Premiums count only under newly placed tiles; cross words
    /// formed by new tiles are scored with the same premium rules; placing
    /// seven tiles earns the 50-point bonus.
    ///
    /// Returns the score and the tiles that would come off the rack.
    pub fn score_move(
        &self,
        word: &str,
        start: Position,
        direction: Direction,
    ) -> Result<(u32, Vec<Tile>)> {
        let mut pos = start;
        let mut word_score = 0u32;
        let mut word_multiplier = 1u32;
        let mut cross_total = 0u32;
        let mut placed = Vec::new();

        for letter in word.chars() {
            if !in_bounds(pos) {
                return Err(ScrabbleError::IllegalMove {
                    message: format!("'{}' at {} runs off the board", word, start),
                });
            }
            match self.get_tile(pos) {
                Some(existing) => {
                    if existing != letter {
                        return Err(ScrabbleError::IllegalMove {
                            message: format!(
                                "square {} holds '{}', cannot play '{}'",
                                pos, existing, letter
                            ),
                        });
                    }
                    // Existing tiles score face value, premiums already spent.
                    word_score += letter_value(letter);
                }
                None => {
                    let premium = premium_at(pos);
                    word_score += letter_value(letter) * premium.letter_multiplier();
                    word_multiplier *= premium.word_multiplier();
                    cross_total += self.cross_word_score(pos, letter, direction, premium);
                    placed.push(letter);
                }
            }
            pos = direction.next(pos);
        }

        if placed.is_empty() {
            return Err(ScrabbleError::IllegalMove {
                message: format!("'{}' at {} places no new tiles", word, start),
            });
        }

        let mut total = word_score * word_multiplier + cross_total;
        if placed.len() == 7 {
            total += 50;
        }
        Ok((total, placed))
    }

    /// Score of the perpendicular word formed by placing `letter` at `pos`,
    /// or 0 when no cross word is formed.
    fn cross_word_score(
        &self,
        pos: Position,
        letter: Tile,
        direction: Direction,
        premium: Premium,
    ) -> u32 {
        let mut score = letter_value(letter) * premium.letter_multiplier();
        let mut length = 1;

        let mut scan = direction.cross_prev(pos);
        while let Some(tile) = self.get_tile(scan) {
            score += letter_value(tile);
            length += 1;
            scan = direction.cross_prev(scan);
        }

        let mut scan = direction.cross_next(pos);
        while let Some(tile) = self.get_tile(scan) {
            score += letter_value(tile);
            length += 1;
            scan = direction.cross_next(scan);
        }

        if length > 1 {
            score * premium.word_multiplier()
        } else {
            0
        }
    }

    /// Commit a word to the board, consuming rack tiles for empty squares.
    pub fn place_word(
        &mut self,
        word: &str,
        start: Position,
        direction: Direction,
        rack: &mut Vec<Tile>,
    ) -> Result<()> {
        // Validate the full placement before mutating anything.
        let (_, placed) = self.score_move(word, start, direction)?;
        let mut remaining = rack.clone();
        for tile in &placed {
            match remaining.iter().position(|t| t == tile) {
                Some(idx) => {
                    remaining.remove(idx);
                }
                None => {
                    return Err(ScrabbleError::IllegalMove {
                        message: format!("rack does not hold '{}'", tile),
                    })
                }
            }
        }

        let mut pos = start;
        for letter in word.chars() {
            if self.get_tile(pos).is_none() {
                self.set_tile(pos, letter);
            }
            pos = direction.next(pos);
        }
        *rack = remaining;
        Ok(())
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "   {}", (0..BOARD_SIZE).map(|c| format!("{:2}", c)).collect::<Vec<_>>().join(""))?;
        for row in 0..BOARD_SIZE {
            write!(f, "{:2} ", row)?;
            for col in 0..BOARD_SIZE {
                let pos = Position::new(row, col);
                let ch = match self.get_tile(pos) {
                    Some(tile) => tile.to_ascii_uppercase(),
                    None => PREMIUM_LAYOUT[row as usize].as_bytes()[col as usize] as char,
                };
                write!(f, " {}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Small mid-game position used by the solver binary and the tests:
/// CARE across through the center with EAT hanging off its last letter.
pub fn sample_board() -> Board {
    let mut board = Board::new();
    board.set_tile(Position::new(7, 6), 'c');
    board.set_tile(Position::new(7, 7), 'a');
    board.set_tile(Position::new(7, 8), 'r');
    board.set_tile(Position::new(7, 9), 'e');
    board.set_tile(Position::new(8, 9), 'a');
    board.set_tile(Position::new(9, 9), 't');
    board
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_premium_layout_corners_and_center() {
        assert_eq!(premium_at(Position::new(0, 0)), Premium::TripleWord);
        assert_eq!(premium_at(Position::new(0, 7)), Premium::TripleWord);
        assert_eq!(premium_at(Position::new(14, 14)), Premium::TripleWord);
        assert_eq!(premium_at(Position::new(7, 7)), Premium::DoubleWord);
        assert_eq!(premium_at(Position::new(1, 5)), Premium::TripleLetter);
        assert_eq!(premium_at(Position::new(0, 3)), Premium::DoubleLetter);
        assert_eq!(premium_at(Position::new(7, 1)), Premium::Plain);
        // Off-board squares carry no premium.
        assert_eq!(premium_at(Position::new(-1, 0)), Premium::Plain);
    }

    #[test]
    fn test_out_of_bounds_reads_are_empty() {
        let board = Board::new();
        let off = Position::new(-1, 7);
        assert!(!board.is_filled(off));
        assert!(!board.is_empty(off));
        assert_eq!(board.get_tile(off), None);
    }

    #[test]
    fn test_score_opening_word_through_center() {
        let board = Board::new();
        // t(1) + e(1) + a(1), doubled by the center square.
        let (score, placed) = board
            .score_move("tea", Position::new(7, 7), Direction::Across)
            .unwrap();
        assert_eq!(score, 6);
        assert_eq!(placed, vec!['t', 'e', 'a']);
    }

    #[test]
    fn test_score_hook_counts_existing_tiles_without_premiums() {
        let mut board = Board::new();
        let mut rack = vec!['t', 'e', 'a'];
        board
            .place_word("tea", Position::new(7, 7), Direction::Across, &mut rack)
            .unwrap();
        assert!(rack.is_empty());

        // "at" down reuses the t on the center double-word square; the
        // premium must not count a second time.
        let (score, placed) = board
            .score_move("at", Position::new(6, 7), Direction::Down)
            .unwrap();
        assert_eq!(score, 2);
        assert_eq!(placed, vec!['a']);
    }

    #[test]
    fn test_score_cross_words() {
        let mut board = Board::new();
        let mut rack = vec!['t', 'e', 'a'];
        board
            .place_word("tea", Position::new(7, 7), Direction::Across, &mut rack)
            .unwrap();

        // "at" across at (8,7) forms AT plus cross words with TEA above.
        let (score, _) = board
            .score_move("at", Position::new(8, 7), Direction::Across)
            .unwrap();
        // Main word: a(1) + t on the (8,8) double letter (2) = 3.
        // Cross words: "ta" (t above a) = 2 and "et" = e(1) + t doubled (2) = 3.
        assert_eq!(score, 3 + 2 + 3);
    }

    #[test]
    fn test_bingo_bonus_applies_at_seven_tiles() {
        let board = Board::new();
        let (score, placed) = board
            .score_move("retains", Position::new(7, 7), Direction::Across)
            .unwrap();
        assert_eq!(placed.len(), 7);
        // r+e+t+a+i+n+s = 7, the 'i' lands on the (7,11) double letter for
        // +1, and the center square doubles the word: 8 * 2 = 16, plus 50.
        assert_eq!(score, 16 + 50);
    }

    #[test]
    fn test_score_rejects_conflicting_tile() {
        let board = sample_board();
        let result = board.score_move("dog", Position::new(7, 6), Direction::Across);
        assert!(result.is_err());
    }

    #[test]
    fn test_score_rejects_move_placing_no_tiles() {
        let board = sample_board();
        let result = board.score_move("care", Position::new(7, 6), Direction::Across);
        assert!(result.is_err());
    }

    #[test]
    fn test_place_word_requires_rack_tiles() {
        let mut board = Board::new();
        let mut rack = vec!['t', 'e'];
        let result = board.place_word("tea", Position::new(7, 7), Direction::Across, &mut rack);
        assert!(result.is_err());
        // Failed placement must not consume the rack or touch the board.
        assert_eq!(rack, vec!['t', 'e']);
        assert!(board.is_blank());
    }

    #[test]
    fn test_from_rows_round_trip() {
        let board = sample_board();
        let rendered: Vec<String> = (0..BOARD_SIZE)
            .map(|r| {
                (0..BOARD_SIZE)
                    .map(|c| board.get_tile(Position::new(r, c)).unwrap_or('.'))
                    .collect()
            })
            .collect();
        let rows: Vec<&str> = rendered.iter().map(|s| s.as_str()).collect();
        let parsed = Board::from_rows(&rows).unwrap();
        assert_eq!(parsed, board);
    }

    #[test]
    fn test_from_rows_rejects_bad_shapes() {
        assert!(Board::from_rows(&["..."]).is_err());
        let mut rows = vec!["..............."; 14];
        rows.push("..............");
        assert!(Board::from_rows(&rows).is_err());
    }
}
