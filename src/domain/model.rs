use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A letter tile, always lowercase `a..=z`. Blanks are not modeled.
pub type Tile = char;

/// Standard English tile set: (letter, count, point value). 98 tiles, no blanks.
pub const TILE_DISTRIBUTION: &[(char, u8, u32)] = &[
    ('a', 9, 1),
    ('b', 2, 3),
    ('c', 2, 3),
    ('d', 4, 2),
    ('e', 12, 1),
    ('f', 2, 4),
    ('g', 3, 2),
    ('h', 2, 4),
    ('i', 9, 1),
    ('j', 1, 8),
    ('k', 1, 5),
    ('l', 4, 1),
    ('m', 2, 3),
    ('n', 6, 1),
    ('o', 8, 1),
    ('p', 2, 3),
    ('q', 1, 10),
    ('r', 6, 1),
    ('s', 4, 1),
    ('t', 6, 1),
    ('u', 4, 1),
    ('v', 2, 4),
    ('w', 2, 4),
    ('x', 1, 8),
    ('y', 2, 4),
    ('z', 1, 10),
];

pub fn letter_value(letter: Tile) -> u32 {
    TILE_DISTRIBUTION
        .iter()
        .find(|(l, _, _)| *l == letter)
        .map(|(_, _, v)| *v)
        .unwrap_or(0)
}

/// Letter -> count in the full tile set.
pub fn tile_counts() -> HashMap<Tile, u8> {
    TILE_DISTRIBUTION
        .iter()
        .map(|(l, c, _)| (*l, *c))
        .collect()
}

/// Every tile in the standard set, one entry per physical tile.
pub fn standard_bag() -> Vec<Tile> {
    let mut bag = Vec::with_capacity(98);
    for (letter, count, _) in TILE_DISTRIBUTION {
        for _ in 0..*count {
            bag.push(*letter);
        }
    }
    bag
}

pub fn rack_value(rack: &[Tile]) -> u32 {
    rack.iter().map(|t| letter_value(*t)).sum()
}

/// Board coordinate. Signed so the solver can step one square off the edge;
/// the board treats out-of-bounds positions as empty and unfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// The square before `pos` along this direction.
    pub fn prev(self, pos: Position) -> Position {
        match self {
            Direction::Across => Position::new(pos.row, pos.col - 1),
            Direction::Down => Position::new(pos.row - 1, pos.col),
        }
    }

    /// The square after `pos` along this direction.
    pub fn next(self, pos: Position) -> Position {
        match self {
            Direction::Across => Position::new(pos.row, pos.col + 1),
            Direction::Down => Position::new(pos.row + 1, pos.col),
        }
    }

    /// The square before `pos` along the perpendicular direction.
    pub fn cross_prev(self, pos: Position) -> Position {
        self.cross().prev(pos)
    }

    /// The square after `pos` along the perpendicular direction.
    pub fn cross_next(self, pos: Position) -> Position {
        self.cross().next(pos)
    }

    pub fn cross(self) -> Direction {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Across => write!(f, "across"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// A legal placement found by the solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub word: String,
    pub start: Position,
    pub direction: Direction,
    /// Rack tiles this move consumes (letters already on the board excluded).
    pub tiles_used: Vec<Tile>,
    pub score: u32,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' at {} ({}) for {} points",
            self.word, self.start, self.direction, self.score
        )
    }
}
