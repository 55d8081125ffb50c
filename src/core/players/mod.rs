pub mod adversarial;
pub mod conservative;
pub mod greedy;
pub mod human;
pub mod mcts;

pub use adversarial::AdversarialPlayer;
pub use conservative::ConservativePlayer;
pub use greedy::GreedyPlayer;
pub use human::HumanPlayer;
pub use mcts::MctsPlayer;

use crate::domain::model::{Tile, TILE_DISTRIBUTION};
use crate::domain::ports::{Player, TurnView};
use crate::utils::error::{Result, ScrabbleError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Tiles not visible to the player on this turn: the full distribution
/// minus the board and the player's own rack. The opponent's rack and the
/// bag both live in here, which is exactly what simulation players want
/// to sample from.
pub(crate) fn unseen_tiles(view: &TurnView<'_>) -> Vec<Tile> {
    let board_tiles = view.board.placed_tiles();
    let mut pool = Vec::new();
    for (letter, count, _) in TILE_DISTRIBUTION {
        let seen = board_tiles.iter().filter(|t| *t == letter).count()
            + view.rack.iter().filter(|t| *t == letter).count();
        let remaining = (*count as usize).saturating_sub(seen);
        for _ in 0..remaining {
            pool.push(*letter);
        }
    }
    pool
}

pub(crate) fn remove_tiles(pool: &mut Vec<Tile>, tiles: &[Tile]) {
    for tile in tiles {
        if let Some(idx) = pool.iter().position(|t| t == tile) {
            pool.remove(idx);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Greedy,
    Conservative,
    Adversarial,
    Mcts,
    Human,
}

/// A buildable player description, shared by the CLI flags and the
/// tournament TOML roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: String,
    pub kind: PlayerKind,
    /// Monte Carlo rollouts per candidate move (MCTS only).
    #[serde(default = "default_simulations")]
    pub simulations: usize,
    /// Candidate moves examined for opponent replies (adversarial only).
    #[serde(default = "default_candidates")]
    pub candidates: usize,
}

fn default_simulations() -> usize {
    25
}

fn default_candidates() -> usize {
    10
}

impl PlayerSpec {
    pub fn new(name: &str, kind: PlayerKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            simulations: default_simulations(),
            candidates: default_candidates(),
        }
    }

    pub fn build(&self, seed: Option<u64>) -> Box<dyn Player> {
        match self.kind {
            PlayerKind::Greedy => Box::new(GreedyPlayer::new(&self.name)),
            PlayerKind::Conservative => Box::new(ConservativePlayer::new(&self.name)),
            PlayerKind::Adversarial => {
                Box::new(AdversarialPlayer::new(&self.name, self.candidates))
            }
            PlayerKind::Mcts => match seed {
                Some(seed) => Box::new(MctsPlayer::with_seed(&self.name, self.simulations, seed)),
                None => Box::new(MctsPlayer::new(&self.name, self.simulations)),
            },
            PlayerKind::Human => Box::new(HumanPlayer::new(&self.name)),
        }
    }
}

/// Parse CLI specs of the form `greedy`, `mcts`, or `mcts:50`.
impl FromStr for PlayerSpec {
    type Err = ScrabbleError;

    fn from_str(s: &str) -> Result<Self> {
        let (kind_str, param) = match s.split_once(':') {
            Some((k, p)) => (k, Some(p)),
            None => (s, None),
        };

        let (kind, default_name) = match kind_str.trim().to_lowercase().as_str() {
            "greedy" => (PlayerKind::Greedy, "Greedy AI"),
            "conservative" => (PlayerKind::Conservative, "Conservative AI"),
            "adversarial" => (PlayerKind::Adversarial, "Adversarial AI"),
            "mcts" => (PlayerKind::Mcts, "MCTS AI"),
            "human" => (PlayerKind::Human, "Human"),
            other => {
                return Err(ScrabbleError::InvalidConfigValueError {
                    field: "player".to_string(),
                    value: other.to_string(),
                    reason: "expected greedy, conservative, adversarial, mcts[:sims], or human"
                        .to_string(),
                })
            }
        };

        let mut spec = PlayerSpec::new(default_name, kind);
        if let Some(param) = param {
            let value: usize =
                param
                    .parse()
                    .map_err(|_| ScrabbleError::InvalidConfigValueError {
                        field: "player".to_string(),
                        value: param.to_string(),
                        reason: "parameter must be a positive integer".to_string(),
                    })?;
            if value == 0 {
                return Err(ScrabbleError::InvalidConfigValueError {
                    field: "player".to_string(),
                    value: param.to_string(),
                    reason: "parameter must be a positive integer".to_string(),
                });
            }
            match kind {
                PlayerKind::Mcts => spec.simulations = value,
                PlayerKind::Adversarial => spec.candidates = value,
                _ => {
                    return Err(ScrabbleError::InvalidConfigValueError {
                        field: "player".to_string(),
                        value: s.to_string(),
                        reason: "only mcts and adversarial take a parameter".to_string(),
                    })
                }
            }
        }
        Ok(spec)
    }
}
