use crate::core::game::{GameConfig, ScrabbleGame};
use crate::core::players::PlayerSpec;
use crate::domain::lexicon::Lexicon;
use crate::utils::error::{Result, ScrabbleError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

#[derive(Debug, Clone)]
pub struct TournamentOptions {
    pub games_per_matchup: usize,
    /// Upper bound on games played at the same time.
    pub concurrent_matches: usize,
    /// Also pit every player against a copy of itself.
    pub include_self_matchups: bool,
    pub pass_limit: u32,
    pub max_turns: u32,
    /// Base seed; every game derives its own seed from it so reruns
    /// reproduce the full schedule.
    pub seed: Option<u64>,
}

impl Default for TournamentOptions {
    fn default() -> Self {
        Self {
            games_per_matchup: 10,
            concurrent_matches: 2,
            include_self_matchups: true,
            pass_limit: 4,
            max_turns: 200,
            seed: None,
        }
    }
}

/// Per-pairing game log, scores kept in canonical (player1, player2) order
/// regardless of who moved first in each game.
#[derive(Debug, Clone)]
pub struct MatchupRecord {
    pub player1: String,
    pub player2: String,
    pub scores: Vec<(i32, i32)>,
}

#[derive(Debug, Clone, Default)]
pub struct PlayerStats {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub total_points: i64,
    pub scores: Vec<i32>,
}

impl PlayerStats {
    pub fn games(&self) -> usize {
        self.scores.len()
    }

    pub fn win_rate(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.wins as f64 / self.scores.len() as f64 * 100.0
    }

    pub fn average_score(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.scores.iter().map(|s| *s as f64).sum::<f64>() / self.scores.len() as f64
    }

    pub fn max_score(&self) -> i32 {
        self.scores.iter().copied().max().unwrap_or(0)
    }

    pub fn min_score(&self) -> i32 {
        self.scores.iter().copied().min().unwrap_or(0)
    }

    /// Sample standard deviation; 0 with fewer than two games.
    pub fn score_std_dev(&self) -> f64 {
        if self.scores.len() < 2 {
            return 0.0;
        }
        let mean = self.average_score();
        let variance = self
            .scores
            .iter()
            .map(|s| {
                let d = *s as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / (self.scores.len() - 1) as f64;
        variance.sqrt()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TournamentResults {
    pub matchups: Vec<MatchupRecord>,
    pub stats: BTreeMap<String, PlayerStats>,
}

impl TournamentResults {
    fn record_game(&mut self, pair_idx: usize, score1: i32, score2: i32) {
        let (name1, name2) = {
            let record = &mut self.matchups[pair_idx];
            record.scores.push((score1, score2));
            (record.player1.clone(), record.player2.clone())
        };

        // For a self-matchup both updates land on the same entry, so the
        // player records a win and a loss per decided game.
        {
            let entry = self.stats.entry(name1).or_default();
            entry.scores.push(score1);
            entry.total_points += score1 as i64;
            match score1.cmp(&score2) {
                std::cmp::Ordering::Greater => entry.wins += 1,
                std::cmp::Ordering::Less => entry.losses += 1,
                std::cmp::Ordering::Equal => entry.draws += 1,
            }
        }
        {
            let entry = self.stats.entry(name2).or_default();
            entry.scores.push(score2);
            entry.total_points += score2 as i64;
            match score2.cmp(&score1) {
                std::cmp::Ordering::Greater => entry.wins += 1,
                std::cmp::Ordering::Less => entry.losses += 1,
                std::cmp::Ordering::Equal => entry.draws += 1,
            }
        }
    }

    pub fn total_games(&self) -> usize {
        self.matchups.iter().map(|m| m.scores.len()).sum()
    }
}

/// Runs every pairing in the roster for a fixed number of games and
/// aggregates the results. Games are independent, so they run on blocking
/// worker threads bounded by a semaphore.
pub struct TournamentManager {
    roster: Vec<PlayerSpec>,
    options: TournamentOptions,
}

impl TournamentManager {
    pub fn new(roster: Vec<PlayerSpec>, options: TournamentOptions) -> Result<Self> {
        if roster.is_empty() {
            return Err(ScrabbleError::ConfigValidationError {
                field: "players".to_string(),
                message: "tournament needs at least one player".to_string(),
            });
        }
        if roster.len() < 2 && !options.include_self_matchups {
            return Err(ScrabbleError::ConfigValidationError {
                field: "players".to_string(),
                message: "a single-player roster needs self matchups enabled".to_string(),
            });
        }
        let mut names: Vec<&str> = roster.iter().map(|s| s.name.as_str()).collect();
        names.sort();
        names.dedup();
        if names.len() != roster.len() {
            return Err(ScrabbleError::ConfigValidationError {
                field: "players".to_string(),
                message: "player names must be unique".to_string(),
            });
        }
        Ok(Self { roster, options })
    }

    fn pairings(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        if self.options.include_self_matchups {
            for i in 0..self.roster.len() {
                pairs.push((i, i));
            }
        }
        for i in 0..self.roster.len() {
            for j in (i + 1)..self.roster.len() {
                pairs.push((i, j));
            }
        }
        pairs
    }

    /// Matchup names in play order, for previewing the schedule.
    pub fn schedule(&self) -> Vec<(String, String)> {
        self.pairings()
            .into_iter()
            .map(|(i, j)| (self.roster[i].name.clone(), self.roster[j].name.clone()))
            .collect()
    }

    pub async fn run(&self, lexicon: Arc<Lexicon>) -> Result<TournamentResults> {
        let pairings = self.pairings();
        let mut results = TournamentResults::default();
        for spec in &self.roster {
            results.stats.entry(spec.name.clone()).or_default();
        }
        for (i, j) in &pairings {
            results.matchups.push(MatchupRecord {
                player1: self.roster[*i].name.clone(),
                player2: self.roster[*j].name.clone(),
                scores: Vec::new(),
            });
        }

        let semaphore = Arc::new(Semaphore::new(self.options.concurrent_matches.max(1)));
        let mut join_set = JoinSet::new();
        let mut game_counter = 0u64;

        for (pair_idx, (i, j)) in pairings.iter().enumerate() {
            tracing::info!(
                "🏟️  Scheduling {} games: {} vs {}",
                self.options.games_per_matchup,
                self.roster[*i].name,
                self.roster[*j].name
            );
            for game_idx in 0..self.options.games_per_matchup {
                let spec1 = self.roster[*i].clone();
                let spec2 = self.roster[*j].clone();
                let lexicon = lexicon.clone();
                let semaphore = semaphore.clone();
                let seed = self
                    .options
                    .seed
                    .map(|s| s.wrapping_mul(0x9e3779b9).wrapping_add(game_counter));
                game_counter += 1;
                let config = GameConfig {
                    pass_limit: self.options.pass_limit,
                    max_turns: self.options.max_turns,
                    seed,
                };

                join_set.spawn(async move {
                    let _permit = match semaphore.acquire_owned().await {
                        Ok(permit) => permit,
                        Err(_) => {
                            let err = ScrabbleError::GameError {
                                message: "tournament scheduler shut down early".to_string(),
                            };
                            return (pair_idx, game_idx, Ok(Err(err)));
                        }
                    };
                    let outcome = tokio::task::spawn_blocking(move || {
                        run_match(&lexicon, &spec1, &spec2, config)
                    })
                    .await;
                    (pair_idx, game_idx, outcome)
                });
            }
        }

        let mut finished = Vec::new();
        while let Some(joined) = join_set.join_next().await {
            let (pair_idx, game_idx, outcome) = joined.map_err(|e| ScrabbleError::GameError {
                message: format!("tournament task failed: {}", e),
            })?;
            let scores = outcome.map_err(|e| ScrabbleError::GameError {
                message: format!("match worker panicked: {}", e),
            })??;
            finished.push((pair_idx, game_idx, scores));
        }

        // Join order is nondeterministic; replay in schedule order so the
        // records (and any seeded rerun) line up.
        finished.sort_by_key(|(pair_idx, game_idx, _)| (*pair_idx, *game_idx));
        for (pair_idx, _, (score1, score2)) in finished {
            results.record_game(pair_idx, score1, score2);
        }

        tracing::info!("🏁 Tournament complete: {} games played", results.total_games());
        Ok(results)
    }
}

/// Play one game, randomizing who moves first, and return the scores in
/// (spec1, spec2) order.
fn run_match(
    lexicon: &Lexicon,
    spec1: &PlayerSpec,
    spec2: &PlayerSpec,
    config: GameConfig,
) -> Result<(i32, i32)> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let spec1_first = rng.gen_bool(0.5);

    let p1 = spec1.build(config.seed);
    let p2 = spec2.build(config.seed.map(|s| s.wrapping_add(1)));

    let outcome = if spec1_first {
        ScrabbleGame::new(lexicon, p1, p2, config).play()?
    } else {
        ScrabbleGame::new(lexicon, p2, p1, config).play()?
    };

    let (first, second) = outcome.scores();
    if spec1_first {
        Ok((first, second))
    } else {
        Ok((second, first))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::players::PlayerKind;

    fn lexicon() -> Arc<Lexicon> {
        Arc::new(Lexicon::from_words([
            "tea", "eat", "ate", "at", "it", "tin", "net", "ten", "rat", "tar", "art", "ear",
            "era", "are", "oat", "toe", "not", "ton", "one", "eon", "ant", "tan", "ran", "nor",
            "son", "sin", "its", "sit", "set", "sea", "tie", "red", "doe", "ode", "dot", "nod",
            "don", "do", "go", "no", "on", "in", "an", "as", "is", "us", "so", "to", "of", "or",
        ]))
    }

    #[test]
    fn test_pairings_cover_all_pairs() {
        let roster = vec![
            PlayerSpec::new("A", PlayerKind::Greedy),
            PlayerSpec::new("B", PlayerKind::Greedy),
            PlayerSpec::new("C", PlayerKind::Greedy),
        ];
        let manager = TournamentManager::new(
            roster,
            TournamentOptions {
                include_self_matchups: true,
                ..TournamentOptions::default()
            },
        )
        .unwrap();
        let pairs = manager.pairings();
        assert_eq!(
            pairs,
            vec![(0, 0), (1, 1), (2, 2), (0, 1), (0, 2), (1, 2)]
        );
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let roster = vec![
            PlayerSpec::new("A", PlayerKind::Greedy),
            PlayerSpec::new("A", PlayerKind::Conservative),
        ];
        assert!(TournamentManager::new(roster, TournamentOptions::default()).is_err());
    }

    #[test]
    fn test_empty_roster_rejected() {
        assert!(TournamentManager::new(vec![], TournamentOptions::default()).is_err());
    }

    #[tokio::test]
    async fn test_small_tournament_accounting() {
        let roster = vec![
            PlayerSpec::new("Greedy A", PlayerKind::Greedy),
            PlayerSpec::new("Greedy B", PlayerKind::Greedy),
        ];
        let options = TournamentOptions {
            games_per_matchup: 2,
            concurrent_matches: 2,
            include_self_matchups: false,
            seed: Some(11),
            ..TournamentOptions::default()
        };
        let manager = TournamentManager::new(roster, options).unwrap();
        let results = manager.run(lexicon()).await.unwrap();

        assert_eq!(results.matchups.len(), 1);
        assert_eq!(results.total_games(), 2);

        for stats in results.stats.values() {
            assert_eq!(stats.games(), 2);
            assert_eq!(
                stats.wins + stats.losses + stats.draws,
                stats.games() as u32
            );
        }
    }

    #[tokio::test]
    async fn test_self_matchup_counts_both_sides() {
        let roster = vec![PlayerSpec::new("Solo", PlayerKind::Greedy)];
        let options = TournamentOptions {
            games_per_matchup: 1,
            include_self_matchups: true,
            seed: Some(5),
            ..TournamentOptions::default()
        };
        let manager = TournamentManager::new(roster, options).unwrap();
        let results = manager.run(lexicon()).await.unwrap();

        let stats = &results.stats["Solo"];
        // One game, both seats belong to the same name.
        assert_eq!(stats.games(), 2);
        assert_eq!(stats.wins + stats.losses + stats.draws, 2);
    }

    #[tokio::test]
    async fn test_seeded_tournament_is_reproducible() {
        let roster = vec![
            PlayerSpec::new("Greedy A", PlayerKind::Greedy),
            PlayerSpec::new("Conservative B", PlayerKind::Conservative),
        ];
        let options = TournamentOptions {
            games_per_matchup: 2,
            include_self_matchups: false,
            seed: Some(123),
            ..TournamentOptions::default()
        };

        let run = |roster: Vec<PlayerSpec>, options: TournamentOptions| async {
            TournamentManager::new(roster, options)
                .unwrap()
                .run(lexicon())
                .await
                .unwrap()
        };

        let first = run(roster.clone(), options.clone()).await;
        let second = run(roster, options).await;
        assert_eq!(first.matchups[0].scores, second.matchups[0].scores);
    }

    #[test]
    fn test_player_stats_derivations() {
        let stats = PlayerStats {
            wins: 2,
            losses: 1,
            draws: 0,
            total_points: 500,
            scores: vec![150, 200, 150],
        };
        assert!((stats.win_rate() - 66.666).abs() < 0.01);
        assert!((stats.average_score() - 166.666).abs() < 0.01);
        assert_eq!(stats.max_score(), 200);
        assert_eq!(stats.min_score(), 150);
        assert!((stats.score_std_dev() - 28.8675).abs() < 0.001);

        assert_eq!(PlayerStats::default().win_rate(), 0.0);
        assert_eq!(PlayerStats::default().score_std_dev(), 0.0);
    }
}
