use crate::app::tournament::TournamentResults;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ScrabbleError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const JSON_FILENAME: &str = "tournament_results.json";
pub const CSV_FILENAME: &str = "tournament_results.csv";
pub const SUMMARY_FILENAME: &str = "tournament_summary.txt";
pub const BUNDLE_FILENAME: &str = "tournament_report.zip";

#[derive(Debug, Serialize)]
struct ReportDocument {
    tournament: String,
    generated_at: String,
    player_stats: BTreeMap<String, PlayerStatsDoc>,
    matchups: BTreeMap<String, MatchupDoc>,
}

#[derive(Debug, Serialize)]
struct PlayerStatsDoc {
    total_games: usize,
    wins: u32,
    losses: u32,
    draws: u32,
    win_rate: f64,
    total_points: i64,
    average_score: f64,
    max_score: i32,
    min_score: i32,
    score_std_dev: f64,
}

#[derive(Debug, Serialize)]
struct MatchupDoc {
    player1: String,
    player2: String,
    scores: Vec<[i32; 2]>,
}

/// The JSON document downstream analysis reads: `player_stats` keyed by
/// player name and `matchups` keyed by "A vs B".
pub fn render_json(results: &TournamentResults, tournament_name: &str) -> Result<String> {
    let player_stats = results
        .stats
        .iter()
        .map(|(name, stats)| {
            (
                name.clone(),
                PlayerStatsDoc {
                    total_games: stats.games(),
                    wins: stats.wins,
                    losses: stats.losses,
                    draws: stats.draws,
                    win_rate: stats.win_rate(),
                    total_points: stats.total_points,
                    average_score: stats.average_score(),
                    max_score: stats.max_score(),
                    min_score: stats.min_score(),
                    score_std_dev: stats.score_std_dev(),
                },
            )
        })
        .collect();

    let matchups = results
        .matchups
        .iter()
        .map(|record| {
            (
                format!("{} vs {}", record.player1, record.player2),
                MatchupDoc {
                    player1: record.player1.clone(),
                    player2: record.player2.clone(),
                    scores: record.scores.iter().map(|(a, b)| [*a, *b]).collect(),
                },
            )
        })
        .collect();

    let document = ReportDocument {
        tournament: tournament_name.to_string(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        player_stats,
        matchups,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// One row per game: matchup, game number, both scores, and the winner.
pub fn render_csv(results: &TournamentResults) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["player1", "player2", "game", "score1", "score2", "winner"])?;

    for record in &results.matchups {
        for (game_idx, (score1, score2)) in record.scores.iter().enumerate() {
            let winner = match score1.cmp(score2) {
                std::cmp::Ordering::Greater => record.player1.as_str(),
                std::cmp::Ordering::Less => record.player2.as_str(),
                std::cmp::Ordering::Equal => "draw",
            };
            writer.write_record([
                record.player1.as_str(),
                record.player2.as_str(),
                &(game_idx + 1).to_string(),
                &score1.to_string(),
                &score2.to_string(),
                winner,
            ])?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ScrabbleError::ReportError {
            message: format!("csv buffer error: {}", e),
        })?;
    String::from_utf8(bytes).map_err(|e| ScrabbleError::ReportError {
        message: format!("csv output was not UTF-8: {}", e),
    })
}

/// Human-readable results: per-player stats, head-to-head records, and a
/// win-rate matrix.
pub fn render_summary(results: &TournamentResults, tournament_name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== Tournament Results: {} ===\n\n", tournament_name));

    out.push_str("Player Statistics:\n");
    out.push_str("-----------------\n");
    for (name, stats) in &results.stats {
        out.push_str(&format!("\n{}:\n", name));
        out.push_str(&format!("  Record: {}-{}-{}\n", stats.wins, stats.losses, stats.draws));
        out.push_str(&format!("  Win Rate: {:.1}%\n", stats.win_rate()));
        out.push_str(&format!("  Average Score: {:.2}\n", stats.average_score()));
        out.push_str(&format!(
            "  Score Range: {} to {}\n",
            stats.min_score(),
            stats.max_score()
        ));
        out.push_str(&format!("  Score Std Dev: {:.2}\n", stats.score_std_dev()));
    }

    out.push_str("\nHead-to-head Results:\n");
    out.push_str("--------------------\n");
    for record in &results.matchups {
        let p1_wins = record.scores.iter().filter(|(a, b)| a > b).count();
        let p2_wins = record.scores.iter().filter(|(a, b)| b > a).count();
        let draws = record.scores.len() - p1_wins - p2_wins;
        out.push_str(&format!(
            "\n{} vs {}: {}-{}-{}\n",
            record.player1, record.player2, p1_wins, p2_wins, draws
        ));
        if !record.scores.is_empty() {
            let p1_avg = record.scores.iter().map(|(a, _)| *a as f64).sum::<f64>()
                / record.scores.len() as f64;
            let p2_avg = record.scores.iter().map(|(_, b)| *b as f64).sum::<f64>()
                / record.scores.len() as f64;
            out.push_str(&format!(
                "  Average Scores: {}: {:.2}, {}: {:.2}\n",
                record.player1, p1_avg, record.player2, p2_avg
            ));
        }
    }

    out.push_str(&render_win_rate_matrix(results));
    out
}

/// Text stand-in for the heatmap: row player's win rate against each
/// column player, self-matchups excluded.
fn render_win_rate_matrix(results: &TournamentResults) -> String {
    let players: Vec<&String> = results.stats.keys().collect();
    if players.len() < 2 {
        return String::new();
    }

    let mut rates: BTreeMap<(&str, &str), f64> = BTreeMap::new();
    for record in &results.matchups {
        if record.player1 == record.player2 || record.scores.is_empty() {
            continue;
        }
        let p1_wins = record.scores.iter().filter(|(a, b)| a > b).count();
        let rate = p1_wins as f64 / record.scores.len() as f64 * 100.0;
        rates.insert((record.player1.as_str(), record.player2.as_str()), rate);
        rates.insert((record.player2.as_str(), record.player1.as_str()), 100.0 - rate);
    }

    let width = players.iter().map(|p| p.len()).max().unwrap_or(8).max(8);
    let mut out = String::new();
    out.push_str("\nHead-to-head Win Rates (%):\n");
    out.push_str(&format!("{:width$}", "", width = width + 2));
    for p in &players {
        out.push_str(&format!("{:>width$}", p, width = width + 2));
    }
    out.push('\n');
    for row in &players {
        out.push_str(&format!("{:width$}", row, width = width + 2));
        for col in &players {
            if row == col {
                out.push_str(&format!("{:>width$}", "-", width = width + 2));
            } else {
                match rates.get(&(row.as_str(), col.as_str())) {
                    Some(rate) => {
                        out.push_str(&format!("{:>width$.1}", rate, width = width + 2))
                    }
                    None => out.push_str(&format!("{:>width$}", "n/a", width = width + 2)),
                }
            }
        }
        out.push('\n');
    }
    out
}

/// Write the selected report artifacts through the storage port.
/// With `compress` set they go into a single ZIP archive instead.
pub async fn write_bundle<S: Storage>(
    storage: &S,
    results: &TournamentResults,
    tournament_name: &str,
    formats: &[String],
    compress: bool,
) -> Result<String> {
    let mut artifacts: Vec<(&str, String)> = Vec::new();
    for format in formats {
        match format.as_str() {
            "json" => artifacts.push((JSON_FILENAME, render_json(results, tournament_name)?)),
            "csv" => artifacts.push((CSV_FILENAME, render_csv(results)?)),
            "summary" => {
                artifacts.push((SUMMARY_FILENAME, render_summary(results, tournament_name)))
            }
            other => {
                return Err(ScrabbleError::ReportError {
                    message: format!("unknown report format '{}'", other),
                });
            }
        }
    }
    if artifacts.is_empty() {
        return Err(ScrabbleError::ReportError {
            message: "no report formats selected".to_string(),
        });
    }

    if compress {
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            for (name, content) in &artifacts {
                zip.start_file::<_, ()>(*name, FileOptions::default())?;
                zip.write_all(content.as_bytes())?;
            }

            let cursor = zip.finish()?;
            cursor.into_inner()
        };
        tracing::debug!("Writing report bundle ({} bytes)", zip_data.len());
        storage.write_file(BUNDLE_FILENAME, &zip_data).await?;
        Ok(BUNDLE_FILENAME.to_string())
    } else {
        for (name, content) in &artifacts {
            storage.write_file(name, content.as_bytes()).await?;
        }
        Ok(artifacts[0].0.to_string())
    }
}

/// Every format `write_bundle` accepts.
pub fn all_formats() -> Vec<String> {
    vec!["json".to_string(), "csv".to_string(), "summary".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tournament::{MatchupRecord, PlayerStats};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ScrabbleError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn fixture_results() -> TournamentResults {
        let mut results = TournamentResults::default();
        results.matchups.push(MatchupRecord {
            player1: "Greedy AI".to_string(),
            player2: "MCTS AI".to_string(),
            scores: vec![(210, 180), (150, 190), (200, 200)],
        });
        let mut greedy = PlayerStats::default();
        greedy.wins = 1;
        greedy.losses = 1;
        greedy.draws = 1;
        greedy.total_points = 560;
        greedy.scores = vec![210, 150, 200];
        let mut mcts = PlayerStats::default();
        mcts.wins = 1;
        mcts.losses = 1;
        mcts.draws = 1;
        mcts.total_points = 570;
        mcts.scores = vec![180, 190, 200];
        results.stats.insert("Greedy AI".to_string(), greedy);
        results.stats.insert("MCTS AI".to_string(), mcts);
        results
    }

    #[test]
    fn test_json_matches_analysis_schema() {
        let json = render_json(&fixture_results(), "weekly").unwrap();
        let doc: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(doc["tournament"], "weekly");
        assert!(doc["generated_at"].is_string());

        let stats = &doc["player_stats"]["Greedy AI"];
        assert_eq!(stats["total_games"], 3);
        assert_eq!(stats["wins"], 1);
        assert!(stats["win_rate"].as_f64().unwrap() > 33.0);
        assert!(stats["average_score"].is_number());
        assert!(stats["score_std_dev"].is_number());

        let matchup = &doc["matchups"]["Greedy AI vs MCTS AI"];
        assert_eq!(matchup["player1"], "Greedy AI");
        assert_eq!(matchup["player2"], "MCTS AI");
        assert_eq!(matchup["scores"][0][0], 210);
        assert_eq!(matchup["scores"][0][1], 180);
    }

    #[test]
    fn test_csv_has_one_row_per_game() {
        let csv = render_csv(&fixture_results()).unwrap();
        let lines: Vec<&str> = csv.trim().lines().collect();
        assert_eq!(lines.len(), 4); // header + 3 games
        assert_eq!(lines[0], "player1,player2,game,score1,score2,winner");
        assert!(lines[1].ends_with("Greedy AI"));
        assert!(lines[2].ends_with("MCTS AI"));
        assert!(lines[3].ends_with("draw"));
    }

    #[test]
    fn test_summary_contains_records_and_matrix() {
        let summary = render_summary(&fixture_results(), "weekly");
        assert!(summary.contains("Greedy AI vs MCTS AI: 1-1-1"));
        assert!(summary.contains("Win Rate"));
        assert!(summary.contains("Head-to-head Win Rates"));
    }

    #[tokio::test]
    async fn test_bundle_contains_all_three_artifacts() {
        let storage = MockStorage::new();
        let path = write_bundle(&storage, &fixture_results(), "weekly", &all_formats(), true)
            .await
            .unwrap();
        assert_eq!(path, BUNDLE_FILENAME);

        let zip_bytes = storage.get_file(BUNDLE_FILENAME).await.unwrap();
        let cursor = std::io::Cursor::new(zip_bytes);
        let mut archive = zip::ZipArchive::new(cursor).unwrap();
        assert_eq!(archive.len(), 3);

        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![CSV_FILENAME, JSON_FILENAME, SUMMARY_FILENAME]
        );
    }

    #[tokio::test]
    async fn test_uncompressed_bundle_writes_separate_files() {
        let storage = MockStorage::new();
        write_bundle(&storage, &fixture_results(), "weekly", &all_formats(), false)
            .await
            .unwrap();
        assert!(storage.get_file(JSON_FILENAME).await.is_some());
        assert!(storage.get_file(CSV_FILENAME).await.is_some());
        assert!(storage.get_file(SUMMARY_FILENAME).await.is_some());
        assert!(storage.get_file(BUNDLE_FILENAME).await.is_none());
    }

    #[tokio::test]
    async fn test_format_selection_and_rejection() {
        let storage = MockStorage::new();
        write_bundle(
            &storage,
            &fixture_results(),
            "weekly",
            &["json".to_string()],
            false,
        )
        .await
        .unwrap();
        assert!(storage.get_file(JSON_FILENAME).await.is_some());
        assert!(storage.get_file(CSV_FILENAME).await.is_none());

        let result = write_bundle(
            &storage,
            &fixture_results(),
            "weekly",
            &["xml".to_string()],
            false,
        )
        .await;
        assert!(result.is_err());
    }
}
