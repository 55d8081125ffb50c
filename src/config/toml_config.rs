use crate::app::tournament::TournamentOptions;
use crate::core::players::PlayerSpec;
use crate::utils::error::{Result, ScrabbleError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub tournament: TournamentSection,
    pub lexicon: LexiconSection,
    pub players: Vec<PlayerSpec>,
    pub schedule: Option<ScheduleSection>,
    pub report: Option<ReportSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentSection {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconSection {
    pub path: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleSection {
    pub games_per_matchup: Option<usize>,
    pub concurrent_matches: Option<usize>,
    pub self_matchups: Option<bool>,
    pub pass_limit: Option<u32>,
    pub max_turns: Option<u32>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    pub output_path: Option<String>,
    pub formats: Option<Vec<String>>,
    pub compress: Option<bool>,
}

impl TournamentConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScrabbleError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScrabbleError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment variable's value.
    /// Unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScrabbleError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: format!("regex error: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("tournament.name", &self.tournament.name)?;

        match (&self.lexicon.path, &self.lexicon.url) {
            (None, None) => {
                return Err(ScrabbleError::MissingConfigError {
                    field: "lexicon.path or lexicon.url".to_string(),
                });
            }
            (Some(path), _) => validation::validate_path("lexicon.path", path)?,
            (None, Some(url)) => validation::validate_url("lexicon.url", url)?,
        }

        if self.players.is_empty() {
            return Err(ScrabbleError::MissingConfigError {
                field: "players".to_string(),
            });
        }
        for player in &self.players {
            validation::validate_non_empty_string("players.name", &player.name)?;
        }

        if let Some(schedule) = &self.schedule {
            if let Some(games) = schedule.games_per_matchup {
                validation::validate_positive_number("schedule.games_per_matchup", games, 1)?;
            }
            if let Some(concurrent) = schedule.concurrent_matches {
                validation::validate_positive_number("schedule.concurrent_matches", concurrent, 1)?;
            }
            if let Some(pass_limit) = schedule.pass_limit {
                validation::validate_range("schedule.pass_limit", pass_limit, 1, 12)?;
            }
        }

        if let Some(report) = &self.report {
            if let Some(path) = &report.output_path {
                validation::validate_path("report.output_path", path)?;
            }
            if let Some(formats) = &report.formats {
                let valid_formats = ["json", "csv", "summary"];
                for format in formats {
                    if !valid_formats.contains(&format.as_str()) {
                        return Err(ScrabbleError::InvalidConfigValueError {
                            field: "report.formats".to_string(),
                            value: format.clone(),
                            reason: format!(
                                "Unsupported format. Valid formats: {}",
                                valid_formats.join(", ")
                            ),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Collapses the schedule section into runtime options, filling in
    /// defaults for anything omitted.
    pub fn tournament_options(&self) -> TournamentOptions {
        let defaults = TournamentOptions::default();
        match &self.schedule {
            Some(schedule) => TournamentOptions {
                games_per_matchup: schedule
                    .games_per_matchup
                    .unwrap_or(defaults.games_per_matchup),
                concurrent_matches: schedule
                    .concurrent_matches
                    .unwrap_or(defaults.concurrent_matches),
                include_self_matchups: schedule
                    .self_matchups
                    .unwrap_or(defaults.include_self_matchups),
                pass_limit: schedule.pass_limit.unwrap_or(defaults.pass_limit),
                max_turns: schedule.max_turns.unwrap_or(defaults.max_turns),
                seed: schedule.seed,
            },
            None => defaults,
        }
    }

    pub fn output_path(&self) -> &str {
        self.report
            .as_ref()
            .and_then(|r| r.output_path.as_deref())
            .unwrap_or("./tournament-output")
    }

    pub fn report_formats(&self) -> Vec<String> {
        self.report
            .as_ref()
            .and_then(|r| r.formats.clone())
            .unwrap_or_else(|| vec!["json".to_string(), "csv".to_string(), "summary".to_string()])
    }

    pub fn compress_report(&self) -> bool {
        self.report
            .as_ref()
            .and_then(|r| r.compress)
            .unwrap_or(true)
    }
}

impl Validate for TournamentConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
