use clap::Parser;
use scrabble_lab::app::report;
use scrabble_lab::config::toml_config::TournamentConfig;
use scrabble_lab::utils::monitor::SystemMonitor;
use scrabble_lab::utils::{logger, validation::Validate};
use scrabble_lab::{Lexicon, LocalStorage, TournamentManager};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "tournament")]
#[command(about = "Run a round-robin Scrabble tournament from a TOML config")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "tournament.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Log CPU and memory usage
    #[arg(long)]
    monitor: bool,

    /// Override games per matchup from config
    #[arg(long)]
    games: Option<usize>,

    /// Override the base seed from config
    #[arg(long)]
    seed: Option<u64>,

    /// Dry run - show the schedule without playing any games
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting Scrabble tournament runner");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match TournamentConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Some(games) = args.games {
        let schedule = config.schedule.get_or_insert_with(Default::default);
        schedule.games_per_matchup = Some(games);
        tracing::info!("🔧 Games per matchup overridden to: {}", games);
    }
    if let Some(seed) = args.seed {
        let schedule = config.schedule.get_or_insert_with(Default::default);
        schedule.seed = Some(seed);
        tracing::info!("🔧 Seed overridden to: {}", seed);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No games will be played");
        perform_dry_run(&config)?;
        return Ok(());
    }

    let monitor = SystemMonitor::new(args.monitor);

    match run_tournament(&config, &monitor).await {
        Ok(output_path) => {
            monitor.log_final_stats();
            tracing::info!("✅ Tournament completed successfully!");
            tracing::info!("📁 Report saved to: {}", output_path);
            println!("✅ Tournament completed successfully!");
            println!("📁 Report saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Tournament failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                scrabble_lab::utils::error::ErrorSeverity::Low => 0,
                scrabble_lab::utils::error::ErrorSeverity::Medium => 2,
                scrabble_lab::utils::error::ErrorSeverity::High => 1,
                scrabble_lab::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run_tournament(
    config: &TournamentConfig,
    monitor: &SystemMonitor,
) -> scrabble_lab::Result<String> {
    let lexicon = match (&config.lexicon.path, &config.lexicon.url) {
        (Some(path), _) => {
            tracing::info!("📁 Loading word list from: {}", path);
            Lexicon::from_file(path)?
        }
        (None, Some(url)) => {
            tracing::info!("🌐 Fetching word list from: {}", url);
            Lexicon::fetch(url).await?
        }
        (None, None) => {
            return Err(scrabble_lab::ScrabbleError::MissingConfigError {
                field: "lexicon.path or lexicon.url".to_string(),
            });
        }
    };
    tracing::info!("✅ Lexicon loaded: {} words", lexicon.len());
    monitor.log_stats("lexicon_loaded");

    let manager = TournamentManager::new(config.players.clone(), config.tournament_options())?;
    let results = manager.run(Arc::new(lexicon)).await?;
    monitor.log_stats("games_finished");

    tracing::info!("📊 Played {} games in total", results.total_games());

    println!();
    print!(
        "{}",
        report::render_summary(&results, &config.tournament.name)
    );

    let storage = LocalStorage::new(config.output_path().to_string());
    let written = report::write_bundle(
        &storage,
        &results,
        &config.tournament.name,
        &config.report_formats(),
        config.compress_report(),
    )
    .await?;

    Ok(format!("{}/{}", config.output_path(), written))
}

fn display_config_summary(config: &TournamentConfig, args: &Args) {
    let options = config.tournament_options();

    println!("📋 Configuration Summary:");
    println!("  Tournament: {}", config.tournament.name);
    if let Some(description) = &config.tournament.description {
        println!("  Description: {}", description);
    }
    match (&config.lexicon.path, &config.lexicon.url) {
        (Some(path), _) => println!("  Lexicon: {}", path),
        (None, Some(url)) => println!("  Lexicon: {}", url),
        (None, None) => {}
    }
    println!(
        "  Players: {}",
        config
            .players
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  Games per matchup: {}", options.games_per_matchup);
    println!("  Concurrent matches: {}", options.concurrent_matches);
    println!("  Self matchups: {}", options.include_self_matchups);
    if let Some(seed) = options.seed {
        println!("  Seed: {}", seed);
    }
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.report_formats().join(", "));

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TournamentConfig) -> scrabble_lab::Result<()> {
    let manager = TournamentManager::new(config.players.clone(), config.tournament_options())?;
    let options = config.tournament_options();
    let pairings = manager.schedule();

    println!("🔍 Dry Run Analysis:");
    println!();
    println!("🏟️ Schedule ({} matchups):", pairings.len());
    for (p1, p2) in &pairings {
        println!("  {} vs {} ({} games)", p1, p2, options.games_per_matchup);
    }
    println!();
    println!(
        "📊 Total games: {}",
        pairings.len() * options.games_per_matchup
    );
    println!();
    println!("✅ Dry run analysis complete. Remove --dry-run to play the games.");

    Ok(())
}
