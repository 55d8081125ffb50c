use clap::Parser;
use scrabble_lab::core::players::PlayerSpec;
use scrabble_lab::utils::{logger, validation::Validate};
use scrabble_lab::{CliConfig, GameConfig, Lexicon, ScrabbleGame};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting scrabble-lab CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match run_game(&config).await {
        Ok(()) => {}
        Err(e) => {
            tracing::error!(
                "❌ Game failed: {} (Category: {:?}, Severity: {:?})",
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

async fn run_game(config: &CliConfig) -> scrabble_lab::Result<()> {
    let lexicon = match &config.lexicon_url {
        Some(url) => {
            tracing::info!("🌐 Fetching word list from: {}", url);
            Lexicon::fetch(url).await?
        }
        None => {
            tracing::info!("📁 Loading word list from: {}", config.lexicon);
            Lexicon::from_file(&config.lexicon)?
        }
    };
    tracing::info!("✅ Lexicon loaded: {} words", lexicon.len());

    let spec1: PlayerSpec = config.player1.parse()?;
    let spec2: PlayerSpec = config.player2.parse()?;

    let monitor = scrabble_lab::utils::monitor::SystemMonitor::new(config.monitor);
    monitor.log_stats("game_start");

    println!("🎲 {} vs {}", spec1.name, spec2.name);

    let game_config = GameConfig {
        pass_limit: config.pass_limit,
        seed: config.seed,
        ..GameConfig::default()
    };
    let game = ScrabbleGame::new(
        &lexicon,
        spec1.build(config.seed),
        spec2.build(config.seed.map(|s| s.wrapping_add(1))),
        game_config,
    );
    let outcome = game.play()?;

    monitor.log_final_stats();

    println!();
    println!("🏁 Final scores after {} turns:", outcome.turns);
    for player in &outcome.players {
        println!("  {}: {}", player.name, player.score);
    }
    let (s1, s2) = outcome.scores();
    match s1.cmp(&s2) {
        std::cmp::Ordering::Greater => println!("✅ {} wins!", outcome.players[0].name),
        std::cmp::Ordering::Less => println!("✅ {} wins!", outcome.players[1].name),
        std::cmp::Ordering::Equal => println!("🤝 Draw!"),
    }

    Ok(())
}
