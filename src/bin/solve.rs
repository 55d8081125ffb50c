use clap::Parser;
use scrabble_lab::domain::board::sample_board;
use scrabble_lab::utils::{logger, validation};
use scrabble_lab::{legal_moves, Board, Lexicon};

#[derive(Parser)]
#[command(name = "solve")]
#[command(about = "List every legal move for a rack on a board position")]
struct Args {
    /// Rack letters, e.g. "effect"
    rack: String,

    /// Word list file, one word per line
    #[arg(short, long, default_value = "assets/demo_words.txt")]
    lexicon: String,

    /// Board file: 15 lines of 15 characters, '.' for empty squares.
    /// Without one a small demo position is used.
    #[arg(short, long)]
    board: Option<String>,

    /// Only print the top N moves
    #[arg(short = 'n', long)]
    top: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    if let Err(e) = validate_rack(&args.rack) {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let lexicon = match Lexicon::from_file(&args.lexicon) {
        Ok(lexicon) => lexicon,
        Err(e) => {
            eprintln!("❌ Failed to load word list '{}': {}", args.lexicon, e);
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    tracing::info!("✅ Lexicon loaded: {} words", lexicon.len());

    let board = match &args.board {
        Some(path) => match Board::from_file(path) {
            Ok(board) => board,
            Err(e) => {
                eprintln!("❌ Failed to load board '{}': {}", path, e);
                eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        },
        None => sample_board(),
    };

    let rack: Vec<char> = args.rack.to_lowercase().chars().collect();

    println!("{}", board);
    println!("Rack: {}", args.rack.to_lowercase());
    println!();

    let moves = legal_moves(&lexicon, &board, &rack);
    if moves.is_empty() {
        println!("No legal moves.");
        return Ok(());
    }

    let shown = args.top.unwrap_or(moves.len()).min(moves.len());
    println!("📊 {} legal moves (showing {}):", moves.len(), shown);
    for mv in moves.iter().take(shown) {
        println!("  {}", mv);
    }

    Ok(())
}

fn validate_rack(rack: &str) -> scrabble_lab::Result<()> {
    validation::validate_non_empty_string("rack", rack)?;
    if rack.len() > 7 {
        return Err(scrabble_lab::ScrabbleError::InvalidConfigValueError {
            field: "rack".to_string(),
            value: rack.to_string(),
            reason: "A rack holds at most 7 tiles".to_string(),
        });
    }
    if let Some(bad) = rack.chars().find(|c| !c.is_ascii_alphabetic()) {
        return Err(scrabble_lab::ScrabbleError::InvalidConfigValueError {
            field: "rack".to_string(),
            value: rack.to_string(),
            reason: format!("Rack may only contain letters, found '{}'", bad),
        });
    }
    Ok(())
}
