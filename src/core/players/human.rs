use crate::domain::ports::{Player, TurnView};
use std::io::{BufRead, Write};

/// Interactive player: prints the board and the numbered legal moves,
/// then reads a 1-based choice from stdin (empty line or `pass` passes).
pub struct HumanPlayer {
    name: String,
}

impl HumanPlayer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    fn prompt(&self, view: &TurnView<'_>) -> Option<usize> {
        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            print!("{}> ", self.name);
            let _ = std::io::stdout().flush();
            line.clear();
            if stdin.lock().read_line(&mut line).is_err() {
                return None;
            }
            let input = line.trim();
            if input.is_empty() || input.eq_ignore_ascii_case("pass") || input == "0" {
                return None;
            }
            match input.parse::<usize>() {
                Ok(n) if n >= 1 && n <= view.legal_moves.len() => return Some(n - 1),
                _ => println!(
                    "Enter a move number between 1 and {}, or 'pass'",
                    view.legal_moves.len()
                ),
            }
        }
    }
}

impl Player for HumanPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, view: &TurnView<'_>) -> Option<usize> {
        println!("\n{}", view.board);
        println!(
            "{} | your rack: {}   (score {} vs {}, {} tiles in the bag)",
            self.name,
            view.rack.iter().collect::<String>(),
            view.my_score,
            view.opponent_score,
            view.bag_count
        );

        if view.legal_moves.is_empty() {
            println!("No legal moves; you must pass.");
            return None;
        }

        println!("Legal moves:");
        for (i, mv) in view.legal_moves.iter().enumerate() {
            println!("  {:3}. {}", i + 1, mv);
        }
        self.prompt(view)
    }
}
