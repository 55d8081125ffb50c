use scrabble_lab::domain::board::sample_board;
use scrabble_lab::{legal_moves, Lexicon};

fn demo_lexicon() -> Lexicon {
    Lexicon::from_file("assets/demo_words.txt").unwrap()
}

#[test]
fn test_effect_rack_on_sample_board() {
    let lexicon = demo_lexicon();
    let board = sample_board();
    let rack: Vec<char> = "effect".chars().collect();

    let moves = legal_moves(&lexicon, &board, &rack);
    assert!(!moves.is_empty());

    // "effect" fits vertically through the board's 'c'
    assert!(moves.iter().any(|m| m.word == "effect"));

    // every generated word must be in the lexicon
    for mv in &moves {
        assert!(lexicon.is_word(&mv.word), "not a word: {}", mv.word);
    }

    // sorted best-first
    for pair in moves.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_moves_never_use_tiles_outside_the_rack() {
    let lexicon = demo_lexicon();
    let board = sample_board();
    let rack: Vec<char> = "effect".chars().collect();

    for mv in legal_moves(&lexicon, &board, &rack) {
        let mut pool = rack.clone();
        for tile in &mv.tiles_used {
            let idx = pool.iter().position(|t| t == tile);
            assert!(idx.is_some(), "{} used tile '{}' not on rack", mv.word, tile);
            pool.remove(idx.unwrap());
        }
    }
}

#[test]
fn test_opening_moves_cross_the_center() {
    let lexicon = demo_lexicon();
    let board = scrabble_lab::Board::new();
    let rack: Vec<char> = "caters".chars().collect();

    let moves = legal_moves(&lexicon, &board, &rack);
    assert!(!moves.is_empty());

    for mv in &moves {
        let covers_center = (0..mv.word.len() as i32).any(|i| {
            let pos = match mv.direction {
                scrabble_lab::domain::model::Direction::Across => {
                    scrabble_lab::domain::model::Position::new(mv.start.row, mv.start.col + i)
                }
                scrabble_lab::domain::model::Direction::Down => {
                    scrabble_lab::domain::model::Position::new(mv.start.row + i, mv.start.col)
                }
            };
            pos == board.center()
        });
        assert!(covers_center, "{} skips the center square", mv.word);
    }
}
