//! Integration tests - full sessions driven through the public API

use std::cell::RefCell;
use std::rc::Rc;

use block_blast::core::pieces::{DOMINO_V, MONO, SQUARE3};
use block_blast::core::rand::rngs::mock::StepRng;
use block_blast::core::rand::rngs::SmallRng;
use block_blast::core::rand::SeedableRng;
use block_blast::core::{small_pool, GameConfig, GameState, MemoryHighScoreStore, PlaceError, Piece};
use block_blast::types::{ColorId, FeedbackEvent, GameCommand, GamePhase};

type Events = Rc<RefCell<Vec<FeedbackEvent>>>;

fn game_with_events(size: u8) -> (GameState<StepRng>, Events) {
    let events: Events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    let config = GameConfig {
        board_size: size,
        ..GameConfig::default()
    };
    let game = GameState::with_rng(config, StepRng::new(0, 0))
        .with_audio(move |e: FeedbackEvent| sink.borrow_mut().push(e));
    (game, events)
}

#[test]
fn test_session_lifecycle() {
    let (mut game, _) = game_with_events(8);
    assert_eq!(game.phase(), GamePhase::Menu);
    assert!(game.offered().is_empty());

    game.apply_command(GameCommand::StartGame);
    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.offered().len(), 3);
    assert_eq!(game.score(), 0);

    assert!(game.attempt_place(0, 2, 2).is_placed());
    game.apply_command(GameCommand::ExitToMenu);
    assert_eq!(game.phase(), GamePhase::Menu);
    assert_eq!(game.board().filled_count(), 0);
    assert_eq!(game.high_score(), 1);

    game.apply_command(GameCommand::StartGame);
    assert_eq!(game.episode_id(), 2);
    assert_eq!(game.score(), 0);
}

#[test]
fn test_score_is_monotonic_within_a_game() {
    let (mut game, _) = game_with_events(8);
    game.start_game();

    let mut last = game.score();
    'outer: for r in 0..8 {
        for c in 0..8 {
            let turn = game.attempt_place(0, r, c);
            if !turn.is_placed() {
                // Slot 0 is used until the round refills; try the others.
                let turn = [1, 2]
                    .into_iter()
                    .map(|i| game.attempt_place(i, r, c))
                    .find(|t| t.is_placed());
                if turn.is_none() {
                    continue;
                }
            }
            assert!(game.score() >= last);
            last = game.score();
            if game.phase() != GamePhase::Playing {
                break 'outer;
            }
        }
    }
    // Each full row clears as soon as it completes.
    assert!(game.score() >= 8 * 18);
}

#[test]
fn test_double_line_combo_scores_76() {
    let (mut game, events) = game_with_events(8);
    game.start_game();
    for r in 0..2 {
        for c in 1..8 {
            game.board_mut().set(r, c, Some(ColorId::Yellow));
        }
    }
    game.set_offered([
        Piece::new(100, DOMINO_V, ColorId::Orange),
        Piece::new(101, MONO, ColorId::Lime),
    ]);

    let turn = game.attempt_place(0, 0, 0);
    assert!(turn.is_placed());
    assert_eq!(turn.cleared.rows.as_slice(), &[0, 1]);
    assert_eq!(turn.cleared_cells, 16);
    assert_eq!(turn.score.multiplier, 3);
    assert_eq!(turn.score.total, 76);
    let combo = turn.combo.expect("two lines is a combo");
    assert_eq!((combo.lines, combo.multiplier), (2, 3));
    assert_eq!(game.board().filled_count(), 0);

    let events = events.borrow();
    assert!(events.contains(&FeedbackEvent::LinesCleared { lines: 2 }));
    assert!(events.contains(&FeedbackEvent::Combo {
        lines: 2,
        multiplier: 3
    }));
}

#[test]
fn test_row_and_column_cross_counts_shared_cell_once() {
    let (mut game, _) = game_with_events(8);
    game.start_game();
    for i in 1..8 {
        game.board_mut().set(0, i, Some(ColorId::Sun));
        game.board_mut().set(i, 0, Some(ColorId::Sun));
    }

    let turn = game.attempt_place(0, 0, 0);
    assert_eq!(turn.lines_cleared(), 2);
    assert_eq!(turn.cleared_cells, 15);
    assert_eq!(turn.score.total, 15 + 60);
}

#[test]
fn test_rejected_turn_changes_nothing() {
    let (mut game, events) = game_with_events(8);
    game.start_game();
    let before = game.snapshot();
    let seen = events.borrow().len();

    let turn = game.attempt_place(0, -1, 3);
    assert_eq!(turn.rejection(), Some(PlaceError::OutOfBounds));
    assert_eq!(turn.score.total, 0);
    assert_eq!(game.snapshot(), before);
    assert_eq!(events.borrow().len(), seen);
}

#[test]
fn test_game_over_when_nothing_fits() {
    let store = MemoryHighScoreStore::new(0);
    let (game, events) = game_with_events(3);
    let mut game = game.with_store(store.clone());
    game.start_game();

    // Three isolated holes; filling one completes no line and a 3x3 square never fits.
    for r in 0..3 {
        for c in 0..3 {
            if ![(0, 0), (0, 2), (2, 0)].contains(&(r, c)) {
                game.board_mut().set(r, c, Some(ColorId::Coral));
            }
        }
    }
    game.set_offered([
        Piece::new(1, MONO, ColorId::Lime),
        Piece::new(2, SQUARE3, ColorId::Lime),
    ]);

    let turn = game.attempt_place(0, 0, 0);
    assert_eq!(turn.lines_cleared(), 0);
    assert!(turn.is_game_over());
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(store.value(), 1);
    assert_eq!(
        events.borrow().last(),
        Some(&FeedbackEvent::GameOver {
            score: 1,
            new_high_score: true
        })
    );

    // Further placements are refused until a new game starts.
    assert_eq!(
        game.attempt_place(1, 0, 2).rejection(),
        Some(PlaceError::NotPlaying)
    );
    game.start_game();
    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.high_score(), 1);
}

#[test]
fn test_high_score_loaded_from_store() {
    let store = MemoryHighScoreStore::new(250);
    let game = GameState::with_rng(GameConfig::default(), StepRng::new(0, 0))
        .with_store(store.clone());
    assert_eq!(game.high_score(), 250);
    assert_eq!(game.snapshot().high_score, 250);
}

#[test]
fn test_toggled_off_sound_is_silent() {
    let (mut game, events) = game_with_events(8);
    game.apply_command(GameCommand::ToggleSound);
    assert!(!game.sound_enabled());

    game.start_game();
    game.attempt_place(0, 0, 0);
    assert!(events.borrow().is_empty());

    game.apply_command(GameCommand::ToggleSound);
    game.attempt_place(1, 1, 1);
    assert_eq!(*events.borrow(), vec![FeedbackEvent::PiecePlaced]);
}

#[test]
fn test_seeded_sessions_deal_identical_rounds() {
    let config = GameConfig {
        seed: Some(7),
        ..GameConfig::default()
    };
    let mut a = GameState::new(config);
    let mut b = GameState::new(config);
    a.start_game();
    b.start_game();
    assert_eq!(a.offered(), b.offered());
}

/// Fill a 6x6 board except two isolated holes per row and per column, so only
/// a 1x1 fits and filling one hole completes no line.
fn stage_isolated_holes(game: &mut GameState<SmallRng>) {
    for r in 0..6i16 {
        for c in 0..6i16 {
            if c != r && c != (r + 3) % 6 {
                game.board_mut().set(r, c, Some(ColorId::Teal));
            }
        }
    }
}

#[test]
fn test_refill_retries_and_falls_back_on_crowded_board() {
    let config = GameConfig {
        board_size: 6,
        ..GameConfig::default()
    };
    let (mut retried, mut fell_back, mut fallback_game_overs) = (0, 0, 0);

    for seed in 0..300 {
        let mut game = GameState::with_rng(config, SmallRng::seed_from_u64(seed));
        game.start_game();
        stage_isolated_holes(&mut game);
        game.set_offered([Piece::new(1000, MONO, ColorId::Lime)]);

        let turn = game.attempt_place(0, 0, 0);
        assert!(turn.is_placed());
        assert_eq!(turn.lines_cleared(), 0);
        let refill = turn.refill.expect("last piece used, round must refill");
        assert!((1..=config.max_draw_attempts).contains(&refill.attempts));

        let fits = game.board().can_place_any_piece(game.offered());
        if refill.used_fallback {
            fell_back += 1;
            assert_eq!(refill.attempts, config.max_draw_attempts);
            assert!(game
                .offered()
                .iter()
                .all(|p| small_pool().contains(p.shape())));
            if !fits {
                fallback_game_overs += 1;
            }
        } else {
            // A checked draw always leaves a legal move.
            assert!(fits, "seed {seed}: accepted round has no legal move");
            if refill.attempts > 1 {
                retried += 1;
            }
        }

        let expected = if fits {
            GamePhase::Playing
        } else {
            GamePhase::GameOver
        };
        assert_eq!(game.phase(), expected, "seed {seed}");
        assert_eq!(turn.is_game_over(), !fits);
    }

    assert!(retried > 0, "no seed accepted a later draw");
    assert!(fell_back > 0, "no seed reached the small-pool fallback");
    assert!(fallback_game_overs > 0, "no fallback round ended the game");
}
