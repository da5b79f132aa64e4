//! Terminal Block Blast runner (default binary).
//!
//! Uses crossterm for input and the framebuffer-based renderer from the term
//! crate. The loop is event driven: nothing changes between key presses.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use block_blast::config::AppConfig;
use block_blast::core::{GameSnapshot, GameState};
use block_blast::engine::{DragController, JsonHighScoreStore, LogFeedback};
use block_blast::input::{map_key, should_quit, InputAction};
use block_blast::term::{FrameBuffer, GameView, PlacementView, TerminalBell, TerminalRenderer, Viewport};
use block_blast::types::GameCommand;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_level(config.log_level))
        .try_init()?;

    log::info!("logging initialized at level {}", config.log_level);
    Ok(())
}

fn tracing_level(level: log::LevelFilter) -> LevelFilter {
    match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    }
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let store_path = config
        .high_score_path
        .clone()
        .unwrap_or_else(JsonHighScoreStore::default_path);
    log::info!("high score file: {}", store_path.display());

    let mut game = GameState::new(config.game)
        .with_store(JsonHighScoreStore::new(store_path))
        .with_audio(TerminalBell::new())
        .with_haptics(LogFeedback::new("haptics"));
    if !config.sound {
        game.toggle_sound();
    }
    if !config.haptics {
        game.toggle_haptics();
    }

    let size = game.board().size() as i16;
    let mut cursor = (size / 2, size / 2);
    let mut drag = DragController::new(config.game.snap_radius);

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    loop {
        if !game.phase().is_playing() {
            drag.cancel();
        }

        // Render.
        game.snapshot_into(&mut snap);
        let placement = PlacementView {
            cursor,
            held: drag.dragged(),
            preview: drag.preview().map(|p| (p.row, p.col, p.valid)),
        };
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, &placement, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            Event::Resize(_, _) => {
                term.invalidate();
                continue;
            }
            _ => continue,
        };

        if should_quit(key) {
            // Leaving mid-game still records a new best.
            game.exit_to_menu();
            return Ok(());
        }

        let Some(action) = map_key(key) else {
            continue;
        };
        match action {
            InputAction::Command(command) => {
                drag.cancel();
                game.apply_command(command);
                if command == GameCommand::StartGame {
                    cursor = (size / 2, size / 2);
                }
            }
            InputAction::SelectPiece(index) => {
                if drag.pick_up(&mut game, index) {
                    drag.hover(&game, cursor.0 as f32, cursor.1 as f32);
                }
            }
            InputAction::MoveCursor { dr, dc } => {
                cursor.0 = (cursor.0 + dr as i16).clamp(0, size - 1);
                cursor.1 = (cursor.1 + dc as i16).clamp(0, size - 1);
                drag.hover(&game, cursor.0 as f32, cursor.1 as f32);
            }
            InputAction::Place => {
                if let Some(turn) = drag.drop_piece(&mut game) {
                    if let Some(reason) = turn.rejection() {
                        log::debug!("drop rejected: {}", reason.code());
                    }
                }
            }
            InputAction::Cancel => drag.cancel(),
        }
    }
}
