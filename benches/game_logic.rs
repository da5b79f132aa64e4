use criterion::{black_box, criterion_group, criterion_main, Criterion};
use block_blast::core::pieces::{LINE5_H, SQUARE3};
use block_blast::core::rand::rngs::mock::StepRng;
use block_blast::core::rand::rngs::SmallRng;
use block_blast::core::rand::SeedableRng;
use block_blast::core::{Board, GameConfig, GameSnapshot, GameState, RoundGenerator};
use block_blast::engine::find_best_placement;
use block_blast::term::{FrameBuffer, GameView, PlacementView, Viewport};
use block_blast::types::ColorId;

fn bench_turn(c: &mut Criterion) {
    let mut state = GameState::with_rng(GameConfig::default(), StepRng::new(0, 0));
    state.start_game();
    let mut cell = 0i16;

    c.bench_function("attempt_place_mono", |b| {
        b.iter(|| {
            // Walk the board; every completed row clears so cells free up again.
            let (row, col) = (cell / 8, cell % 8);
            cell = (cell + 1) % 64;
            for index in 0..3 {
                if state.attempt_place(index, row, col).is_placed() {
                    break;
                }
            }
            black_box(state.score())
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_row_and_column", |b| {
        b.iter(|| {
            let mut board = Board::standard();
            for i in 0..8 {
                board.set(3, i, Some(ColorId::Yellow));
                board.set(i, 5, Some(ColorId::Yellow));
            }
            let lines = board.find_complete_lines();
            black_box(board.clear_lines(&lines.rows, &lines.cols))
        })
    });
}

fn bench_round_generation(c: &mut Criterion) {
    let mut board = Board::standard();
    // Crowded board so the draw loop has to reject shapes.
    for r in 0..8 {
        for col in 0..8 {
            if (r * 3 + col) % 4 != 0 {
                board.set(r, col, Some(ColorId::Coral));
            }
        }
    }
    let mut generator = RoundGenerator::new(SmallRng::seed_from_u64(7));

    c.bench_function("round_generate_crowded", |b| {
        b.iter(|| black_box(generator.generate(black_box(&board))))
    });
}

fn bench_snap_search(c: &mut Criterion) {
    let mut board = Board::standard();
    board.set(4, 4, Some(ColorId::Teal));

    c.bench_function("find_best_placement_3x3", |b| {
        b.iter(|| find_best_placement(&board, &SQUARE3, black_box(3.4), black_box(3.7), 1.5))
    });
    c.bench_function("can_place_line5", |b| {
        b.iter(|| board.can_place(&LINE5_H, black_box(4), black_box(0)))
    });
}

fn bench_render(c: &mut Criterion) {
    let mut state = GameState::with_rng(GameConfig::default(), StepRng::new(0, 0));
    state.start_game();
    state.attempt_place(0, 2, 2);

    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let placement = PlacementView {
        cursor: (4, 4),
        held: Some(1),
        preview: Some((4, 4, true)),
    };
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    c.bench_function("snapshot_and_render", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            view.render_into(&snap, &placement, viewport, &mut fb);
            black_box(fb.get(0, 0))
        })
    });
}

criterion_group!(
    benches,
    bench_turn,
    bench_line_clear,
    bench_round_generation,
    bench_snap_search,
    bench_render
);
criterion_main!(benches);
