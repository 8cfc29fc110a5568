use criterion::{black_box, criterion_group, criterion_main, Criterion};
use element_tetris::core::{resolve, GameSession, Grid, PieceGenerator};
use element_tetris::term::{FrameBuffer, GameView, Viewport};
use element_tetris::types::{Command, Position, ShapePolicy};

fn bench_hard_drop(c: &mut Criterion) {
    let mut session = GameSession::new(12345);

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if session.game_over() {
                session.apply(Command::Restart);
            }
            black_box(session.apply(Command::HardDrop));
        })
    });
}

fn bench_resolve_cascade(c: &mut Criterion) {
    // A Water drop that sets off an extinguish, a Rock row clear and a Dynamite hit.
    let grid = Grid::from_rows(&[
        "W.........",
        "F.....D...",
        "R.....R...",
        ".RRRRRRRRR",
        "FWFWFWFWFW",
    ])
    .unwrap();
    let active = [Position::new(9, 0)];

    c.bench_function("resolve_cascade", |b| {
        b.iter(|| resolve(black_box(grid), black_box(&active)))
    });
}

fn bench_resolve_four_rows(c: &mut Criterion) {
    let grid = Grid::from_rows(&["RRRRRRRRRR"; 4]).unwrap();
    let active = [Position::new(13, 0)];

    c.bench_function("resolve_four_rows", |b| {
        b.iter(|| resolve(black_box(grid), black_box(&active)))
    });
}

fn bench_create_piece(c: &mut Criterion) {
    let mut generator = PieceGenerator::new(12345, ShapePolicy::Tetromino);

    c.bench_function("create_piece", |b| {
        b.iter(|| black_box(generator.create_piece(black_box(7))))
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut session = GameSession::new(12345);
    let mut events = Vec::with_capacity(4);

    c.bench_function("try_move", |b| {
        b.iter(|| {
            events.clear();
            session.apply_into(Command::MOVE_LEFT, &mut events);
            session.apply_into(Command::MOVE_RIGHT, &mut events);
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let session = GameSession::new(12345);
    let snap = session.snapshot();
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("render_into", |b| {
        b.iter(|| view.render_into(black_box(&snap), viewport, &mut fb))
    });
}

criterion_group!(
    benches,
    bench_hard_drop,
    bench_resolve_cascade,
    bench_resolve_four_rows,
    bench_create_piece,
    bench_try_move,
    bench_render
);
criterion_main!(benches);
