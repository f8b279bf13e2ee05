use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tetris_console::core::{Controller, Engine, Jukebox, View};
use tetris_console::engine::Game;
use tetris_console::term::{encode_diff_into, encode_full_into, FrameBuffer, GameView, Geometry};
use tetris_console::types::{Key, PLAYFIELD_COLUMNS, PLAYFIELD_ROWS};

fn view() -> GameView<FrameBuffer> {
    let g = Geometry::new(33.0, 22.0, PLAYFIELD_ROWS, PLAYFIELD_COLUMNS).unwrap();
    GameView::new(FrameBuffer::new(33, 22), g)
}

fn busy_game() -> Game {
    let mut game = Game::new(12345);
    for y in 12..PLAYFIELD_ROWS {
        for x in 0..PLAYFIELD_COLUMNS - 1 {
            game.set_cell(x, y, ((x + y) % 7 + 1) as u8);
        }
    }
    game
}

fn bench_main_screen(c: &mut Criterion) {
    let state = busy_game().get_state();
    let mut v = view();

    c.bench_function("render_main_screen", |b| {
        b.iter(|| v.render_main_screen(black_box(&state)))
    });
}

fn bench_encode(c: &mut Criterion) {
    let game = busy_game();
    let mut prev = view();
    prev.render_main_screen(&game.get_state());
    let mut next = view();
    let mut moved = game.clone();
    moved.move_piece_down();
    next.render_main_screen(&moved.get_state());

    let mut out = Vec::with_capacity(64 * 1024);
    c.bench_function("encode_full_frame", |b| {
        b.iter(|| {
            out.clear();
            encode_full_into(black_box(next.surface()), &mut out).unwrap();
        })
    });
    c.bench_function("encode_diff_frame", |b| {
        b.iter(|| {
            out.clear();
            encode_diff_into(black_box(prev.surface()), black_box(next.surface()), &mut out)
                .unwrap();
        })
    });
}

fn bench_controller_advance(c: &mut Criterion) {
    let mut controller = Controller::new(|| Game::new(7), view(), Jukebox::silent());
    controller.key_down(Key::Enter).unwrap();

    c.bench_function("controller_advance_16ms", |b| {
        b.iter(|| {
            if controller.engine().is_game_over() {
                controller.reset().unwrap();
                controller.key_down(Key::Enter).unwrap();
            }
            controller.advance(black_box(16)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    bench_main_screen,
    bench_encode,
    bench_controller_advance
);
criterion_main!(benches);
