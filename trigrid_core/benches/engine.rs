//! `core::engine` の性能計測（勝利判定、着手適用）。

use core::hint::black_box;
use criterion::BatchSize;
use criterion::Criterion;
use trigrid_core::engine;

/// `cargo bench` の引数を取り込みつつ `Criterion` を生成する。
fn criterion_configured() -> Criterion {
    let base = Criterion::default();
    base.configure_from_args()
}

/// 勝者のいない埋まった盤面を返す（勝利判定の最悪ケース）。
fn full_board_without_line() -> engine::Board {
    let x = engine::Cell::PlayerOne;
    let o = engine::Cell::PlayerTwo;
    let z = engine::Cell::PlayerThree;
    engine::Board::from_cells([
        [x, z, o, x, z],
        [o, x, z, o, x],
        [z, o, o, z, o],
        [x, z, o, x, z],
        [o, x, z, o, x],
    ])
}

/// `check_winner` を計測する。
fn bench_check_winner(criterion: &mut Criterion) {
    let board = full_board_without_line();
    criterion.bench_function("engine/check_winner_full_board", |bench| {
        bench.iter(|| black_box(engine::check_winner(black_box(board))));
    });
}

/// `Game::apply_move` を計測する。
fn bench_apply_move(criterion: &mut Criterion) {
    criterion.bench_function("engine/apply_move_initial", |bench| {
        bench.iter_batched(
            engine::Game::initial,
            |mut game| black_box(game.apply_move(2, 2)),
            BatchSize::SmallInput,
        );
    });
}

/// ベンチマークのエントリーポイント。
fn main() {
    let mut criterion = criterion_configured();

    bench_apply_move(&mut criterion);
    bench_check_winner(&mut criterion);

    criterion.final_summary();
}
