//! `core::effects::confetti` の性能計測（1フレーム更新）。

use core::hint::black_box;
use criterion::BatchSize;
use criterion::BenchmarkId;
use criterion::Criterion;
use trigrid_core::effects;

/// `cargo bench` の引数を取り込みつつ `Criterion` を生成する。
fn criterion_configured() -> Criterion {
    let base = Criterion::default();
    base.configure_from_args()
}

/// `Burst::step` を紙片の数ごとに計測する。
fn bench_step(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("effects/confetti/step");

    for pieces in [50_u16, 200, 800] {
        let config = effects::BurstConfig::default().with_pieces(pieces);
        let bench_id = BenchmarkId::new("pieces", pieces);
        group.bench_with_input(bench_id, &config, |bench, input| {
            bench.iter_batched(
                || effects::Burst::new(u64::MIN, 1280, 720, *input),
                |mut burst| {
                    burst.step();
                    black_box(burst)
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// ベンチマークのエントリーポイント。
fn main() {
    let mut criterion = criterion_configured();
    bench_step(&mut criterion);
    criterion.final_summary();
}
