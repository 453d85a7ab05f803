use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gamemint::games::blackjack::{new_deck, score_hand};
use gamemint::games::limbo::{crash_point_from_unit, ramp_value, DEFAULT_MAX_MULTIPLIER};
use gamemint::games::mines::generate_grid;
use gamemint::games::{RandomSource, RngSource};

fn mines_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("mines_grid");
    for mines in [1u8, 3, 5] {
        group.bench_function(BenchmarkId::new("generate", mines), |b| {
            let mut rng = RngSource::seeded(7);
            b.iter(|| black_box(generate_grid(&mut rng, mines)))
        });
    }
    group.finish();
}

fn limbo(c: &mut Criterion) {
    let mut rng = RngSource::seeded(11);
    c.bench_function("limbo_crash_point", |b| {
        b.iter(|| {
            black_box(crash_point_from_unit(
                rng.next_unit(),
                black_box(100),
                black_box(1000),
                DEFAULT_MAX_MULTIPLIER,
            ))
        })
    });
    c.bench_function("limbo_ramp_value", |b| {
        b.iter(|| black_box(ramp_value(black_box(4.2), black_box(1200.0))))
    });
}

fn blackjack(c: &mut Criterion) {
    let mut rng = RngSource::seeded(3);
    c.bench_function("blackjack_new_deck", |b| b.iter(|| black_box(new_deck(&mut rng))));

    let deck = new_deck(&mut RngSource::seeded(5));
    let mut group = c.benchmark_group("blackjack_score");
    for cards in [2usize, 4, 8] {
        group.bench_function(BenchmarkId::new("score_hand", cards), |b| {
            b.iter(|| black_box(score_hand(&deck[..cards])))
        });
    }
    group.finish();
}

criterion_group!(benches, mines_grid, limbo, blackjack);
criterion_main!(benches);
