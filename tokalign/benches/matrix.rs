use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tokalign::*;

/// A random sequence over `sigma` codes and a copy with `e` substitutions per token.
fn pair(n: usize, e: f64, sigma: u32, seed: u64) -> (Sequence, Sequence) {
    let rng = &mut ChaCha8Rng::seed_from_u64(seed);
    let a: Sequence = (0..n).map(|_| rng.gen_range(0..sigma)).collect();
    let b = a
        .iter()
        .map(|&c| if rng.gen_bool(e) { rng.gen_range(0..sigma) } else { c })
        .collect();
    (a, b)
}

fn sweeps(c: &mut Criterion) {
    let mut g = c.benchmark_group("sweep");
    g.sample_size(10);
    for n in [1000, 5000] {
        let (a, b) = pair(n, 0.1, 1000, 31415);
        let d = DistanceMatrix::build(&a, &b, Sweep::ColumnMajor).unwrap().distance();
        for sweep in [Sweep::ColumnMajor, Sweep::RowMajor, Sweep::AntiDiagonal] {
            g.bench_with_input(BenchmarkId::new(format!("{sweep:?}"), n), &n, |bb, _| {
                bb.iter(|| assert_eq!(DistanceMatrix::build(&a, &b, sweep).unwrap().distance(), d))
            });
        }
    }
    g.finish();
}

fn end_to_end(c: &mut Criterion) {
    let (a, b) = pair(2000, 0.05, 500, 2718);
    let words = |s: &Sequence| s.iter().map(|c| format!("w{c}")).collect::<Vec<_>>();
    let (a, b) = (words(&a), words(&b));
    let aligner = Aligner::default();
    c.bench_function("align/2000", |bb| bb.iter(|| aligner.align(&a, &b).unwrap()));
}

criterion_group!(benches, sweeps, end_to_end);
criterion_main!(benches);
