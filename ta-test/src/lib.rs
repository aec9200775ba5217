//! Randomized inputs and invariant checks for aligners.
use itertools::Itertools;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use tokalign::*;

/// Small inputs with known edge cases: empty sides, repeats, and shifts.
fn test_sequences() -> Vec<(&'static str, &'static str)> {
    vec![
        ("", ""),
        ("", "abc"),
        ("abc", ""),
        ("a", "a"),
        ("a", "b"),
        ("ring", "rang"),
        ("kitten", "sitting"),
        ("intention", "execution"),
        ("aaaa", "aa"),
        ("abab", "baba"),
        ("abcabcabc", "cbacbacba"),
        ("the quick brown fox", "the quack brown fix"),
    ]
}

/// `n` random codes drawn uniformly from `0..sigma`.
pub fn random_sequence(n: usize, sigma: u32, rng: &mut impl Rng) -> Sequence {
    (0..n).map(|_| rng.gen_range(0..sigma)).collect()
}

/// Apply about `e * |a|` random substitutions, insertions and deletions.
pub fn random_mutate(a: &[u32], e: f64, sigma: u32, rng: &mut impl Rng) -> Sequence {
    let mut b = a.to_vec();
    let edits = (e * a.len() as f64).round() as usize;
    for _ in 0..edits {
        let i = rng.gen_range(0..=b.len());
        match rng.gen_range(0..3) {
            0 if i < b.len() => b[i] = rng.gen_range(0..sigma),
            1 if i < b.len() => {
                b.remove(i);
            }
            _ => b.insert(i, rng.gen_range(0..sigma)),
        }
    }
    b
}

/// Random pairs over a grid of lengths, error rates and alphabet sizes.
///
/// The generator is seeded so that failures are reproducible.
pub fn gen_pairs(seed: u64) -> impl Iterator<Item = ((Sequence, Sequence), (usize, f64, u32))> {
    let rng = &mut ChaCha8Rng::seed_from_u64(seed);
    let ns = [0usize, 1, 2, 3, 5, 8, 13, 20, 50, 100, 200];
    let es = [0.0f64, 0.05, 0.2, 0.5, 1.0];
    let sigmas = [2u32, 4, 20, 256];
    ns.into_iter()
        .cartesian_product(es)
        .cartesian_product(sigmas)
        .map(|((n, e), sigma)| {
            let a = random_sequence(n, sigma, rng);
            let b = random_mutate(&a, e, sigma, rng);
            ((a, b), (n, e, sigma))
        })
        .collect_vec()
        .into_iter()
}

fn chars(s: &str) -> Sequence {
    s.chars().map(|c| c as u32).collect()
}

/// Check every invariant of an alignment of `a` and `b`.
pub fn test_aligner_on_input(a: &[u32], b: &[u32], aligner: &Aligner, params: &str) {
    let (m, n) = (a.len(), b.len());
    let context = || format!("\n{params}\naligner {aligner:?}\na {a:?}\nb {b:?}");

    let alignment = aligner.align(a, b).unwrap_or_else(|e| panic!("{e}{}", context()));
    let Alignment {
        distance,
        source_to_target: i2j,
        target_to_source: j2i,
        matrix,
    } = &alignment;
    let d = *distance;

    // Matrix shape and borders.
    assert_eq!(matrix.dims(), (m + 1, n + 1), "{}", context());
    assert_eq!(d, matrix[(m, n)], "{}", context());
    for i in 0..=m {
        assert_eq!(matrix[(i, 0)], i as Cost, "{}", context());
    }
    for j in 0..=n {
        assert_eq!(matrix[(0, j)], j as Cost, "{}", context());
    }

    // Distance bounds.
    assert!(m.abs_diff(n) as Cost <= d, "{}", context());
    assert!(d <= m.max(n) as Cost, "{}", context());

    // Independent reference implementation, when codes fit in a byte.
    if let (Ok(a8), Ok(b8)) = (
        a.iter().map(|&c| u8::try_from(c)).collect::<Result<Vec<_>, _>>(),
        b.iter().map(|&c| u8::try_from(c)).collect::<Result<Vec<_>, _>>(),
    ) {
        assert_eq!(triple_accel::levenshtein_exp(&a8, &b8) as Cost, d, "{}", context());
    }

    // Cost symmetry.
    let back = aligner.align(b, a).unwrap();
    assert_eq!(back.distance, d, "{}", context());

    // Alignment vectors: lengths, ranges, and order.
    assert_eq!(i2j.len(), m, "{}", context());
    assert_eq!(j2i.len(), n, "{}", context());
    for (v, other) in [(i2j, n), (j2i, m)] {
        let targets = v.iter().flatten().collect_vec();
        assert!(targets.iter().all(|&x| x < other), "{}", context());
        assert!(targets.iter().tuple_windows().all(|(x, y)| x < y), "{}", context());
    }

    // Under the default policy only identical tokens are aligned.
    if aligner.config.substitutions == SubstitutionPolicy::Unaligned {
        for (i, j) in i2j.iter().enumerate().filter_map(|(i, j)| Some((i, j?))) {
            assert_eq!(a[i], b[j], "i {i} j {j}{}", context());
        }
        for (j, i) in j2i.iter().enumerate().filter_map(|(j, i)| Some((j, i?))) {
            assert_eq!(a[i], b[j], "i {i} j {j}{}", context());
        }
    }

    // Identity.
    if a == b {
        assert_eq!(d, 0, "{}", context());
        assert!(i2j.iter().enumerate().all(|(i, j)| j == Some(i)), "{}", context());
        assert!(j2i.iter().enumerate().all(|(j, i)| i == Some(j)), "{}", context());
    }
}

/// Test the given aligner on hardcoded and random inputs:
/// - length 0 to 200
/// - error rate 0 to 1
/// - alphabet size 2 to 256
///
/// See [`test_aligner_on_input`] for the checked invariants.
pub fn test_aligner(aligner: &Aligner) {
    test_aligner_up_to(aligner, usize::MAX);
}

/// As test_aligner, but only test sequences with n <= max_n.
pub fn test_aligner_up_to(aligner: &Aligner, max_n: usize) {
    for (a, b) in test_sequences() {
        test_aligner_on_input(
            &chars(a),
            &chars(b),
            aligner,
            &format!("hardcoded test_sequences: a {a:?} b {b:?}"),
        );
    }
    let seed = 31415;
    for ((a, b), (n, e, sigma)) in gen_pairs(seed) {
        if n > max_n {
            continue;
        }
        test_aligner_on_input(
            &a,
            &b,
            aligner,
            &format!("seed {seed:>10} n {n:>5} e {e:>.2} sigma {sigma:>3}"),
        );
    }
}
