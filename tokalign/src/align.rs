//! The alignment entrypoint: encode, fill the matrix, backtrace both ways.

use std::fmt;

use instant::Instant;
use log::debug;

use crate::{
    encode, trace, AlignConfig, AlignStats, AlignmentVec, AsToken, Cost, DistanceMatrix, Encoded,
    Result, SubstitutionPolicy, TokenHasher,
};

/// The result of aligning a source and a target sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    /// The unit-cost edit distance, equal to the bottom-right matrix cell.
    pub distance: Cost,
    /// For each source token, the target token it aligns to.
    pub source_to_target: AlignmentVec,
    /// For each target token, the source token it aligns to.
    pub target_to_source: AlignmentVec,
    pub matrix: DistanceMatrix,
}

impl Alignment {
    /// The alignment vectors with `-1` for unaligned tokens.
    pub fn into_raw(self) -> (Cost, Vec<i32>, Vec<i32>, DistanceMatrix) {
        (
            self.distance,
            self.source_to_target.to_raw(),
            self.target_to_source.to_raw(),
            self.matrix,
        )
    }
}

/// A reusable aligner with a fixed configuration and token hasher.
pub struct Aligner {
    pub config: AlignConfig,
    hasher: Box<dyn TokenHasher>,
}

impl Default for Aligner {
    fn default() -> Self {
        Self::new(AlignConfig::default())
    }
}

impl fmt::Debug for Aligner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aligner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Aligner {
    pub fn new(config: AlignConfig) -> Self {
        Self {
            config,
            hasher: config.hasher.build(),
        }
    }

    /// Use a custom hasher instead of the one selected in the config.
    pub fn with_hasher(config: AlignConfig, hasher: Box<dyn TokenHasher>) -> Self {
        Self { config, hasher }
    }

    pub fn align<S: AsToken, T: AsToken>(&self, source: &[S], target: &[T]) -> Result<Alignment> {
        self.align_with_stats(source, target).map(|(alignment, _)| alignment)
    }

    pub fn align_with_stats<S: AsToken, T: AsToken>(
        &self,
        source: &[S],
        target: &[T],
    ) -> Result<(Alignment, AlignStats)> {
        let start = Instant::now();
        let a = encode(source, &*self.hasher)?;
        let b = encode(target, &*self.hasher)?;
        let encoded = Instant::now();
        let (alignment, mut stats) = self.align_encoded_with_stats(&a, &b)?;
        stats.timing.encode = encoded.duration_since(start).as_secs_f64();
        stats.timing.total += stats.timing.encode;
        Ok((alignment, stats))
    }

    /// Align two sequences that were already encoded.
    pub fn align_encoded(&self, a: &Encoded, b: &Encoded) -> Result<Alignment> {
        self.align_encoded_with_stats(a, b).map(|(alignment, _)| alignment)
    }

    fn align_encoded_with_stats(&self, a: &Encoded, b: &Encoded) -> Result<(Alignment, AlignStats)> {
        let mut stats = AlignStats::init(a.len(), b.len());

        let start = Instant::now();
        let matrix = DistanceMatrix::build(&a.codes, &b.codes, self.config.sweep)?;
        let filled = Instant::now();
        let distance = matrix.distance();
        debug!("matrix {:?} distance {distance}", matrix.dims());

        let policy = self.config.substitutions;
        let report = |i: usize, j: usize| match policy {
            SubstitutionPolicy::Aligned => true,
            SubstitutionPolicy::Unaligned => a.codes[i] == b.codes[j],
            SubstitutionPolicy::SameLength => {
                a.codes[i] == b.codes[j]
                    || match (a.byte_len(i), b.byte_len(j)) {
                        (Some(x), Some(y)) => x == y,
                        // Integer tokens carry no length.
                        _ => true,
                    }
            }
        };
        let source_to_target = trace::source_to_target(&matrix, report);
        let target_to_source = trace::target_to_source(&matrix, report);
        let traced = Instant::now();

        stats.distance = distance;
        stats.aligned_a = source_to_target.num_aligned();
        stats.aligned_b = target_to_source.num_aligned();
        stats.timing.matrix = filled.duration_since(start).as_secs_f64();
        stats.timing.trace = traced.duration_since(filled).as_secs_f64();
        stats.timing.total = traced.duration_since(start).as_secs_f64();

        Ok((
            Alignment {
                distance,
                source_to_target,
                target_to_source,
                matrix,
            },
            stats,
        ))
    }
}

/// Align `source` to `target` with the default configuration.
///
/// Text tokens are hashed with MurmurHash3 and substituted tokens are left
/// unaligned. Use an [`Aligner`] to change either.
pub fn align<S: AsToken, T: AsToken>(source: &[S], target: &[T]) -> Result<Alignment> {
    Aligner::default().align(source, target)
}
