//! Recover many-to-one alignments from the one-to-one backtrace.
//!
//! When several source tokens together spell one target token (`bb cc` vs
//! `bbcc`) the backtrace leaves all of them unaligned. Runs of unaligned tokens
//! that start at the same character offset on both sides and have the same
//! total length are split greedily: source tokens are grouped until their
//! lengths add up to the next target token.

use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::{AlignError, AlignmentVec, Result};

/// Extra alignments found by [`multi_align`], keyed by token index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiAlignment {
    /// Every source token of a group maps to the target token it is part of.
    pub source_to_target: BTreeMap<usize, usize>,
    /// The target token maps to the last source token of its group.
    pub target_to_source: BTreeMap<usize, usize>,
}

/// Runs of consecutive unaligned tokens, keyed by the character offset at
/// which each run starts.
fn unaligned_runs(alignment: &AlignmentVec, lengths: &[usize]) -> BTreeMap<usize, Vec<usize>> {
    let mut runs: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    let mut start = None;
    let mut offset = 0;
    for (i, (x, &len)) in alignment.iter().zip(lengths).enumerate() {
        if x.is_none() {
            runs.entry(*start.get_or_insert(offset)).or_default().push(i);
        } else {
            start = None;
        }
        offset += len;
    }
    runs
}

fn check_lengths(what: &'static str, alignment: &AlignmentVec, lengths: &[usize]) -> Result<()> {
    if alignment.len() != lengths.len() {
        return Err(AlignError::LengthMismatch {
            what,
            expected: alignment.len(),
            found: lengths.len(),
        });
    }
    Ok(())
}

/// Align groups of unaligned source tokens to single unaligned target tokens.
///
/// `i_lengths[i]` and `j_lengths[j]` are the character lengths of the tokens.
/// A run is processed only when it starts at the same offset on both sides and
/// both runs have the same total length. Processing a run stops at the first
/// group that overshoots its target token.
pub fn multi_align(
    i2j: &AlignmentVec,
    j2i: &AlignmentVec,
    i_lengths: &[usize],
    j_lengths: &[usize],
) -> Result<MultiAlignment> {
    check_lengths("i_lengths", i2j, i_lengths)?;
    check_lengths("j_lengths", j2i, j_lengths)?;

    let i_runs = unaligned_runs(i2j, i_lengths);
    let j_runs = unaligned_runs(j2i, j_lengths);

    let mut out = MultiAlignment::default();
    for (start, i_run) in &i_runs {
        let Some(j_run) = j_runs.get(start) else {
            continue;
        };
        let total = |run: &[usize], lengths: &[usize]| run.iter().map(|&k| lengths[k]).sum::<usize>();
        if total(&i_run[..], i_lengths) != total(&j_run[..], j_lengths) {
            continue;
        }

        let mut targets = j_run.iter().copied();
        let Some(mut j) = targets.next() else {
            continue;
        };
        let mut group: SmallVec<[usize; 4]> = SmallVec::new();
        let mut group_len = 0;
        for &i in i_run {
            group.push(i);
            group_len += i_lengths[i];
            if group_len > j_lengths[j] {
                break;
            }
            if group_len == j_lengths[j] {
                for &i in &group {
                    out.source_to_target.insert(i, j);
                }
                out.target_to_source.insert(j, i);
                group.clear();
                group_len = 0;
                // Equal totals mean the target run ends with the source run.
                match targets.next() {
                    Some(next) => j = next,
                    None => break,
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align;

    fn lengths(tokens: &[&str]) -> Vec<usize> {
        tokens.iter().map(|t| t.chars().count()).collect()
    }

    fn run(a: &[&str], b: &[&str]) -> MultiAlignment {
        let alignment = align(a, b).unwrap();
        multi_align(
            &alignment.source_to_target,
            &alignment.target_to_source,
            &lengths(a),
            &lengths(b),
        )
        .unwrap()
    }

    #[test]
    fn split_token() {
        let a = ["aa", "bb", "cc", "dd"];
        let b = ["aa", "bbcc", "dd"];
        let alignment = align(&a, &b).unwrap();
        assert_eq!(alignment.source_to_target.to_raw(), vec![0, -1, -1, 2]);
        assert_eq!(alignment.target_to_source.to_raw(), vec![0, -1, 3]);

        let multi = run(&a, &b);
        assert_eq!(multi.source_to_target, BTreeMap::from([(1, 1), (2, 1)]));
        assert_eq!(multi.target_to_source, BTreeMap::from([(1, 2)]));
    }

    #[test]
    fn merged_token_is_not_split() {
        // Only source tokens are grouped; a longer source token overshoots.
        assert_eq!(run(&["aa", "bbcc", "dd"], &["aa", "bb", "cc", "dd"]), MultiAlignment::default());
    }

    #[test]
    fn whole_sequence() {
        let multi = run(&["a", "b", "c"], &["abc"]);
        assert_eq!(multi.source_to_target, BTreeMap::from([(0, 0), (1, 0), (2, 0)]));
        assert_eq!(multi.target_to_source, BTreeMap::from([(0, 2)]));
    }

    #[test]
    fn crossing_boundaries() {
        // `x|yz` vs `xy|z`: the first group overshoots.
        assert_eq!(run(&["x", "yz"], &["xy", "z"]), MultiAlignment::default());
    }

    #[test]
    fn several_groups_in_one_run() {
        let i2j = AlignmentVec::from_raw(&[-1, -1, -1, -1]);
        let j2i = AlignmentVec::from_raw(&[-1, -1]);
        let multi = multi_align(&i2j, &j2i, &[1, 2, 2, 1], &[3, 3]).unwrap();
        assert_eq!(
            multi.source_to_target,
            BTreeMap::from([(0, 0), (1, 0), (2, 1), (3, 1)])
        );
        assert_eq!(multi.target_to_source, BTreeMap::from([(0, 1), (1, 3)]));
    }

    #[test]
    fn runs_must_start_at_the_same_offset() {
        let i2j = AlignmentVec::from_raw(&[-1, 5]);
        let j2i = AlignmentVec::from_raw(&[0, -1]);
        let multi = multi_align(&i2j, &j2i, &[2, 2], &[2, 2]).unwrap();
        assert_eq!(multi, MultiAlignment::default());
    }

    #[test]
    fn length_mismatch() {
        let v = AlignmentVec::from_raw(&[-1, -1]);
        assert_eq!(
            multi_align(&v, &v, &[1, 1], &[1]),
            Err(AlignError::LengthMismatch {
                what: "j_lengths",
                expected: 2,
                found: 1
            })
        );
    }
}
