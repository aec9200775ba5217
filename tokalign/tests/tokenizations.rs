//! Reconciling two tokenizations of the same sentence.
use std::collections::BTreeMap;

use tokalign::*;

fn lengths(tokens: &[&str]) -> Vec<usize> {
    tokens.iter().map(|t| t.chars().count()).collect()
}

#[test]
fn project_labels_between_tokenizations() {
    let gold = ["I", "can't", "go", "to", "New", "York", "."];
    let pred = ["I", "ca", "n't", "go", "to", "New", "York", "."];
    let labels = ["O", "O", "O", "O", "B-LOC", "I-LOC", "O"];

    let alignment = align(&gold, &pred).unwrap();
    assert_eq!(alignment.distance, 2);
    assert_eq!(
        alignment.source_to_target.to_raw(),
        vec![0, -1, 3, 4, 5, 6, 7]
    );
    assert_eq!(
        alignment.target_to_source.to_raw(),
        vec![0, -1, -1, 2, 3, 4, 5, 6]
    );

    let projected: Vec<Option<&str>> = alignment
        .target_to_source
        .iter()
        .map(|i| i.map(|i| labels[i]))
        .collect();
    assert_eq!(projected[5..7], [Some("B-LOC"), Some("I-LOC")]);

    // `ca` + `n't` together spell `can't`.
    let multi = multi_align(
        &alignment.target_to_source,
        &alignment.source_to_target,
        &lengths(&pred),
        &lengths(&gold),
    )
    .unwrap();
    assert_eq!(multi.source_to_target, BTreeMap::from([(1, 1), (2, 1)]));
    assert_eq!(multi.target_to_source, BTreeMap::from([(1, 2)]));
}

#[test]
fn raw_output() {
    let (distance, i2j, j2i, matrix) = Aligner::default()
        .align(&["a", "b", "c"], &["a", "c"])
        .unwrap()
        .into_raw();
    assert_eq!(distance, 1);
    assert_eq!(i2j, vec![0, -1, 1]);
    assert_eq!(j2i, vec![0, 2]);
    assert_eq!(matrix.rows(), 4);
    assert_eq!(matrix.cols(), 3);
}

#[test]
fn default_config() {
    let config = AlignConfig::default();
    assert_eq!(config.sweep, Sweep::ColumnMajor);
    assert_eq!(config.substitutions, SubstitutionPolicy::Unaligned);
    assert_eq!(config.hasher, HasherKind::Murmur3);
}
