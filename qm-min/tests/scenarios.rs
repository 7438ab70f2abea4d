// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use qm_min::{chart::ReductionStep, pattern::Pattern, problem::Problem};
use std::collections::BTreeSet;

fn covered(patterns: &[Pattern]) -> BTreeSet<u32> {
    patterns
        .iter()
        .flat_map(|pattern| pattern.minterms())
        .collect()
}

#[test]
fn test_constant_true() {
    let minimizer = Problem::new(2, [0, 1, 2, 3]).unwrap().minimize();
    assert_eq!(minimizer.encoded(), ["--"]);
    assert_eq!(minimizer.rounds().len(), 3);
}

#[test]
fn test_single_minterm() {
    let minimizer = Problem::new(3, [5]).unwrap().minimize();
    assert_eq!(minimizer.rounds().len(), 1);
    assert_eq!(minimizer.prime_implicants().len(), 1);
    assert_eq!(minimizer.encoded(), ["101"]);
    assert_eq!(
        minimizer.solution().steps(),
        [ReductionStep::Essential {
            selected: minimizer.cover().to_vec()
        }]
    );
}

#[test]
fn test_five_variables() {
    let minterms = [
        1, 3, 4, 5, 6, 9, 10, 11, 14, 15, 19, 20, 21, 23, 24, 26, 27, 28,
    ];
    let minimizer = Problem::new(5, minterms).unwrap().minimize();
    let expected: BTreeSet<u32> = minterms.iter().copied().collect();
    assert_eq!(covered(minimizer.patterns()), expected);
    for pattern in minimizer.encoded() {
        assert_eq!(pattern.len(), 5);
        assert!(pattern.chars().all(|ch| matches!(ch, '0' | '1' | '-')));
    }
}

#[test]
fn test_five_variables_needs_five() {
    let minterms = [
        1, 3, 4, 5, 6, 9, 10, 11, 14, 15, 19, 20, 21, 23, 24, 26, 27, 28,
    ];
    assert!(Problem::new(4, minterms).is_err());
}

#[test]
fn test_cyclic_chart() {
    // Every minterm is covered by exactly two primes, and no row or column dominates.
    let minimizer = Problem::new(3, [0, 1, 2, 5, 6, 7]).unwrap().minimize();
    assert_eq!(minimizer.prime_implicants().len(), 6);
    assert!(!minimizer.solution().is_exact());
    assert_eq!(minimizer.encoded(), ["00-", "-10", "1-1"]);
    assert_eq!(
        minimizer.expression_display().to_string(),
        "A'B' + BC' + AC"
    );
}

#[test]
fn test_dominance() {
    let minimizer = Problem::new(4, [4, 8, 10, 11, 12, 15]).unwrap().minimize();
    let expected: BTreeSet<u32> = [4, 8, 10, 11, 12, 15].into_iter().collect();
    assert_eq!(covered(minimizer.patterns()), expected);
    assert!(minimizer.solution().is_exact());
    // 4,12 and 11,15 are essential. Of what's left, 8 and 10 both fit under 8,10.
    assert!(matches!(
        minimizer.solution().steps(),
        [
            ReductionStep::Essential { .. },
            ReductionStep::RowDominance { .. },
            ReductionStep::Essential { .. },
        ]
    ));
    assert_eq!(minimizer.encoded(), ["-100", "1-11", "10-0"]);
}

#[test]
fn test_full_output() {
    let minimizer = Problem::new(3, [1, 3, 6]).unwrap().minimize();
    assert_eq!(
        minimizer.rounds().to_string(),
        "Round 1\n[1]\n  1 ✓\n\n[2]\n  3 ✓\n  6 ✗\n\nRound 2\n[1]\n  1,3 (2) ✗\n"
    );
    let chart = minimizer.chart();
    assert_eq!(
        chart.table_display().with_highlighted(minimizer.cover()).to_string(),
        "     1 3 6\n* P1     X\n* P2 X X\n"
    );
    assert_eq!(minimizer.expression_display().to_string(), "ABC' + A'C");
}
