use super::*;

#[test]
fn test_documented_warp_example() {
    // 379 threads over five batches, wider in the middle, pairs of two; the
    // single stray thread lands in the central batch.
    let batches = split_threads(379, 5, BiasMode::CenterHeavy, 2).unwrap();
    assert_eq!(batches, vec![76, 76, 77, 76, 74]);
}

#[test]
fn test_even_split_is_flat() {
    assert_eq!(
        split_threads(10, 5, BiasMode::CenterHeavy, 1).unwrap(),
        vec![2, 2, 2, 2, 2]
    );
    assert_eq!(
        split_threads(10, 2, BiasMode::EdgesHeavy, 1).unwrap(),
        vec![5, 5]
    );
}

#[test]
fn test_zero_threads() {
    assert_eq!(
        split_threads(0, 4, BiasMode::CenterHeavy, 1).unwrap(),
        vec![0, 0, 0, 0]
    );
}

#[test]
fn test_center_bias_places_surplus_centrally() {
    // The centred run of remainder blocks starts one batch left of center.
    assert_eq!(
        split_threads(12, 5, BiasMode::CenterHeavy, 1).unwrap(),
        vec![2, 3, 3, 2, 2]
    );
}

#[test]
fn test_edge_bias_places_surplus_at_the_ends() {
    assert_eq!(
        split_threads(12, 5, BiasMode::EdgesHeavy, 1).unwrap(),
        vec![3, 2, 2, 2, 3]
    );
}

#[test]
fn test_invalid_arguments() {
    assert!(matches!(
        split_threads(10, 0, BiasMode::CenterHeavy, 1),
        Err(SplitError::InvalidArgument(_))
    ));
    assert!(matches!(
        split_threads(10, 2, BiasMode::CenterHeavy, 0),
        Err(SplitError::InvalidArgument(_))
    ));
    assert!(matches!(
        split_paired(10, 0, BiasMode::CenterHeavy),
        Err(SplitError::InvalidArgument(_))
    ));
}

#[test]
fn test_sum_and_length_hold_across_inputs() {
    for total in 0..200u32 {
        for batches in 1..9usize {
            for divisor in 1..6u32 {
                for bias in [BiasMode::EdgesHeavy, BiasMode::CenterHeavy] {
                    let counts = split_threads(total, batches, bias, divisor).unwrap();
                    assert_eq!(counts.len(), batches);
                    assert_eq!(
                        counts.iter().sum::<u32>(),
                        total,
                        "sum broken for total={total} batches={batches} divisor={divisor} {bias:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_at_most_one_batch_breaks_divisibility() {
    for total in 0..200u32 {
        for batches in 1..9usize {
            for divisor in 2..6u32 {
                for bias in [BiasMode::EdgesHeavy, BiasMode::CenterHeavy] {
                    let counts = split_threads(total, batches, bias, divisor).unwrap();
                    let broken = counts.iter().filter(|c| *c % divisor != 0).count();
                    assert!(
                        broken <= 1,
                        "{broken} batches broken for total={total} batches={batches} divisor={divisor} {bias:?}: {counts:?}"
                    );
                    if let Some(index) = non_conforming(&counts, divisor) {
                        // The non-conforming batch sits at the absorber slot.
                        assert_eq!(index, batches / 2);
                    }
                }
            }
        }
    }
}

#[test]
fn test_no_batch_breaks_when_total_is_divisible() {
    // 96 = 2 * 48 splits into two even batches even though 96 / 2 = 48 would
    // already conform; the interesting case is 6 / 2 where the flat split
    // [3, 3] has to be settled into [2, 4].
    let counts = split_threads(6, 2, BiasMode::CenterHeavy, 2).unwrap();
    assert_eq!(counts, vec![2, 4]);
    assert_eq!(non_conforming(&counts, 2), None);
}

#[test]
fn test_pathological_divisor_piles_on_the_center() {
    let counts = split_threads(5, 3, BiasMode::CenterHeavy, 7).unwrap();
    assert_eq!(counts.iter().sum::<u32>(), 5);
    assert_eq!(non_conforming(&counts, 7), Some(1));
}

#[test]
fn test_huge_coprime_batches_and_divisor() {
    // lcm(70_000, 70_001) does not fit in u32; everything piles on the
    // central batch instead of panicking.
    let counts = split_threads(379, 70_000, BiasMode::CenterHeavy, 70_001).unwrap();
    assert_eq!(counts.len(), 70_000);
    assert_eq!(counts.iter().sum::<u32>(), 379);
    assert_eq!(non_conforming(&counts, 70_001), Some(35_000));
}

#[test]
fn test_paired_even_remainder_mirrors() {
    // 1532 threads over five colours: remainder 2, one thread per edge.
    assert_eq!(
        split_paired(1532, 5, BiasMode::EdgesHeavy).unwrap(),
        vec![307, 306, 306, 306, 307]
    );
    assert_eq!(
        split_paired(1532, 5, BiasMode::CenterHeavy).unwrap(),
        vec![306, 307, 306, 307, 306]
    );
}

#[test]
fn test_paired_odd_remainder_middle_batch() {
    // Remainder 3: one mirrored pair plus a single thread in the middle.
    assert_eq!(
        split_paired(13, 5, BiasMode::EdgesHeavy).unwrap(),
        vec![3, 2, 3, 2, 3]
    );
}

#[test]
fn test_paired_odd_remainder_even_batches() {
    // Remainder 3 over four batches: the last single thread goes to the
    // batch the pairing order reaches next.
    assert_eq!(
        split_paired(11, 4, BiasMode::EdgesHeavy).unwrap(),
        vec![3, 3, 2, 3]
    );
    assert_eq!(
        split_paired(11, 4, BiasMode::CenterHeavy).unwrap(),
        vec![3, 3, 3, 2]
    );
}

#[test]
fn test_paired_sum_and_length_hold() {
    for total in 0..200u32 {
        for batches in 1..9usize {
            for bias in [BiasMode::EdgesHeavy, BiasMode::CenterHeavy] {
                let counts = split_paired(total, batches, bias).unwrap();
                assert_eq!(counts.len(), batches);
                assert_eq!(counts.iter().sum::<u32>(), total);
            }
        }
    }
}

#[test]
fn test_variants_disagree_on_equal_inputs() {
    let blocked = split_threads(13, 5, BiasMode::EdgesHeavy, 1).unwrap();
    let paired = split_paired(13, 5, BiasMode::EdgesHeavy).unwrap();
    assert_ne!(blocked, paired);
}
