use tracing::warn;

use super::{BiasMode, SplitError};

/// Split a thread count into balanced batches.
///
/// Takes the total number of threads and splits it into batches under the
/// requested constraints. Applicable e.g. when splitting a warp into several
/// colours or several braids.
///
/// Example problem: a warp of 379 threads is too wide to beam in one go, so
/// it is split into five batches that should be
/// - as equal in size as possible,
/// - wider in the middle than at the edges if they cannot be equal,
/// - divisible by two in as many batches as possible, with the extra threads
///   gathered in one batch.
///
/// ```
/// use loomkit::splitter::{split_threads, BiasMode};
///
/// let batches = split_threads(379, 5, BiasMode::CenterHeavy, 2).unwrap();
/// assert_eq!(batches, vec![76, 76, 77, 76, 74]);
/// ```
///
/// At most one batch can end up breaking the divisibility constraint. When
/// that happens it is the central batch, and a warning is logged; see
/// [`non_conforming`] to detect it programmatically.
pub fn split_threads(
    total: u32,
    batches: usize,
    bias: BiasMode,
    divisor: u32,
) -> Result<Vec<u32>, SplitError> {
    if batches < 1 {
        return Err(SplitError::InvalidArgument(format!(
            "number of batches must be at least 1, got {batches}"
        )));
    }
    if divisor < 1 {
        return Err(SplitError::InvalidArgument(format!(
            "divisibility factor must be at least 1, got {divisor}"
        )));
    }

    // Largest thread count that splits evenly into divisor-sized groups
    // across all batches, spread flat.
    let block = largest_multiple_of_both(total, batches as u32, divisor);
    let mut counts = vec![block / batches as u32; batches];

    // The rest is handed out in divisor-sized blocks, one per batch, plus a
    // final sub-divisor leftover. The remainder is < lcm(batches, divisor),
    // so the block count never reaches the batch count.
    let remainder = total - block;
    let leftover = remainder % divisor;
    let block_batches = ((remainder - leftover) / divisor) as usize;
    let untouched = batches - block_batches;

    match bias {
        BiasMode::CenterHeavy => {
            let start = untouched / 2;
            for count in &mut counts[start..start + block_batches] {
                *count += divisor;
            }
            if leftover > 0 {
                counts[batches / 2] += leftover;
            }
        }
        BiasMode::EdgesHeavy => {
            let head = block_batches / 2;
            for count in &mut counts[..head] {
                *count += divisor;
            }
            for count in &mut counts[head + untouched..] {
                *count += divisor;
            }
            if leftover > 0 {
                counts[batches - 1] += leftover;
            }
        }
    }

    settle_divisibility(&mut counts, divisor);

    if let Some(index) = non_conforming(&counts, divisor) {
        warn!(
            batch = index,
            count = counts[index],
            divisor,
            "one batch breaks the divisibility constraint"
        );
    }

    Ok(counts)
}

/// Index of the batch left off the divisor grid, if any.
///
/// [`split_threads`] guarantees at most one such batch, located centrally.
pub fn non_conforming(counts: &[u32], divisor: u32) -> Option<usize> {
    if divisor <= 1 {
        return None;
    }
    counts.iter().position(|count| count % divisor != 0)
}

/// Trade units across adjacent batches, sweeping inward from both ends,
/// until every batch except possibly the central one is a multiple of
/// `divisor`. The central batch absorbs whatever cannot be resolved.
fn settle_divisibility(counts: &mut [u32], divisor: u32) {
    if divisor <= 1 {
        return;
    }
    let mid = counts.len() / 2;
    for i in 0..mid {
        let excess = counts[i] % divisor;
        counts[i] -= excess;
        counts[i + 1] += excess;
    }
    for i in (mid + 1..counts.len()).rev() {
        let excess = counts[i] % divisor;
        counts[i] -= excess;
        counts[i - 1] += excess;
    }
}

/// Largest integer `n <= limit` divisible by both `a` and `b`.
fn largest_multiple_of_both(limit: u32, a: u32, b: u32) -> u32 {
    // The lcm can exceed u32 for large coprime inputs, so widen first.
    let step = u64::from(a) / u64::from(gcd(a, b)) * u64::from(b);
    if step > u64::from(limit) {
        return 0;
    }
    limit - limit % step as u32
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

#[cfg(test)]
mod helper_tests {
    use super::*;

    #[test]
    fn test_largest_multiple_of_both() {
        assert_eq!(largest_multiple_of_both(379, 5, 2), 370);
        assert_eq!(largest_multiple_of_both(12, 5, 1), 10);
        assert_eq!(largest_multiple_of_both(10, 2, 1), 10);
        assert_eq!(largest_multiple_of_both(0, 4, 3), 0);
        assert_eq!(largest_multiple_of_both(100, 6, 4), 96); // lcm = 12
    }

    #[test]
    fn test_lcm_wider_than_u32() {
        // 70_000 and 70_001 are coprime; their lcm overflows u32.
        assert_eq!(largest_multiple_of_both(379, 70_000, 70_001), 0);
        assert_eq!(largest_multiple_of_both(u32::MAX, 70_000, 70_001), 0);
    }

    #[test]
    fn test_settle_moves_excess_inward() {
        let mut counts = vec![3, 3];
        settle_divisibility(&mut counts, 2);
        assert_eq!(counts, vec![2, 4]);

        let mut counts = vec![5, 7, 5];
        settle_divisibility(&mut counts, 4);
        assert_eq!(counts, vec![4, 9, 4]);
    }
}
