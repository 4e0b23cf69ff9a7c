use super::{BiasMode, SplitError};

/// Split a thread count by handing the remainder out in symmetric pairs.
///
/// The variant used by the colour-gradient layout: every batch starts at
/// `floor(total / batches)`, then the evenly-pairable part of the remainder
/// is distributed one thread per side to mirrored batch pairs
/// `(i, batches - 1 - i)`. `EdgesHeavy` serves the outermost pair first,
/// `CenterHeavy` the innermost. An odd remainder leaves one last thread: it
/// goes to the middle batch when `batches` is odd, otherwise to the batch
/// the pairing order would have touched next.
///
/// Distinct from [`split_threads`](super::split_threads): no divisibility
/// factor, and the surplus is mirrored rather than blocked, so the two
/// functions disagree on equal inputs.
pub fn split_paired(total: u32, batches: usize, bias: BiasMode) -> Result<Vec<u32>, SplitError> {
    if batches < 1 {
        return Err(SplitError::InvalidArgument(format!(
            "number of batches must be at least 1, got {batches}"
        )));
    }

    let mut counts = vec![total / batches as u32; batches];
    let remainder = (total % batches as u32) as usize;
    let pairs = remainder / 2;
    let half = batches / 2;

    for k in 0..pairs {
        let left = match bias {
            BiasMode::EdgesHeavy => k,
            BiasMode::CenterHeavy => half - 1 - k,
        };
        counts[left] += 1;
        counts[batches - 1 - left] += 1;
    }

    if remainder % 2 != 0 {
        let index = if batches % 2 != 0 {
            batches / 2
        } else {
            // The left side of the pair the loop above would serve next.
            match bias {
                BiasMode::EdgesHeavy => pairs,
                BiasMode::CenterHeavy => half - 1 - pairs,
            }
        };
        counts[index] += 1;
    }

    Ok(counts)
}
