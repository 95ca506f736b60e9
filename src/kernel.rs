//! The fused enumerate/flip/aggregate loop.
//!
//! [`fannkuch`] drives the Tompkin-Paige generator over all `n!`
//! permutations, counts flips for each, and folds the results into two
//! accumulators:
//!
//! - `max_flips`: the largest flip count seen (the Pfannkuchen number),
//! - `checksum`: the flip counts summed with alternating sign, subtracting
//!   when the generation-parity flag is set.
//!
//! # Fast paths
//!
//! Two permutation shapes are settled without entering the flip loop,
//! matching the reference kernel:
//!
//! - lane 0 already holds 0: zero flips, contributes nothing;
//! - the lane indexed by lane 0's value holds 0: exactly one flip (the
//!   single reversal lands 0 in lane 0), so the checksum takes `+/-1`
//!   directly and `max_flips` is seeded to 1 on first sight.
//!
//! Everything else is queued and flip-counted in batches of up to 60,
//! two at a time on the SIMD path so the shuffle chains pipeline.

use crate::flip;
use crate::perm::{Perm16, PermGen};

/// Smallest accepted problem size.
pub const MIN_N: usize = 3;

/// Largest accepted problem size (one permutation per 128-bit register).
pub const MAX_N: usize = 16;

/// Problem size used when the CLI is given no argument.
pub const DEFAULT_N: usize = 12;

/// Queue depth for batched flip counting.
const BATCH: usize = 60;

// =============================================================================
// FannkuchResult
// =============================================================================

/// Aggregated outcome of one full enumeration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FannkuchResult {
    /// Parity-signed sum of flip counts over all permutations.
    pub checksum: i64,
    /// Maximum flip count over all permutations (the Pfannkuchen number).
    pub max_flips: u32,
}

/// A permutation waiting for a batched flip count.
#[derive(Clone, Copy)]
struct Pending {
    perm: Perm16,
    /// Subtract this permutation's flip count from the checksum.
    negate: bool,
}

// =============================================================================
// Entry point
// =============================================================================

/// Enumerate all permutations of `{0..n-1}` and aggregate flip counts.
///
/// Pure function of `n`: no global state, constant memory regardless of
/// `n!`. The identity permutation is the enumeration's starting point and
/// contributes nothing (its flip count is 0).
///
/// # Panics
/// Panics if `n` is outside `[3, 16]`. The CLI validates before calling.
#[must_use]
pub fn fannkuch(n: usize) -> FannkuchResult {
    assert!(
        (MIN_N..=MAX_N).contains(&n),
        "n ({n}) must be within [{MIN_N}, {MAX_N}]"
    );

    let mut generator = PermGen::new(n);
    let mut checksum: i64 = 0;
    let mut max_flips: u32 = 0;
    let mut queue: Vec<Pending> = Vec::with_capacity(BATCH);

    while let Some((perm, odd)) = generator.advance() {
        let first = perm.first();
        if first == 0 {
            // Already sorted at lane 0: zero flips.
            continue;
        }
        if perm.lane(first as usize) == 0 {
            // One reversal brings 0 to lane 0.
            if max_flips == 0 {
                max_flips = 1;
            }
            checksum += if odd { -1 } else { 1 };
            continue;
        }

        queue.push(Pending { perm: *perm, negate: odd });
        if queue.len() == BATCH {
            drain(&mut queue, &mut checksum, &mut max_flips);
        }
    }
    drain(&mut queue, &mut checksum, &mut max_flips);

    debug_log!(n, checksum, max_flips, "fannkuch enumeration complete");

    FannkuchResult { checksum, max_flips }
}

/// Flip-count every queued permutation and fold into the accumulators.
///
/// Pairs are counted through the interleaved entry point; a trailing odd
/// entry is counted alone.
fn drain(queue: &mut Vec<Pending>, checksum: &mut i64, max_flips: &mut u32) {
    let mut chunks = queue.chunks_exact(2);
    for pair in chunks.by_ref() {
        let (fa, fb) = flip::count_flips_pair(&pair[0].perm, &pair[1].perm);
        fold(pair[0].negate, fa, checksum, max_flips);
        fold(pair[1].negate, fb, checksum, max_flips);
    }
    if let [last] = chunks.remainder() {
        let f = flip::count_flips(&last.perm);
        fold(last.negate, f, checksum, max_flips);
    }
    queue.clear();
}

#[inline(always)]
fn fold(negate: bool, flips: u32, checksum: &mut i64, max_flips: &mut u32) {
    if flips > *max_flips {
        *max_flips = flips;
    }
    *checksum += if negate {
        -i64::from(flips)
    } else {
        i64::from(flips)
    };
}

// =============================================================================
// Tests
// =============================================================================
