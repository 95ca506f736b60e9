//! Prefix-reversal ("flip") counting.
//!
//! Given a permutation, count how many prefix reversals are needed to bring
//! the value 0 to lane 0: with `k` the value in lane 0, reverse lanes
//! `[0, k]` and repeat until `k == 0`. A reversal never revisits a state,
//! so the loop always terminates; the identity permutation counts 0 flips.
//!
//! # Architecture Support
//!
//! - **`x86_64`** with SSSE3: each reversal is a single `pshufb` against a
//!   precomputed per-`k` mask (runtime detection).
//! - **Other**: falls back to a scalar slice reversal.
//!
//! # Design
//!
//! All 16 reversal masks fit in a const table; a flip never needs more than
//! one shuffle because the whole permutation lives in one 128-bit register
//! (see [`Perm16`]). The paired entry point counts two permutations in the
//! same loop so the two shuffle chains can overlap in the pipeline.

use crate::perm::{Perm16, LANES};

/// Shuffle masks for prefix reversal.
///
/// `FLIP_MASKS[k]` reverses lanes `0..=k` and passes lanes `k+1..16`
/// through: entry `j` holds `k - j` for `j <= k` and `j` otherwise.
const FLIP_MASKS: [[u8; LANES]; LANES] = {
    let mut masks = [[0u8; LANES]; LANES];
    let mut k = 0;
    while k < LANES {
        let mut j = 0;
        while j < LANES {
            masks[k][j] = if j <= k { (k - j) as u8 } else { j as u8 };
            j += 1;
        }
        k += 1;
    }
    masks
};

// ============================================================================
//  Dispatching entry points
// ============================================================================

/// Count the flips needed to sort the tracked value of `perm` to lane 0.
///
/// Uses the SSSE3 shuffle path when available.
#[inline]
#[must_use]
pub fn count_flips(perm: &Perm16) -> u32 {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("ssse3") {
            // SAFETY: We just checked that SSSE3 is available.
            return unsafe { ssse3_impl::count_flips_ssse3(perm) };
        }
        return count_flips_scalar(perm);
    }

    #[cfg(not(target_arch = "x86_64"))]
    {
        count_flips_scalar(perm)
    }
}

/// Count flips for two permutations in one interleaved loop.
///
/// Behaviorally identical to calling [`count_flips`] twice; on the SSSE3
/// path the two shuffle chains are independent and overlap in the pipeline.
#[inline]
#[must_use]
pub fn count_flips_pair(a: &Perm16, b: &Perm16) -> (u32, u32) {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("ssse3") {
            // SAFETY: We just checked that SSSE3 is available.
            return unsafe { ssse3_impl::count_flips_pair_ssse3(a, b) };
        }
        return (count_flips_scalar(a), count_flips_scalar(b));
    }

    #[cfg(not(target_arch = "x86_64"))]
    {
        (count_flips_scalar(a), count_flips_scalar(b))
    }
}

// ============================================================================
//  Scalar Fallback (always available)
// ============================================================================

/// Scalar flip count: explicit slice reversal per flip.
#[inline]
#[allow(dead_code)] // Used on non-x86 and in tests
#[must_use]
pub fn count_flips_scalar(perm: &Perm16) -> u32 {
    let mut lanes = *perm.as_array();
    let mut flips = 0;
    let mut k = lanes[0] as usize;
    while k != 0 {
        lanes[..=k].reverse();
        flips += 1;
        k = lanes[0] as usize;
    }
    flips
}

// ============================================================================
//  SSSE3 Implementation (x86_64, runtime detection)
// ============================================================================

#[cfg(target_arch = "x86_64")]
mod ssse3_impl {
    use std::arch::x86_64::{
        __m128i, _mm_cvtsi128_si32, _mm_load_si128, _mm_loadu_si128, _mm_shuffle_epi8,
    };

    use super::FLIP_MASKS;
    use crate::perm::Perm16;

    /// Load the reversal mask for prefix length `k + 1`.
    ///
    /// # Safety
    /// Caller must ensure `k < 16` and that SSE2 loads are available
    /// (always true on x86_64).
    #[inline(always)]
    unsafe fn flip_mask(k: usize) -> __m128i {
        debug_assert!(k < 16);
        // SAFETY: FLIP_MASKS[k] is 16 readable bytes; unaligned load.
        unsafe { _mm_loadu_si128(FLIP_MASKS[k].as_ptr().cast()) }
    }

    /// Value in lane 0 of `v`.
    #[inline(always)]
    fn first_lane(v: __m128i) -> usize {
        // SAFETY: SSE2 is baseline on x86_64.
        (unsafe { _mm_cvtsi128_si32(v) } & 0xFF) as usize
    }

    /// SSSE3 flip count: one `pshufb` per flip.
    ///
    /// # Safety
    /// Caller must ensure SSSE3 is available (use `is_x86_feature_detected!`).
    #[inline]
    #[target_feature(enable = "ssse3")]
    pub unsafe fn count_flips_ssse3(perm: &Perm16) -> u32 {
        unsafe {
            // SAFETY: Perm16 is 16 bytes with 16-byte alignment.
            let mut v = _mm_load_si128(perm.as_array().as_ptr().cast());
            let mut flips = 0;
            let mut k = first_lane(v);
            while k != 0 {
                v = _mm_shuffle_epi8(v, flip_mask(k));
                k = first_lane(v);
                flips += 1;
            }
            flips
        }
    }

    /// SSSE3 flip count for two permutations, interleaved.
    ///
    /// The joint loop runs while both chains are unfinished, then each
    /// chain drains alone. The two `pshufb` streams have no data
    /// dependency on each other.
    ///
    /// # Safety
    /// Caller must ensure SSSE3 is available (use `is_x86_feature_detected!`).
    #[inline]
    #[target_feature(enable = "ssse3")]
    pub unsafe fn count_flips_pair_ssse3(a: &Perm16, b: &Perm16) -> (u32, u32) {
        unsafe {
            // SAFETY: Perm16 is 16 bytes with 16-byte alignment.
            let mut va = _mm_load_si128(a.as_array().as_ptr().cast());
            let mut vb = _mm_load_si128(b.as_array().as_ptr().cast());
            let (mut fa, mut fb) = (0, 0);
            let mut ka = first_lane(va);
            let mut kb = first_lane(vb);

            while ka != 0 && kb != 0 {
                va = _mm_shuffle_epi8(va, flip_mask(ka));
                vb = _mm_shuffle_epi8(vb, flip_mask(kb));
                ka = first_lane(va);
                kb = first_lane(vb);
                fa += 1;
                fb += 1;
            }
            while ka != 0 {
                va = _mm_shuffle_epi8(va, flip_mask(ka));
                ka = first_lane(va);
                fa += 1;
            }
            while kb != 0 {
                vb = _mm_shuffle_epi8(vb, flip_mask(kb));
                kb = first_lane(vb);
                fb += 1;
            }

            (fa, fb)
        }
    }
}

// ============================================================================
//  Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perm::PermGen;

    fn perm_of(prefix: &[u8]) -> Perm16 {
        let mut lanes = *Perm16::IDENTITY.as_array();
        lanes[..prefix.len()].copy_from_slice(prefix);
        Perm16::from_lanes(lanes)
    }

    #[test]
    fn mask_table_reverses_prefixes() {
        for k in 0..LANES {
            for j in 0..LANES {
                let expected = if j <= k { (k - j) as u8 } else { j as u8 };
                assert_eq!(FLIP_MASKS[k][j], expected, "k={k}, j={j}");
            }
        }
    }

    #[test]
    fn identity_counts_zero() {
        assert_eq!(count_flips_scalar(&Perm16::IDENTITY), 0);
    }

    #[test]
    fn single_swap_counts_one() {
        let p = perm_of(&[1, 0]);
        assert_eq!(count_flips_scalar(&p), 1);
    }

    #[test]
    fn known_small_cases() {
        // (1, 2, 0): flip -> (2, 1, 0) -> (0, 1, 2): 2 flips.
        assert_eq!(count_flips_scalar(&perm_of(&[1, 2, 0])), 2);
        // (2, 1, 0): one full reversal.
        assert_eq!(count_flips_scalar(&perm_of(&[2, 1, 0])), 1);
        // (2, 0, 1): flip -> (1, 0, 2) -> (0, 1, 2): 2 flips.
        assert_eq!(count_flips_scalar(&perm_of(&[2, 0, 1])), 2);
    }

    #[test]
    #[cfg(not(miri))]
    fn dispatch_matches_scalar_exhaustively() {
        // Every permutation of n = 6 through the generator.
        let mut generator = PermGen::new(6);
        loop {
            let perm = *generator.current();
            assert_eq!(count_flips(&perm), count_flips_scalar(&perm));
            if generator.advance().is_none() {
                break;
            }
        }
    }

    #[test]
    #[cfg(not(miri))]
    fn pair_matches_singles() {
        let mut generator = PermGen::new(5);
        let mut previous = *generator.current();
        while let Some((perm, _)) = generator.advance() {
            let perm = *perm;
            let (fa, fb) = count_flips_pair(&previous, &perm);
            assert_eq!(fa, count_flips_scalar(&previous));
            assert_eq!(fb, count_flips_scalar(&perm));
            previous = perm;
        }
    }

    #[test]
    fn worst_case_of_7_needs_16_flips() {
        let mut generator = PermGen::new(7);
        let mut max = 0;
        while let Some((perm, _)) = generator.advance() {
            max = max.max(count_flips_scalar(perm));
        }
        assert_eq!(max, 16);
    }
}
