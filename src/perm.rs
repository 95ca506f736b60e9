//! Permutation register and Tompkin-Paige generator.
//!
//! A permutation of `{0..n-1}` is stored in a fixed 16-lane byte array,
//! [`Perm16`]. Lanes `0..n` carry the permutation; lanes `n..16` stay at
//! their identity values so the whole register can be shuffled as one
//! 128-bit value by the SIMD flip path without disturbing live lanes.
//!
//! [`PermGen`] enumerates every permutation of `{0..n-1}` exactly once
//! using the Tompkin-Paige iterative scheme: each successor is produced by
//! left-rotating a prefix of the current permutation, driven by a per-index
//! count array. No recursion, no materialized permutation list; memory is
//! constant regardless of `n!`.
//!
//! # Generation order
//!
//! The order is the classical rotation order (not lexicographic). The
//! identity is the generator's *initial* state and is never yielded; the
//! generator produces exactly `n! - 1` successors.

/// Number of lanes in the fixed-width permutation register.
pub const LANES: usize = 16;

// =============================================================================
// Perm16
// =============================================================================

/// A permutation of `{0..n-1}` padded to 16 lanes.
///
/// # Invariants
///
/// - Lanes `0..n` hold each value in `0..n` exactly once.
/// - Lanes `n..16` hold their own index (identity), so a 16-lane prefix
///   shuffle that only permutes lanes `0..n` leaves them untouched.
///
/// # Memory
///
/// - Size: 16 bytes
/// - Alignment: 16 bytes (one SSE register)
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(C, align(16))]
pub struct Perm16 {
    lanes: [u8; LANES],
}

impl Perm16 {
    /// The identity permutation: lane `i` holds `i`.
    pub const IDENTITY: Self = {
        let mut lanes = [0u8; LANES];
        let mut i = 0;
        while i < LANES {
            lanes[i] = i as u8;
            i += 1;
        }
        Self { lanes }
    };

    /// Build a register from raw lanes.
    ///
    /// The caller is responsible for the type's invariants: lanes `0..n`
    /// a valid permutation, lanes `n..16` at identity.
    #[inline]
    #[must_use]
    pub const fn from_lanes(lanes: [u8; LANES]) -> Self {
        Self { lanes }
    }

    /// Value in lane 0.
    ///
    /// This is the value the flip loop tracks: flipping is done when it
    /// reaches 0.
    #[inline(always)]
    #[must_use]
    pub const fn first(&self) -> u8 {
        self.lanes[0]
    }

    /// Value in lane `i`.
    ///
    /// # Panics
    /// Panics in debug mode if `i >= 16`.
    #[inline(always)]
    #[must_use]
    pub const fn lane(&self, i: usize) -> u8 {
        debug_assert!(i < LANES, "lane: index out of bounds");
        self.lanes[i]
    }

    /// Borrow the raw lane array.
    #[inline(always)]
    #[must_use]
    pub const fn as_array(&self) -> &[u8; LANES] {
        &self.lanes
    }

    /// Left-rotate lanes `[0, i]` by one: lane 0 moves to lane `i`, lanes
    /// `1..=i` shift down. `rotate_prefix(0)` is a no-op.
    #[inline(always)]
    pub fn rotate_prefix(&mut self, i: usize) {
        self.lanes[..=i].rotate_left(1);
    }
}

impl Default for Perm16 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// =============================================================================
// PermGen
// =============================================================================

/// Iterative Tompkin-Paige permutation generator.
///
/// Holds the current permutation, the control count array, the scan index,
/// and the generation-parity flag. [`PermGen::advance`] steps to the next
/// permutation in place and reports it together with its parity.
///
/// # Invariants
///
/// - `count[i] <= i` for all `i < n`.
/// - The permutation register is always a valid permutation of `0..n`
///   (padded with identity lanes above `n`).
#[derive(Clone, Debug)]
pub struct PermGen {
    perm: Perm16,
    count: [u8; LANES],
    n: usize,
    /// Scan index into the count array; persists across steps.
    scan: usize,
    odd: bool,
}

impl PermGen {
    /// Create a generator positioned at the identity permutation of
    /// `{0..n-1}`.
    ///
    /// # Panics
    /// Panics in debug mode if `n` is 0 or exceeds [`LANES`].
    #[must_use]
    pub fn new(n: usize) -> Self {
        debug_assert!(n > 0 && n <= LANES, "new: n ({n}) out of range");
        Self {
            perm: Perm16::IDENTITY,
            count: [0; LANES],
            n,
            scan: 0,
            odd: false,
        }
    }

    /// The current permutation (the identity before the first `advance`).
    #[inline]
    #[must_use]
    pub const fn current(&self) -> &Perm16 {
        &self.perm
    }

    /// Step to the next permutation.
    ///
    /// Returns the new permutation and its parity flag, or `None` once all
    /// `n!` permutations (identity included) have been visited. Parity
    /// toggles on every yield; the first yielded permutation has
    /// `odd == true`, meaning its flip count is *subtracted* from the
    /// checksum.
    #[inline]
    pub fn advance(&mut self) -> Option<(&Perm16, bool)> {
        while self.scan < self.n {
            self.perm.rotate_prefix(self.scan);
            let i = self.scan;
            if self.count[i] >= i as u8 {
                // Counter saturated: reset it and carry into the next index.
                self.count[i] = 0;
                self.scan += 1;
                continue;
            }
            self.count[i] += 1;
            self.scan = 1;
            self.odd = !self.odd;
            return Some((&self.perm, self.odd));
        }
        None
    }
}

// =============================================================================
// Tests
// =============================================================================
