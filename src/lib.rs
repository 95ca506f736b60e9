//! # Fannkuch
//!
//! The fannkuch-redux permutation-flip benchmark kernel.
//!
//! Given `n` in `[3, 16]`, this crate enumerates all `n!` permutations of
//! `{0..n-1}` with the Tompkin-Paige iterative scheme and, for each one,
//! counts the prefix reversals ("flips") needed to bring the value 0 to
//! the front. It reports:
//!
//! - the maximum flip count over all permutations (the Pfannkuchen number),
//! - a checksum summing flip counts with a sign that alternates on every
//!   generated permutation.
//!
//! ## Layout
//!
//! | Module   | Responsibility |
//! |----------|----------------|
//! | `perm`   | 16-lane permutation register, Tompkin-Paige generator |
//! | `flip`   | flip counting: SSSE3 `pshufb` path + scalar fallback |
//! | `kernel` | fused enumerate/count/aggregate loop, batched flips |
//!
//! ## Performance
//!
//! A permutation of up to 16 values fits in one 128-bit register, so a
//! flip is a single byte shuffle against a precomputed reversal mask.
//! Permutations are queued in batches of 60 and flip-counted two at a
//! time so the shuffle chains overlap in the pipeline. All of this is
//! internal: the scalar fallback produces bit-identical results.
//!
//! ## Example
//!
//! ```rust
//! let result = fannkuch::fannkuch(7);
//! assert_eq!(result.checksum, 228);
//! assert_eq!(result.max_flips, 16);
//! ```

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// We use extensive benchmarking to verify #[inline(always)] placement is correct.
#![allow(clippy::inline_always)]

#[macro_use]
mod tracing_helpers;

pub mod flip;
pub mod kernel;
pub mod perm;

// Re-export main types for convenience
pub use kernel::{fannkuch, FannkuchResult, DEFAULT_N, MAX_N, MIN_N};
pub use perm::{Perm16, PermGen, LANES};
pub use tracing_helpers::init_tracing;
