//! A dense rating histogram with tie-aware ranking.
//!
//! `Histogram` is pure data: a fixed-width array indexed by rating value,
//! holding the current count of users at each rating. It performs no
//! synchronization of its own — callers (the ranking engine) are expected
//! to serialize access.

#![warn(missing_docs)]
#![warn(clippy::all)]

use rankboard_core::{Error, Rating, Result};

/// Dense, fixed-width histogram over `[R_MIN, R_MAX]`.
///
/// Occupies `Rating::span()` `i64` cells regardless of how many users are
/// recorded — about 40 KB for the rankboard rating range.
#[derive(Debug, Clone)]
pub struct Histogram {
    counts: Vec<i64>,
}

/// Aggregate statistics over a histogram: total user count, number of
/// distinct ratings in use, and the lowest/highest rating with a non-zero
/// count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Total number of users recorded (`Σ H[r]`).
    pub total: i64,
    /// Count of ratings `r` with `H[r] > 0`.
    pub distinct: u32,
    /// Lowest rating with a non-zero count, or 0 if `total == 0`.
    pub r_lo: i32,
    /// Highest rating with a non-zero count, or 0 if `total == 0`.
    pub r_hi: i32,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    /// Create an empty histogram: every bucket starts at zero.
    pub fn new() -> Self {
        Histogram {
            counts: vec![0; Rating::span()],
        }
    }

    /// Current count of users at exactly `rating`.
    pub fn count_at(&self, rating: Rating) -> i64 {
        self.counts[rating.offset()]
    }

    /// Apply `delta` to the bucket for `rating`.
    ///
    /// `delta` may be positive or negative (and larger than one in
    /// magnitude, for batch-style corrections); a single-user rating
    /// change is always `±1`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Underflow`] if the resulting count would be
    /// negative. The histogram is left unchanged on error.
    pub fn bump(&mut self, rating: Rating, delta: i64) -> Result<()> {
        let slot = &mut self.counts[rating.offset()];
        let next = *slot + delta;
        if next < 0 {
            return Err(Error::Underflow {
                rating: rating.value(),
            });
        }
        *slot = next;
        Ok(())
    }

    /// Tie-aware global rank of `rating`: `1 + Σ H[r']` for every `r' >
    /// rating`. Walks the tail of the array once; since `R_MAX - R_MIN` is
    /// bounded and small, this is effectively O(1) in the number of users.
    pub fn rank_of(&self, rating: Rating) -> u64 {
        let tail_sum: i64 = self.counts[rating.offset() + 1..].iter().sum();
        1 + tail_sum as u64
    }

    /// Tie-aware ranks for a batch of ratings, computed from a single
    /// suffix-sum snapshot so the total cost is one tail scan regardless of
    /// how many ratings are requested, and so that all returned ranks are
    /// mutually consistent with the same histogram state.
    pub fn rank_batch(&self, ratings: &[Rating]) -> Vec<u64> {
        let suffix = self.suffix_sums();
        ratings
            .iter()
            .map(|r| 1 + suffix[r.offset() + 1])
            .collect()
    }

    /// Precompute `S` where `S[i] = Σ_{j >= i} counts[j]`, with an extra
    /// trailing `0` sentinel at `S[span]` so `rank_of(r) == S[offset(r) + 1]
    /// + 1` holds uniformly, including for `r == R_MAX`.
    fn suffix_sums(&self) -> Vec<i64> {
        let mut suffix = vec![0i64; self.counts.len() + 1];
        for i in (0..self.counts.len()).rev() {
            suffix[i] = suffix[i + 1] + self.counts[i];
        }
        suffix
    }

    /// Aggregate statistics: total count, distinct rating count, and the
    /// lowest/highest rating in use.
    pub fn stats(&self) -> Stats {
        let mut total = 0i64;
        let mut distinct = 0u32;
        let mut r_lo = None;
        let mut r_hi = None;
        for (offset, &count) in self.counts.iter().enumerate() {
            if count > 0 {
                total += count;
                distinct += 1;
                let rating = Rating::from_offset(offset).value();
                r_lo.get_or_insert(rating);
                r_hi = Some(rating);
            }
        }
        Stats {
            total,
            distinct,
            r_lo: r_lo.unwrap_or(0),
            r_hi: r_hi.unwrap_or(0),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use rankboard_core::R_MIN;

    fn rating_strategy() -> impl Strategy<Value = Rating> {
        (rankboard_core::R_MIN..=rankboard_core::R_MAX).prop_map(|v| Rating::new(v).unwrap())
    }

    proptest! {
        /// ∀ r: H[r] >= 0 after any sequence of valid bumps.
        #[test]
        fn counts_never_go_negative(ops in prop::collection::vec((rating_strategy(), -5i64..=5i64), 0..200)) {
            let mut h = Histogram::new();
            for (rating, delta) in ops {
                let before = h.count_at(rating);
                if h.bump(rating, delta).is_ok() {
                    prop_assert!(h.count_at(rating) >= 0);
                } else {
                    prop_assert_eq!(h.count_at(rating), before);
                }
            }
        }

        /// rank_of(r) always equals 1 + the tail sum, by construction; this
        /// checks the suffix-sum batch path agrees with the definition for
        /// arbitrary histogram contents.
        #[test]
        fn rank_batch_agrees_with_definition(
            counts in prop::collection::vec(0i64..5, Rating::span())
        ) {
            let mut h = Histogram::new();
            for (offset, count) in counts.iter().enumerate() {
                h.bump(Rating::from_offset(offset), *count).unwrap();
            }
            let sample: Vec<Rating> = (0..Rating::span())
                .step_by(137)
                .map(Rating::from_offset)
                .collect();
            let batch = h.rank_batch(&sample);
            for (rating, rank) in sample.iter().zip(batch.iter()) {
                prop_assert_eq!(*rank, h.rank_of(*rating));
            }
        }

        /// Σ H[r] as reported by stats() matches a direct recomputation.
        #[test]
        fn stats_total_matches_sum_of_counts(
            counts in prop::collection::vec(0i64..3, Rating::span())
        ) {
            let mut h = Histogram::new();
            for (offset, count) in counts.iter().enumerate() {
                h.bump(Rating::from_offset(offset), *count).unwrap();
            }
            let expected: i64 = counts.iter().sum();
            prop_assert_eq!(h.stats().total, expected);
        }

        /// Idempotence of no-op update: bumping a rating by +1 then -1
        /// leaves the histogram unchanged.
        #[test]
        fn no_op_round_trip_restores_count(rating in rating_strategy()) {
            let mut h = Histogram::new();
            h.bump(rating, 3).unwrap();
            let before = h.count_at(rating);
            h.bump(rating, 1).unwrap();
            h.bump(rating, -1).unwrap();
            prop_assert_eq!(h.count_at(rating), before);
        }

        /// Round-trip: bump(a, +1); bump(a, -1) leaves every bucket as it
        /// was (modeling update_rating(a, b) followed by update_rating(b, a)
        /// one bump at a time).
        #[test]
        fn update_then_reverse_update_restores_histogram(
            a in rating_strategy(), b in rating_strategy()
        ) {
            prop_assume!(a != b);
            let mut h = Histogram::new();
            h.bump(a, 1).unwrap();
            let before = h.clone();

            h.bump(a, -1).unwrap();
            h.bump(b, 1).unwrap();

            h.bump(b, -1).unwrap();
            h.bump(a, 1).unwrap();

            prop_assert_eq!(h.count_at(Rating::new(R_MIN).unwrap()), before.count_at(Rating::new(R_MIN).unwrap()));
            for offset in 0..Rating::span() {
                let r = Rating::from_offset(offset);
                prop_assert_eq!(h.count_at(r), before.count_at(r));
            }
        }
    }
}
