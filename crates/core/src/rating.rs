//! The `Rating` newtype and its bounds.
//!
//! A rating is an integer in the closed interval `[R_MIN, R_MAX]`. These
//! bounds are invariants of the system: any rating outside them is
//! rejected at the boundary and never reaches the histogram.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound of a valid rating, inclusive.
pub const R_MIN: i32 = 100;

/// Upper bound of a valid rating, inclusive.
pub const R_MAX: i32 = 5000;

/// A validated rating, guaranteed on construction to lie in `[R_MIN, R_MAX]`.
///
/// There is no way to obtain a `Rating` holding an out-of-range value; every
/// constructor runs through [`Rating::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(i32);

impl Rating {
    /// Validate and wrap a raw integer rating.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadRequest`] if `value` is outside `[R_MIN, R_MAX]`.
    pub fn new(value: i32) -> Result<Self> {
        if !(R_MIN..=R_MAX).contains(&value) {
            return Err(Error::BadRequest(format!(
                "rating {value} must be between {R_MIN} and {R_MAX}"
            )));
        }
        Ok(Rating(value))
    }

    /// The raw integer value.
    pub fn value(self) -> i32 {
        self.0
    }

    /// Zero-based offset into a dense histogram of width
    /// `R_MAX - R_MIN + 1`.
    pub fn offset(self) -> usize {
        (self.0 - R_MIN) as usize
    }

    /// Reconstruct a `Rating` from a dense histogram offset.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is outside `[0, R_MAX - R_MIN]`. This is an
    /// internal helper used only with offsets the histogram itself produced.
    pub fn from_offset(offset: usize) -> Self {
        let value = R_MIN + offset as i32;
        debug_assert!((R_MIN..=R_MAX).contains(&value));
        Rating(value)
    }

    /// Number of distinct rating values in the valid range.
    pub const fn span() -> usize {
        (R_MAX - R_MIN + 1) as usize
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for Rating {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        Rating::new(value)
    }
}
