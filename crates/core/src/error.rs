//! Error types for the rankboard ranking engine
//!
//! This module defines the unified error taxonomy used throughout the
//! workspace. We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! ## Error Categories
//!
//! - **BadRequest**: caller-supplied parameter violates a boundary rule
//! - **NotFound**: requested username is not present in the store
//! - **OutOfRange / Underflow**: engine-level invariant violations; never
//!   caused by a well-behaved caller
//! - **NotReady**: the engine has not finished its startup scan
//! - **Internal**: store failure, compensation required, or an engine
//!   invariant violation observed by the facade
//!
//! `OutOfRange` and `Underflow` are reported verbatim to direct engine
//! callers (tests, the demo binary) but are never surfaced past the facade
//! — FAC maps them to `Internal` since they indicate store corruption
//! rather than a caller mistake.

use thiserror::Error;

/// Result type alias for rankboard operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the rankboard ranking engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Caller-supplied parameter violates a boundary rule.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Requested username is not present in the store.
    #[error("not found: {0}")]
    NotFound(String),

    /// A rating fell outside `[R_MIN, R_MAX]` at a layer that should never
    /// see one (the engine itself, not the boundary validators).
    #[error("rating {rating} out of range [{min}, {max}]")]
    OutOfRange {
        /// The offending rating.
        rating: i32,
        /// Lower bound of the valid range.
        min: i32,
        /// Upper bound of the valid range.
        max: i32,
    },

    /// A histogram bump would have driven a bucket count negative.
    #[error("histogram underflow at rating {rating}: no user recorded there")]
    Underflow {
        /// The rating whose bucket would have gone negative.
        rating: i32,
    },

    /// The engine has not finished its startup scan of the store.
    #[error("ranking engine is not ready")]
    NotReady,

    /// Store failure, compensation required, or an internal invariant
    /// violation surfaced as a generic error to external callers.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// `true` for the two invariant-violation variants that should never
    /// originate from a well-behaved caller.
    pub fn is_engine_invariant_violation(&self) -> bool {
        matches!(self, Error::OutOfRange { .. } | Error::Underflow { .. })
    }

    /// Collapse an engine-level error into the `Internal` variant a
    /// well-behaved external caller should see, per §7's propagation
    /// policy. Caller-facing errors (`BadRequest`, `NotFound`) pass
    /// through unchanged.
    pub fn into_external(self) -> Error {
        match self {
            Error::OutOfRange { .. } | Error::Underflow { .. } | Error::NotReady => {
                Error::Internal(self.to_string())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_displays_message() {
        let err = Error::BadRequest("search query is blank".to_string());
        assert_eq!(err.to_string(), "bad request: search query is blank");
    }

    #[test]
    fn not_found_displays_username() {
        let err = Error::NotFound("nobody".to_string());
        assert_eq!(err.to_string(), "not found: nobody");
    }

    #[test]
    fn out_of_range_is_engine_invariant_violation() {
        let err = Error::OutOfRange {
            rating: 50,
            min: 100,
            max: 5000,
        };
        assert!(err.is_engine_invariant_violation());
    }

    #[test]
    fn underflow_is_engine_invariant_violation() {
        let err = Error::Underflow { rating: 1500 };
        assert!(err.is_engine_invariant_violation());
    }

    #[test]
    fn bad_request_is_not_engine_invariant_violation() {
        let err = Error::BadRequest("blank query".to_string());
        assert!(!err.is_engine_invariant_violation());
    }

    #[test]
    fn into_external_collapses_out_of_range_to_internal() {
        let err = Error::OutOfRange {
            rating: 50,
            min: 100,
            max: 5000,
        };
        assert!(matches!(err.into_external(), Error::Internal(_)));
    }

    #[test]
    fn into_external_collapses_not_ready_to_internal() {
        assert!(matches!(Error::NotReady.into_external(), Error::Internal(_)));
    }

    #[test]
    fn into_external_passes_bad_request_through() {
        let err = Error::BadRequest("blank".to_string());
        assert_eq!(err.clone().into_external(), err);
    }

    #[test]
    fn into_external_passes_not_found_through() {
        let err = Error::NotFound("nobody".to_string());
        assert_eq!(err.clone().into_external(), err);
    }
}
