//! Shapes that flow between the store, the engine, and the facade.

use crate::rating::Rating;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A player record as read from the durable store: a unique identifier, a
/// unique case-preserving username, and one rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Unique store identifier.
    pub id: Uuid,
    /// Case-preserving, unique username.
    pub username: String,
    /// Current rating.
    pub rating: Rating,
}

/// A player enriched with their current global rank, the shape the facade
/// returns for a page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPlayer {
    /// 1-based, tie-aware global rank.
    pub rank: u64,
    /// Case-preserving username.
    pub username: String,
    /// Current rating.
    pub rating: Rating,
}

/// A rating transition: created by the facade when a rating change is
/// requested, consumed by the engine (which mutates the histogram) and by
/// the store (which mutates the persisted rating), discarded after both
/// succeed or after a compensating rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingUpdate {
    /// Store identifier of the affected user.
    pub user_id: Uuid,
    /// Rating before the transition.
    pub old_rating: Rating,
    /// Rating after the transition.
    pub new_rating: Rating,
}

impl RatingUpdate {
    /// Build the inverse transition, used by the facade to compensate a
    /// store write failure by reversing the engine transition it already
    /// applied.
    pub fn reversed(&self) -> RatingUpdate {
        RatingUpdate {
            user_id: self.user_id,
            old_rating: self.new_rating,
            new_rating: self.old_rating,
        }
    }
}
