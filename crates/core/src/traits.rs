//! The durable store contract consumed by the ranking engine and the
//! facade (§6).
//!
//! This trait is the seam between the in-process ranking core and
//! whatever persists users outside it. Its SQL schema, network transport,
//! and seeding are out of scope for this workspace; only the shape of the
//! calls the core makes is specified here.
//!
//! Implementations must be safe to call concurrently from multiple tasks
//! (`Send + Sync`); the engine never holds its own lock while awaiting a
//! call on this trait.

use crate::error::Result;
use crate::rating::Rating;
use crate::types::PlayerRecord;
use async_trait::async_trait;

/// The durable user store as observed by the ranking core.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Top `limit` users starting at `offset`, ordered by rating
    /// descending then username ascending.
    async fn top_users(&self, limit: u32, offset: u64) -> Result<Vec<PlayerRecord>>;

    /// Case-insensitive substring match on username, same ordering as
    /// [`UserStore::top_users`].
    async fn search_users(
        &self,
        pattern: &str,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<PlayerRecord>>;

    /// Case-insensitive exact match on username.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if no user has this username.
    async fn user_by_username(&self, name: &str) -> Result<PlayerRecord>;

    /// Idempotent write of a user's rating.
    async fn update_user_rating(&self, id: uuid::Uuid, new_rating: Rating) -> Result<()>;

    /// The `{rating: count}` aggregate used once at engine startup to
    /// bootstrap the histogram.
    async fn all_rating_counts(&self) -> Result<Vec<(Rating, u64)>>;

    /// An unordered sample of `k` users, used by bulk-simulation callers.
    async fn random_users(&self, k: usize) -> Result<Vec<PlayerRecord>>;
}
