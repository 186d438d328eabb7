//! The ranking service facade: composes the durable store and the ranking
//! engine into the three request shapes handlers need.

use std::sync::Arc;

use rand::Rng;
use rankboard_core::{Error, PlayerRecord, Rating, RatingUpdate, Result, UserStore, R_MAX, R_MIN};
use rankboard_engine::RankingEngine;
use rankboard_core::limits::{normalize_limit, normalize_page};
use tracing::{debug, error, warn};

use crate::types::{Page, PageKind};

/// Bound on the random rating perturbation applied by
/// [`RankingFacade::simulate_bulk`]. The clamp at the boundaries introduces
/// a mild bias toward the extrema; this is accepted (§4.3).
const SIMULATION_DELTA_BOUND: i32 = 500;

/// Composes [`UserStore`] and [`RankingEngine`] into the request shapes a
/// handler layer needs, enforcing boundary validation and keeping the
/// persisted rating consistent with the in-memory histogram.
///
/// `RankingFacade` is stateless between calls: every method takes what it
/// needs from `self`'s two collaborators and returns. It holds no lock of
/// its own — all locking is internal to [`RankingEngine`].
pub struct RankingFacade {
    engine: Arc<RankingEngine>,
    store: Arc<dyn UserStore>,
}

impl RankingFacade {
    /// Compose a facade from an engine and a store. Does not initialize
    /// the engine — call [`RankingEngine::init_from_store`] separately (or
    /// before constructing the facade) so the one-way startup transition
    /// stays explicit at the call site.
    pub fn new(engine: Arc<RankingEngine>, store: Arc<dyn UserStore>) -> Self {
        RankingFacade { engine, store }
    }

    /// A page of the full, unfiltered leaderboard.
    pub async fn leaderboard_page(&self, page: i64, limit: i64) -> Result<Page> {
        self.page(PageKind::Leaderboard, page, limit).await
    }

    /// A page of usernames matching `query` as a case-insensitive
    /// substring.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadRequest`] if `query` is blank or whitespace-only.
    pub async fn search_page(&self, query: &str, page: i64, limit: i64) -> Result<Page> {
        if query.trim().is_empty() {
            return Err(Error::BadRequest("search query must not be blank".to_string()));
        }
        self.page(PageKind::Search(query), page, limit).await
    }

    /// Fetch, rank, and return one page of players.
    ///
    /// Normalizes `page` (>= 1, default 1) and `limit` (`[1, L_MAX]`,
    /// default `L_DEFAULT`). Fetches `limit + 1` records at offset
    /// `(page - 1) * limit` so the extra record can signal `has_more`
    /// without a second round trip.
    async fn page(&self, kind: PageKind<'_>, page: i64, limit: i64) -> Result<Page> {
        let norm_page = normalize_page(page);
        let norm_limit = normalize_limit(limit);
        let offset = (norm_page as u64 - 1) * norm_limit as u64;
        let fetch_limit = norm_limit + 1;
        debug!(norm_page, norm_limit, "serving a page request");

        let mut records = match kind {
            PageKind::Leaderboard => self.store.top_users(fetch_limit, offset).await,
            PageKind::Search(query) => self.store.search_users(query, fetch_limit, offset).await,
        }
        .map_err(|err| Error::Internal(format!("store read failed: {err}")))?;

        let has_more = records.len() as u32 == fetch_limit;
        records.truncate(norm_limit as usize);

        let data = self.enrich_with_ranks(records)?;

        Ok(Page {
            data,
            page: norm_page,
            limit: norm_limit,
            has_more,
        })
    }

    /// Ask the engine for every rank in one batch call so the whole page
    /// reflects a single consistent histogram snapshot, then zip ranks
    /// back onto records preserving store order.
    fn enrich_with_ranks(
        &self,
        records: Vec<PlayerRecord>,
    ) -> Result<Vec<rankboard_core::RankedPlayer>> {
        let ratings: Vec<Rating> = records.iter().map(|record| record.rating).collect();
        let ranks = self.engine.get_rank_batch(&ratings).map_err(|err| {
            // An OutOfRange here means the store handed back a rating the
            // engine never bootstrapped from — store corruption, not a
            // caller mistake.
            error!(%err, "engine rejected a rating the store returned");
            err.into_external()
        })?;

        Ok(records
            .into_iter()
            .zip(ranks)
            .map(|(record, rank)| rankboard_core::RankedPlayer {
                rank,
                username: record.username,
                rating: record.rating,
            })
            .collect())
    }

    /// Validate and apply a rating change for `username`.
    ///
    /// Sequence: validate `new_rating`, look up the user's current rating,
    /// transition the engine, then persist the new rating. If the store
    /// write fails, the engine transition is reversed and the failure is
    /// surfaced as [`Error::Internal`].
    ///
    /// This sequence is not globally atomic: two concurrent calls for the
    /// same user may interleave. The store's last writer wins; the engine
    /// stays consistent with whatever sequence of transitions it actually
    /// observed (§4.3).
    ///
    /// # Errors
    ///
    /// - [`Error::BadRequest`] if `new_rating` is outside `[R_MIN, R_MAX]`.
    /// - [`Error::NotFound`] if `username` does not exist.
    /// - [`Error::Internal`] if the store write fails after the engine
    ///   transition (the engine is compensated before returning).
    pub async fn set_rating(&self, username: &str, new_rating: i32) -> Result<(Rating, Rating)> {
        let new_rating = Rating::new(new_rating)?;

        let user = self.store.user_by_username(username).await.map_err(|err| match err {
            Error::NotFound(name) => Error::NotFound(name),
            other => Error::Internal(format!("store lookup failed: {other}")),
        })?;
        let old_rating = user.rating;

        self.engine
            .update_rating(old_rating, new_rating)
            .map_err(Error::into_external)?;

        if let Err(store_err) = self.store.update_user_rating(user.id, new_rating).await {
            if let Err(compensation_err) = self.engine.update_rating(new_rating, old_rating) {
                error!(
                    %compensation_err,
                    "compensating engine transition failed after store write failure"
                );
            }
            return Err(Error::Internal(format!(
                "store write failed for {username}: {store_err}"
            )));
        }

        debug!(%username, %old_rating, %new_rating, "rating updated");
        Ok((old_rating, new_rating))
    }

    /// Perturb `k` randomly sampled users' ratings for demonstration and
    /// load testing. Not intended as a production endpoint (§4.3).
    ///
    /// Submits the whole batch to the engine in one lock acquisition, then
    /// writes each persistence update independently; a store write failure
    /// for one user compensates only that user's engine transition and
    /// does not affect the others. Returns the count of durably persisted
    /// updates.
    pub async fn simulate_bulk(&self, k: usize) -> Result<usize> {
        debug!(k, "simulate_bulk starting");
        let sample = self
            .store
            .random_users(k)
            .await
            .map_err(|err| Error::Internal(format!("store sample failed: {err}")))?;

        let updates: Vec<RatingUpdate> = {
            let mut rng = rand::thread_rng();
            sample
                .iter()
                .map(|user| {
                    let delta = rng.gen_range(-SIMULATION_DELTA_BOUND..=SIMULATION_DELTA_BOUND);
                    let perturbed = (user.rating.value() + delta).clamp(R_MIN, R_MAX);
                    RatingUpdate {
                        user_id: user.id,
                        old_rating: user.rating,
                        new_rating: Rating::new(perturbed)
                            .expect("clamp guarantees the result is in range"),
                    }
                })
                .collect()
        };

        let report = self.engine.batch_update_ratings(&updates)?;
        if !report.failed.is_empty() {
            warn!(
                skipped = report.failed.len(),
                "simulate_bulk: engine skipped some updates"
            );
        }

        let mut persisted = 0usize;
        for update in &report.applied {
            match self
                .store
                .update_user_rating(update.user_id, update.new_rating)
                .await
            {
                Ok(()) => persisted += 1,
                Err(store_err) => {
                    warn!(%store_err, user_id = %update.user_id, "simulate_bulk: compensating one user after store failure");
                    if let Err(compensation_err) =
                        self.engine.update_rating(update.new_rating, update.old_rating)
                    {
                        error!(%compensation_err, "simulate_bulk compensation failed");
                    }
                }
            }
        }
        Ok(persisted)
    }
}
