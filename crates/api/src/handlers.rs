//! Framework-agnostic handler functions.
//!
//! These translate a [`RankingFacade`] call into the response shapes of
//! §6. No HTTP framework is wired to them — wiring a router to call these
//! and serialize the `Ok`/`Err` halves with [`super::response::http_status`]
//! is out of scope for this workspace.

use rankboard_core::Error;
use rankboard_facade::RankingFacade;
use tracing::error;

use crate::response::{BulkUpdateResponse, ErrorResponse, PageResponse, UpdateResponse};

/// Serve one page of the full leaderboard.
pub async fn handle_leaderboard(
    facade: &RankingFacade,
    page: i64,
    limit: i64,
) -> Result<PageResponse, ErrorResponse> {
    facade
        .leaderboard_page(page, limit)
        .await
        .map(PageResponse::from_page)
        .map_err(log_and_convert)
}

/// Serve one page of a username search.
pub async fn handle_search(
    facade: &RankingFacade,
    query: &str,
    page: i64,
    limit: i64,
) -> Result<PageResponse, ErrorResponse> {
    facade
        .search_page(query, page, limit)
        .await
        .map(PageResponse::from_page)
        .map_err(log_and_convert)
}

/// Apply a single-user rating update.
pub async fn handle_set_rating(
    facade: &RankingFacade,
    username: &str,
    new_rating: i32,
) -> Result<UpdateResponse, ErrorResponse> {
    facade
        .set_rating(username, new_rating)
        .await
        .map(|_| UpdateResponse::single_user_updated())
        .map_err(log_and_convert)
}

/// Run a bulk-simulation pass over `k` randomly sampled users.
pub async fn handle_simulate_bulk(
    facade: &RankingFacade,
    k: usize,
) -> Result<BulkUpdateResponse, ErrorResponse> {
    facade
        .simulate_bulk(k)
        .await
        .map(|updated| BulkUpdateResponse {
            success: true,
            updated,
        })
        .map_err(log_and_convert)
}

/// `Internal` errors carry full diagnostic context in the log; the
/// response the caller sees stays a concise, machine-readable string
/// (§7).
fn log_and_convert(err: Error) -> ErrorResponse {
    if matches!(err, Error::Internal(_)) {
        error!(%err, "request failed with an internal error");
    }
    ErrorResponse::from(&err)
}
