//! Request-layer response shapes (§6), bit-exact for response
//! compatibility with whatever HTTP framework eventually wires these in.

use rankboard_core::{Error, RankedPlayer};
use serde::Serialize;

/// `{success: true, data: [...], count, page, limit, hasMore}` — the
/// paginated read response for both the leaderboard and search endpoints.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageResponse {
    /// Always `true`; present so the shape matches [`ErrorResponse`]'s
    /// `success: false` sibling on the wire.
    pub success: bool,
    /// The ranked players on this page.
    pub data: Vec<RankedPlayer>,
    /// `data.len()`.
    pub count: usize,
    /// The page number actually served.
    pub page: u32,
    /// The page size actually served.
    pub limit: u32,
    /// `true` if another page follows this one.
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

impl PageResponse {
    /// Build from a facade [`rankboard_facade::Page`].
    pub fn from_page(page: rankboard_facade::Page) -> Self {
        PageResponse {
            success: true,
            count: page.data.len(),
            data: page.data,
            page: page.page,
            limit: page.limit,
            has_more: page.has_more,
        }
    }
}

/// `{success: true, message: string, updated: 1}` — response to a
/// single-user rating update.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UpdateResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable confirmation, e.g. `"rating updated"`.
    pub message: String,
    /// Always `1`: exactly one user was updated.
    pub updated: u32,
}

impl UpdateResponse {
    /// Build the canonical success response for a single-user update.
    pub fn single_user_updated() -> Self {
        UpdateResponse {
            success: true,
            message: "rating updated".to_string(),
            updated: 1,
        }
    }
}

/// Response to a bulk-simulation request. Not part of the original §6
/// contract (bulk simulation has no externally-specified response shape)
/// but follows the same `success`/`updated` vocabulary as
/// [`UpdateResponse`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BulkUpdateResponse {
    /// Always `true`.
    pub success: bool,
    /// Count of users whose rating change was durably persisted.
    pub updated: usize,
}

/// `{success: false, error: <string>}` — the uniform error response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// A concise, machine-readable error string. No stack traces; full
    /// diagnostic context belongs in the logs, not the response.
    pub error: String,
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        ErrorResponse {
            success: false,
            error: err.to_string(),
        }
    }
}

/// Map an error to the HTTP status code a future transport layer should
/// use: 400 for `BadRequest`, 404 for `NotFound`, 500 for everything else
/// (§6). `OutOfRange`, `Underflow`, and `NotReady` never reach here from a
/// well-behaved facade call — they are collapsed to `Internal` before the
/// facade returns — but the mapping is defined for all variants so this
/// function is total.
pub fn http_status(err: &Error) -> u16 {
    match err {
        Error::BadRequest(_) => 400,
        Error::NotFound(_) => 404,
        Error::OutOfRange { .. }
        | Error::Underflow { .. }
        | Error::NotReady
        | Error::Internal(_) => 500,
    }
}
