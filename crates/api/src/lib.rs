//! Request-layer response shapes and handler functions (§6).
//!
//! This crate is the network boundary's *shape*, not its mechanics: the
//! HTTP transport, CORS, and wire-level JSON decoding of incoming requests
//! remain out of scope. What lives here is the exact response vocabulary a
//! transport layer must produce, and thin handler functions that call a
//! [`rankboard_facade::RankingFacade`] and map its `Result` onto that
//! vocabulary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod handlers;
pub mod response;

pub use handlers::{handle_leaderboard, handle_search, handle_set_rating, handle_simulate_bulk};
pub use response::{http_status, BulkUpdateResponse, ErrorResponse, PageResponse, UpdateResponse};
