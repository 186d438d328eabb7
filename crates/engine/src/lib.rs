//! The ranking engine: the reader/writer locking discipline around the
//! rating histogram, and the startup scan that bootstraps it.
//!
//! `rankboard-engine` wraps `rankboard-histogram`'s pure data structure
//! with:
//! - a single process-wide `parking_lot::RwLock` protecting it,
//! - the one-way `Uninitialized -> Ready` lifecycle driven by a startup
//!   scan of the durable store, and
//! - the rank-query and rating-transition contract the facade composes.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod engine;
mod report;

pub use engine::{EngineState, RankingEngine};
pub use report::BatchUpdateReport;
