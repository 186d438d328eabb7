//! # Rankboard
//!
//! A leaderboard service's ranking core: a dense rating histogram, a
//! locked engine wrapping it, and a facade composing the engine with a
//! durable user store.
//!
//! Rankboard answers "what is the global rank of a player with rating r?"
//! in constant time and keeps that answer consistent with a durable store
//! under concurrent read/write load.
//!
//! # Quick Start
//!
//! ```no_run
//! use rankboard::{InMemoryUserStore, RankingEngine, RankingFacade};
//! use std::sync::Arc;
//!
//! # async fn run() -> rankboard::Result<()> {
//! let store = Arc::new(InMemoryUserStore::seeded(vec![
//!     ("alice", 1800),
//!     ("bob", 1500),
//! ])?);
//! let engine = Arc::new(RankingEngine::new());
//! engine.init_from_store(store.as_ref()).await?;
//!
//! let facade = RankingFacade::new(engine, store);
//! let page = facade.leaderboard_page(1, 10).await?;
//! assert_eq!(page.data[0].username, "alice");
//! assert_eq!(page.data[0].rank, 1);
//! # Ok(())
//! # }
//! ```
//!
//! Internal crates (core, histogram, engine, store, facade, api) are
//! re-exported here for convenience; each is independently usable.

pub use rankboard_api as api;
pub use rankboard_core::{Error, PlayerRecord, RankedPlayer, Rating, RatingUpdate, Result};
pub use rankboard_engine::{BatchUpdateReport, EngineState, RankingEngine};
pub use rankboard_facade::RankingFacade;
pub use rankboard_histogram::Histogram;
pub use rankboard_store::{InMemoryUserStore, UserStore};
