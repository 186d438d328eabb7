//! A tiny demo binary that stands in for "the client application" just
//! enough to sanity-check the engine end to end.
//!
//! Seeds an in-memory store, bootstraps the engine from it, runs one
//! bulk-simulation pass, then prints the resulting leaderboard page. No
//! HTTP server is wired up here — the client application itself remains
//! out of scope (§1).

use std::sync::Arc;

use rankboard::{InMemoryUserStore, RankingEngine, RankingFacade};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> rankboard::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let pairs: Vec<(String, i32)> = (0..500)
        .map(|i| (format!("player{i:04}"), 100 + (i % 4901)))
        .collect();
    let pairs_ref: Vec<(&str, i32)> = pairs.iter().map(|(n, r)| (n.as_str(), *r)).collect();

    let store = Arc::new(InMemoryUserStore::seeded(pairs_ref)?);
    let engine = Arc::new(RankingEngine::new());
    engine.init_from_store(store.as_ref()).await?;
    tracing::info!(state = ?engine.state(), "engine ready");

    let facade = RankingFacade::new(engine, store);

    let persisted = facade.simulate_bulk(50).await?;
    tracing::info!(persisted, "bulk simulation pass complete");

    let page = facade.leaderboard_page(1, 10).await?;
    println!("top {} of the leaderboard:", page.count());
    for player in &page.data {
        println!(
            "  #{:<4} {:<16} rating {}",
            player.rank, player.username, player.rating
        );
    }

    Ok(())
}
