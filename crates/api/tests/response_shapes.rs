//! Checks the JSON vocabulary matches §6 exactly, including the `hasMore`
//! casing and the error/success discriminants.

use std::sync::Arc;

use rankboard_api::{handle_leaderboard, handle_search, handle_set_rating};
use rankboard_engine::RankingEngine;
use rankboard_facade::RankingFacade;
use rankboard_store::InMemoryUserStore;

async fn facade_with(pairs: Vec<(&str, i32)>) -> RankingFacade {
    let store: Arc<dyn rankboard_core::UserStore> =
        Arc::new(InMemoryUserStore::seeded(pairs).unwrap());
    let engine = Arc::new(RankingEngine::new());
    engine.init_from_store(store.as_ref()).await.unwrap();
    RankingFacade::new(engine, store)
}

#[tokio::test]
async fn leaderboard_response_serializes_with_has_more_camel_case() {
    let facade = facade_with(vec![("alice", 1500)]).await;
    let response = handle_leaderboard(&facade, 1, 50).await.unwrap();
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["success"], true);
    assert!(json.get("hasMore").is_some());
    assert!(json.get("has_more").is_none());
    assert_eq!(json["count"], 1);
}

#[tokio::test]
async fn blank_search_yields_400_error_response() {
    let facade = facade_with(vec![("alice", 1500)]).await;
    let err = handle_search(&facade, "   ", 1, 50).await.unwrap_err();
    assert!(!err.success);
    assert_eq!(rankboard_api::http_status(&rankboard_core::Error::BadRequest(err.error.clone())), 400);
}

#[tokio::test]
async fn set_rating_success_response_matches_contract() {
    let facade = facade_with(vec![("alice", 1500)]).await;
    let response = handle_set_rating(&facade, "alice", 1800).await.unwrap();
    assert!(response.success);
    assert_eq!(response.updated, 1);
    assert_eq!(response.message, "rating updated");
}

#[tokio::test]
async fn set_rating_not_found_maps_to_404() {
    let facade = facade_with(vec![("alice", 1500)]).await;
    let err = handle_set_rating(&facade, "nobody", 1800).await.unwrap_err();
    assert_eq!(
        rankboard_api::http_status(&rankboard_core::Error::NotFound(err.error.clone())),
        404
    );
}
