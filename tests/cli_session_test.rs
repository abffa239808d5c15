//! CLI command flow: recommend, then resume the stored session.

mod common;

use daytrip::adapters::JsonFileStateStore;
use daytrip::cli::commands::{load_batch, recommend, resume, session};
use daytrip::cli::types::RecommendArgs;
use daytrip::domain::models::session::{HISTORY_KEY, INDEX_KEY};
use daytrip::domain::models::History;
use daytrip::domain::ports::StateStore;
use mockito::{Matcher, Server};

use common::{activity_pool_json, cafe_pool_json, restaurant_pool_json, temp_dir, test_config};

fn args(budget: u64, people: u32) -> RecommendArgs {
    RecommendArgs {
        lat: 37.5,
        lng: 127.0,
        budget,
        people,
        radius: Some(2000),
    }
}

#[tokio::test]
async fn test_recommend_then_regenerate_select_reset() {
    let mut server = Server::new_async().await;
    let mut mocks = Vec::new();
    for (path, body) in [
        ("/restaurants", restaurant_pool_json()),
        ("/cafes", cafe_pool_json()),
        ("/activities", activity_pool_json()),
    ] {
        mocks.push(
            server
                .mock("GET", path)
                .match_query(Matcher::UrlEncoded("radius".into(), "2000".into()))
                .with_status(200)
                .with_body(body.to_string())
                .expect(1)
                .create_async()
                .await,
        );
    }

    let dir = temp_dir();
    let config = test_config(&dir, &server.url());

    recommend::execute(args(100_000, 1), &config, true).await.unwrap();
    for mock in &mocks {
        mock.assert_async().await;
    }

    let store = JsonFileStateStore::new(&config.session.state_path);
    let batch = load_batch(&store).unwrap().unwrap();
    assert_eq!(batch.request.radius_m, 2000);
    assert_eq!(batch.pools.food.len(), 3);

    let first = resume(&config).unwrap().itinerary().clone();
    assert_eq!(first.food.as_ref().unwrap().id, "f-20000");

    // Resuming is stable and does not fetch again.
    assert_eq!(resume(&config).unwrap().itinerary(), &first);

    session::regenerate(&config, true).unwrap();
    let history: History =
        serde_json::from_str(&store.get(HISTORY_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(history.len(), 3);

    session::select(2, &config, true).unwrap();
    assert_eq!(store.get(INDEX_KEY).unwrap().as_deref(), Some("2"));
    session::show(&config, true).unwrap();

    session::reset(&config, true).unwrap();
    assert!(load_batch(&store).unwrap().is_none());
    assert!(resume(&config).is_err());
}

#[tokio::test]
async fn test_recommend_rejects_low_budget_without_state() {
    let server = Server::new_async().await;
    let dir = temp_dir();
    let config = test_config(&dir, &server.url());

    let err = recommend::execute(args(40_000, 1), &config, true)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("budget too low"));
    assert!(!std::path::Path::new(&config.session.state_path).exists());
}

#[tokio::test]
async fn test_recommend_with_failing_upstream_gives_empty_itinerary() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let dir = temp_dir();
    let config = test_config(&dir, &server.url());

    recommend::execute(args(100_000, 1), &config, true).await.unwrap();
    assert!(resume(&config).unwrap().itinerary().is_empty());
}

#[test]
fn test_commands_without_session_fail() {
    let dir = temp_dir();
    let config = test_config(&dir, "http://127.0.0.1:1");

    assert!(session::show(&config, true).is_err());
    assert!(session::regenerate(&config, true).is_err());
    session::reset(&config, true).unwrap();
}

#[tokio::test]
async fn test_reset_clears_corrupt_state_file() {
    let mut server = Server::new_async().await;
    let mut mocks = Vec::new();
    for (path, body) in [
        ("/restaurants", restaurant_pool_json()),
        ("/cafes", cafe_pool_json()),
        ("/activities", activity_pool_json()),
    ] {
        mocks.push(
            server
                .mock("GET", path)
                .match_query(Matcher::Any)
                .with_status(200)
                .with_body(body.to_string())
                .create_async()
                .await,
        );
    }

    let dir = temp_dir();
    let config = test_config(&dir, &server.url());
    let state_path = std::path::Path::new(&config.session.state_path);
    if let Some(parent) = state_path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(state_path, "{ corrupt").unwrap();
    assert!(session::show(&config, true).is_err());

    session::reset(&config, true).unwrap();
    assert!(!state_path.exists());

    let err = session::show(&config, true).unwrap_err();
    assert!(err.to_string().contains("No session found"));

    recommend::execute(args(100_000, 1), &config, true).await.unwrap();
    session::show(&config, true).unwrap();
    assert!(resume(&config).unwrap().itinerary().food.is_some());
}
