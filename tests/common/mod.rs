//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

#![allow(dead_code)]

use daytrip::domain::models::{Config, UpstreamConfig, Venue, VenuePools};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Create a temporary directory for test isolation
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Initialize a tracing subscriber writing to the test output.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Upstream configuration pointing at a mock server.
pub fn upstream_config(base_url: &str) -> UpstreamConfig {
    UpstreamConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..UpstreamConfig::default()
    }
}

/// Configuration with the session file inside `dir` and the upstream at `base_url`.
pub fn test_config(dir: &TempDir, base_url: &str) -> Config {
    let mut config = Config::default();
    config.upstream = upstream_config(base_url);
    config.session.state_path = dir
        .path()
        .join("session.json")
        .to_string_lossy()
        .into_owned();
    config
}

/// Pools for a 100 000 budget:
/// food max 38 500 admits only `f-20000`; cafe max 33 000 admits the 5 000 and
/// 8 000 items; every activity qualifies.
pub fn scenario_pools() -> VenuePools {
    VenuePools {
        food: vec![
            Venue::new("f-20000", "Gukbap House").with_price(20_000),
            Venue::new("f-40000", "Hanwoo Grill").with_price(40_000),
            Venue::new("f-unknown", "Street Stall"),
        ],
        cafe: vec![
            Venue::new("c-5000", "Espresso Bar").with_price(5_000),
            Venue::new("c-8000", "Dessert Cafe").with_price(8_000),
            Venue::new("c-35000", "Tea Omakase").with_price(35_000),
        ],
        activity: vec![
            Venue::new("a-1", "Palace Walk"),
            Venue::new("a-2", "Riverside Bikes"),
            Venue::new("a-3", "Escape Room"),
        ],
    }
}

/// Upstream JSON for a food pool.
pub fn restaurant_pool_json() -> Value {
    json!([
        { "place_id": "f-20000", "place_name": "Gukbap House", "category": "한식", "price": 20000, "distance": 420 },
        { "place_id": "f-40000", "place_name": "Hanwoo Grill", "category": ["한식", "고기"], "price": 40000 },
        { "place_id": "f-unknown", "place_name": "Street Stall", "category": "분식" },
        { "place_name": "no id, dropped" }
    ])
}

pub fn cafe_pool_json() -> Value {
    json!([
        { "id": 501, "title": "Espresso Bar", "avg_price": 5000 },
        { "id": 502, "title": "Dessert Cafe", "avg_price": "8000" },
        { "id": 503, "title": "Tea Omakase", "avg_price": 35000 }
    ])
}

pub fn activity_pool_json() -> Value {
    json!([
        { "place_id": "a-1", "place_name": "Palace Walk", "category_name": "관광" },
        { "place_id": "a-2", "place_name": "Riverside Bikes", "distance": "1850.5" }
    ])
}
