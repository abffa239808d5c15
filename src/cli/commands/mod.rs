//! CLI command implementations.

pub mod recommend;
pub mod serve;
pub mod session;

use std::path::Path;

use anyhow::{Context, Result};

use crate::adapters::{JsonFileStateStore, RngSource};
use crate::domain::models::Config;
use crate::domain::ports::StateStore;
use crate::services::{CandidateBatch, ItinerarySampler, ItinerarySession};

/// Store key holding the pools and budget of the last `recommend`.
pub const REQUEST_KEY: &str = "request";

/// Session backed by the configured state file.
pub type CliSession = ItinerarySession<JsonFileStateStore, RngSource<rand::rngs::StdRng>>;

/// Store at the configured `session.state_path`.
pub fn open_store(config: &Config) -> JsonFileStateStore {
    JsonFileStateStore::new(Path::new(&config.session.state_path))
}

/// Pools and budget saved by the last `recommend`, if any.
pub fn load_batch(store: &JsonFileStateStore) -> Result<Option<CandidateBatch>> {
    let Some(raw) = store.get(REQUEST_KEY)? else {
        return Ok(None);
    };
    let batch = serde_json::from_str(&raw)
        .context("Stored request is unreadable; run `daytrip recommend` again")?;
    Ok(Some(batch))
}

/// Resume the stored session, failing if `recommend` was never run.
pub fn resume(config: &Config) -> Result<CliSession> {
    let store = open_store(config);
    let batch = load_batch(&store)?
        .context("No session found; run `daytrip recommend` first")?;

    Ok(ItinerarySession::start(
        store,
        RngSource::from_os(),
        ItinerarySampler::new(config.recommendation.exhaustion_policy),
        batch.pools,
        batch.ranges,
    ))
}
