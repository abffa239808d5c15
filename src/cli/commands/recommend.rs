//! `daytrip recommend`: validate a budget, fetch pools, start a session.

use std::sync::Arc;

use anyhow::{Context, Result};

use super::{open_store, REQUEST_KEY};
use crate::adapters::{RngSource, UpstreamClient};
use crate::cli::output::{output, ItineraryOutput};
use crate::cli::types::RecommendArgs;
use crate::domain::models::{Config, Location, RecommendationRequest};
use crate::domain::ports::StateStore;
use crate::services::RecommendationService;

/// Fetch pools, start a fresh session and print the carousel.
pub async fn execute(args: RecommendArgs, config: &Config, json: bool) -> Result<()> {
    let upstream = UpstreamClient::new(&config.upstream)?;
    let service = RecommendationService::new(
        Arc::new(upstream),
        config.recommendation.clone(),
        config.upstream.default_radius_m,
    );

    let request = RecommendationRequest {
        location: Some(Location {
            lat: args.lat,
            lng: args.lng,
        }),
        budget: args.budget,
        people: args.people,
        radius_m: args.radius,
    };
    let batch = service.prepare(&request).await?;

    let mut store = open_store(config);
    store
        .set(REQUEST_KEY, &serde_json::to_string(&batch)?)
        .context("Failed to save the request")?;

    let session = service.start_session(batch, store, RngSource::from_os());

    output(
        &ItineraryOutput {
            itinerary: session.itinerary().clone(),
            ranges: *session.ranges(),
            index: session.index(),
            shown: session.history().len(),
        },
        json,
    );
    Ok(())
}
