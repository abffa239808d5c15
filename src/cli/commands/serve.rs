//! `daytrip serve`: run the gateway.

use std::sync::Arc;

use anyhow::{anyhow, Result};

use crate::adapters::gateway::{shutdown_signal, GatewayServer, GatewayState};
use crate::adapters::UpstreamClient;
use crate::cli::types::ServeArgs;
use crate::domain::models::Config;
use crate::services::RecommendationService;

/// Run the gateway until Ctrl+C or SIGTERM.
pub async fn execute(args: ServeArgs, config: &Config) -> Result<()> {
    let mut server_config = config.server.clone();
    if let Some(host) = args.host {
        server_config.host = host;
    }
    if let Some(port) = args.port {
        server_config.port = port;
    }

    let upstream = UpstreamClient::new(&config.upstream)?;
    let recommendations = RecommendationService::new(
        Arc::new(upstream.clone()),
        config.recommendation.clone(),
        config.upstream.default_radius_m,
    );

    let state = GatewayState {
        upstream,
        recommendations,
        default_radius_m: config.upstream.default_radius_m,
    };

    GatewayServer::new(state, server_config)
        .serve_with_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow!("gateway server failed: {e}"))
}
