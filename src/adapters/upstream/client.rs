//! HTTP client for the upstream place recommendation API.
//!
//! Serves two callers: the gateway, which relays raw JSON through the
//! pass-through methods, and the recommendation service, which reaches the
//! client through the [`VenueFetcher`] port.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    parse_pool, CategoryKind, EndpointsConfig, UpstreamConfig, Venue, VenueQuery,
};
use crate::domain::ports::VenueFetcher;

/// Location search parameters shared by the restaurant and activity listings.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Search radius in metres.
    pub radius: u32,
    /// Upstream category filter, passed through verbatim.
    pub category_group: Option<String>,
}

impl SearchParams {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("lat", self.lat.to_string()),
            ("lng", self.lng.to_string()),
            ("radius", self.radius.to_string()),
        ];
        if let Some(group) = &self.category_group {
            query.push(("category_group", group.clone()));
        }
        query
    }
}

/// Client for the upstream recommendation API.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: String,
    endpoints: EndpointsConfig,
}

impl UpstreamClient {
    /// Build a client from configuration.
    pub fn new(config: &UpstreamConfig) -> DomainResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            endpoints: config.endpoints.clone(),
        })
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, category: CategoryKind) -> &str {
        match category {
            CategoryKind::Food => &self.endpoints.food,
            CategoryKind::Cafe => &self.endpoints.cafe,
            CategoryKind::Activity => &self.endpoints.activity,
        }
    }

    /// Base URL extended by `segments`, each encoded as exactly one path
    /// segment.
    fn url(&self, segments: &[&str]) -> DomainResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            DomainError::UpstreamUnavailable(format!("invalid base url {}: {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                DomainError::UpstreamUnavailable(format!(
                    "base url cannot take a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET the URL built from `segments` and decode the body as JSON.
    ///
    /// Non-success statuses become [`DomainError::Upstream`] carrying the
    /// status and the raw body.
    async fn get_json<Q: serde::Serialize + ?Sized>(
        &self,
        segments: &[&str],
        query: &Q,
    ) -> DomainResult<Value> {
        let url = self.url(segments)?;
        debug!(%url, "upstream request");

        let resp = self.http.get(url).query(query).send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Upstream { status, body });
        }

        Ok(resp.json::<Value>().await?)
    }

    /// Restaurants near a location.
    pub async fn restaurants(&self, params: &SearchParams) -> DomainResult<Value> {
        self.get_json(&["restaurants"], &params.to_query()).await
    }

    /// Leisure activities near a location.
    pub async fn activities(&self, params: &SearchParams) -> DomainResult<Value> {
        self.get_json(&["activities"], &params.to_query()).await
    }

    /// Detail record for one restaurant.
    pub async fn restaurant_detail(&self, place_id: &str) -> DomainResult<Value> {
        self.get_json(&["restaurant", place_id], &[] as &[(&str, &str)])
            .await
    }

    /// Opening hours for one business.
    pub async fn restaurant_hours(&self, business_id: &str) -> DomainResult<Value> {
        self.get_json(
            &["restaurant", business_id, "hours"],
            &[] as &[(&str, &str)],
        )
        .await
    }

    /// Menu lookup; every query parameter is forwarded unchanged.
    pub async fn menu(&self, params: &[(String, String)]) -> DomainResult<Value> {
        self.get_json(&["menu"], params).await
    }
}

#[async_trait]
impl VenueFetcher for UpstreamClient {
    async fn fetch_pool(&self, query: &VenueQuery) -> DomainResult<Vec<Venue>> {
        let params = [
            ("lat", query.location.lat.to_string()),
            ("lng", query.location.lng.to_string()),
            ("radius", query.radius_m.to_string()),
            ("budget", query.budget.to_string()),
            ("people", query.people.to_string()),
        ];

        let segments: Vec<&str> = self
            .endpoint(query.category)
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match self.get_json(&segments, &params).await? {
            Value::Array(items) => Ok(parse_pool(items)),
            other => Err(DomainError::SerializationError(format!(
                "expected a list of venues for {}, got {}",
                query.category,
                json_kind(&other)
            ))),
        }
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
