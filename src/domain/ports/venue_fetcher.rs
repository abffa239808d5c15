//! Category pool fetcher port.
//!
//! Implemented by the upstream HTTP client; the recommendation service only
//! sees this trait.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Venue, VenueQuery};

/// Fetches the candidate pool for one category.
#[async_trait]
pub trait VenueFetcher: Send + Sync {
    /// Returns the venues the upstream recommends for `query`.
    ///
    /// # Errors
    /// Returns error if:
    /// - The upstream is unreachable or times out
    /// - The upstream answers with a non-success status
    /// - The response body is not a list
    async fn fetch_pool(&self, query: &VenueQuery) -> DomainResult<Vec<Venue>>;
}
