//! Recommendation service: request validation and pool fetching.
//!
//! Sits between the outer surfaces (gateway, CLI) and the itinerary core.
//! It rejects unusable requests, splits the budget, asks the upstream for the
//! three category pools concurrently, and hands the completed batch to the
//! sampler or to a new [`ItinerarySession`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::budget_allocator::BudgetAllocator;
use super::itinerary_sampler::ItinerarySampler;
use super::itinerary_session::ItinerarySession;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    CategoryBudgets, CategoryKind, CategoryRanges, History, Itinerary, Location,
    RecommendationConfig, RecommendationRequest, Venue, VenuePools, VenueQuery,
};
use crate::domain::ports::{RandomSource, StateStore, VenueFetcher};

/// A request that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidatedRequest {
    /// Search centre.
    pub location: Location,
    /// Total budget for the party.
    pub budget: u64,
    /// Party size, at least 1.
    pub people: u32,
    /// Search radius in metres.
    pub radius_m: u32,
}

/// Everything the sampler needs for one budget submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateBatch {
    /// Request the pools were fetched for.
    pub request: ValidatedRequest,
    /// Per-category share of the budget.
    pub budgets: CategoryBudgets,
    /// Price ranges derived from `budgets`.
    pub ranges: CategoryRanges,
    /// Fetched candidates; failed fetches are empty.
    pub pools: VenuePools,
}

/// Validates budget submissions and gathers candidate pools.
pub struct RecommendationService {
    fetcher: Arc<dyn VenueFetcher>,
    allocator: BudgetAllocator,
    config: RecommendationConfig,
    default_radius_m: u32,
}

impl RecommendationService {
    /// Service fetching through `fetcher` with ratios and policy from `config`.
    pub fn new(
        fetcher: Arc<dyn VenueFetcher>,
        config: RecommendationConfig,
        default_radius_m: u32,
    ) -> Self {
        Self {
            fetcher,
            allocator: BudgetAllocator::with_ratios(config.ratios),
            config,
            default_radius_m,
        }
    }

    /// Allocator built from the configured ratios.
    pub const fn allocator(&self) -> &BudgetAllocator {
        &self.allocator
    }

    /// Sampler using the configured exhaustion policy.
    pub const fn sampler(&self) -> ItinerarySampler {
        ItinerarySampler::new(self.config.exhaustion_policy)
    }

    /// Check a submission before anything is fetched or stored.
    ///
    /// # Errors
    /// - `MissingLocation` when no coordinates were supplied
    /// - `EmptyParty` when `people` is zero
    /// - `BudgetTooLow` when the per-person budget does not exceed the minimum
    pub fn validate(&self, request: &RecommendationRequest) -> DomainResult<ValidatedRequest> {
        let location = request.location.ok_or(DomainError::MissingLocation)?;
        if request.people == 0 {
            return Err(DomainError::EmptyParty);
        }

        let minimum = self.config.min_per_person_budget;
        let floor = u128::from(minimum) * u128::from(request.people);
        if u128::from(request.budget) <= floor {
            return Err(DomainError::BudgetTooLow {
                per_person: request.budget / u64::from(request.people),
                minimum,
            });
        }

        Ok(ValidatedRequest {
            location,
            budget: request.budget,
            people: request.people,
            radius_m: request.radius_m.unwrap_or(self.default_radius_m),
        })
    }

    /// Validate `request` and fetch the three category pools.
    ///
    /// A category whose fetch fails contributes an empty pool; only
    /// validation failures are returned as errors.
    #[instrument(skip(self), fields(budget = request.budget, people = request.people))]
    pub async fn prepare(&self, request: &RecommendationRequest) -> DomainResult<CandidateBatch> {
        let request = self.validate(request)?;
        let budgets = self.allocator.allocate(request.budget);
        let ranges = BudgetAllocator::ranges_for(&budgets);

        let query = |category: CategoryKind| VenueQuery {
            category,
            location: request.location,
            budget: budgets.get(category),
            people: request.people,
            radius_m: request.radius_m,
        };

        let (food, cafe, activity) = futures::join!(
            self.fetch_or_empty(query(CategoryKind::Food)),
            self.fetch_or_empty(query(CategoryKind::Cafe)),
            self.fetch_or_empty(query(CategoryKind::Activity))
        );
        let pools = VenuePools {
            food,
            cafe,
            activity,
        };

        info!(
            food = pools.food.len(),
            cafe = pools.cafe.len(),
            activity = pools.activity.len(),
            "candidate pools fetched"
        );

        Ok(CandidateBatch {
            request,
            budgets,
            ranges,
            pools,
        })
    }

    async fn fetch_or_empty(&self, query: VenueQuery) -> Vec<Venue> {
        match self.fetcher.fetch_pool(&query).await {
            Ok(venues) => venues,
            Err(e) => {
                warn!(category = %query.category, error = %e, "pool fetch failed, using empty pool");
                Vec::new()
            }
        }
    }

    /// Stateless draw against a caller-held history.
    pub fn draw<R: RandomSource + ?Sized>(
        &self,
        batch: &CandidateBatch,
        history: &mut History,
        rng: &mut R,
    ) -> Itinerary {
        self.sampler().draw(&batch.pools, &batch.ranges, history, rng)
    }

    /// Start a new session for `batch`, discarding whatever `store` held.
    pub fn start_session<S: StateStore, R: RandomSource>(
        &self,
        batch: CandidateBatch,
        store: S,
        rng: R,
    ) -> ItinerarySession<S, R> {
        ItinerarySession::fresh(store, rng, self.sampler(), batch.pools, batch.ranges)
    }

    /// Resume the session in `store` for a previously prepared `batch`.
    pub fn resume_session<S: StateStore, R: RandomSource>(
        &self,
        batch: CandidateBatch,
        store: S,
        rng: R,
    ) -> ItinerarySession<S, R> {
        ItinerarySession::start(store, rng, self.sampler(), batch.pools, batch.ranges)
    }
}
