//! Application services.
//!
//! The budget allocator, candidate filter and sampler are pure; the session
//! owns mutable state behind a [`StateStore`](crate::domain::ports::StateStore);
//! the recommendation service is the async entry point used by the gateway
//! and the CLI.

pub mod budget_allocator;
pub mod candidate_filter;
pub mod itinerary_sampler;
pub mod itinerary_session;
pub mod recommendation_service;

pub use budget_allocator::BudgetAllocator;
pub use candidate_filter::{filter_candidates, fits_budget};
pub use itinerary_sampler::ItinerarySampler;
pub use itinerary_session::{ItinerarySession, CAROUSEL_LEN};
pub use recommendation_service::{CandidateBatch, RecommendationService, ValidatedRequest};
