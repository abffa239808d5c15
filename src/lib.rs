//! Daytrip: budget-constrained day itinerary recommender.
//!
//! Splits a total budget across food, cafe and activity, filters upstream
//! venue pools by price, and samples itineraries that never repeat a venue
//! already shown in the session.
//!
//! Layout follows a hexagonal split:
//! - `domain`: models, errors and ports
//! - `services`: allocator, filter, sampler, session, recommendation service
//! - `adapters`: state stores, RNG, upstream client, gateway server
//! - `infrastructure`: configuration and logging
//! - `cli`: command-line surface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    BudgetRange, BudgetRatios, CategoryBudgets, CategoryKind, CategoryRanges, Config, History,
    Itinerary, Selection, Venue, VenuePools,
};
pub use services::{
    BudgetAllocator, CandidateBatch, ItinerarySampler, ItinerarySession, RecommendationService,
};
