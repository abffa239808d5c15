//! Domain models.

pub mod budget;
pub mod category;
pub mod config;
pub mod itinerary;
pub mod request;
pub mod session;
pub mod venue;

pub use budget::{BudgetRange, BudgetRatios, CategoryBudgets, CategoryRanges};
pub use category::{CategoryKind, DetailKind};
pub use config::{
    Config, EndpointsConfig, ExhaustionPolicy, LoggingConfig, RecommendationConfig,
    ServerConfig, SessionConfig, UpstreamConfig,
};
pub use itinerary::{History, Itinerary, Selection};
pub use request::{Location, RecommendationRequest, VenueQuery};
pub use session::SessionSnapshot;
pub use venue::{parse_pool, Venue, VenuePools};
