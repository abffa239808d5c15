//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces the itinerary core and the
//! recommendation service depend on:
//! - StateStore: session-scoped key/value persistence
//! - RandomSource: injectable randomness for sampling
//! - VenueFetcher: upstream category pool queries
//!
//! These traits keep the core independent of browser storage, the system
//! RNG, and the network.

pub mod random_source;
pub mod state_store;
pub mod venue_fetcher;

pub use random_source::RandomSource;
pub use state_store::StateStore;
pub use venue_fetcher::VenueFetcher;
