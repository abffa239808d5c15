//! Domain layer for the daytrip recommender
//!
//! This module contains the venue/budget/itinerary models and the port traits
//! the itinerary core depends on.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
