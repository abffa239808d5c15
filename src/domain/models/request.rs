//! Recommendation request as submitted from the budget form.

use serde::{Deserialize, Serialize};

use super::category::CategoryKind;

/// Requester coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// A budget submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Starting point; required.
    pub location: Option<Location>,
    /// Total budget for the whole party.
    pub budget: u64,
    /// Party size.
    pub people: u32,
    /// Search radius in metres; the configured default applies when absent.
    #[serde(default)]
    pub radius_m: Option<u32>,
}

/// Query sent to the upstream for one category's pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VenueQuery {
    /// Category whose pool is wanted.
    pub category: CategoryKind,
    /// Search centre.
    pub location: Location,
    /// This category's share of the total budget.
    pub budget: u64,
    /// Party size.
    pub people: u32,
    /// Search radius in metres.
    pub radius_m: u32,
}
