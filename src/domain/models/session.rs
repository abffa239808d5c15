//! Persisted session state and its storage layout.
//!
//! The itinerary, the history and the carousel index live under separate keys
//! so that the index can be snapshotted on its own when the user opens a
//! detail view.

use serde::{Deserialize, Serialize};

use super::itinerary::{History, Itinerary};

/// Store key holding the current itinerary as `{food, cafe, activity}`.
pub const ITINERARY_KEY: &str = "itinerary";

/// Store key holding the last viewed carousel position.
pub const INDEX_KEY: &str = "carousel_index";

/// Store key holding the per-category history of shown venue ids.
pub const HISTORY_KEY: &str = "history";

/// Everything needed to resume a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Itinerary on display.
    pub itinerary: Itinerary,
    /// Venues already shown.
    pub history: History,
    /// Last viewed carousel page.
    pub index: usize,
}
