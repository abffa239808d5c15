//! Itinerary, shown-venue history, and the selection handed to detail views.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::category::{CategoryKind, DetailKind};
use super::venue::Venue;

/// One optional venue per category. `None` means nothing qualified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    /// Food value.
    pub food: Option<Venue>,
    /// Cafe value.
    pub cafe: Option<Venue>,
    /// Activity value.
    pub activity: Option<Venue>,
}

impl Itinerary {
    /// Build an itinerary by drawing each slot in carousel order.
    pub fn from_slots(mut draw: impl FnMut(CategoryKind) -> Option<Venue>) -> Self {
        let food = draw(CategoryKind::Food);
        let cafe = draw(CategoryKind::Cafe);
        let activity = draw(CategoryKind::Activity);
        Self {
            food,
            cafe,
            activity,
        }
    }

    /// Venue in the `kind` slot.
    pub const fn get(&self, kind: CategoryKind) -> Option<&Venue> {
        match kind {
            CategoryKind::Food => self.food.as_ref(),
            CategoryKind::Cafe => self.cafe.as_ref(),
            CategoryKind::Activity => self.activity.as_ref(),
        }
    }

    /// Slots in carousel order.
    pub fn slots(&self) -> impl Iterator<Item = (CategoryKind, Option<&Venue>)> {
        CategoryKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    /// True when every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.slots().all(|(_, venue)| venue.is_none())
    }

    /// Number of slots holding a venue.
    pub fn filled(&self) -> usize {
        self.slots().filter(|(_, venue)| venue.is_some()).count()
    }
}

/// Identifiers already shown in this session, per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct History {
    food: BTreeSet<String>,
    cafe: BTreeSet<String>,
    activity: BTreeSet<String>,
}

impl History {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids already shown for `kind`.
    pub const fn excluded(&self, kind: CategoryKind) -> &BTreeSet<String> {
        match kind {
            CategoryKind::Food => &self.food,
            CategoryKind::Cafe => &self.cafe,
            CategoryKind::Activity => &self.activity,
        }
    }

    fn slot_mut(&mut self, kind: CategoryKind) -> &mut BTreeSet<String> {
        match kind {
            CategoryKind::Food => &mut self.food,
            CategoryKind::Cafe => &mut self.cafe,
            CategoryKind::Activity => &mut self.activity,
        }
    }

    /// Mark `id` as shown under `kind`.
    pub fn record(&mut self, kind: CategoryKind, id: impl Into<String>) {
        self.slot_mut(kind).insert(id.into());
    }

    /// Record every venue of an itinerary under its category.
    pub fn record_itinerary(&mut self, itinerary: &Itinerary) {
        for (kind, venue) in itinerary.slots() {
            if let Some(venue) = venue {
                self.record(kind, venue.id.clone());
            }
        }
    }

    /// Whether `id` was shown under `kind`.
    pub fn contains(&self, kind: CategoryKind, id: &str) -> bool {
        self.excluded(kind).contains(id)
    }

    /// Forget everything shown for `kind`.
    pub fn clear(&mut self, kind: CategoryKind) {
        self.slot_mut(kind).clear();
    }

    /// Shown ids across all categories.
    pub fn len(&self) -> usize {
        self.food.len() + self.cafe.len() + self.activity.len()
    }

    /// True when every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A venue picked from the carousel, ready for the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Picked venue.
    pub venue: Venue,
    /// Slot the venue was picked from.
    pub category: CategoryKind,
    /// Detail view to open.
    pub detail_kind: DetailKind,
}

impl Selection {
    /// Selection with the detail view implied by `category`.
    pub fn new(category: CategoryKind, venue: Venue) -> Self {
        Self {
            venue,
            category,
            detail_kind: category.detail_kind(),
        }
    }
}
