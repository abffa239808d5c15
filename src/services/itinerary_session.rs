//! Stateful itinerary session.
//!
//! Holds the current itinerary, the history of venues already shown, and the
//! carousel position, and mirrors all three into a [`StateStore`] so a session
//! can be resumed after the user navigates to a detail view and back.
//!
//! History is committed lazily: the venues of an itinerary are only added to
//! the history when the *next* itinerary is requested via
//! [`ItinerarySession::regenerate`]. The first draw of a session therefore
//! always sees an empty history.
//!
//! No public operation fails. Store errors are logged and otherwise ignored,
//! and unreadable persisted state is discarded in favour of a fresh draw.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::itinerary_sampler::ItinerarySampler;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::session::{HISTORY_KEY, INDEX_KEY, ITINERARY_KEY};
use crate::domain::models::{
    CategoryKind, CategoryRanges, History, Itinerary, Selection, SessionSnapshot, VenuePools,
};
use crate::domain::ports::{RandomSource, StateStore};

/// Number of carousel pages, one per category.
pub const CAROUSEL_LEN: usize = CategoryKind::ALL.len();

/// Itinerary + history + carousel position for one browsing session.
pub struct ItinerarySession<S: StateStore, R: RandomSource> {
    store: S,
    rng: R,
    sampler: ItinerarySampler,
    pools: VenuePools,
    ranges: CategoryRanges,
    itinerary: Itinerary,
    history: History,
    index: usize,
}

impl<S: StateStore, R: RandomSource> ItinerarySession<S, R> {
    fn unstarted(
        store: S,
        rng: R,
        sampler: ItinerarySampler,
        pools: VenuePools,
        ranges: CategoryRanges,
    ) -> Self {
        Self {
            store,
            rng,
            sampler,
            pools,
            ranges,
            itinerary: Itinerary::default(),
            history: History::new(),
            index: 0,
        }
    }

    /// Resume the session held in `store`, or start one if there is none.
    pub fn start(
        store: S,
        rng: R,
        sampler: ItinerarySampler,
        pools: VenuePools,
        ranges: CategoryRanges,
    ) -> Self {
        let mut session = Self::unstarted(store, rng, sampler, pools, ranges);
        if session.restore() {
            info!(
                index = session.index,
                shown = session.history.len(),
                "resumed itinerary session"
            );
        } else {
            session.generate();
            session.persist();
        }
        session
    }

    /// Start a new session, discarding whatever `store` held.
    ///
    /// Used when a new budget is submitted.
    pub fn fresh(
        store: S,
        rng: R,
        sampler: ItinerarySampler,
        pools: VenuePools,
        ranges: CategoryRanges,
    ) -> Self {
        let mut session = Self::unstarted(store, rng, sampler, pools, ranges);
        session.discard();
        session.generate();
        session.persist();
        session
    }

    /// Draw a new itinerary against the current history.
    ///
    /// Does not commit anything to history and does not persist.
    pub fn generate(&mut self) -> &Itinerary {
        self.itinerary = self
            .sampler
            .draw(&self.pools, &self.ranges, &mut self.history, &mut self.rng);

        info!(
            filled = self.itinerary.filled(),
            shown = self.history.len(),
            "generated itinerary"
        );
        &self.itinerary
    }

    /// Commit the current itinerary to history and draw a new one.
    ///
    /// Resets the carousel to the first page and persists the result.
    pub fn regenerate(&mut self) -> &Itinerary {
        self.history.record_itinerary(&self.itinerary);
        self.generate();
        self.index = 0;
        self.persist();
        &self.itinerary
    }

    /// Pick the venue on carousel page `index` for the detail view.
    ///
    /// The position is snapshotted first so that returning from the detail
    /// view lands on the same page. Returns `None` for an empty slot or an
    /// out-of-range page.
    pub fn select(&mut self, index: usize) -> Option<Selection> {
        let kind = CategoryKind::at_position(index)?;
        self.snapshot_index(index);

        let venue = self.itinerary.get(kind)?.clone();
        debug!(category = %kind, venue = %venue.id, "venue selected");
        Some(Selection::new(kind, venue))
    }

    /// Record the carousel position and persist it on its own.
    pub fn snapshot_index(&mut self, index: usize) {
        self.index = clamp_index(index);
        write_value(&mut self.store, INDEX_KEY, &self.index);
    }

    /// Last recorded carousel position, preferring the persisted value.
    pub fn restore_index(&self) -> usize {
        match read_value::<usize, _>(&self.store, INDEX_KEY) {
            Ok(Some(index)) => clamp_index(index),
            Ok(None) => self.index,
            Err(e) => {
                warn!(error = %e, "unreadable carousel index, using in-memory value");
                self.index
            }
        }
    }

    /// Write itinerary, history and index to the store.
    pub fn persist(&mut self) {
        write_value(&mut self.store, ITINERARY_KEY, &self.itinerary);
        write_value(&mut self.store, HISTORY_KEY, &self.history);
        write_value(&mut self.store, INDEX_KEY, &self.index);
    }

    /// Load state from the store.
    ///
    /// Returns `false` when there is nothing to resume. Malformed state is
    /// removed from the store and also reported as `false`.
    pub fn restore(&mut self) -> bool {
        match self.load_snapshot() {
            Ok(Some(snapshot)) => {
                self.itinerary = snapshot.itinerary;
                self.history = snapshot.history;
                self.index = clamp_index(snapshot.index);
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "discarding malformed session state");
                self.discard();
                false
            }
        }
    }

    /// Forget all session state, in memory and in the store.
    pub fn discard(&mut self) {
        self.itinerary = Itinerary::default();
        self.history = History::new();
        self.index = 0;

        for key in [ITINERARY_KEY, HISTORY_KEY, INDEX_KEY] {
            if let Err(e) = self.store.remove(key) {
                warn!(key, error = %e, "failed to clear session state");
            }
        }
    }

    fn load_snapshot(&self) -> DomainResult<Option<SessionSnapshot>> {
        let Some(itinerary) = read_value::<Itinerary, _>(&self.store, ITINERARY_KEY)? else {
            return Ok(None);
        };
        let history = read_value(&self.store, HISTORY_KEY)?.unwrap_or_default();
        let index = read_value(&self.store, INDEX_KEY)?.unwrap_or_default();

        Ok(Some(SessionSnapshot {
            itinerary,
            history,
            index,
        }))
    }

    /// Itinerary currently on display.
    pub const fn itinerary(&self) -> &Itinerary {
        &self.itinerary
    }

    /// Venues already shown.
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Carousel page in memory.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Price ranges of the current batch.
    pub const fn ranges(&self) -> &CategoryRanges {
        &self.ranges
    }

    /// Candidate pools of the current batch.
    pub const fn pools(&self) -> &VenuePools {
        &self.pools
    }

    /// Backing state store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Copy of the state that [`persist`](Self::persist) writes.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            itinerary: self.itinerary.clone(),
            history: self.history.clone(),
            index: self.index,
        }
    }

    /// Give back the store, e.g. to inspect what was persisted.
    pub fn into_store(self) -> S {
        self.store
    }
}

const fn clamp_index(index: usize) -> usize {
    if index < CAROUSEL_LEN {
        index
    } else {
        0
    }
}

fn write_value<S: StateStore + ?Sized, T: Serialize>(store: &mut S, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(DomainError::from)
        .and_then(|json| store.set(key, &json));

    if let Err(e) = result {
        warn!(key, error = %e, "failed to persist session state");
    }
}

fn read_value<T: DeserializeOwned, S: StateStore + ?Sized>(
    store: &S,
    key: &str,
) -> DomainResult<Option<T>> {
    store
        .get(key)?
        .map(|raw| serde_json::from_str(&raw).map_err(DomainError::from))
        .transpose()
}
