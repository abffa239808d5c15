//! Price-fitness and history filtering of a category pool.

use std::collections::BTreeSet;

use crate::domain::models::{BudgetRange, CategoryKind, Venue};

/// Whether `venue` is affordable within `range` for `category`.
///
/// Activities are unpriced and always fit. For priced categories the venue
/// needs a known price (present and > 0) no greater than `range.max`.
pub fn fits_budget(venue: &Venue, range: BudgetRange, category: CategoryKind) -> bool {
    if !category.is_priced() {
        return true;
    }
    venue.known_price().is_some_and(|price| range.contains(price))
}

/// Venues of `pool` that fit `range` and are not in `excluded`, in pool order.
pub fn filter_candidates<'a>(
    pool: &'a [Venue],
    range: BudgetRange,
    excluded: &BTreeSet<String>,
    category: CategoryKind,
) -> Vec<&'a Venue> {
    pool.iter()
        .filter(|venue| !excluded.contains(&venue.id))
        .filter(|venue| fits_budget(venue, range, category))
        .collect()
}
