//! Per-category venue sampling.
//!
//! Each slot is drawn by filtering the category pool once (price fitness plus
//! history exclusion) and picking uniformly among what is left. An empty
//! eligible set yields `None` straight away; there is nothing to retry against.

use tracing::debug;

use super::candidate_filter::filter_candidates;
use crate::domain::models::{
    BudgetRange, CategoryKind, CategoryRanges, ExhaustionPolicy, History, Itinerary, Venue,
    VenuePools,
};
use crate::domain::ports::RandomSource;

use std::collections::BTreeSet;

/// Draws one venue per category.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItinerarySampler {
    policy: ExhaustionPolicy,
}

impl ItinerarySampler {
    /// Sampler applying `policy` when a category runs out.
    pub const fn new(policy: ExhaustionPolicy) -> Self {
        Self { policy }
    }

    /// Policy applied once history excludes every affordable venue.
    pub const fn policy(&self) -> ExhaustionPolicy {
        self.policy
    }

    /// Draw a single venue from `pool`, or `None` if nothing is eligible.
    pub fn sample<R: RandomSource + ?Sized>(
        pool: &[Venue],
        range: BudgetRange,
        excluded: &BTreeSet<String>,
        category: CategoryKind,
        rng: &mut R,
    ) -> Option<Venue> {
        let eligible = filter_candidates(pool, range, excluded, category);
        if eligible.is_empty() {
            return None;
        }

        let index = rng.pick_index(eligible.len()).min(eligible.len() - 1);
        Some(eligible[index].clone())
    }

    /// Draw a whole itinerary, excluding everything in `history`.
    ///
    /// `history` is only modified under [`ExhaustionPolicy::ResetHistory`],
    /// when a category's history is cleared because it excluded every
    /// affordable venue. A category with nothing affordable at all keeps its
    /// history.
    pub fn draw<R: RandomSource + ?Sized>(
        &self,
        pools: &VenuePools,
        ranges: &CategoryRanges,
        history: &mut History,
        rng: &mut R,
    ) -> Itinerary {
        Itinerary::from_slots(|kind| {
            let pool = pools.get(kind);
            let range = ranges.get(kind);

            if let Some(venue) = Self::sample(pool, range, history.excluded(kind), kind, rng) {
                return Some(venue);
            }

            let resettable = self.policy == ExhaustionPolicy::ResetHistory
                && !history.excluded(kind).is_empty()
                && !filter_candidates(pool, range, &BTreeSet::new(), kind).is_empty();

            if resettable {
                debug!(
                    category = %kind,
                    shown = history.excluded(kind).len(),
                    "category exhausted, resetting history"
                );
                history.clear(kind);
                return Self::sample(pool, range, history.excluded(kind), kind, rng);
            }

            debug!(category = %kind, pool = pool.len(), "no eligible venue");
            None
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::random::RngSource;
    use crate::services::BudgetAllocator;

    /// Always picks the same position.
    struct Fixed(usize);

    impl RandomSource for Fixed {
        fn pick_index(&mut self, _len: usize) -> usize {
            self.0
        }
    }

    fn priced(id: &str, price: i64) -> Venue {
        Venue::new(id, id).with_price(price)
    }

    fn scenario_pools() -> VenuePools {
        VenuePools {
            food: vec![priced("f20", 20_000), priced("f40", 40_000), priced("f90", 90_000)],
            cafe: vec![priced("c5", 5_000), priced("c8", 8_000), priced("c50", 50_000)],
            activity: vec![
                Venue::new("a1", "a1"),
                Venue::new("a2", "a2"),
                Venue::new("a3", "a3"),
            ],
        }
    }

    #[test]
    fn test_sample_empty_pool_is_none() {
        let mut rng = RngSource::seeded(1);
        let picked = ItinerarySampler::sample(
            &[],
            BudgetRange::up_to(1_000),
            &BTreeSet::new(),
            CategoryKind::Food,
            &mut rng,
        );
        assert!(picked.is_none());
    }

    #[test]
    fn test_sample_clamps_out_of_range_index() {
        let pool = vec![priced("a", 1), priced("b", 1)];
        let picked = ItinerarySampler::sample(
            &pool,
            BudgetRange::up_to(1),
            &BTreeSet::new(),
            CategoryKind::Food,
            &mut Fixed(99),
        );
        assert_eq!(picked.unwrap().id, "b");
    }

    #[test]
    fn test_draw_budget_scenario() {
        let pools = scenario_pools();
        let ranges = BudgetAllocator::new().ranges(100_000);
        let sampler = ItinerarySampler::default();

        for seed in 0..50 {
            let mut history = History::new();
            let itinerary = sampler.draw(&pools, &ranges, &mut history, &mut RngSource::seeded(seed));

            assert_eq!(itinerary.food.as_ref().unwrap().id, "f20");
            let cafe = itinerary.cafe.as_ref().unwrap().id.as_str();
            assert!(cafe == "c5" || cafe == "c8", "unexpected cafe {cafe}");
            let activity = itinerary.activity.as_ref().unwrap().id.as_str();
            assert!(["a1", "a2", "a3"].contains(&activity));
            assert!(history.is_empty());
        }
    }

    #[test]
    fn test_draw_zero_budget_leaves_priced_slots_empty() {
        let pools = scenario_pools();
        let ranges = BudgetAllocator::new().ranges(0);
        let mut history = History::new();
        let itinerary =
            ItinerarySampler::default().draw(&pools, &ranges, &mut history, &mut Fixed(0));

        assert!(itinerary.food.is_none());
        assert!(itinerary.cafe.is_none());
        assert_eq!(itinerary.activity.unwrap().id, "a1");
    }

    #[test]
    fn test_draw_respects_history() {
        let pools = scenario_pools();
        let ranges = BudgetAllocator::new().ranges(100_000);
        let mut history = History::new();
        history.record(CategoryKind::Cafe, "c5");
        history.record(CategoryKind::Activity, "a1");
        history.record(CategoryKind::Activity, "a2");

        let itinerary =
            ItinerarySampler::default().draw(&pools, &ranges, &mut history, &mut Fixed(0));

        assert_eq!(itinerary.cafe.unwrap().id, "c8");
        assert_eq!(itinerary.activity.unwrap().id, "a3");
    }

    #[test]
    fn test_keep_empty_policy_does_not_repeat() {
        let pools = scenario_pools();
        let ranges = BudgetAllocator::new().ranges(100_000);
        let mut history = History::new();
        history.record(CategoryKind::Food, "f20");

        let itinerary = ItinerarySampler::new(ExhaustionPolicy::KeepEmpty).draw(
            &pools,
            &ranges,
            &mut history,
            &mut Fixed(0),
        );

        assert!(itinerary.food.is_none());
        assert!(history.contains(CategoryKind::Food, "f20"));
    }

    #[test]
    fn test_reset_history_policy_allows_repeat() {
        let pools = scenario_pools();
        let ranges = BudgetAllocator::new().ranges(100_000);
        let mut history = History::new();
        history.record(CategoryKind::Food, "f20");
        history.record(CategoryKind::Cafe, "c5");

        let itinerary = ItinerarySampler::new(ExhaustionPolicy::ResetHistory).draw(
            &pools,
            &ranges,
            &mut history,
            &mut Fixed(0),
        );

        assert_eq!(itinerary.food.unwrap().id, "f20");
        assert!(!history.contains(CategoryKind::Food, "f20"));
        // cafe still had c8 available, so its history is untouched
        assert_eq!(itinerary.cafe.unwrap().id, "c8");
        assert!(history.contains(CategoryKind::Cafe, "c5"));
    }

    #[test]
    fn test_reset_history_with_nothing_affordable_stays_empty() {
        let pools = scenario_pools();
        let ranges = BudgetAllocator::new().ranges(0);
        let mut history = History::new();
        history.record(CategoryKind::Food, "f20");

        let itinerary = ItinerarySampler::new(ExhaustionPolicy::ResetHistory).draw(
            &pools,
            &ranges,
            &mut history,
            &mut Fixed(0),
        );

        assert!(itinerary.food.is_none());
        assert!(itinerary.cafe.is_none());
        // nothing was affordable, so the shown venue stays excluded
        assert!(history.contains(CategoryKind::Food, "f20"));
    }

    #[test]
    fn test_cafe_pick_is_roughly_uniform() {
        let pools = scenario_pools();
        let ranges = BudgetAllocator::new().ranges(100_000);
        let mut rng = RngSource::seeded(42);
        let mut c5 = 0;

        for _ in 0..2_000 {
            let picked = ItinerarySampler::sample(
                &pools.cafe,
                ranges.cafe,
                &BTreeSet::new(),
                CategoryKind::Cafe,
                &mut rng,
            )
            .unwrap();
            if picked.id == "c5" {
                c5 += 1;
            }
        }

        assert!((800..1_200).contains(&c5), "c5 picked {c5} of 2000");
    }
}
