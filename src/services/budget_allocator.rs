//! Splits a total budget into per-category budgets and price ranges.

use crate::domain::models::budget::BASIS_POINTS;
use crate::domain::models::{BudgetRange, BudgetRatios, CategoryBudgets, CategoryKind, CategoryRanges};

/// Headroom applied on top of a category budget, as a fraction `NUM / DEN` (1.1).
const HEADROOM_NUM: u128 = 11;
const HEADROOM_DEN: u128 = 10;

/// Service splitting a total budget into category budgets and acceptance ranges
///
/// `budget(kind) = floor(total * ratio(kind))` and
/// `range(kind).max = floor(budget(kind) * 1.1)`, computed in exact integer
/// arithmetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct BudgetAllocator {
    ratios: BudgetRatios,
}

impl BudgetAllocator {
    /// Create an allocator with the standard 35/30/35 split
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator with custom ratios
    pub const fn with_ratios(ratios: BudgetRatios) -> Self {
        Self { ratios }
    }

    /// Ratios this allocator splits by.
    pub const fn ratios(&self) -> BudgetRatios {
        self.ratios
    }

    /// Split `total` into per-category budgets
    pub fn allocate(&self, total: u64) -> CategoryBudgets {
        let share = |kind: CategoryKind| {
            let scaled = u128::from(total) * u128::from(self.ratios.share(kind))
                / u128::from(BASIS_POINTS);
            // share <= BASIS_POINTS, so scaled <= total
            u64::try_from(scaled).unwrap_or(total)
        };

        CategoryBudgets {
            food: share(CategoryKind::Food),
            cafe: share(CategoryKind::Cafe),
            activity: share(CategoryKind::Activity),
        }
    }

    /// Acceptance window for one category budget: `[0, floor(budget * 1.1)]`
    pub fn range(category_budget: u64) -> BudgetRange {
        let max = u128::from(category_budget) * HEADROOM_NUM / HEADROOM_DEN;
        BudgetRange::up_to(u64::try_from(max).unwrap_or(u64::MAX))
    }

    /// Acceptance windows for every category of an allocation
    pub fn ranges_for(budgets: &CategoryBudgets) -> CategoryRanges {
        CategoryRanges {
            food: Self::range(budgets.food),
            cafe: Self::range(budgets.cafe),
            activity: Self::range(budgets.activity),
        }
    }

    /// Allocate `total` and derive the acceptance windows in one step
    pub fn ranges(&self, total: u64) -> CategoryRanges {
        Self::ranges_for(&self.allocate(total))
    }
}
