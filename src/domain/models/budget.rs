//! Budget split and price-acceptance windows.

use serde::{Deserialize, Serialize};

use super::category::CategoryKind;
use crate::domain::errors::{DomainError, DomainResult};

/// Basis points in a whole budget.
pub const BASIS_POINTS: u32 = 10_000;

/// Share of the total budget given to each category, in basis points.
///
/// The shares always sum to [`BASIS_POINTS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RatioShares", into = "RatioShares")]
pub struct BudgetRatios {
    food: u32,
    cafe: u32,
    activity: u32,
}

/// Unvalidated wire form of [`BudgetRatios`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RatioShares {
    /// Food share in basis points.
    pub food: u32,
    /// Cafe share in basis points.
    pub cafe: u32,
    /// Activity share in basis points.
    pub activity: u32,
}

impl BudgetRatios {
    /// food 0.35, cafe 0.30, activity 0.35
    pub const DEFAULT: Self = Self {
        food: 3_500,
        cafe: 3_000,
        activity: 3_500,
    };

    /// Ratios from basis points; they must sum to 10 000.
    pub fn new(food: u32, cafe: u32, activity: u32) -> DomainResult<Self> {
        let sum = food.saturating_add(cafe).saturating_add(activity);
        if sum != BASIS_POINTS {
            return Err(DomainError::InvalidRatios(sum));
        }
        Ok(Self {
            food,
            cafe,
            activity,
        })
    }

    /// Basis points assigned to `kind`.
    pub const fn share(&self, kind: CategoryKind) -> u32 {
        match kind {
            CategoryKind::Food => self.food,
            CategoryKind::Cafe => self.cafe,
            CategoryKind::Activity => self.activity,
        }
    }
}

impl Default for BudgetRatios {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<RatioShares> for BudgetRatios {
    type Error = DomainError;

    fn try_from(shares: RatioShares) -> Result<Self, Self::Error> {
        Self::new(shares.food, shares.cafe, shares.activity)
    }
}

impl From<BudgetRatios> for RatioShares {
    fn from(ratios: BudgetRatios) -> Self {
        Self {
            food: ratios.food,
            cafe: ratios.cafe,
            activity: ratios.activity,
        }
    }
}

/// Per-category budgets derived from a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryBudgets {
    /// Food budget.
    pub food: u64,
    /// Cafe budget.
    pub cafe: u64,
    /// Activity budget.
    pub activity: u64,
}

impl CategoryBudgets {
    /// Budget for `kind`.
    pub const fn get(&self, kind: CategoryKind) -> u64 {
        match kind {
            CategoryKind::Food => self.food,
            CategoryKind::Cafe => self.cafe,
            CategoryKind::Activity => self.activity,
        }
    }

    /// Sum of the three budgets; at most the total.
    pub const fn sum(&self) -> u64 {
        self.food + self.cafe + self.activity
    }
}

/// Inclusive price-acceptance window for one category.
///
/// `min` is always 0: cheap venues are never rejected for being too cheap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BudgetRange {
    /// Lower bound, always 0.
    pub min: u64,
    /// Upper bound, inclusive.
    pub max: u64,
}

impl BudgetRange {
    /// Range `[0, max]`.
    pub const fn up_to(max: u64) -> Self {
        Self { min: 0, max }
    }

    /// Whether `price` lies inside the range.
    pub const fn contains(&self, price: u64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Acceptance windows for all three categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryRanges {
    /// Food price range.
    pub food: BudgetRange,
    /// Cafe price range.
    pub cafe: BudgetRange,
    /// Activity price range.
    pub activity: BudgetRange,
}

impl CategoryRanges {
    /// Range for `kind`.
    pub const fn get(&self, kind: CategoryKind) -> BudgetRange {
        match kind {
            CategoryKind::Food => self.food,
            CategoryKind::Cafe => self.cafe,
            CategoryKind::Activity => self.activity,
        }
    }
}
