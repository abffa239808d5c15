//! Venue categories and the detail views they hand off to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the three itinerary slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Restaurant meal.
    Food,
    /// Coffee or dessert stop.
    Cafe,
    /// Leisure activity; never filtered by price.
    Activity,
}

impl CategoryKind {
    /// All categories in carousel order.
    pub const ALL: [Self; 3] = [Self::Food, Self::Cafe, Self::Activity];

    /// Lowercase name, as used in JSON keys.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Cafe => "cafe",
            Self::Activity => "activity",
        }
    }

    /// Whether venues in this category are filtered by price.
    ///
    /// Activities are treated as unpriced.
    pub const fn is_priced(self) -> bool {
        !matches!(self, Self::Activity)
    }

    /// The detail view a selected venue of this category opens in.
    pub const fn detail_kind(self) -> DetailKind {
        match self {
            Self::Food | Self::Cafe => DetailKind::Restaurant,
            Self::Activity => DetailKind::Activity,
        }
    }

    /// Carousel position of this category.
    pub const fn position(self) -> usize {
        match self {
            Self::Food => 0,
            Self::Cafe => 1,
            Self::Activity => 2,
        }
    }

    /// Category shown at a carousel position, if the position is in range.
    pub fn at_position(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "food" | "restaurant" => Ok(Self::Food),
            "cafe" => Ok(Self::Cafe),
            "activity" | "leisure" => Ok(Self::Activity),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// Detail view label passed along with a selected venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailKind {
    /// Restaurant detail page, used for food and cafe.
    Restaurant,
    /// Activity detail page.
    Activity,
}

impl DetailKind {
    /// Lowercase name of the detail view.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::Activity => "activity",
        }
    }
}

impl fmt::Display for DetailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_round_trip() {
        for kind in CategoryKind::ALL {
            assert_eq!(CategoryKind::at_position(kind.position()), Some(kind));
        }
        assert_eq!(CategoryKind::at_position(3), None);
    }

    #[test]
    fn test_detail_kind() {
        assert_eq!(CategoryKind::Food.detail_kind(), DetailKind::Restaurant);
        assert_eq!(CategoryKind::Cafe.detail_kind(), DetailKind::Restaurant);
        assert_eq!(CategoryKind::Activity.detail_kind(), DetailKind::Activity);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Cafe".parse::<CategoryKind>(), Ok(CategoryKind::Cafe));
        assert_eq!("leisure".parse::<CategoryKind>(), Ok(CategoryKind::Activity));
        assert!("bar".parse::<CategoryKind>().is_err());
    }

    #[test]
    fn test_only_activity_is_unpriced() {
        assert!(CategoryKind::Food.is_priced());
        assert!(CategoryKind::Cafe.is_priced());
        assert!(!CategoryKind::Activity.is_priced());
    }
}
