//! Venue model and the per-category candidate pools.
//!
//! The upstream recommendation API is loose about field names and types
//! (`place_id` vs `id`, numeric vs string identifiers, category as a string or
//! a list). Deserialization goes through [`RawVenue`] and normalizes all of
//! that into a single canonical [`Venue`]; serialization always writes the
//! canonical field names.

use serde::{Deserialize, Serialize};

use super::category::CategoryKind;

/// A recommendable place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVenue")]
pub struct Venue {
    /// Identifier, unique within its pool.
    #[serde(rename = "place_id")]
    pub id: String,

    /// Display name.
    #[serde(rename = "place_name")]
    pub name: String,

    /// Category label as reported upstream (e.g. "한식", "카페, 디저트").
    pub category: String,

    /// Thumbnail image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// Typical price in the smallest currency unit; `None` or `<= 0` is unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,

    /// Distance from the requester in metres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,

    /// Street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Number of upstream reviews.
    #[serde(rename = "reviewCount", skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u64>,
}

impl Venue {
    /// Venue with only an id and a name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            thumbnail: None,
            price: None,
            distance: None,
            address: None,
            review_count: None,
        }
    }

    /// Set the typical price.
    pub fn with_price(mut self, price: i64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the category label.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the distance in metres.
    pub fn with_distance(mut self, metres: f64) -> Self {
        self.distance = Some(metres);
        self
    }

    /// Price if it is known, i.e. present and strictly positive.
    pub fn known_price(&self) -> Option<u64> {
        self.price
            .filter(|p| *p > 0)
            .and_then(|p| u64::try_from(p).ok())
    }
}

/// Number-or-string field as the upstream sends it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Loose {
    Number(serde_json::Number),
    Text(String),
}

impl Loose {
    fn into_text(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CategoryField {
    One(String),
    Many(Vec<String>),
}

/// Wire shape accepted from the upstream and from persisted state.
#[derive(Debug, Deserialize)]
struct RawVenue {
    place_id: Option<Loose>,
    id: Option<Loose>,
    place_name: Option<String>,
    title: Option<String>,
    category: Option<CategoryField>,
    category_name: Option<String>,
    thumbnail: Option<String>,
    price: Option<Loose>,
    avg_price: Option<Loose>,
    distance: Option<Loose>,
    address: Option<String>,
    #[serde(rename = "reviewCount")]
    review_count: Option<u64>,
}

impl TryFrom<RawVenue> for Venue {
    type Error = String;

    #[allow(clippy::cast_possible_truncation)]
    fn try_from(raw: RawVenue) -> Result<Self, Self::Error> {
        let id = raw
            .place_id
            .or(raw.id)
            .map(Loose::into_text)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| "venue is missing place_id/id".to_string())?;

        let category = match raw.category {
            Some(CategoryField::One(label)) => label,
            Some(CategoryField::Many(labels)) => labels.join(", "),
            None => raw.category_name.unwrap_or_default(),
        };

        let price = raw
            .price
            .or(raw.avg_price)
            .and_then(|p| p.as_f64())
            .filter(|p| p.is_finite())
            .map(|p| p.round() as i64);

        Ok(Self {
            id,
            name: raw.place_name.or(raw.title).unwrap_or_default(),
            category,
            thumbnail: raw.thumbnail.filter(|t| !t.is_empty()),
            price,
            distance: raw.distance.and_then(|d| d.as_f64()),
            address: raw.address,
            review_count: raw.review_count,
        })
    }
}

/// Candidate pools for one recommendation request, one per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenuePools {
    /// Food value.
    pub food: Vec<Venue>,
    /// Cafe value.
    pub cafe: Vec<Venue>,
    /// Activity value.
    pub activity: Vec<Venue>,
}

impl VenuePools {
    /// Pool for `kind`.
    pub fn get(&self, kind: CategoryKind) -> &[Venue] {
        match kind {
            CategoryKind::Food => &self.food,
            CategoryKind::Cafe => &self.cafe,
            CategoryKind::Activity => &self.activity,
        }
    }

    /// Replace the pool for `kind`.
    pub fn set(&mut self, kind: CategoryKind, venues: Vec<Venue>) {
        match kind {
            CategoryKind::Food => self.food = venues,
            CategoryKind::Cafe => self.cafe = venues,
            CategoryKind::Activity => self.activity = venues,
        }
    }

    /// Venues across all pools.
    pub fn total(&self) -> usize {
        self.food.len() + self.cafe.len() + self.activity.len()
    }
}

/// Decode an upstream pool item by item, dropping records that do not parse.
pub fn parse_pool(values: Vec<serde_json::Value>) -> Vec<Venue> {
    let total = values.len();
    let venues: Vec<Venue> = values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<Venue>(value) {
            Ok(venue) => Some(venue),
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed venue record");
                None
            }
        })
        .collect();

    if venues.len() < total {
        tracing::warn!(
            kept = venues.len(),
            dropped = total - venues.len(),
            "dropped malformed venue records"
        );
    }
    venues
}
