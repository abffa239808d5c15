//! Output formatting utilities for the CLI.

use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};
use serde::Serialize;

use crate::domain::models::{CategoryKind, CategoryRanges, Itinerary, Selection, Venue};

/// A command result printable as text or JSON.
pub trait CommandOutput: Serialize {
    /// Text form for the terminal.
    fn to_human(&self) -> String;
    /// JSON form for `--json`.
    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Print `result` to stdout in the requested form.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// `850 m` below a kilometre, `1.2 km` from there on.
pub fn format_distance(metres: f64) -> String {
    let rounded = metres.round();
    if rounded < 1000.0 {
        format!("{rounded} m")
    } else {
        format!("{:.1} km", metres / 1000.0)
    }
}

fn format_price(venue: &Venue) -> String {
    venue
        .known_price()
        .map_or_else(|| "-".to_string(), |price| price.to_string())
}

/// Current itinerary as printed by `recommend`, `regenerate` and `show`.
#[derive(Debug, Serialize)]
pub struct ItineraryOutput {
    /// Itinerary to print.
    pub itinerary: Itinerary,
    /// Price ranges the draw used.
    pub ranges: CategoryRanges,
    /// Carousel page.
    pub index: usize,
    /// Venues shown so far in this session.
    pub shown: usize,
}

impl CommandOutput for ItineraryOutput {
    fn to_human(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("#").add_attribute(Attribute::Bold),
                Cell::new("Category").add_attribute(Attribute::Bold),
                Cell::new("Venue").add_attribute(Attribute::Bold),
                Cell::new("Price").add_attribute(Attribute::Bold),
                Cell::new("Up to").add_attribute(Attribute::Bold),
                Cell::new("Distance").add_attribute(Attribute::Bold),
            ]);

        for (kind, venue) in self.itinerary.slots() {
            let page = kind.position();
            let marker = if page == self.index {
                format!("> {page}")
            } else {
                format!("  {page}")
            };
            let limit = if kind.is_priced() {
                self.ranges.get(kind).max.to_string()
            } else {
                "-".to_string()
            };

            match venue {
                Some(venue) => table.add_row(vec![
                    marker,
                    kind.to_string(),
                    truncate(&venue.name, 32),
                    format_price(venue),
                    limit,
                    venue.distance.map_or_else(|| "-".to_string(), format_distance),
                ]),
                None => table.add_row(vec![
                    marker,
                    kind.to_string(),
                    "(nothing within budget)".to_string(),
                    "-".to_string(),
                    limit,
                    "-".to_string(),
                ]),
            };
        }

        format!("{table}\n{} venue(s) shown so far", self.shown)
    }
}

/// Venue handed to the detail view by `select`.
#[derive(Debug, Serialize)]
pub struct SelectionOutput {
    /// Carousel page.
    pub index: usize,
    /// `None` when the page is empty or out of range.
    pub selection: Option<Selection>,
}

impl CommandOutput for SelectionOutput {
    fn to_human(&self) -> String {
        let Some(selection) = &self.selection else {
            return match CategoryKind::at_position(self.index) {
                Some(kind) => format!("No {kind} venue in the current itinerary."),
                None => format!("No carousel page {}.", self.index),
            };
        };

        let venue = &selection.venue;
        let mut lines = vec![
            format!("{} ({})", venue.name, selection.category),
            format!("  ID:          {}", venue.id),
            format!("  Detail view: {}", selection.detail_kind),
        ];
        if !venue.category.is_empty() {
            lines.push(format!("  Tags:        {}", venue.category));
        }
        if let Some(price) = venue.known_price() {
            lines.push(format!("  Price:       {price}"));
        }
        if let Some(distance) = venue.distance {
            lines.push(format!("  Distance:    {}", format_distance(distance)));
        }
        if let Some(address) = &venue.address {
            lines.push(format!("  Address:     {address}"));
        }
        if let Some(reviews) = venue.review_count {
            lines.push(format!("  Reviews:     {reviews}"));
        }
        lines.join("\n")
    }
}

/// Plain status line, e.g. after `reset`.
#[derive(Debug, Serialize)]
pub struct MessageOutput {
    /// Text to print.
    pub message: String,
}

impl CommandOutput for MessageOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }
}
