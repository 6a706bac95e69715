//! User-adjustable filter and sort state for result views
//!
//! These types are mutated only by the presentation layer; they never mutate
//! offers, only select and reorder a view over a cached candidate set.

use serde::{Deserialize, Serialize};

/// Sentinel for the stops filter meaning "any number of stops"
pub const STOPS_ANY: i32 = -1;

/// Conjunctive filter over a candidate set; all active dimensions must match
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
	/// Inclusive `[min, max]` price window
	pub price_range: Option<(f64, f64)>,

	/// Minimum acceptable rating; offers without a rating are excluded
	pub min_rating: Option<f64>,

	/// Exact stop count for flights, or [`STOPS_ANY`]
	pub stops: Option<i32>,

	/// Required amenities; the offer's set must be a superset
	pub amenities: Vec<String>,
}

impl FilterSpec {
	/// A filter that lets every offer through
	pub fn permissive() -> Self {
		Self::default()
	}

	pub fn is_permissive(&self) -> bool {
		self.price_range.is_none()
			&& self.min_rating.is_none()
			&& (self.stops.is_none() || self.stops == Some(STOPS_ANY))
			&& self.amenities.is_empty()
	}
}

/// Sort key for ordered result views.
///
/// Wire values match the presentation layer's sort selector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SortKey {
	#[default]
	#[serde(rename = "price")]
	PriceAsc,
	#[serde(rename = "price-desc")]
	PriceDesc,
	#[serde(rename = "rating")]
	RatingDesc,
	#[serde(rename = "duration")]
	DurationAsc,
	#[serde(rename = "departure")]
	DepartureAsc,
}
