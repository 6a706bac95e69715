//! Normalized search queries and the raw-form normalizer

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub mod errors;
pub mod request;

pub use errors::QueryValidationError;
pub use request::RawSearchRequest;

/// Result type for query validation operations
pub type QueryValidationResult<T> = Result<T, QueryValidationError>;

/// Travel vertical a query or offer belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TravelVertical {
	Flight,
	Hotel,
	Car,
}

impl TravelVertical {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Flight => "flight",
			Self::Hotel => "hotel",
			Self::Car => "car",
		}
	}
}

impl std::fmt::Display for TravelVertical {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Cabin class for flight queries and offers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CabinClass {
	#[default]
	Economy,
	Premium,
	Business,
	First,
}

impl CabinClass {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Economy => "economy",
			Self::Premium => "premium",
			Self::Business => "business",
			Self::First => "first",
		}
	}
}

/// Normalized flight search query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightQuery {
	/// Origin location, lowercased and trimmed
	pub origin: String,

	/// Destination location, lowercased and trimmed
	pub destination: String,

	/// Outbound date
	pub departure: NaiveDate,

	/// Return date for round trips
	pub return_date: Option<NaiveDate>,

	/// Number of travellers (>= 1)
	pub passengers: u32,

	/// Requested cabin class
	pub cabin_class: CabinClass,
}

/// Normalized hotel search query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HotelQuery {
	/// Destination city or area, lowercased and trimmed
	pub destination: String,

	pub checkin: NaiveDate,

	pub checkout: NaiveDate,

	/// Number of guests (>= 1)
	pub guests: u32,

	/// Number of rooms (>= 1)
	pub rooms: u32,
}

/// Normalized rental car search query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CarQuery {
	/// Pick-up location, lowercased and trimmed
	pub pickup_location: String,

	/// Drop-off location; equals pick-up for same-location rentals
	pub dropoff_location: String,

	pub pickup_date: NaiveDate,

	pub dropoff_date: NaiveDate,

	pub pickup_time: Option<NaiveTime>,

	pub dropoff_time: Option<NaiveTime>,
}

/// Fully normalized, vertical-tagged search query
///
/// Produced by [`RawSearchRequest::normalize`] and immutable afterwards.
/// All downstream stages (adapters, aggregator, cache) consume it read-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "vertical", rename_all = "lowercase")]
pub enum QuerySpec {
	Flight(FlightQuery),
	Hotel(HotelQuery),
	Car(CarQuery),
}

impl QuerySpec {
	pub fn vertical(&self) -> TravelVertical {
		match self {
			Self::Flight(_) => TravelVertical::Flight,
			Self::Hotel(_) => TravelVertical::Hotel,
			Self::Car(_) => TravelVertical::Car,
		}
	}

	/// Deterministic cache key over the normalized query fields.
	///
	/// Filters and sort order are intentionally excluded: they are applied
	/// downstream of the cache and must never force a new aggregation.
	pub fn fingerprint(&self) -> String {
		match self {
			Self::Flight(q) => format!(
				"flight|{}|{}|{}|{}|p{}|{}",
				q.origin,
				q.destination,
				q.departure,
				q.return_date
					.map(|d| d.to_string())
					.unwrap_or_else(|| "-".to_string()),
				q.passengers,
				q.cabin_class.as_str(),
			),
			Self::Hotel(q) => format!(
				"hotel|{}|{}|{}|g{}|r{}",
				q.destination, q.checkin, q.checkout, q.guests, q.rooms
			),
			Self::Car(q) => format!(
				"car|{}|{}|{}|{}|{}|{}",
				q.pickup_location,
				q.dropoff_location,
				q.pickup_date,
				q.dropoff_date,
				q.pickup_time
					.map(|t| t.format("%H:%M").to_string())
					.unwrap_or_else(|| "-".to_string()),
				q.dropoff_time
					.map(|t| t.format("%H:%M").to_string())
					.unwrap_or_else(|| "-".to_string()),
			),
		}
	}
}
