//! Offer domain model: one bookable flight/hotel/car unit at a price

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::queries::{CabinClass, TravelVertical};

pub mod response;

pub use response::{OffersResponse, SearchResponse};

/// Transmission type for rental car offers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Transmission {
	Automatic,
	Manual,
}

/// Flight-specific offer fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
	pub airline: String,
	pub flight_number: String,
	pub origin: String,
	pub destination: String,
	pub departure_date: NaiveDate,
	pub departure_time: NaiveTime,
	pub arrival_time: NaiveTime,
	pub duration_minutes: u32,
	pub stops: u32,
	pub aircraft: Option<String>,
	pub cabin_class: CabinClass,
}

/// Hotel-specific offer fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HotelOffer {
	pub name: String,
	pub location: String,
	pub rating: f64,
	pub reviews: u32,
	pub checkin: NaiveDate,
	pub amenities: Vec<String>,
	pub distance_km: Option<f64>,
}

/// Rental-car-specific offer fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CarOffer {
	pub model: String,
	pub car_type: String,
	pub company: String,
	pub transmission: Transmission,
	pub seats: u32,
	pub pickup_location: String,
	pub pickup_date: NaiveDate,
	pub features: Vec<String>,
	pub rating: Option<f64>,
}

/// Vertical-specific payload of an offer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "vertical", rename_all = "lowercase")]
pub enum OfferDetails {
	Flight(FlightOffer),
	Hotel(HotelOffer),
	Car(CarOffer),
}

/// One bookable unit at a price, as returned by a supplier adapter.
///
/// Offers are immutable; ownership flows adapter -> aggregator -> filter
/// engine -> presentation with no mutation on the way.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
	/// Stable offer id, unique together with `supplier_id`
	pub offer_id: String,

	/// Supplier that returned this offer
	pub supplier_id: String,

	/// Total price in `currency` units
	pub price: f64,

	/// ISO 4217 currency code
	pub currency: String,

	#[serde(flatten)]
	pub details: OfferDetails,

	/// When the aggregator received this offer
	pub collected_at: DateTime<Utc>,
}

impl Offer {
	pub fn vertical(&self) -> TravelVertical {
		match self.details {
			OfferDetails::Flight(_) => TravelVertical::Flight,
			OfferDetails::Hotel(_) => TravelVertical::Hotel,
			OfferDetails::Car(_) => TravelVertical::Car,
		}
	}

	/// Supplier-independent deduplication key.
	///
	/// Two offers with the same fingerprint describe the same bookable unit
	/// even when published by different suppliers (e.g. a meta-supplier
	/// re-listing another's inventory).
	pub fn fingerprint(&self) -> String {
		match &self.details {
			OfferDetails::Flight(f) => format!(
				"F|{}|{}|{}|{}",
				f.origin.to_lowercase(),
				f.destination.to_lowercase(),
				f.departure_date,
				f.flight_number.to_lowercase(),
			),
			OfferDetails::Hotel(h) => format!(
				"H|{}|{}|{}",
				h.name.trim().to_lowercase(),
				h.location.trim().to_lowercase(),
				h.checkin,
			),
			OfferDetails::Car(c) => format!(
				"C|{}|{}|{}|{}",
				c.model.trim().to_lowercase(),
				c.company.trim().to_lowercase(),
				c.pickup_location.to_lowercase(),
				c.pickup_date,
			),
		}
	}

	/// Guest or company rating, when the vertical carries one
	pub fn rating(&self) -> Option<f64> {
		match &self.details {
			OfferDetails::Flight(_) => None,
			OfferDetails::Hotel(h) => Some(h.rating),
			OfferDetails::Car(c) => c.rating,
		}
	}

	/// Stop count for flight offers
	pub fn stops(&self) -> Option<u32> {
		match &self.details {
			OfferDetails::Flight(f) => Some(f.stops),
			_ => None,
		}
	}

	/// Amenities (hotels) or features (cars) advertised with the offer
	pub fn amenities(&self) -> &[String] {
		match &self.details {
			OfferDetails::Flight(_) => &[],
			OfferDetails::Hotel(h) => &h.amenities,
			OfferDetails::Car(c) => &c.features,
		}
	}

	pub fn duration_minutes(&self) -> Option<u32> {
		match &self.details {
			OfferDetails::Flight(f) => Some(f.duration_minutes),
			_ => None,
		}
	}

	pub fn departure_time(&self) -> Option<NaiveTime> {
		match &self.details {
			OfferDetails::Flight(f) => Some(f.departure_time),
			_ => None,
		}
	}
}

/// Record of an offer dropped during deduplication, kept for audit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DroppedDuplicate {
	/// Shared offer fingerprint
	pub fingerprint: String,

	/// Supplier whose (more expensive) copy was discarded
	pub supplier_id: String,

	/// Price of the discarded copy
	pub price: f64,
}

/// Deduplicated union of offers for one query.
///
/// An empty set is a valid aggregation outcome, distinct from supplier
/// failures which are reported via [`AggregationMetadata`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSet {
	/// Fingerprint of the query this set answers
	pub query_fingerprint: String,

	pub offers: Vec<Offer>,

	/// Duplicates discarded while merging supplier results
	pub dropped_duplicates: Vec<DroppedDuplicate>,

	pub created_at: DateTime<Utc>,
}

impl CandidateSet {
	pub fn new(query_fingerprint: String) -> Self {
		Self {
			query_fingerprint,
			offers: Vec::new(),
			dropped_duplicates: Vec::new(),
			created_at: Utc::now(),
		}
	}

	pub fn len(&self) -> usize {
		self.offers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.offers.is_empty()
	}
}

/// Per-supplier failure noted during an aggregation round
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SupplierFailure {
	pub supplier_id: String,
	pub reason: String,
}

/// Metadata describing how an aggregation round went.
///
/// Surfaced alongside the [`CandidateSet`] so the presentation layer can
/// show a "results may be incomplete" notice on partial failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AggregationMetadata {
	pub total_duration_ms: u64,
	pub per_supplier_timeout_ms: u64,
	pub global_timeout_ms: u64,
	pub suppliers_queried: usize,
	pub suppliers_succeeded: usize,
	pub failed_suppliers: Vec<SupplierFailure>,
	pub timed_out_suppliers: Vec<String>,
	/// Whether the global deadline cut the round short
	pub deadline_hit: bool,
}

impl AggregationMetadata {
	pub fn is_partial(&self) -> bool {
		!self.failed_suppliers.is_empty() || !self.timed_out_suppliers.is_empty()
	}
}
