//! Raw search-form input and its normalization into a [`QuerySpec`]

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{
	CabinClass, CarQuery, FlightQuery, HotelQuery, QuerySpec, QueryValidationError,
	QueryValidationResult, TravelVertical,
};

/// Raw, loosely-typed search request as submitted by the presentation layer.
///
/// Every field except `vertical` is optional; which ones are required depends
/// on the vertical and is enforced by [`RawSearchRequest::normalize`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchRequest {
	pub vertical: TravelVertical,

	// Flight fields
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub origin: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub destination: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub departure_date: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub return_date: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub passengers: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cabin_class: Option<CabinClass>,

	// Hotel fields
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub checkin: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub checkout: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub guests: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub rooms: Option<u32>,

	// Car fields
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pickup_location: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub dropoff_location: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pickup_date: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub dropoff_date: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pickup_time: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub dropoff_time: Option<String>,
}

impl RawSearchRequest {
	/// Validate and canonicalize this request into a [`QuerySpec`].
	///
	/// Locations are trimmed and lowercased. Location-to-IATA/city-code
	/// resolution is a collaborator concern and deliberately not done here.
	pub fn normalize(&self) -> QueryValidationResult<QuerySpec> {
		match self.vertical {
			TravelVertical::Flight => self.normalize_flight(),
			TravelVertical::Hotel => self.normalize_hotel(),
			TravelVertical::Car => self.normalize_car(),
		}
	}

	fn normalize_flight(&self) -> QueryValidationResult<QuerySpec> {
		let origin = required_location(&self.origin, "origin")?;
		let destination = required_location(&self.destination, "destination")?;
		let departure = required_date(&self.departure_date, "departureDate")?;
		let return_date = optional_date(&self.return_date, "returnDate")?;

		if let Some(ret) = return_date {
			if ret < departure {
				return Err(QueryValidationError::InvertedDateRange {
					start_field: "departureDate".to_string(),
					start: departure.to_string(),
					end_field: "returnDate".to_string(),
					end: ret.to_string(),
				});
			}
		}

		let passengers = party_size(self.passengers, "passengers")?;

		Ok(QuerySpec::Flight(FlightQuery {
			origin,
			destination,
			departure,
			return_date,
			passengers,
			cabin_class: self.cabin_class.unwrap_or_default(),
		}))
	}

	fn normalize_hotel(&self) -> QueryValidationResult<QuerySpec> {
		let destination = required_location(&self.destination, "destination")?;
		let checkin = required_date(&self.checkin, "checkin")?;
		let checkout = required_date(&self.checkout, "checkout")?;

		// A zero-night stay is as invalid as an inverted one
		if checkout <= checkin {
			return Err(QueryValidationError::InvertedDateRange {
				start_field: "checkin".to_string(),
				start: checkin.to_string(),
				end_field: "checkout".to_string(),
				end: checkout.to_string(),
			});
		}

		Ok(QuerySpec::Hotel(HotelQuery {
			destination,
			checkin,
			checkout,
			guests: party_size(self.guests, "guests")?,
			rooms: party_size(self.rooms, "rooms")?,
		}))
	}

	fn normalize_car(&self) -> QueryValidationResult<QuerySpec> {
		let pickup_location = required_location(&self.pickup_location, "pickupLocation")?;
		// Same-as-pickup drop-off is expressed by omitting the field
		let dropoff_location = match optional_location(&self.dropoff_location) {
			Some(loc) => loc,
			None => pickup_location.clone(),
		};
		let pickup_date = required_date(&self.pickup_date, "pickupDate")?;
		let dropoff_date = required_date(&self.dropoff_date, "dropoffDate")?;

		// Same-day rentals are allowed; returning before pick-up is not
		if dropoff_date < pickup_date {
			return Err(QueryValidationError::InvertedDateRange {
				start_field: "pickupDate".to_string(),
				start: pickup_date.to_string(),
				end_field: "dropoffDate".to_string(),
				end: dropoff_date.to_string(),
			});
		}

		Ok(QuerySpec::Car(CarQuery {
			pickup_location,
			dropoff_location,
			pickup_date,
			dropoff_date,
			pickup_time: optional_time(&self.pickup_time, "pickupTime")?,
			dropoff_time: optional_time(&self.dropoff_time, "dropoffTime")?,
		}))
	}
}

fn normalize_location(raw: &str) -> String {
	raw.trim().to_lowercase()
}

fn optional_location(value: &Option<String>) -> Option<String> {
	value
		.as_deref()
		.map(normalize_location)
		.filter(|loc| !loc.is_empty())
}

fn required_location(value: &Option<String>, field: &str) -> QueryValidationResult<String> {
	optional_location(value).ok_or_else(|| QueryValidationError::MissingRequiredField {
		field: field.to_string(),
	})
}

fn parse_date(value: &str, field: &str) -> QueryValidationResult<NaiveDate> {
	NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
		QueryValidationError::InvalidDate {
			field: field.to_string(),
			value: value.to_string(),
		}
	})
}

fn required_date(value: &Option<String>, field: &str) -> QueryValidationResult<NaiveDate> {
	match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
		Some(v) => parse_date(v, field),
		None => Err(QueryValidationError::MissingRequiredField {
			field: field.to_string(),
		}),
	}
}

fn optional_date(value: &Option<String>, field: &str) -> QueryValidationResult<Option<NaiveDate>> {
	match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
		Some(v) => parse_date(v, field).map(Some),
		None => Ok(None),
	}
}

fn optional_time(value: &Option<String>, field: &str) -> QueryValidationResult<Option<NaiveTime>> {
	match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
		Some(v) => NaiveTime::parse_from_str(v, "%H:%M")
			.map(Some)
			.map_err(|_| QueryValidationError::InvalidTime {
				field: field.to_string(),
				value: v.to_string(),
			}),
		None => Ok(None),
	}
}

fn party_size(value: Option<u32>, field: &str) -> QueryValidationResult<u32> {
	match value {
		Some(0) => Err(QueryValidationError::InvalidPartySize {
			field: field.to_string(),
		}),
		Some(n) => Ok(n),
		None => Ok(1),
	}
}
