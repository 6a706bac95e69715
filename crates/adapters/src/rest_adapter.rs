//! Generic REST adapter for HTTP-based travel suppliers
//!
//! Speaks the farebeam supplier wire protocol: `POST {endpoint}/offers/search`
//! with the normalized query, `GET {endpoint}/health` for liveness. Clients
//! are cached per supplier to reuse connection pools across rounds.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use dashmap::DashMap;
use reqwest::{
	header::{HeaderMap, HeaderName, HeaderValue},
	Client,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use farebeam_types::{
	Adapter, AdapterError, AdapterResult, CabinClass, CarOffer, FlightOffer, HotelOffer, Offer,
	OfferDetails, QuerySpec, SupplierAdapter, SupplierRuntimeConfig, Transmission,
};

/// Wire model for one offer as returned by a supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireOffer {
	id: String,
	price: f64,
	#[serde(default = "default_currency")]
	currency: String,
	#[serde(flatten)]
	details: WireOfferDetails,
}

fn default_currency() -> String {
	"USD".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "vertical")]
enum WireOfferDetails {
	#[serde(rename = "flight")]
	Flight {
		airline: String,
		flight_number: String,
		origin: String,
		destination: String,
		departure_date: NaiveDate,
		departure_time: NaiveTime,
		arrival_time: NaiveTime,
		duration_minutes: u32,
		stops: u32,
		#[serde(default)]
		aircraft: Option<String>,
		#[serde(default)]
		cabin_class: CabinClass,
	},
	#[serde(rename = "hotel")]
	Hotel {
		name: String,
		location: String,
		rating: f64,
		#[serde(default)]
		reviews: u32,
		checkin: NaiveDate,
		#[serde(default)]
		amenities: Vec<String>,
		#[serde(default)]
		distance_km: Option<f64>,
	},
	#[serde(rename = "car")]
	Car {
		model: String,
		car_type: String,
		company: String,
		transmission: Transmission,
		seats: u32,
		pickup_location: String,
		pickup_date: NaiveDate,
		#[serde(default)]
		features: Vec<String>,
		#[serde(default)]
		rating: Option<f64>,
	},
}

/// Wire model for a supplier's search response
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireSearchResponse {
	offers: Vec<WireOffer>,
}

/// Wire model for a supplier-side error body
#[derive(Debug, Clone, Deserialize)]
struct WireErrorResponse {
	code: Option<String>,
	message: Option<String>,
}

/// Generic REST adapter for HTTP-based suppliers
#[derive(Debug)]
pub struct RestAdapter {
	config: Adapter,
	/// One pooled client per supplier, built with that supplier's timeout
	clients: DashMap<String, Client>,
}

impl RestAdapter {
	pub fn new() -> Self {
		let mut config = Adapter::new(
			"rest-v1".to_string(),
			"Farebeam REST v1".to_string(),
			"1.0.0".to_string(),
		);
		config.description = Some("Generic JSON-over-HTTP supplier adapter".to_string());
		Self {
			config,
			clients: DashMap::new(),
		}
	}

	/// Get or build the pooled client for one supplier
	fn client_for(&self, config: &SupplierRuntimeConfig) -> AdapterResult<Client> {
		if let Some(client) = self.clients.get(&config.supplier_id) {
			return Ok(client.clone());
		}

		let mut headers = HeaderMap::new();
		if let Some(custom) = &config.headers {
			for (key, value) in custom {
				let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
					AdapterError::Config {
						reason: format!("Invalid header name '{}': {}", key, e),
					}
				})?;
				let value =
					HeaderValue::from_str(value).map_err(|e| AdapterError::Config {
						reason: format!("Invalid header value for '{}': {}", key, e),
					})?;
				headers.insert(name, value);
			}
		}

		let client = Client::builder()
			.timeout(Duration::from_millis(config.timeout_ms))
			.default_headers(headers)
			.build()
			.map_err(AdapterError::Http)?;

		self.clients
			.insert(config.supplier_id.clone(), client.clone());
		Ok(client)
	}

	/// Join a path onto the supplier endpoint, treating the base as a directory
	fn build_url(&self, base_url: &str, path: &str) -> AdapterResult<String> {
		let mut base = Url::parse(base_url).map_err(|e| AdapterError::Config {
			reason: format!("Invalid base URL '{}': {}", base_url, e),
		})?;

		if !base.path().ends_with('/') {
			base.set_path(&format!("{}/", base.path()));
		}

		let joined = base.join(path).map_err(|e| AdapterError::Config {
			reason: format!("Failed to join '{}' to base '{}': {}", path, base_url, e),
		})?;

		Ok(joined.to_string())
	}

	fn map_offer(&self, wire: WireOffer, supplier_id: &str) -> Offer {
		let details = match wire.details {
			WireOfferDetails::Flight {
				airline,
				flight_number,
				origin,
				destination,
				departure_date,
				departure_time,
				arrival_time,
				duration_minutes,
				stops,
				aircraft,
				cabin_class,
			} => OfferDetails::Flight(FlightOffer {
				airline,
				flight_number,
				origin,
				destination,
				departure_date,
				departure_time,
				arrival_time,
				duration_minutes,
				stops,
				aircraft,
				cabin_class,
			}),
			WireOfferDetails::Hotel {
				name,
				location,
				rating,
				reviews,
				checkin,
				amenities,
				distance_km,
			} => OfferDetails::Hotel(HotelOffer {
				name,
				location,
				rating,
				reviews,
				checkin,
				amenities,
				distance_km,
			}),
			WireOfferDetails::Car {
				model,
				car_type,
				company,
				transmission,
				seats,
				pickup_location,
				pickup_date,
				features,
				rating,
			} => OfferDetails::Car(CarOffer {
				model,
				car_type,
				company,
				transmission,
				seats,
				pickup_location,
				pickup_date,
				features,
				rating,
			}),
		};

		Offer {
			offer_id: wire.id,
			supplier_id: supplier_id.to_string(),
			price: wire.price,
			currency: wire.currency,
			details,
			collected_at: Utc::now(),
		}
	}
}

impl Default for RestAdapter {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl SupplierAdapter for RestAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	async fn fetch_offers(
		&self,
		query: &QuerySpec,
		config: &SupplierRuntimeConfig,
	) -> AdapterResult<Vec<Offer>> {
		let url = self.build_url(&config.endpoint, "offers/search")?;
		let client = self.client_for(config)?;

		debug!(
			"Fetching {} offers from supplier {} at {}",
			query.vertical(),
			config.supplier_id,
			url
		);

		let response = client.post(&url).json(query).send().await.map_err(|e| {
			if e.is_timeout() {
				AdapterError::Timeout {
					timeout_ms: config.timeout_ms,
				}
			} else {
				AdapterError::Http(e)
			}
		})?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			if let Ok(err) = serde_json::from_str::<WireErrorResponse>(&body) {
				return Err(AdapterError::Supplier {
					code: err.code.unwrap_or_else(|| status.as_u16().to_string()),
					message: err.message.unwrap_or_else(|| "unknown error".to_string()),
				});
			}
			return Err(AdapterError::HttpStatus {
				status_code: status.as_u16(),
				reason: body.chars().take(200).collect(),
			});
		}

		let body: WireSearchResponse =
			response
				.json()
				.await
				.map_err(|e| AdapterError::InvalidResponse {
					reason: format!("Failed to parse supplier search response: {}", e),
				})?;

		let offers: Vec<Offer> = body
			.offers
			.into_iter()
			.map(|wire| self.map_offer(wire, &config.supplier_id))
			.collect();

		// A supplier answering with offers for the wrong vertical indicates a
		// misconfigured registration; drop the mismatched ones
		let expected = query.vertical();
		let (matching, mismatched): (Vec<_>, Vec<_>) =
			offers.into_iter().partition(|o| o.vertical() == expected);
		if !mismatched.is_empty() {
			warn!(
				"Supplier {} returned {} offers for the wrong vertical; dropped",
				config.supplier_id,
				mismatched.len()
			);
		}

		Ok(matching)
	}

	async fn health_check(&self, config: &SupplierRuntimeConfig) -> AdapterResult<bool> {
		let url = self.build_url(&config.endpoint, "health")?;
		let client = self.client_for(config)?;

		let response = client.get(&url).send().await.map_err(|e| {
			if e.is_timeout() {
				AdapterError::Timeout {
					timeout_ms: config.timeout_ms,
				}
			} else {
				AdapterError::Http(e)
			}
		})?;

		Ok(response.status().is_success())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn runtime_config() -> SupplierRuntimeConfig {
		SupplierRuntimeConfig {
			supplier_id: "skyhigh".to_string(),
			endpoint: "https://api.skyhigh.example.com/v1".to_string(),
			timeout_ms: 5000,
			headers: None,
		}
	}

	#[test]
	fn build_url_treats_base_as_directory() {
		let adapter = RestAdapter::new();
		let url = adapter
			.build_url("https://api.example.com/v1", "offers/search")
			.unwrap();
		assert_eq!(url, "https://api.example.com/v1/offers/search");
	}

	#[test]
	fn invalid_base_url_is_a_config_error() {
		let adapter = RestAdapter::new();
		assert!(matches!(
			adapter.build_url("not a url", "health"),
			Err(AdapterError::Config { .. })
		));
	}

	#[test]
	fn wire_offer_parses_hotel_payload() {
		let json = r#"{
			"id": "h-1",
			"price": 189.0,
			"vertical": "hotel",
			"name": "Grand Plaza Hotel",
			"location": "downtown paris",
			"rating": 4.5,
			"reviews": 1248,
			"checkin": "2024-03-01",
			"amenities": ["Free WiFi", "Pool"]
		}"#;
		let wire: WireOffer = serde_json::from_str(json).unwrap();
		let adapter = RestAdapter::new();
		let offer = adapter.map_offer(wire, &runtime_config().supplier_id);
		assert_eq!(offer.supplier_id, "skyhigh");
		assert_eq!(offer.rating(), Some(4.5));
		assert_eq!(offer.currency, "USD");
	}
}
