//! In-process fixture adapter serving a small static inventory
//!
//! Used for development profiles and demos where no real supplier is
//! reachable. Offers are synthesized from the query so routes, dates and
//! locations always match what was asked for; prices and inventory shapes
//! are fixed.

use async_trait::async_trait;
use chrono::{NaiveTime, Utc};
use tracing::debug;

use farebeam_types::{
	Adapter, AdapterResult, CarOffer, CarQuery, FlightOffer, FlightQuery, HotelOffer, HotelQuery,
	Offer, OfferDetails, QuerySpec, SupplierAdapter, SupplierRuntimeConfig, Transmission,
};

/// Adapter serving fixed development inventory for all three verticals
#[derive(Debug)]
pub struct FixtureAdapter {
	config: Adapter,
}

impl Default for FixtureAdapter {
	fn default() -> Self {
		Self::new()
	}
}

impl FixtureAdapter {
	pub fn new() -> Self {
		let mut config = Adapter::new(
			"fixture-v1".to_string(),
			"Fixture Inventory".to_string(),
			"1.0.0".to_string(),
		);
		config.description =
			Some("Static development inventory, no upstream calls".to_string());
		Self { config }
	}

	fn time(h: u32, m: u32) -> NaiveTime {
		NaiveTime::from_hms_opt(h, m, 0).expect("static fixture time is valid")
	}

	fn flight_offers(&self, q: &FlightQuery, supplier_id: &str) -> Vec<Offer> {
		let rows: [(&str, &str, &str, (u32, u32), (u32, u32), u32, f64, u32, &str); 3] = [
			("Emirates", "EK123", "fx-f1", (8, 30), (11, 45), 315, 299.0, 0, "Boeing 777"),
			("Delta", "DL456", "fx-f2", (14, 20), (18, 10), 350, 245.0, 1, "Airbus A320"),
			("American Airlines", "AA789", "fx-f3", (19, 15), (22, 30), 315, 389.0, 0, "Boeing 737"),
		];

		rows.iter()
			.map(
				|(airline, number, id, dep, arr, duration, price, stops, aircraft)| Offer {
					offer_id: id.to_string(),
					supplier_id: supplier_id.to_string(),
					price: *price,
					currency: "USD".to_string(),
					details: OfferDetails::Flight(FlightOffer {
						airline: airline.to_string(),
						flight_number: number.to_string(),
						origin: q.origin.clone(),
						destination: q.destination.clone(),
						departure_date: q.departure,
						departure_time: Self::time(dep.0, dep.1),
						arrival_time: Self::time(arr.0, arr.1),
						duration_minutes: *duration,
						stops: *stops,
						aircraft: Some(aircraft.to_string()),
						cabin_class: q.cabin_class,
					}),
					collected_at: Utc::now(),
				},
			)
			.collect()
	}

	fn hotel_offers(&self, q: &HotelQuery, supplier_id: &str) -> Vec<Offer> {
		let rows: [(&str, &str, f64, u32, f64, &[&str], f64); 3] = [
			(
				"Grand Plaza Hotel",
				"fx-h1",
				4.5,
				1248,
				189.0,
				&["Free WiFi", "Pool", "Gym", "Parking"],
				0.3,
			),
			(
				"Boutique Riverside Inn",
				"fx-h2",
				4.2,
				867,
				145.0,
				&["Free WiFi", "Restaurant", "Spa"],
				1.3,
			),
			(
				"Luxury Sky Tower",
				"fx-h3",
				4.8,
				2134,
				295.0,
				&["Free WiFi", "Pool", "Gym", "Spa", "Restaurant", "Parking"],
				0.2,
			),
		];

		rows.iter()
			.map(|(name, id, rating, reviews, price, amenities, distance)| Offer {
				offer_id: id.to_string(),
				supplier_id: supplier_id.to_string(),
				price: *price,
				currency: "USD".to_string(),
				details: OfferDetails::Hotel(HotelOffer {
					name: name.to_string(),
					location: q.destination.clone(),
					rating: *rating,
					reviews: *reviews,
					checkin: q.checkin,
					amenities: amenities.iter().map(|a| a.to_string()).collect(),
					distance_km: Some(*distance),
				}),
				collected_at: Utc::now(),
			})
			.collect()
	}

	fn car_offers(&self, q: &CarQuery, supplier_id: &str) -> Vec<Offer> {
		let rows: [(&str, &str, &str, &str, f64, &[&str]); 3] = [
			(
				"Toyota Camry",
				"Mid-size",
				"Hertz",
				"fx-c1",
				45.0,
				&["Air Conditioning", "Bluetooth", "GPS Navigation"],
			),
			(
				"Honda CR-V",
				"SUV",
				"Enterprise",
				"fx-c2",
				62.0,
				&["Air Conditioning", "Bluetooth", "All-wheel Drive"],
			),
			(
				"BMW 3 Series",
				"Luxury",
				"Avis",
				"fx-c3",
				89.0,
				&["Air Conditioning", "Bluetooth", "Leather Seats", "Sunroof"],
			),
		];

		rows.iter()
			.map(|(model, car_type, company, id, price, features)| Offer {
				offer_id: id.to_string(),
				supplier_id: supplier_id.to_string(),
				price: *price,
				currency: "USD".to_string(),
				details: OfferDetails::Car(CarOffer {
					model: model.to_string(),
					car_type: car_type.to_string(),
					company: company.to_string(),
					transmission: Transmission::Automatic,
					seats: 5,
					pickup_location: q.pickup_location.clone(),
					pickup_date: q.pickup_date,
					features: features.iter().map(|f| f.to_string()).collect(),
					rating: Some(4.3),
				}),
				collected_at: Utc::now(),
			})
			.collect()
	}
}

#[async_trait]
impl SupplierAdapter for FixtureAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	async fn fetch_offers(
		&self,
		query: &QuerySpec,
		config: &SupplierRuntimeConfig,
	) -> AdapterResult<Vec<Offer>> {
		debug!(
			"Serving fixture {} inventory for supplier {}",
			query.vertical(),
			config.supplier_id
		);

		let offers = match query {
			QuerySpec::Flight(q) => self.flight_offers(q, &config.supplier_id),
			QuerySpec::Hotel(q) => self.hotel_offers(q, &config.supplier_id),
			QuerySpec::Car(q) => self.car_offers(q, &config.supplier_id),
		};

		Ok(offers)
	}

	async fn health_check(&self, _config: &SupplierRuntimeConfig) -> AdapterResult<bool> {
		Ok(true)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;

	fn runtime_config() -> SupplierRuntimeConfig {
		SupplierRuntimeConfig {
			supplier_id: "fixture".to_string(),
			endpoint: "http://localhost:0".to_string(),
			timeout_ms: 1000,
			headers: None,
		}
	}

	#[tokio::test]
	async fn hotel_fixture_inventory_tracks_the_query() {
		let adapter = FixtureAdapter::new();
		let query = QuerySpec::Hotel(HotelQuery {
			destination: "paris".to_string(),
			checkin: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
			checkout: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
			guests: 2,
			rooms: 1,
		});

		let offers = adapter
			.fetch_offers(&query, &runtime_config())
			.await
			.unwrap();
		assert_eq!(offers.len(), 3);
		for offer in &offers {
			match &offer.details {
				OfferDetails::Hotel(h) => {
					assert_eq!(h.location, "paris");
					assert_eq!(h.checkin, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
				},
				other => panic!("expected hotel offer, got {:?}", other),
			}
		}
	}

	#[tokio::test]
	async fn flight_fixture_prices_match_inventory() {
		let adapter = FixtureAdapter::new();
		let query = QuerySpec::Flight(FlightQuery {
			origin: "nyc".to_string(),
			destination: "lax".to_string(),
			departure: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
			return_date: None,
			passengers: 1,
			cabin_class: Default::default(),
		});

		let offers = adapter
			.fetch_offers(&query, &runtime_config())
			.await
			.unwrap();
		let mut prices: Vec<f64> = offers.iter().map(|o| o.price).collect();
		prices.sort_by(f64::total_cmp);
		assert_eq!(prices, vec![245.0, 299.0, 389.0]);
	}
}
