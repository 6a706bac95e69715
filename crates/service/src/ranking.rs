//! Filter/sort engine over candidate sets
//!
//! Pure and deterministic: same inputs, same ordered output, no side
//! effects. Safe to call on every filter or sort interaction without
//! touching suppliers or the cache.

use std::cmp::Ordering;

use farebeam_types::{filters::STOPS_ANY, CandidateSet, FilterSpec, Offer, SortKey};

/// Apply a conjunctive filter and a sort key to a candidate set, producing
/// the final ordered view consumed by the presentation layer.
///
/// Ties under every sort key are broken by offer id ascending so the output
/// order is fully deterministic.
pub fn apply_filters(set: &CandidateSet, filters: &FilterSpec, sort: SortKey) -> Vec<Offer> {
	let mut selected: Vec<Offer> = if filters.is_permissive() {
		set.offers.clone()
	} else {
		set.offers
			.iter()
			.filter(|offer| matches(offer, filters))
			.cloned()
			.collect()
	};

	selected.sort_by(|a, b| compare(a, b, sort));
	selected
}

/// Conjunctive match: every active filter dimension must pass
fn matches(offer: &Offer, filters: &FilterSpec) -> bool {
	if let Some((min, max)) = filters.price_range {
		if offer.price < min || offer.price > max {
			return false;
		}
	}

	if let Some(floor) = filters.min_rating {
		// An active rating floor excludes offers that carry no rating
		match offer.rating() {
			Some(rating) if rating >= floor => {},
			_ => return false,
		}
	}

	if let Some(stops) = filters.stops {
		if stops != STOPS_ANY {
			match offer.stops() {
				Some(actual) if actual as i32 == stops => {},
				_ => return false,
			}
		}
	}

	if !filters.amenities.is_empty() {
		let available = offer.amenities();
		let has_all = filters
			.amenities
			.iter()
			.all(|wanted| available.iter().any(|a| a.eq_ignore_ascii_case(wanted)));
		if !has_all {
			return false;
		}
	}

	true
}

fn compare(a: &Offer, b: &Offer, sort: SortKey) -> Ordering {
	let primary = match sort {
		SortKey::PriceAsc => a.price.total_cmp(&b.price),
		SortKey::PriceDesc => b.price.total_cmp(&a.price),
		// Unrated offers sort after rated ones
		SortKey::RatingDesc => match (a.rating(), b.rating()) {
			(Some(ra), Some(rb)) => rb.total_cmp(&ra),
			(Some(_), None) => Ordering::Less,
			(None, Some(_)) => Ordering::Greater,
			(None, None) => Ordering::Equal,
		},
		// Flight-only keys: offers without the attribute sort last
		SortKey::DurationAsc => match (a.duration_minutes(), b.duration_minutes()) {
			(Some(da), Some(db)) => da.cmp(&db),
			(Some(_), None) => Ordering::Less,
			(None, Some(_)) => Ordering::Greater,
			(None, None) => Ordering::Equal,
		},
		SortKey::DepartureAsc => match (a.departure_time(), b.departure_time()) {
			(Some(ta), Some(tb)) => ta.cmp(&tb),
			(Some(_), None) => Ordering::Less,
			(None, Some(_)) => Ordering::Greater,
			(None, None) => Ordering::Equal,
		},
	};

	primary.then_with(|| a.offer_id.cmp(&b.offer_id))
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::{NaiveDate, NaiveTime, Utc};
	use farebeam_types::{FlightOffer, HotelOffer, OfferDetails};

	fn hotel(id: &str, price: f64, rating: f64, amenities: &[&str]) -> Offer {
		Offer {
			offer_id: id.to_string(),
			supplier_id: "stayfind".to_string(),
			price,
			currency: "USD".to_string(),
			details: OfferDetails::Hotel(HotelOffer {
				name: format!("Hotel {}", id),
				location: "paris".to_string(),
				rating,
				reviews: 500,
				checkin: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
				amenities: amenities.iter().map(|a| a.to_string()).collect(),
				distance_km: None,
			}),
			collected_at: Utc::now(),
		}
	}

	fn flight(id: &str, price: f64, stops: u32, duration: u32, departure: (u32, u32)) -> Offer {
		Offer {
			offer_id: id.to_string(),
			supplier_id: "skyhigh".to_string(),
			price,
			currency: "USD".to_string(),
			details: OfferDetails::Flight(FlightOffer {
				airline: "Delta".to_string(),
				flight_number: format!("DL{}", id),
				origin: "nyc".to_string(),
				destination: "lax".to_string(),
				departure_date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
				departure_time: NaiveTime::from_hms_opt(departure.0, departure.1, 0).unwrap(),
				arrival_time: NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
				duration_minutes: duration,
				stops,
				aircraft: None,
				cabin_class: Default::default(),
			}),
			collected_at: Utc::now(),
		}
	}

	fn set_of(offers: Vec<Offer>) -> CandidateSet {
		let mut set = CandidateSet::new("fp".to_string());
		set.offers = offers;
		set
	}

	#[test]
	fn permissive_filter_returns_every_offer_ordered_by_sort_key() {
		let set = set_of(vec![
			hotel("b", 295.0, 4.8, &[]),
			hotel("a", 145.0, 4.2, &[]),
			hotel("c", 189.0, 4.5, &[]),
		]);

		let out = apply_filters(&set, &FilterSpec::permissive(), SortKey::PriceAsc);
		assert_eq!(out.len(), set.len());
		let prices: Vec<f64> = out.iter().map(|o| o.price).collect();
		assert_eq!(prices, vec![145.0, 189.0, 295.0]);
	}

	#[test]
	fn stops_any_sentinel_is_treated_as_permissive() {
		let set = set_of(vec![
			flight("1", 299.0, 0, 300, (8, 0)),
			flight("2", 245.0, 1, 390, (12, 30)),
		]);

		let any = FilterSpec {
			stops: Some(STOPS_ANY),
			..FilterSpec::default()
		};
		assert!(any.is_permissive());

		let out = apply_filters(&set, &any, SortKey::PriceAsc);
		assert_eq!(out.len(), 2);
		let prices: Vec<f64> = out.iter().map(|o| o.price).collect();
		assert_eq!(prices, vec![245.0, 299.0]);
	}

	#[test]
	fn equal_prices_tie_break_by_offer_id_ascending() {
		let set = set_of(vec![
			hotel("z", 150.0, 4.0, &[]),
			hotel("a", 150.0, 4.0, &[]),
			hotel("m", 150.0, 4.0, &[]),
		]);

		let out = apply_filters(&set, &FilterSpec::permissive(), SortKey::PriceAsc);
		let ids: Vec<&str> = out.iter().map(|o| o.offer_id.as_str()).collect();
		assert_eq!(ids, vec!["a", "m", "z"]);
	}

	#[test]
	fn price_and_rating_filters_are_conjunctive() {
		// The scenario from the contract: prices {145, 189, 295}, ratings
		// {4.2, 4.5, 4.8}, filter [0, 200] with rating floor 4.0
		let set = set_of(vec![
			hotel("h1", 145.0, 4.2, &[]),
			hotel("h2", 189.0, 4.5, &[]),
			hotel("h3", 295.0, 4.8, &[]),
		]);

		let filters = FilterSpec {
			price_range: Some((0.0, 200.0)),
			min_rating: Some(4.0),
			..Default::default()
		};

		let out = apply_filters(&set, &filters, SortKey::PriceAsc);
		assert_eq!(out.len(), 2);
		assert_eq!(out[0].price, 145.0);
		assert_eq!(out[0].rating(), Some(4.2));
		assert_eq!(out[1].price, 189.0);
		assert_eq!(out[1].rating(), Some(4.5));
	}

	#[test]
	fn stops_filter_matches_exact_value_or_any() {
		let set = set_of(vec![
			flight("1", 299.0, 0, 315, (8, 30)),
			flight("2", 245.0, 1, 350, (14, 20)),
			flight("3", 389.0, 0, 315, (19, 15)),
		]);

		let direct_only = FilterSpec {
			stops: Some(0),
			..Default::default()
		};
		let out = apply_filters(&set, &direct_only, SortKey::PriceAsc);
		assert_eq!(out.len(), 2);
		assert!(out.iter().all(|o| o.stops() == Some(0)));

		let any = FilterSpec {
			stops: Some(STOPS_ANY),
			..Default::default()
		};
		assert_eq!(apply_filters(&set, &any, SortKey::PriceAsc).len(), 3);
	}

	#[test]
	fn amenity_filter_requires_superset() {
		let set = set_of(vec![
			hotel("h1", 189.0, 4.5, &["Free WiFi", "Pool", "Gym", "Parking"]),
			hotel("h2", 145.0, 4.2, &["Free WiFi", "Restaurant", "Spa"]),
			hotel(
				"h3",
				295.0,
				4.8,
				&["Free WiFi", "Pool", "Gym", "Spa", "Restaurant", "Parking"],
			),
		]);

		let filters = FilterSpec {
			amenities: vec!["Pool".to_string(), "Gym".to_string()],
			..Default::default()
		};

		let out = apply_filters(&set, &filters, SortKey::PriceAsc);
		let ids: Vec<&str> = out.iter().map(|o| o.offer_id.as_str()).collect();
		assert_eq!(ids, vec!["h1", "h3"]);
	}

	#[test]
	fn rating_floor_excludes_unrated_offers() {
		let set = set_of(vec![
			flight("f1", 299.0, 0, 315, (8, 30)),
			hotel("h1", 189.0, 4.5, &[]),
		]);

		let filters = FilterSpec {
			min_rating: Some(4.0),
			..Default::default()
		};

		let out = apply_filters(&set, &filters, SortKey::PriceAsc);
		assert_eq!(out.len(), 1);
		assert_eq!(out[0].offer_id, "h1");
	}

	#[test]
	fn duration_sort_orders_flights_and_pushes_other_verticals_last() {
		let set = set_of(vec![
			hotel("h1", 100.0, 4.0, &[]),
			flight("f2", 245.0, 1, 350, (14, 20)),
			flight("f1", 299.0, 0, 315, (8, 30)),
		]);

		let out = apply_filters(&set, &FilterSpec::permissive(), SortKey::DurationAsc);
		let ids: Vec<&str> = out.iter().map(|o| o.offer_id.as_str()).collect();
		assert_eq!(ids, vec!["f1", "f2", "h1"]);
	}

	#[test]
	fn departure_sort_uses_time_of_day() {
		let set = set_of(vec![
			flight("f3", 389.0, 0, 315, (19, 15)),
			flight("f1", 299.0, 0, 315, (8, 30)),
			flight("f2", 245.0, 1, 350, (14, 20)),
		]);

		let out = apply_filters(&set, &FilterSpec::permissive(), SortKey::DepartureAsc);
		let ids: Vec<&str> = out.iter().map(|o| o.offer_id.as_str()).collect();
		assert_eq!(ids, vec!["f1", "f2", "f3"]);
	}

	#[test]
	fn engine_is_deterministic_across_calls() {
		let set = set_of(vec![
			hotel("b", 150.0, 4.1, &[]),
			hotel("a", 150.0, 4.9, &[]),
		]);
		let filters = FilterSpec::permissive();

		let first = apply_filters(&set, &filters, SortKey::RatingDesc);
		let second = apply_filters(&set, &filters, SortKey::RatingDesc);
		assert_eq!(first, second);
		assert_eq!(first[0].offer_id, "a");
	}
}
