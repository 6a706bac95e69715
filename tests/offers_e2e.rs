//! E2E tests for re-filtering cached candidate sets

mod mocks;

use farebeam_aggregator::mocks::{mock_supplier, MockSupplierAdapter};
use farebeam_aggregator::{AggregatorBuilder, TravelVertical};
use mocks::{hotel_inventory, hotel_search_body, TestServer};
use reqwest::Client;
use serde_json::Value;

const FINGERPRINT: &str = "hotel|paris|2024-03-01|2024-03-04|g2|r1";

async fn seed_search(client: &Client, base_url: &str) -> Value {
	client
		.post(format!("{}/api/v1/search", base_url))
		.json(&hotel_search_body())
		.send()
		.await
		.unwrap()
		.json()
		.await
		.unwrap()
}

#[tokio::test]
async fn refilter_reuses_the_cached_set_without_aggregation() {
	let adapter = MockSupplierAdapter::new("mock-hotel-v1").with_offers(hotel_inventory());
	let calls = adapter.call_counter();

	let builder = AggregatorBuilder::default()
		.with_adapter(Box::new(adapter))
		.with_supplier(mock_supplier(
			"stayfind",
			"mock-hotel-v1",
			TravelVertical::Hotel,
		));

	let server = TestServer::spawn_with_builder(builder)
		.await
		.expect("Failed to start test server");
	let client = Client::new();

	let search = seed_search(&client, &server.base_url).await;
	assert_eq!(search["queryFingerprint"], FINGERPRINT);

	let resp = client
		.post(format!(
			"{}/api/v1/results/{}/offers",
			server.base_url, FINGERPRINT
		))
		.json(&serde_json::json!({
			"filters": { "amenities": ["Free WiFi"] },
			"sort": "price-desc"
		}))
		.send()
		.await
		.unwrap();

	assert_eq!(resp.status(), reqwest::StatusCode::OK);
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["totalOffers"], 3);
	let offers = body["offers"].as_array().unwrap();
	assert_eq!(offers[0]["price"], 295.0);
	assert_eq!(offers[2]["price"], 145.0);

	// Filtering never triggered a second supplier round
	assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);

	server.abort();
}

#[tokio::test]
async fn refilter_with_empty_body_defaults_to_permissive_view() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	seed_search(&client, &server.base_url).await;

	let resp = client
		.post(format!(
			"{}/api/v1/results/{}/offers",
			server.base_url, FINGERPRINT
		))
		.json(&serde_json::json!({}))
		.send()
		.await
		.unwrap();

	assert_eq!(resp.status(), reqwest::StatusCode::OK);
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["totalOffers"], 3);

	server.abort();
}

#[tokio::test]
async fn refilter_unknown_fingerprint_is_not_found() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.post(format!(
			"{}/api/v1/results/{}/offers",
			server.base_url, "hotel|nowhere|2024-01-01|2024-01-02|g1|r1"
		))
		.json(&serde_json::json!({}))
		.send()
		.await
		.unwrap();

	assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["error"], "NOT_CACHED");

	server.abort();
}

#[tokio::test]
async fn over_constrained_filter_yields_empty_view() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	seed_search(&client, &server.base_url).await;

	let resp = client
		.post(format!(
			"{}/api/v1/results/{}/offers",
			server.base_url, FINGERPRINT
		))
		.json(&serde_json::json!({
			"filters": { "priceRange": [1.0, 2.0] }
		}))
		.send()
		.await
		.unwrap();

	assert_eq!(resp.status(), reqwest::StatusCode::OK);
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["totalOffers"], 0);
	assert_eq!(body["offers"].as_array().unwrap().len(), 0);

	server.abort();
}
