//! E2E tests for the search endpoint: validation, ranking and caching

mod mocks;

use mocks::{hotel_search_body, TestServer};
use reqwest::Client;
use serde_json::Value;

#[tokio::test]
async fn search_returns_ranked_offers() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.post(format!("{}/api/v1/search", server.base_url))
		.json(&hotel_search_body())
		.send()
		.await
		.unwrap();

	assert_eq!(resp.status(), reqwest::StatusCode::OK);

	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["totalOffers"], 3);
	assert_eq!(body["fromCache"], false);
	assert_eq!(
		body["queryFingerprint"],
		"hotel|paris|2024-03-01|2024-03-04|g2|r1"
	);

	// Default sort is price ascending
	let offers = body["offers"].as_array().unwrap();
	assert_eq!(offers[0]["price"], 145.0);
	assert_eq!(offers[1]["price"], 189.0);
	assert_eq!(offers[2]["price"], 295.0);

	let metadata = &body["metadata"];
	assert_eq!(metadata["suppliersQueried"], 1);
	assert_eq!(metadata["suppliersSucceeded"], 1);
	assert_eq!(metadata["deadlineHit"], false);

	server.abort();
}

#[tokio::test]
async fn search_applies_filters_and_sort_in_one_round_trip() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let mut body = hotel_search_body();
	body["filters"] = serde_json::json!({
		"priceRange": [0.0, 200.0],
		"minRating": 4.0
	});
	body["sort"] = serde_json::json!("rating");

	let resp = client
		.post(format!("{}/api/v1/search", server.base_url))
		.json(&body)
		.send()
		.await
		.unwrap();

	assert_eq!(resp.status(), reqwest::StatusCode::OK);

	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["totalOffers"], 2);
	let offers = body["offers"].as_array().unwrap();
	// Rating descending within the price window
	assert_eq!(offers[0]["rating"], 4.5);
	assert_eq!(offers[1]["rating"], 4.2);

	server.abort();
}

#[tokio::test]
async fn repeated_search_hits_the_cache() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();
	let url = format!("{}/api/v1/search", server.base_url);

	let first: Value = client
		.post(&url)
		.json(&hotel_search_body())
		.send()
		.await
		.unwrap()
		.json()
		.await
		.unwrap();
	assert_eq!(first["fromCache"], false);

	let second: Value = client
		.post(&url)
		.json(&hotel_search_body())
		.send()
		.await
		.unwrap()
		.json()
		.await
		.unwrap();
	assert_eq!(second["fromCache"], true);
	assert_eq!(second["offers"], first["offers"]);

	server.abort();
}

#[tokio::test]
async fn search_with_different_filters_reuses_the_cached_set() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();
	let url = format!("{}/api/v1/search", server.base_url);

	client
		.post(&url)
		.json(&hotel_search_body())
		.send()
		.await
		.unwrap();

	// Same query, different view: filters are not part of the cache key
	let mut body = hotel_search_body();
	body["filters"] = serde_json::json!({ "priceRange": [150.0, 200.0] });

	let filtered: Value = client
		.post(&url)
		.json(&body)
		.send()
		.await
		.unwrap()
		.json()
		.await
		.unwrap();
	assert_eq!(filtered["fromCache"], true);
	assert_eq!(filtered["totalOffers"], 1);
	assert_eq!(filtered["offers"][0]["price"], 189.0);

	server.abort();
}

#[tokio::test]
async fn search_rejects_missing_required_fields() {
	let server = TestServer::spawn_minimal()
		.await
		.expect("Failed to start test server");
	let client = Client::new();

	let incomplete = serde_json::json!({
		"vertical": "hotel",
		"destination": "Paris"
		// Missing checkin and checkout
	});

	let resp = client
		.post(format!("{}/api/v1/search", server.base_url))
		.json(&incomplete)
		.send()
		.await
		.unwrap();

	assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["error"], "VALIDATION_ERROR");

	server.abort();
}

#[tokio::test]
async fn search_rejects_inverted_date_range() {
	let server = TestServer::spawn_minimal()
		.await
		.expect("Failed to start test server");
	let client = Client::new();

	let mut body = hotel_search_body();
	body["checkout"] = serde_json::json!("2024-02-28");

	let resp = client
		.post(format!("{}/api/v1/search", server.base_url))
		.json(&body)
		.send()
		.await
		.unwrap();

	assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

	server.abort();
}

#[tokio::test]
async fn search_rejects_malformed_json() {
	let server = TestServer::spawn_minimal()
		.await
		.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.post(format!("{}/api/v1/search", server.base_url))
		.body("{ invalid json")
		.header("content-type", "application/json")
		.send()
		.await
		.unwrap();

	assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

	server.abort();
}

#[tokio::test]
async fn search_with_no_suppliers_returns_empty_set() {
	let server = TestServer::spawn_minimal()
		.await
		.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.post(format!("{}/api/v1/search", server.base_url))
		.json(&hotel_search_body())
		.send()
		.await
		.unwrap();

	// An empty result is a valid outcome, not an error
	assert_eq!(resp.status(), reqwest::StatusCode::OK);
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["totalOffers"], 0);
	assert_eq!(body["metadata"]["suppliersQueried"], 0);

	server.abort();
}
