//! E2E tests for supplier inspection endpoints

mod mocks;

use mocks::TestServer;
use reqwest::Client;
use serde_json::Value;

#[tokio::test]
async fn list_suppliers_returns_registered_entries() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.get(format!("{}/api/v1/suppliers", server.base_url))
		.send()
		.await
		.unwrap();

	assert_eq!(resp.status(), reqwest::StatusCode::OK);
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["totalSuppliers"], 1);

	let suppliers = body["suppliers"].as_array().unwrap();
	assert_eq!(suppliers[0]["supplierId"], "stayfind");
	assert_eq!(suppliers[0]["adapterId"], "mock-hotel-v1");
	assert_eq!(suppliers[0]["vertical"], "hotel");
	assert_eq!(suppliers[0]["status"], "active");

	server.abort();
}

#[tokio::test]
async fn get_supplier_by_id_exposes_metrics() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.get(format!("{}/api/v1/suppliers/stayfind", server.base_url))
		.send()
		.await
		.unwrap();

	assert_eq!(resp.status(), reqwest::StatusCode::OK);
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["supplierId"], "stayfind");
	assert!(body["totalRequests"].is_number());
	assert!(body["successRate"].is_number());

	server.abort();
}

#[tokio::test]
async fn get_unknown_supplier_is_not_found() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.get(format!("{}/api/v1/suppliers/nope", server.base_url))
		.send()
		.await
		.unwrap();

	assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

	server.abort();
}

#[tokio::test]
async fn supplier_metrics_update_after_a_search() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	client
		.post(format!("{}/api/v1/search", server.base_url))
		.json(&mocks::hotel_search_body())
		.send()
		.await
		.unwrap();

	// Metrics writeback is best effort but synchronous with the round
	let resp = client
		.get(format!("{}/api/v1/suppliers/stayfind", server.base_url))
		.send()
		.await
		.unwrap();

	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["totalRequests"], 1);
	assert!(body["lastSeen"].is_string());

	server.abort();
}
