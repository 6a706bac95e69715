//! E2E tests for health and readiness endpoints

mod mocks;

use mocks::TestServer;
use reqwest::Client;
use serde_json::Value;

#[tokio::test]
async fn health_endpoint_is_ok() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.get(format!("{}/health", server.base_url))
		.send()
		.await
		.unwrap();

	assert_eq!(resp.status(), reqwest::StatusCode::OK);
	assert_eq!(resp.text().await.unwrap(), "OK");

	server.abort();
}

#[tokio::test]
async fn ready_endpoint_reports_storage_and_suppliers() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.get(format!("{}/ready", server.base_url))
		.send()
		.await
		.unwrap();

	assert_eq!(resp.status(), reqwest::StatusCode::OK);
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["status"], "ready");
	assert_eq!(body["storage_healthy"], true);
	assert_eq!(body["suppliers"]["stayfind"], true);

	server.abort();
}

#[tokio::test]
async fn unknown_endpoint_is_not_found() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.get(format!("{}/unknown-endpoint", server.base_url))
		.send()
		.await
		.unwrap();

	assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

	server.abort();
}

#[tokio::test]
async fn security_headers_are_present() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.get(format!("{}/health", server.base_url))
		.send()
		.await
		.unwrap();

	let headers = resp.headers();
	assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
	assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
	assert!(headers.get("x-request-id").is_some());

	server.abort();
}
