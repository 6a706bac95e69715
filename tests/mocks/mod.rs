//! Shared test fixtures: mock adapters, suppliers and a spawned test server

use axum::Router;
use farebeam_aggregator::mocks::{mock_hotel_offer, mock_supplier, MockSupplierAdapter};
use farebeam_aggregator::{create_router, AggregatorBuilder, Supplier, TravelVertical};
use tokio::task::JoinHandle;

/// The three hotel offers the default mock supplier returns
#[allow(dead_code)]
pub fn hotel_inventory() -> Vec<farebeam_aggregator::Offer> {
	vec![
		mock_hotel_offer("h-grand", "Grand Plaza Hotel", 189.0, 4.5),
		mock_hotel_offer("h-riverside", "Boutique Riverside Inn", 145.0, 4.2),
		mock_hotel_offer("h-sky", "Luxury Sky Tower", 295.0, 4.8),
	]
}

/// JSON body for a valid hotel search
#[allow(dead_code)]
pub fn hotel_search_body() -> serde_json::Value {
	serde_json::json!({
		"vertical": "hotel",
		"destination": "Paris",
		"checkin": "2024-03-01",
		"checkout": "2024-03-04",
		"guests": 2,
		"rooms": 1
	})
}

/// Test server instance with configurable suppliers
pub struct TestServer {
	pub base_url: String,
	pub handle: JoinHandle<()>,
}

impl TestServer {
	/// Spawn a test server with one mock hotel supplier
	#[allow(dead_code)]
	pub async fn spawn() -> Result<Self, Box<dyn std::error::Error>> {
		let adapter = MockSupplierAdapter::new("mock-hotel-v1").with_offers(hotel_inventory());

		let builder = AggregatorBuilder::default()
			.with_adapter(Box::new(adapter))
			.with_supplier(mock_supplier(
				"stayfind",
				"mock-hotel-v1",
				TravelVertical::Hotel,
			));

		Self::spawn_with_builder(builder).await
	}

	/// Spawn a test server with no suppliers registered
	#[allow(dead_code)]
	pub async fn spawn_minimal() -> Result<Self, Box<dyn std::error::Error>> {
		Self::spawn_with_builder(AggregatorBuilder::default()).await
	}

	/// Spawn a test server from a prepared builder
	pub async fn spawn_with_builder(
		builder: AggregatorBuilder,
	) -> Result<Self, Box<dyn std::error::Error>> {
		let (_router, state) = builder.start().await?;
		let app: Router = create_router().with_state(state);
		Self::spawn_server_with_app(app).await
	}

	/// Common server spawning logic
	async fn spawn_server_with_app(app: Router) -> Result<Self, Box<dyn std::error::Error>> {
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
			.await
			.expect("bind test port");
		let addr = listener.local_addr()?;
		let base_url = format!("http://{}:{}", addr.ip(), addr.port());

		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, app).await;
		});

		// Give the server time to start
		tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

		Ok(Self { base_url, handle })
	}

	#[allow(dead_code)]
	pub fn abort(self) {
		self.handle.abort();
	}
}

/// A supplier pointing at the given adapter with a tight per-call timeout
#[allow(dead_code)]
pub fn supplier_with_timeout(
	supplier_id: &str,
	adapter_id: &str,
	timeout_ms: u64,
) -> Supplier {
	let mut supplier = mock_supplier(supplier_id, adapter_id, TravelVertical::Hotel);
	supplier.timeout_ms = timeout_ms;
	supplier
}
