//! Mock adapters for examples and testing
//!
//! Simple, working mock adapters usable in demos and tests without real
//! supplier endpoints.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use farebeam_types::chrono::{NaiveDate, Utc};
use farebeam_types::{
	Adapter, AdapterError, AdapterResult, HotelOffer, Offer, OfferDetails, QuerySpec, Supplier,
	SupplierAdapter, SupplierRuntimeConfig, TravelVertical,
};

/// Mock adapter returning a fixed set of offers, with optional latency and
/// failure injection. Tracks how many times `fetch_offers` was called so
/// tests can assert on cache and coalescing behavior.
#[derive(Debug, Clone)]
pub struct MockSupplierAdapter {
	adapter: Adapter,
	offers: Vec<Offer>,
	delay_ms: u64,
	fail: bool,
	calls: Arc<AtomicUsize>,
}

impl MockSupplierAdapter {
	pub fn new(adapter_id: &str) -> Self {
		Self {
			adapter: Adapter::new(
				adapter_id.to_string(),
				"Mock Supplier Adapter".to_string(),
				"1.0.0".to_string(),
			),
			offers: Vec::new(),
			delay_ms: 0,
			fail: false,
			calls: Arc::new(AtomicUsize::new(0)),
		}
	}

	pub fn with_offers(mut self, offers: Vec<Offer>) -> Self {
		self.offers = offers;
		self
	}

	/// Delay each fetch, for exercising timeout and coalescing paths
	pub fn with_delay(mut self, delay_ms: u64) -> Self {
		self.delay_ms = delay_ms;
		self
	}

	/// Make every fetch fail with a supplier error
	pub fn failing(mut self) -> Self {
		self.fail = true;
		self
	}

	pub fn call_count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	/// Handle to the call counter, usable after the adapter is boxed
	pub fn call_counter(&self) -> Arc<AtomicUsize> {
		Arc::clone(&self.calls)
	}
}

#[async_trait]
impl SupplierAdapter for MockSupplierAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.adapter
	}

	async fn fetch_offers(
		&self,
		query: &QuerySpec,
		config: &SupplierRuntimeConfig,
	) -> AdapterResult<Vec<Offer>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		if self.delay_ms > 0 {
			tokio::time::sleep(tokio::time::Duration::from_millis(self.delay_ms)).await;
		}

		if self.fail {
			return Err(AdapterError::Supplier {
				code: "MOCK_FAILURE".to_string(),
				message: format!("mock failure for {}", config.supplier_id),
			});
		}

		Ok(self
			.offers
			.iter()
			.filter(|o| o.vertical() == query.vertical())
			.cloned()
			.map(|mut o| {
				o.supplier_id = config.supplier_id.clone();
				o
			})
			.collect())
	}

	async fn health_check(&self, _config: &SupplierRuntimeConfig) -> AdapterResult<bool> {
		Ok(!self.fail)
	}
}

/// Build a mock hotel offer with the given name and price
pub fn mock_hotel_offer(offer_id: &str, name: &str, price: f64, rating: f64) -> Offer {
	Offer {
		offer_id: offer_id.to_string(),
		supplier_id: "mock".to_string(),
		price,
		currency: "USD".to_string(),
		details: OfferDetails::Hotel(HotelOffer {
			name: name.to_string(),
			location: "paris".to_string(),
			rating,
			reviews: 500,
			checkin: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or_default(),
			amenities: vec!["Free WiFi".to_string()],
			distance_km: None,
		}),
		collected_at: Utc::now(),
	}
}

/// Build an active supplier pointing at a mock adapter
pub fn mock_supplier(supplier_id: &str, adapter_id: &str, vertical: TravelVertical) -> Supplier {
	Supplier::new(
		supplier_id.to_string(),
		adapter_id.to_string(),
		format!("http://mock.local/{}", supplier_id),
		vertical,
		3000,
	)
}
