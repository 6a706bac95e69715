//! Tests for the aggregator builder wiring

use farebeam_aggregator::mocks::{mock_supplier, MockSupplierAdapter};
use farebeam_aggregator::{AggregatorBuilder, MemoryStore, Settings, TravelVertical};

#[tokio::test]
async fn builder_starts_with_defaults() {
	let result = AggregatorBuilder::default().start().await;
	assert!(result.is_ok());

	let (_router, state) = result.unwrap();
	let suppliers = state.supplier_service.list_suppliers().await.unwrap();
	assert!(suppliers.is_empty());
}

#[tokio::test]
async fn builder_registers_suppliers_and_adapters() {
	let adapter = MockSupplierAdapter::new("mock-hotel-v1");

	let (_router, state) = AggregatorBuilder::default()
		.with_adapter(Box::new(adapter))
		.with_supplier(mock_supplier(
			"stayfind",
			"mock-hotel-v1",
			TravelVertical::Hotel,
		))
		.start()
		.await
		.expect("builder should start");

	let supplier = state.supplier_service.get_supplier("stayfind").await.unwrap();
	assert_eq!(supplier.adapter_id, "mock-hotel-v1");
}

#[tokio::test]
async fn builder_rejects_supplier_with_unknown_adapter() {
	let result = AggregatorBuilder::default()
		.with_supplier(mock_supplier(
			"stayfind",
			"no-such-adapter",
			TravelVertical::Hotel,
		))
		.start()
		.await;

	assert!(result.is_err());
	let message = result.err().unwrap().to_string();
	assert!(message.contains("no-such-adapter"));
}

#[tokio::test]
async fn builder_rejects_invalid_supplier_endpoint() {
	let mut supplier = mock_supplier("stayfind", "fixture-v1", TravelVertical::Hotel);
	supplier.endpoint = "not a url".to_string();

	let result = AggregatorBuilder::default().with_supplier(supplier).start().await;
	assert!(result.is_err());
}

#[tokio::test]
async fn builder_upserts_suppliers_from_settings() {
	let mut settings = Settings::default();
	settings.suppliers.insert(
		"roomly".to_string(),
		farebeam_aggregator::config::SupplierConfig {
			supplier_id: "roomly".to_string(),
			adapter_id: "fixture-v1".to_string(),
			endpoint: "http://localhost:9100".to_string(),
			vertical: TravelVertical::Hotel,
			timeout_ms: 2500,
			enabled: true,
			headers: None,
			name: Some("Roomly".to_string()),
			description: None,
		},
	);

	let (_router, state) = AggregatorBuilder::with_storage(MemoryStore::new())
		.with_settings(settings)
		.start()
		.await
		.expect("builder should start");

	let supplier = state.supplier_service.get_supplier("roomly").await.unwrap();
	assert_eq!(supplier.timeout_ms, 2500);
	assert_eq!(supplier.display_name(), "Roomly");
}

#[tokio::test]
async fn disabled_suppliers_are_not_registered() {
	let mut settings = Settings::default();
	settings.suppliers.insert(
		"dormant".to_string(),
		farebeam_aggregator::config::SupplierConfig {
			supplier_id: "dormant".to_string(),
			adapter_id: "fixture-v1".to_string(),
			endpoint: "http://localhost:9101".to_string(),
			vertical: TravelVertical::Hotel,
			timeout_ms: 2500,
			enabled: false,
			headers: None,
			name: None,
			description: None,
		},
	);

	let (_router, state) = AggregatorBuilder::default()
		.with_settings(settings)
		.start()
		.await
		.expect("builder should start");

	let suppliers = state.supplier_service.list_suppliers().await.unwrap();
	assert!(suppliers.is_empty());
}
