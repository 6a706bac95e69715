//! Farebeam Aggregator Library
//!
//! A multi-supplier travel search aggregator: query normalization, deadline
//! fan-out across supplier adapters, result caching with single-flight
//! coalescing, and deterministic filtering and ranking.

use farebeam_service::{
	AggregatorTrait, SearchService, SearchServiceTrait, SupplierService, SupplierServiceTrait,
};

// Core domain types - the most commonly used types
pub use farebeam_types::{
	chrono,
	// External dependencies for convenience
	serde_json,
	// Core types
	Adapter,
	AdapterError,
	AggregationMetadata,
	CandidateSet,
	FilterSpec,
	// Primary domain entities
	Offer,
	OfferDetails,
	QuerySpec,
	QueryValidationError,
	RawSearchRequest,
	SortKey,
	Supplier,
	SupplierConfig,
	SupplierError,
	SupplierStatus,
	TravelVertical,
};

// Service layer
pub use farebeam_service::{
	apply_filters,
	AggregatorService,
	SearchError,
	SearchOutcome,
	SupplierStats,
	// Keep the full module for more advanced usage
};

// Storage layer
pub use farebeam_storage::{
	traits::{CandidateStorage, StorageError, StorageResult, SupplierStorage},
	MemoryStore, Storage,
};

// Storage traits module for advanced usage
pub mod traits {
	pub use farebeam_storage::traits::*;
}

// API layer
pub use farebeam_api::{create_router, AppState};

// Adapters
pub use farebeam_adapters::{AdapterRegistry, AdapterResult, SupplierAdapter};

// Config
pub use farebeam_config::{load_config, log_service_info, log_startup_complete, Settings};

// Module aliases for callers that prefer the crate layout
pub mod models {
	pub use farebeam_types::*;
}

pub mod storage {
	pub use farebeam_storage::*;
}

pub mod config {
	pub use farebeam_config::*;
}

pub mod adapters {
	pub use farebeam_adapters::*;
}

pub mod api {
	pub use farebeam_api::*;
}

pub mod service {
	pub use farebeam_service::*;
}

pub mod mocks;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

// Re-export external dependencies for embedders
pub use async_trait;
pub use reqwest;

/// Builder pattern for configuring the aggregator
pub struct AggregatorBuilder<S = MemoryStore>
where
	S: Storage + 'static,
{
	settings: Option<Settings>,
	storage: S,
	adapter_registry: Option<AdapterRegistry>,
	suppliers: Vec<Supplier>,
}

impl<S> AggregatorBuilder<S>
where
	S: Storage + Clone + 'static,
{
	/// Create a new aggregator builder with the provided storage
	pub fn with_storage(storage: S) -> Self {
		Self {
			settings: None,
			storage,
			adapter_registry: None,
			suppliers: Vec::new(),
		}
	}
}

// Default constructor using MemoryStore for convenience
impl Default for AggregatorBuilder<MemoryStore> {
	fn default() -> Self {
		Self::new()
	}
}

impl AggregatorBuilder<MemoryStore> {
	/// Create a new aggregator builder with default memory storage
	pub fn new() -> Self {
		Self::with_storage(MemoryStore::new())
	}
}

impl<S> AggregatorBuilder<S>
where
	S: Storage + Clone + 'static,
{
	/// Upsert suppliers defined in Settings into storage so that start()
	/// can load them via `list_all_suppliers()`.
	async fn upsert_suppliers_from_settings(&self, settings: &Settings) -> Result<(), String> {
		let mut errors = Vec::new();

		for supplier_config in settings.enabled_suppliers().values() {
			let mut supplier = Supplier::new(
				supplier_config.supplier_id.clone(),
				supplier_config.adapter_id.clone(),
				supplier_config.endpoint.clone(),
				supplier_config.vertical,
				supplier_config.timeout_ms,
			);

			supplier.metadata.name = supplier_config
				.name
				.clone()
				.or_else(|| Some(supplier_config.supplier_id.clone()));
			supplier.metadata.description = supplier_config.description.clone();
			supplier.metadata.headers = supplier_config.headers.clone();
			supplier.status = SupplierStatus::Active;

			if let Err(validation_error) = supplier.validate() {
				errors.push(format!(
					"Supplier '{}' validation failed: {}",
					supplier.supplier_id, validation_error
				));
				continue;
			}

			if let Err(storage_error) = self.storage.create_supplier(supplier.clone()).await {
				errors.push(format!(
					"Failed to create supplier '{}': {}",
					supplier.supplier_id, storage_error
				));
			}
		}

		if !errors.is_empty() {
			return Err(format!(
				"Configuration errors found:\n{}",
				errors.join("\n")
			));
		}

		Ok(())
	}

	/// Upsert collected suppliers into storage
	async fn upsert_collected_suppliers(&self) -> Result<(), String> {
		let mut errors = Vec::new();

		for supplier in &self.suppliers {
			if let Err(validation_error) = supplier.validate() {
				errors.push(format!(
					"Supplier '{}' validation failed: {}",
					supplier.supplier_id, validation_error
				));
				continue;
			}

			if let Err(storage_error) = self.storage.create_supplier(supplier.clone()).await {
				errors.push(format!(
					"Failed to create supplier '{}': {}",
					supplier.supplier_id, storage_error
				));
			}
		}

		if !errors.is_empty() {
			return Err(format!("Supplier creation errors:\n{}", errors.join("\n")));
		}

		Ok(())
	}

	/// Register a custom adapter (uses adapter's own ID)
	/// Panics if adapter registration fails (this is intentional for startup-time configuration errors)
	pub fn with_adapter(mut self, adapter: Box<dyn SupplierAdapter>) -> Self {
		let mut registry = self
			.adapter_registry
			.unwrap_or_else(AdapterRegistry::with_defaults);
		registry.register(adapter).expect(
			"Failed to register adapter during startup - this is a fatal configuration error",
		);
		self.adapter_registry = Some(registry);
		self
	}

	/// Add a supplier to the aggregator
	pub fn with_supplier(mut self, supplier: Supplier) -> Self {
		self.suppliers.push(supplier);
		self
	}

	/// Set custom settings
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Get the current settings
	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Initialize tracing with configuration-based settings
	fn init_tracing_from_settings(
		&self,
		settings: &Settings,
	) -> Result<(), Box<dyn std::error::Error>> {
		use farebeam_config::LogFormat;

		let log_level = &settings.logging.level;
		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

		match settings.logging.format {
			LogFormat::Json => {
				let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
			LogFormat::Pretty => {
				let subscriber = tracing_subscriber::fmt()
					.pretty()
					.with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
			LogFormat::Compact => {
				let subscriber = tracing_subscriber::fmt()
					.compact()
					.with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
		}

		info!(
			"Logging configuration applied: level={}, format={:?}, structured={}",
			settings.logging.level, settings.logging.format, settings.logging.structured
		);

		Ok(())
	}

	/// Start the aggregator and return the configured router with state
	pub async fn start(self) -> Result<(axum::Router, AppState), Box<dyn std::error::Error>> {
		let settings = self.settings.clone().unwrap_or_default();
		// Upsert suppliers from settings into storage first - fail on any configuration errors
		self.upsert_suppliers_from_settings(&settings).await?;
		// Upsert collected suppliers from with_supplier() calls
		self.upsert_collected_suppliers().await?;

		let suppliers = self
			.storage
			.list_all_suppliers()
			.await
			.map_err(|e| format!("Failed to get suppliers: {}", e))?;

		info!(
			"Successfully initialized with {} supplier(s)",
			suppliers.len()
		);

		let adapter_registry = Arc::new(
			self.adapter_registry
				.unwrap_or_else(AdapterRegistry::with_defaults),
		);

		let storage_arc: Arc<dyn Storage> = Arc::new(self.storage.clone());

		let aggregator_service = AggregatorService::new(
			suppliers,
			Arc::clone(&adapter_registry),
			settings.timeouts.per_supplier_ms,
			settings.timeouts.global_ms,
		)
		.with_supplier_store(Arc::new(self.storage.clone()) as Arc<dyn SupplierStorage>);

		// Validate that all suppliers have matching adapters
		aggregator_service
			.validate_suppliers()
			.map_err(|e| format!("Supplier validation failed: {}", e))?;

		let search_service = SearchService::new(
			Arc::new(aggregator_service) as Arc<dyn AggregatorTrait>,
			Arc::new(self.storage.clone()) as Arc<dyn CandidateStorage>,
			settings.cache_ttl(),
		);

		let app_state = AppState {
			search_service: Arc::new(search_service) as Arc<dyn SearchServiceTrait>,
			supplier_service: Arc::new(SupplierService::new(
				Arc::clone(&storage_arc),
				Arc::clone(&adapter_registry),
			)) as Arc<dyn SupplierServiceTrait>,
			storage: storage_arc,
		};

		// Create router with state
		let router = create_router().with_state(app_state.clone());

		Ok((router, app_state))
	}

	/// Start the complete server with all defaults and setup
	/// This method handles everything needed to run the server, including:
	/// - Loading .env file
	/// - Loading configuration with defaults
	/// - Initializing tracing
	/// - Starting TTL cleanup
	/// - Binding and serving the application
	pub async fn start_server(mut self) -> Result<(), Box<dyn std::error::Error>> {
		// Load .env file if it exists
		dotenvy::dotenv().ok();

		// Use provided settings or load from config with defaults
		let using_provided_settings = self.settings.is_some();
		let settings = if using_provided_settings {
			self.settings.take().ok_or("settings vanished")?
		} else {
			load_config().unwrap_or_default()
		};

		self.init_tracing_from_settings(&settings)?;

		log_service_info();

		info!(
			"Using configuration: loaded from {}",
			if using_provided_settings {
				"provided settings"
			} else {
				"config file or defaults"
			}
		);

		let enabled_suppliers = settings.enabled_suppliers();
		info!("Enabled suppliers: {}", enabled_suppliers.len());
		for (id, supplier) in &enabled_suppliers {
			info!(
				"  - {}: {} {} ({}ms timeout)",
				id, supplier.vertical, supplier.endpoint, supplier.timeout_ms
			);
		}

		// Parse bind address
		let bind_addr = settings.bind_address();
		let addr: SocketAddr = bind_addr
			.parse()
			.map_err(|e| format!("Invalid bind address '{}': {}", bind_addr, e))?;

		if self.settings.is_none() {
			self.settings = Some(settings.clone());
		}

		let (app, app_state) = self.start().await?;

		// TTL cleanup and other storage maintenance run inside the backend
		app_state
			.storage
			.start_background_tasks()
			.await
			.map_err(|e| format!("Failed to start storage background tasks: {}", e))?;

		let listener = tokio::net::TcpListener::bind(addr).await?;

		log_startup_complete(&bind_addr);
		info!("API endpoints available:");
		info!("  GET  /health");
		info!("  GET  /ready");
		info!("  POST /api/v1/search");
		info!("  POST /api/v1/results/{{fingerprint}}/offers");
		info!("  GET  /api/v1/suppliers");
		info!("  GET  /api/v1/suppliers/{{id}}");

		// Apply global rate limiting based on settings at the make_service level
		let rate_cfg = &settings.environment.rate_limiting;
		if rate_cfg.enabled {
			use std::time::Duration;
			use tower::limit::RateLimitLayer;
			use tower::ServiceBuilder;
			let make_svc = ServiceBuilder::new()
				.layer(RateLimitLayer::new(
					rate_cfg.requests_per_minute as u64,
					Duration::from_secs(60),
				))
				.service(app.into_make_service());
			axum::serve(listener, make_svc).await?;
		} else {
			axum::serve(listener, app).await?;
		}

		Ok(())
	}
}
