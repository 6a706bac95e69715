//! Farebeam Adapters
//!
//! Supplier-specific adapters for the farebeam aggregator. Each adapter
//! speaks one upstream protocol; the registry hands them out by id.

pub mod fixture_adapter;
pub mod rest_adapter;

pub use fixture_adapter::FixtureAdapter;
pub use rest_adapter::RestAdapter;

pub use farebeam_types::{AdapterError, AdapterResult, SupplierAdapter};

use std::collections::HashMap;

/// Registry of supplier adapters, keyed by adapter id
pub struct AdapterRegistry {
	adapters: HashMap<String, Box<dyn SupplierAdapter>>,
}

impl AdapterRegistry {
	/// Create an empty registry
	pub fn new() -> Self {
		Self {
			adapters: HashMap::new(),
		}
	}

	/// Create a registry pre-populated with the built-in adapters
	pub fn with_defaults() -> Self {
		let mut registry = Self::new();
		// Built-in adapters carry fixed ids; registering them twice is impossible here
		registry
			.register(Box::new(RestAdapter::new()))
			.expect("duplicate built-in adapter id");
		registry
			.register(Box::new(FixtureAdapter::new()))
			.expect("duplicate built-in adapter id");
		registry
	}

	/// Register an adapter under its own id
	pub fn register(&mut self, adapter: Box<dyn SupplierAdapter>) -> AdapterResult<()> {
		let id = adapter.id().to_string();
		if self.adapters.contains_key(&id) {
			return Err(AdapterError::AlreadyRegistered { adapter_id: id });
		}
		self.adapters.insert(id, adapter);
		Ok(())
	}

	pub fn get(&self, id: &str) -> Option<&dyn SupplierAdapter> {
		self.adapters.get(id).map(|a| a.as_ref())
	}

	pub fn get_all(&self) -> &HashMap<String, Box<dyn SupplierAdapter>> {
		&self.adapters
	}

	pub fn len(&self) -> usize {
		self.adapters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.adapters.is_empty()
	}
}

impl Default for AdapterRegistry {
	fn default() -> Self {
		Self::with_defaults()
	}
}
