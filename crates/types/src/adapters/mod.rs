//! Adapter descriptors, runtime configuration and the adapter capability trait

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod errors;
pub mod traits;

pub use errors::{AdapterError, AdapterResult};
pub use traits::SupplierAdapter;

use crate::suppliers::Supplier;

/// Static description of an adapter implementation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Adapter {
	/// Unique identifier, referenced by supplier registrations
	pub adapter_id: String,

	/// Human-readable name
	pub name: String,

	pub description: Option<String>,

	/// Adapter implementation version
	pub version: String,

	/// Adapter-specific configuration values
	pub configuration: HashMap<String, serde_json::Value>,
}

impl Adapter {
	pub fn new(adapter_id: String, name: String, version: String) -> Self {
		Self {
			adapter_id,
			name,
			description: None,
			version,
			configuration: HashMap::new(),
		}
	}
}

/// Per-call runtime configuration handed to an adapter.
///
/// Carries the supplier-specific connection details so one adapter instance
/// can serve many suppliers speaking the same protocol.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierRuntimeConfig {
	pub supplier_id: String,
	pub endpoint: String,
	pub timeout_ms: u64,
	pub headers: Option<HashMap<String, String>>,
}

impl From<&Supplier> for SupplierRuntimeConfig {
	fn from(supplier: &Supplier) -> Self {
		Self {
			supplier_id: supplier.supplier_id.clone(),
			endpoint: supplier.endpoint.clone(),
			timeout_ms: supplier.timeout_ms,
			headers: supplier.metadata.headers.clone(),
		}
	}
}
