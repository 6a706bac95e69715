//! Core Supplier domain model and business logic

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::queries::TravelVertical;

pub mod config;
pub mod errors;
pub mod response;

pub use config::SupplierConfig;
pub use errors::{
	HealthCheckResult, SupplierError, SupplierResult, SupplierValidationError,
	SupplierValidationResult,
};
pub use response::{SupplierResponse, SuppliersResponse};

/// Core Supplier domain model
///
/// One registered upstream travel supplier, bound to the adapter that speaks
/// its native protocol. Converted from [`SupplierConfig`] at startup and to
/// [`SupplierResponse`] at the API boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Supplier {
	/// Unique identifier for the supplier
	pub supplier_id: String,

	/// ID of the adapter used to communicate with this supplier
	pub adapter_id: String,

	/// HTTP endpoint for the supplier API
	pub endpoint: String,

	/// Vertical this supplier serves offers for
	pub vertical: TravelVertical,

	/// Timeout for requests to this supplier in milliseconds
	pub timeout_ms: u64,

	/// Current operational status
	pub status: SupplierStatus,

	/// Additional metadata and configuration
	pub metadata: SupplierMetadata,

	/// When the supplier was registered
	pub created_at: DateTime<Utc>,

	/// Last time the supplier responded or was health checked
	pub last_seen: Option<DateTime<Utc>>,

	/// Performance and health metrics
	pub metrics: SupplierMetrics,
}

/// Supplier operational status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SupplierStatus {
	/// Supplier is active and queried on every aggregation round
	Active,
	/// Supplier is temporarily excluded from aggregation
	Inactive,
	/// Supplier has encountered repeated errors
	Error,
	/// Supplier is in maintenance mode
	Maintenance,
}

/// Supplier metadata and configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SupplierMetadata {
	/// Human-readable name
	pub name: Option<String>,

	/// Description of the supplier
	pub description: Option<String>,

	/// Custom HTTP headers for requests (API keys etc.)
	pub headers: Option<HashMap<String, String>>,
}

/// Performance and health metrics
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierMetrics {
	/// Average response time in milliseconds
	pub avg_response_time_ms: f64,

	/// Total number of requests made
	pub total_requests: u64,

	/// Number of successful requests
	pub successful_requests: u64,

	/// Number of failed requests
	pub failed_requests: u64,

	/// Number of timed-out requests
	pub timeout_requests: u64,

	/// Consecutive failures since the last success
	pub consecutive_failures: u32,

	/// Last health check result
	pub last_health_check: Option<HealthCheckResult>,

	/// Last time metrics were updated
	pub last_updated: DateTime<Utc>,
}

impl Default for SupplierMetrics {
	fn default() -> Self {
		Self {
			avg_response_time_ms: 0.0,
			total_requests: 0,
			successful_requests: 0,
			failed_requests: 0,
			timeout_requests: 0,
			consecutive_failures: 0,
			last_health_check: None,
			last_updated: Utc::now(),
		}
	}
}

impl SupplierMetrics {
	/// Fold one successful round into the running averages
	pub fn record_success(&mut self, response_time_ms: u64) {
		self.total_requests += 1;
		self.successful_requests += 1;
		self.consecutive_failures = 0;
		let n = self.successful_requests as f64;
		self.avg_response_time_ms =
			self.avg_response_time_ms + (response_time_ms as f64 - self.avg_response_time_ms) / n;
		self.last_updated = Utc::now();
	}

	pub fn record_failure(&mut self, timed_out: bool) {
		self.total_requests += 1;
		self.failed_requests += 1;
		if timed_out {
			self.timeout_requests += 1;
		}
		self.consecutive_failures += 1;
		self.last_updated = Utc::now();
	}

	pub fn success_rate(&self) -> f64 {
		if self.total_requests == 0 {
			return 0.0;
		}
		self.successful_requests as f64 / self.total_requests as f64
	}
}

impl Supplier {
	/// Create a new supplier with default metadata and metrics
	pub fn new(
		supplier_id: String,
		adapter_id: String,
		endpoint: String,
		vertical: TravelVertical,
		timeout_ms: u64,
	) -> Self {
		Self {
			supplier_id,
			adapter_id,
			endpoint,
			vertical,
			timeout_ms,
			status: SupplierStatus::Active,
			metadata: SupplierMetadata::default(),
			created_at: Utc::now(),
			last_seen: None,
			metrics: SupplierMetrics::default(),
		}
	}

	/// Validate invariants that must hold before registration
	pub fn validate(&self) -> SupplierValidationResult<()> {
		if self.supplier_id.trim().is_empty() {
			return Err(SupplierValidationError::InvalidSupplierId {
				supplier_id: self.supplier_id.clone(),
			});
		}
		if self.adapter_id.trim().is_empty() {
			return Err(SupplierValidationError::InvalidAdapterId {
				adapter_id: self.adapter_id.clone(),
			});
		}
		if url::Url::parse(&self.endpoint).is_err() {
			return Err(SupplierValidationError::InvalidEndpoint {
				endpoint: self.endpoint.clone(),
			});
		}
		if self.timeout_ms == 0 {
			return Err(SupplierValidationError::InvalidTimeout {
				timeout_ms: self.timeout_ms,
			});
		}
		Ok(())
	}

	pub fn is_active(&self) -> bool {
		self.status == SupplierStatus::Active
	}

	/// Display name, falling back to the supplier id
	pub fn display_name(&self) -> &str {
		self.metadata.name.as_deref().unwrap_or(&self.supplier_id)
	}
}

impl From<SupplierConfig> for Supplier {
	fn from(config: SupplierConfig) -> Self {
		let mut supplier = Supplier::new(
			config.supplier_id,
			config.adapter_id,
			config.endpoint,
			config.vertical,
			config.timeout_ms,
		);
		supplier.metadata.name = config.name;
		supplier.metadata.description = config.description;
		supplier.metadata.headers = config.headers;
		supplier
	}
}
