//! Error types for supplier operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for supplier registrations
#[derive(Error, Debug)]
pub enum SupplierValidationError {
	#[error("Invalid supplier ID: {supplier_id}")]
	InvalidSupplierId { supplier_id: String },

	#[error("Invalid adapter ID: {adapter_id}")]
	InvalidAdapterId { adapter_id: String },

	#[error("Invalid endpoint URL: {endpoint}")]
	InvalidEndpoint { endpoint: String },

	#[error("Invalid timeout: {timeout_ms}ms (must be > 0)")]
	InvalidTimeout { timeout_ms: u64 },
}

/// General supplier-related errors
#[derive(Error, Debug)]
pub enum SupplierError {
	#[error("Supplier validation failed: {0}")]
	Validation(#[from] SupplierValidationError),

	#[error("Supplier not found: {supplier_id}")]
	NotFound { supplier_id: String },

	#[error("Supplier '{supplier_id}' references unknown adapter '{adapter_id}'")]
	UnknownAdapter {
		supplier_id: String,
		adapter_id: String,
	},

	#[error("Storage error: {0}")]
	Storage(String),
}

/// Result type for supplier operations
pub type SupplierResult<T> = Result<T, SupplierError>;

/// Result type for supplier validation operations
pub type SupplierValidationResult<T> = Result<T, SupplierValidationError>;

/// Outcome of one health check round against a supplier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthCheckResult {
	pub healthy: bool,
	pub checked_at: DateTime<Utc>,
	pub response_time_ms: u64,
	pub error: Option<String>,
}
