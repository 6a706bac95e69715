//! Error types for adapter operations

use thiserror::Error;

/// Adapter operation errors.
///
/// These are per-supplier failures; the aggregator recovers from every
/// variant by dropping that supplier's contribution for the round.
#[derive(Error, Debug)]
pub enum AdapterError {
	#[error("Adapter not found: {adapter_id}")]
	NotFound { adapter_id: String },

	#[error("Adapter already registered: {adapter_id}")]
	AlreadyRegistered { adapter_id: String },

	#[error("Timeout occurred after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("HTTP {status_code}: {reason}")]
	HttpStatus { status_code: u16, reason: String },

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },

	#[error("Supplier returned error: {code} - {message}")]
	Supplier { code: String, message: String },

	#[error("Configuration error: {reason}")]
	Config { reason: String },
}

impl AdapterError {
	pub fn is_timeout(&self) -> bool {
		matches!(self, Self::Timeout { .. })
	}
}

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;
