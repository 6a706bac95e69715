//! Error types for query normalization and lookup

use thiserror::Error;

/// Validation errors raised while normalizing a raw search request
#[derive(Error, Debug)]
pub enum QueryValidationError {
	#[error("Missing required field: {field}")]
	MissingRequiredField { field: String },

	#[error("Invalid date in {field}: {value} (expected YYYY-MM-DD)")]
	InvalidDate { field: String, value: String },

	#[error("Invalid time in {field}: {value} (expected HH:MM)")]
	InvalidTime { field: String, value: String },

	#[error("Inverted date range: {end_field} ({end}) must be after {start_field} ({start})")]
	InvertedDateRange {
		start_field: String,
		start: String,
		end_field: String,
		end: String,
	},

	#[error("Invalid party size in {field}: must be at least 1")]
	InvalidPartySize { field: String },
}
