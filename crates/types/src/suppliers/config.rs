//! Supplier configuration as loaded from settings

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::queries::TravelVertical;

/// Declarative supplier registration, one per upstream supplier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupplierConfig {
	pub supplier_id: String,

	/// Adapter that speaks this supplier's protocol
	pub adapter_id: String,

	pub endpoint: String,

	pub vertical: TravelVertical,

	/// Per-supplier request timeout in milliseconds
	pub timeout_ms: u64,

	/// Disabled suppliers stay configured but are never queried
	pub enabled: bool,

	/// Custom HTTP headers (API keys etc.)
	pub headers: Option<HashMap<String, String>>,

	pub name: Option<String>,

	pub description: Option<String>,
}
