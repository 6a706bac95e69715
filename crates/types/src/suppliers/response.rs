//! API response shape for supplier inspection endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Supplier, SupplierStatus};
use crate::queries::TravelVertical;

/// Public view of a registered supplier, metrics included
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierResponse {
	pub supplier_id: String,
	pub adapter_id: String,
	pub vertical: TravelVertical,
	pub name: Option<String>,
	pub description: Option<String>,
	pub status: SupplierStatus,
	pub created_at: DateTime<Utc>,
	pub last_seen: Option<DateTime<Utc>>,
	pub avg_response_time_ms: f64,
	pub success_rate: f64,
	pub total_requests: u64,
	pub consecutive_failures: u32,
}

/// Response for the supplier listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuppliersResponse {
	pub suppliers: Vec<SupplierResponse>,
	pub total_suppliers: usize,
	pub timestamp: i64,
}

impl From<&Supplier> for SupplierResponse {
	fn from(supplier: &Supplier) -> Self {
		Self {
			supplier_id: supplier.supplier_id.clone(),
			adapter_id: supplier.adapter_id.clone(),
			vertical: supplier.vertical,
			name: supplier.metadata.name.clone(),
			description: supplier.metadata.description.clone(),
			status: supplier.status,
			created_at: supplier.created_at,
			last_seen: supplier.last_seen,
			avg_response_time_ms: supplier.metrics.avg_response_time_ms,
			success_rate: supplier.metrics.success_rate(),
			total_requests: supplier.metrics.total_requests,
			consecutive_failures: supplier.metrics.consecutive_failures,
		}
	}
}
