//! Supplier service
//!
//! Read access to the supplier registry plus health checks and stats.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use farebeam_adapters::AdapterRegistry;
use farebeam_storage::Storage;
use farebeam_types::{Supplier, SupplierError, SupplierResult, SupplierRuntimeConfig};

/// Supplier statistics for health checks and monitoring
#[derive(Debug, Serialize, Clone)]
pub struct SupplierStats {
	pub total: usize,
	pub active: usize,
	pub inactive: usize,
	pub healthy: usize,
	pub unhealthy: usize,
	pub health_details: HashMap<String, bool>,
}

/// Trait for supplier registry access, mockable at the API seam
#[async_trait]
pub trait SupplierServiceTrait: Send + Sync {
	async fn list_suppliers(&self) -> SupplierResult<Vec<Supplier>>;

	async fn get_supplier(&self, supplier_id: &str) -> SupplierResult<Supplier>;

	/// Perform health checks on all registered suppliers via their adapters
	async fn health_check_all(&self) -> SupplierResult<HashMap<String, bool>>;

	/// Comprehensive registry statistics including health status
	async fn get_stats(&self) -> SupplierResult<SupplierStats>;
}

#[derive(Clone)]
pub struct SupplierService {
	storage: Arc<dyn Storage>,
	adapter_registry: Arc<AdapterRegistry>,
}

impl SupplierService {
	pub fn new(storage: Arc<dyn Storage>, adapter_registry: Arc<AdapterRegistry>) -> Self {
		Self {
			storage,
			adapter_registry,
		}
	}
}

#[async_trait]
impl SupplierServiceTrait for SupplierService {
	async fn list_suppliers(&self) -> SupplierResult<Vec<Supplier>> {
		self.storage
			.list_all_suppliers()
			.await
			.map_err(|e| SupplierError::Storage(e.to_string()))
	}

	async fn get_supplier(&self, supplier_id: &str) -> SupplierResult<Supplier> {
		match self
			.storage
			.get_supplier(supplier_id)
			.await
			.map_err(|e| SupplierError::Storage(e.to_string()))?
		{
			Some(supplier) => Ok(supplier),
			None => Err(SupplierError::NotFound {
				supplier_id: supplier_id.to_string(),
			}),
		}
	}

	async fn health_check_all(&self) -> SupplierResult<HashMap<String, bool>> {
		let mut results = HashMap::new();

		let suppliers = self.list_suppliers().await?;
		for supplier in &suppliers {
			let healthy = match self.adapter_registry.get(&supplier.adapter_id) {
				Some(adapter) => {
					let config = SupplierRuntimeConfig::from(supplier);
					adapter.health_check(&config).await.unwrap_or(false)
				},
				None => false,
			};
			debug!(
				"Health check for supplier {}: {}",
				supplier.supplier_id, healthy
			);
			results.insert(supplier.supplier_id.clone(), healthy);
		}

		Ok(results)
	}

	async fn get_stats(&self) -> SupplierResult<SupplierStats> {
		let suppliers = self.list_suppliers().await?;
		let total = suppliers.len();
		let active = suppliers.iter().filter(|s| s.is_active()).count();

		let health_details = self.health_check_all().await?;
		let healthy = health_details.values().filter(|h| **h).count();

		Ok(SupplierStats {
			total,
			active,
			inactive: total.saturating_sub(active),
			healthy,
			unhealthy: total.saturating_sub(healthy),
			health_details,
		})
	}
}
