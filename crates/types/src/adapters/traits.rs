//! Core adapter trait for supplier integrations

use async_trait::async_trait;
use std::fmt::Debug;

use super::{Adapter, AdapterResult, SupplierRuntimeConfig};
use crate::offers::Offer;
use crate::queries::QuerySpec;

/// Core trait for supplier adapter implementations.
///
/// One implementation per upstream protocol; the pool never depends on
/// supplier-specific fields. Transport and response schema are private
/// implementation details of each adapter.
#[async_trait]
pub trait SupplierAdapter: Send + Sync + Debug {
	/// Get adapter configuration information
	fn adapter_info(&self) -> &Adapter;

	/// Get adapter ID (for registration and supplier matching)
	fn id(&self) -> &str {
		&self.adapter_info().adapter_id
	}

	/// Fetch offers from the supplier for a normalized query.
	///
	/// The per-supplier timeout is enforced by the caller; an adapter may
	/// additionally bound its own transport.
	async fn fetch_offers(
		&self,
		query: &QuerySpec,
		config: &SupplierRuntimeConfig,
	) -> AdapterResult<Vec<Offer>>;

	/// Health check for the supplier using runtime configuration
	async fn health_check(&self, config: &SupplierRuntimeConfig) -> AdapterResult<bool>;

	/// Get human-readable name for this adapter
	fn name(&self) -> &str {
		&self.adapter_info().name
	}

	/// Get adapter version
	fn version(&self) -> &str {
		&self.adapter_info().version
	}
}
