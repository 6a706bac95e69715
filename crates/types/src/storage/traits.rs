//! Storage traits for pluggable result-cache and supplier-registry backends

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{StorageError, StorageResult};
use crate::offers::{AggregationMetadata, CandidateSet};
use crate::suppliers::Supplier;

/// One cached aggregation outcome, keyed by query fingerprint
#[derive(Debug, Clone, PartialEq)]
pub struct CachedCandidates {
	pub candidates: CandidateSet,
	pub metadata: AggregationMetadata,
	pub expires_at: DateTime<Utc>,
}

impl CachedCandidates {
	pub fn is_expired(&self) -> bool {
		self.expires_at <= Utc::now()
	}
}

/// Statistics about storage usage
#[derive(Debug, Clone)]
pub struct StorageStats {
	pub total_cached_sets: usize,
	pub active_cached_sets: usize,
	pub total_suppliers: usize,
}

/// Trait for candidate-set cache operations
#[async_trait]
pub trait CandidateStorageTrait: Send + Sync {
	/// Store an aggregation outcome under its query fingerprint
	async fn put_candidates(&self, entry: CachedCandidates) -> StorageResult<()>;

	/// Get a cached, non-expired candidate set by fingerprint
	async fn get_candidates(&self, fingerprint: &str) -> StorageResult<Option<CachedCandidates>>;

	/// Remove a cached entry
	async fn remove_candidates(&self, fingerprint: &str) -> StorageResult<bool>;

	/// Remove expired entries, returning how many were dropped
	async fn cleanup_expired(&self) -> StorageResult<usize>;

	/// Candidate cache statistics: (total, active)
	async fn candidate_stats(&self) -> StorageResult<(usize, usize)>;
}

/// Trait for supplier registry operations
#[async_trait]
pub trait SupplierStorageTrait: Send + Sync {
	/// Register a new supplier
	async fn create_supplier(&self, supplier: Supplier) -> StorageResult<()>;

	/// Get a supplier by ID
	async fn get_supplier(&self, supplier_id: &str) -> StorageResult<Option<Supplier>>;

	/// Update an existing supplier
	async fn update_supplier(&self, supplier: Supplier) -> StorageResult<()>;

	/// Remove a supplier by ID
	async fn remove_supplier(&self, supplier_id: &str) -> StorageResult<bool>;

	/// Get all registered suppliers
	async fn list_all_suppliers(&self) -> StorageResult<Vec<Supplier>>;

	/// Get supplier count
	async fn supplier_count(&self) -> StorageResult<usize>;
}

/// Combined storage interface: traits can be used individually for partial
/// implementations, or together via this trait for full storage backends
#[async_trait]
pub trait StorageTrait: CandidateStorageTrait + SupplierStorageTrait + Send + Sync {
	/// Health check for the storage backend
	async fn health_check(&self) -> StorageResult<bool>;

	/// Get comprehensive storage statistics
	async fn stats(&self) -> StorageResult<StorageStats>;

	/// Start any background tasks (TTL cleanup etc.)
	async fn start_background_tasks(&self) -> StorageResult<()>;

	/// Close connections and clean up resources
	async fn close(&self) -> StorageResult<()>;
}

impl From<serde_json::Error> for StorageError {
	fn from(err: serde_json::Error) -> Self {
		StorageError::Serialization {
			message: err.to_string(),
		}
	}
}
