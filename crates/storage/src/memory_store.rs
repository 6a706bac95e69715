//! In-memory storage implementation using DashMap with TTL support

use crate::traits::{CandidateStorage, Storage, StorageResult, StorageStats, SupplierStorage};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use farebeam_types::{CachedCandidates, Supplier};
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{debug, info};

/// In-memory storage for cached candidate sets and suppliers with TTL support
#[derive(Clone)]
pub struct MemoryStore {
	pub candidates: Arc<DashMap<String, CachedCandidates>>,
	pub suppliers: Arc<DashMap<String, Supplier>>,
	pub cleanup_enabled: bool,
}

impl MemoryStore {
	/// Create a new memory store instance
	pub fn new() -> Self {
		Self {
			candidates: Arc::new(DashMap::new()),
			suppliers: Arc::new(DashMap::new()),
			cleanup_enabled: true,
		}
	}

	/// Create a new memory store with background cleanup configured
	pub fn with_cleanup_enabled(cleanup_enabled: bool) -> Self {
		Self {
			candidates: Arc::new(DashMap::new()),
			suppliers: Arc::new(DashMap::new()),
			cleanup_enabled,
		}
	}

	/// Start the TTL cleanup task for expired candidate sets
	pub fn start_ttl_cleanup(&self) -> tokio::task::JoinHandle<()> {
		if !self.cleanup_enabled {
			return tokio::spawn(async {});
		}

		let candidates = Arc::clone(&self.candidates);
		tokio::spawn(async move {
			let mut cleanup_interval = interval(Duration::from_secs(60)); // Check every minute

			loop {
				cleanup_interval.tick().await;

				let now = Utc::now();
				let before = candidates.len();
				candidates.retain(|_fingerprint, entry| entry.expires_at > now);
				let removed = before.saturating_sub(candidates.len());

				if removed > 0 {
					debug!("Cleaned up {} expired candidate sets", removed);
				}
			}
		})
	}
}

impl Default for MemoryStore {
	fn default() -> Self {
		Self::new()
	}
}

// Trait implementations for pluggable storage

#[async_trait]
impl CandidateStorage for MemoryStore {
	async fn put_candidates(&self, entry: CachedCandidates) -> StorageResult<()> {
		self.candidates
			.insert(entry.candidates.query_fingerprint.clone(), entry);
		Ok(())
	}

	async fn get_candidates(&self, fingerprint: &str) -> StorageResult<Option<CachedCandidates>> {
		if let Some(entry) = self.candidates.get(fingerprint) {
			if entry.is_expired() {
				drop(entry);
				self.candidates.remove(fingerprint);
				return Ok(None);
			}
			return Ok(Some(entry.clone()));
		}
		Ok(None)
	}

	async fn remove_candidates(&self, fingerprint: &str) -> StorageResult<bool> {
		Ok(self.candidates.remove(fingerprint).is_some())
	}

	async fn cleanup_expired(&self) -> StorageResult<usize> {
		let now = Utc::now();
		let mut removed_count = 0;

		self.candidates.retain(|fingerprint, entry| {
			if entry.expires_at <= now {
				removed_count += 1;
				debug!("Removed expired candidate set: {}", fingerprint);
				false
			} else {
				true
			}
		});

		if removed_count > 0 {
			info!("Cleaned up {} expired candidate sets", removed_count);
		}

		Ok(removed_count)
	}

	async fn candidate_stats(&self) -> StorageResult<(usize, usize)> {
		let total = self.candidates.len();
		let now = Utc::now();
		let active = self
			.candidates
			.iter()
			.filter(|entry| entry.expires_at > now)
			.count();

		Ok((total, active))
	}
}

#[async_trait]
impl SupplierStorage for MemoryStore {
	async fn create_supplier(&self, supplier: Supplier) -> StorageResult<()> {
		self.suppliers
			.insert(supplier.supplier_id.clone(), supplier);
		Ok(())
	}

	async fn get_supplier(&self, supplier_id: &str) -> StorageResult<Option<Supplier>> {
		Ok(self.suppliers.get(supplier_id).map(|s| s.clone()))
	}

	async fn update_supplier(&self, supplier: Supplier) -> StorageResult<()> {
		self.suppliers
			.insert(supplier.supplier_id.clone(), supplier);
		Ok(())
	}

	async fn remove_supplier(&self, supplier_id: &str) -> StorageResult<bool> {
		Ok(self.suppliers.remove(supplier_id).is_some())
	}

	async fn list_all_suppliers(&self) -> StorageResult<Vec<Supplier>> {
		Ok(self
			.suppliers
			.iter()
			.map(|entry| entry.value().clone())
			.collect())
	}

	async fn supplier_count(&self) -> StorageResult<usize> {
		Ok(self.suppliers.len())
	}
}

#[async_trait]
impl Storage for MemoryStore {
	async fn health_check(&self) -> StorageResult<bool> {
		// For in-memory storage, just check that the maps are accessible
		Ok(true)
	}

	async fn stats(&self) -> StorageResult<StorageStats> {
		let (total_cached_sets, active_cached_sets) = self.candidate_stats().await?;
		let total_suppliers = self.supplier_count().await?;

		Ok(StorageStats {
			total_cached_sets,
			active_cached_sets,
			total_suppliers,
		})
	}

	async fn start_background_tasks(&self) -> StorageResult<()> {
		self.start_ttl_cleanup();
		Ok(())
	}

	async fn close(&self) -> StorageResult<()> {
		// For memory store, there's nothing to close
		Ok(())
	}
}
