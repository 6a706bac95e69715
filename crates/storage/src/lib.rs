//! Farebeam Storage
//!
//! Pluggable storage for the farebeam aggregator: the TTL result cache for
//! candidate sets and the supplier registry.

pub mod memory_store;
pub mod traits;

pub use memory_store::MemoryStore;
pub use traits::{
	CandidateStorage, Storage, StorageError, StorageResult, StorageStats, SupplierStorage,
};
