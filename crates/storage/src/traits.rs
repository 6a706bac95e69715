//! Storage traits for pluggable storage implementations

// Re-export the storage traits from the types crate
pub use farebeam_types::storage::{
	CandidateStorageTrait as CandidateStorage, StorageError, StorageResult, StorageStats,
	StorageTrait as Storage, SupplierStorageTrait as SupplierStorage,
};
