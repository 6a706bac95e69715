//! Storage traits and error types for pluggable cache backends

pub mod errors;
pub mod traits;

pub use errors::{StorageError, StorageResult};
pub use traits::{
	CachedCandidates, CandidateStorageTrait, StorageStats, StorageTrait, SupplierStorageTrait,
};
