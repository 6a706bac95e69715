//! Farebeam Types
//!
//! Shared models and traits for the farebeam travel search aggregator.
//! This crate contains all domain models organized by business entity.

pub mod adapters;
pub mod filters;
pub mod offers;
pub mod queries;
pub mod storage;
pub mod suppliers;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

// Re-export commonly used types for convenience
pub use queries::{
	CabinClass, CarQuery, FlightQuery, HotelQuery, QuerySpec, QueryValidationError,
	QueryValidationResult, RawSearchRequest, TravelVertical,
};

pub use offers::{
	AggregationMetadata, CandidateSet, CarOffer, DroppedDuplicate, FlightOffer, HotelOffer, Offer,
	OfferDetails, OffersResponse, SearchResponse, SupplierFailure, Transmission,
};

pub use filters::{FilterSpec, SortKey};

pub use suppliers::{
	HealthCheckResult, Supplier, SupplierConfig, SupplierError, SupplierMetadata, SupplierMetrics,
	SupplierResponse, SupplierResult, SupplierStatus, SupplierValidationError,
	SupplierValidationResult, SuppliersResponse,
};

pub use adapters::{Adapter, AdapterError, AdapterResult, SupplierAdapter, SupplierRuntimeConfig};

pub use storage::{
	CachedCandidates, CandidateStorageTrait, StorageError, StorageResult, StorageStats,
	StorageTrait, SupplierStorageTrait,
};
