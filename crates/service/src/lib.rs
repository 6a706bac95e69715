//! Farebeam Service
//!
//! Core logic for offer aggregation, result caching and ranking.

pub mod aggregator;
pub mod ranking;
pub mod search;
pub mod supplier;

pub use aggregator::{AggregatorService, AggregatorTrait};
pub use ranking::apply_filters;
pub use search::{SearchError, SearchOutcome, SearchService, SearchServiceTrait};
pub use supplier::{SupplierService, SupplierServiceTrait, SupplierStats};
