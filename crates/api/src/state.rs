use std::sync::Arc;

use farebeam_service::{SearchServiceTrait, SupplierServiceTrait};
use farebeam_storage::Storage;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
	pub search_service: Arc<dyn SearchServiceTrait>,
	pub supplier_service: Arc<dyn SupplierServiceTrait>,
	pub storage: Arc<dyn Storage>,
}
