//! Supplier inspection handlers

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::Json,
};
use tracing::debug;

use crate::handlers::common::ErrorResponse;
use crate::state::AppState;
use farebeam_types::{SupplierError, SupplierResponse, SuppliersResponse};

/// GET /api/v1/suppliers - List all suppliers
pub async fn get_suppliers(
	State(state): State<AppState>,
) -> Result<Json<SuppliersResponse>, (StatusCode, Json<ErrorResponse>)> {
	debug!("Listing suppliers");
	let suppliers = state.supplier_service.list_suppliers().await.map_err(|e| {
		(
			StatusCode::INTERNAL_SERVER_ERROR,
			Json(ErrorResponse::new("STORAGE_ERROR", e.to_string())),
		)
	})?;

	let responses: Vec<SupplierResponse> = suppliers.iter().map(SupplierResponse::from).collect();
	let total_suppliers = responses.len();

	Ok(Json(SuppliersResponse {
		suppliers: responses,
		total_suppliers,
		timestamp: chrono::Utc::now().timestamp(),
	}))
}

/// GET /api/v1/suppliers/{id} - Get supplier by id
pub async fn get_supplier_by_id(
	State(state): State<AppState>,
	Path(supplier_id): Path<String>,
) -> Result<Json<SupplierResponse>, (StatusCode, Json<ErrorResponse>)> {
	let supplier = state
		.supplier_service
		.get_supplier(&supplier_id)
		.await
		.map_err(|e| match e {
			SupplierError::NotFound { supplier_id } => (
				StatusCode::NOT_FOUND,
				Json(ErrorResponse::new(
					"NOT_FOUND",
					format!("Supplier not found: {}", supplier_id),
				)),
			),
			other => (
				StatusCode::INTERNAL_SERVER_ERROR,
				Json(ErrorResponse::new("STORAGE_ERROR", other.to_string())),
			),
		})?;

	Ok(Json(SupplierResponse::from(&supplier)))
}
