use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;

use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> &'static str {
	"OK"
}

/// Readiness response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
	pub status: String,
	pub storage_healthy: bool,
	pub suppliers: std::collections::HashMap<String, bool>,
}

/// GET /ready - Readiness probe with storage and supplier checks
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
	let storage_healthy = state.storage.health_check().await.unwrap_or(false);
	let suppliers = state
		.supplier_service
		.health_check_all()
		.await
		.unwrap_or_default();
	let suppliers_healthy = suppliers.values().all(|v| *v) || suppliers.is_empty();

	let overall = storage_healthy && suppliers_healthy;
	let status = if overall { "ready" } else { "degraded" };

	let body = ReadinessResponse {
		status: status.to_string(),
		storage_healthy,
		suppliers,
	};
	let code = if overall {
		StatusCode::OK
	} else {
		StatusCode::SERVICE_UNAVAILABLE
	};
	(code, Json(body))
}
