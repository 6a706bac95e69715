//! Search handlers: aggregation round trips and cached-set re-filtering

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::Json,
};
use serde::Deserialize;
use tracing::info;

use crate::handlers::common::ErrorResponse;
use crate::state::AppState;
use farebeam_service::{apply_filters, SearchError};
use farebeam_types::{FilterSpec, OffersResponse, RawSearchRequest, SearchResponse, SortKey};

/// Body of POST /api/v1/search: the raw query plus an optional view spec
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
	#[serde(flatten)]
	pub query: RawSearchRequest,

	#[serde(default)]
	pub filters: Option<FilterSpec>,

	#[serde(default)]
	pub sort: Option<SortKey>,
}

/// Body of POST /api/v1/results/{fingerprint}/offers
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OffersRequest {
	#[serde(default)]
	pub filters: Option<FilterSpec>,

	#[serde(default)]
	pub sort: Option<SortKey>,
}

fn search_error_response(err: SearchError) -> (StatusCode, Json<ErrorResponse>) {
	match err {
		SearchError::NotCached { fingerprint } => (
			StatusCode::NOT_FOUND,
			Json(ErrorResponse::new(
				"NOT_CACHED",
				format!("No cached results for fingerprint: {}", fingerprint),
			)),
		),
		SearchError::Coalesced { message } => (
			StatusCode::INTERNAL_SERVER_ERROR,
			Json(ErrorResponse::new(
				"AGGREGATION_ERROR",
				format!("Shared aggregation round failed: {}", message),
			)),
		),
		SearchError::Storage(e) => (
			StatusCode::INTERNAL_SERVER_ERROR,
			Json(ErrorResponse::new("STORAGE_ERROR", e.to_string())),
		),
	}
}

/// POST /api/v1/search - Normalize, aggregate (or hit the cache) and rank
pub async fn post_search(
	State(state): State<AppState>,
	Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<ErrorResponse>)> {
	let query = request.query.normalize().map_err(|e| {
		(
			StatusCode::BAD_REQUEST,
			Json(ErrorResponse::new(
				"VALIDATION_ERROR",
				format!("Invalid request: {}", e),
			)),
		)
	})?;

	let fingerprint = query.fingerprint();
	info!("Processing {} search for {}", query.vertical(), fingerprint);

	let outcome = state
		.search_service
		.search(&query)
		.await
		.map_err(search_error_response)?;

	let filters = request.filters.unwrap_or_default();
	let sort = request.sort.unwrap_or_default();
	let offers = apply_filters(&outcome.candidates, &filters, sort);

	info!(
		"Returning {} of {} offers for {} (cache: {})",
		offers.len(),
		outcome.candidates.len(),
		fingerprint,
		outcome.from_cache
	);

	Ok(Json(SearchResponse::new(
		fingerprint,
		offers,
		outcome.from_cache,
		outcome.metadata,
	)))
}

/// POST /api/v1/results/{fingerprint}/offers - Re-filter a cached set.
///
/// Filter and sort interactions never trigger a new aggregation round; an
/// expired or unknown fingerprint yields 404 and the client restarts with a
/// full search.
pub async fn post_offers(
	State(state): State<AppState>,
	Path(fingerprint): Path<String>,
	Json(request): Json<OffersRequest>,
) -> Result<Json<OffersResponse>, (StatusCode, Json<ErrorResponse>)> {
	let outcome = state
		.search_service
		.cached_candidates(&fingerprint)
		.await
		.map_err(search_error_response)?;

	let filters = request.filters.unwrap_or_default();
	let sort = request.sort.unwrap_or_default();
	let offers = apply_filters(&outcome.candidates, &filters, sort);

	Ok(Json(OffersResponse::new(fingerprint, offers)))
}
