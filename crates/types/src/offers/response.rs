//! API response shapes for search results

use serde::{Deserialize, Serialize};

use super::{AggregationMetadata, Offer};

/// Response for a full search: aggregation plus filtering in one round trip
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
	/// Fingerprint of the normalized query; key for follow-up re-filter calls
	pub query_fingerprint: String,

	/// Offers after filtering and sorting
	pub offers: Vec<Offer>,

	pub total_offers: usize,

	/// Whether the candidate set came from the result cache
	pub from_cache: bool,

	pub metadata: AggregationMetadata,
}

impl SearchResponse {
	pub fn new(
		query_fingerprint: String,
		offers: Vec<Offer>,
		from_cache: bool,
		metadata: AggregationMetadata,
	) -> Self {
		let total_offers = offers.len();
		Self {
			query_fingerprint,
			offers,
			total_offers,
			from_cache,
			metadata,
		}
	}
}

/// Response for re-filtering a cached candidate set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffersResponse {
	pub query_fingerprint: String,
	pub offers: Vec<Offer>,
	pub total_offers: usize,
}

impl OffersResponse {
	pub fn new(query_fingerprint: String, offers: Vec<Offer>) -> Self {
		let total_offers = offers.len();
		Self {
			query_fingerprint,
			offers,
			total_offers,
		}
	}
}
