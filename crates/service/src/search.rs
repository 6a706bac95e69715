//! Search orchestration: cache lookup, single-flight coalescing, aggregation
//!
//! For every normalized query the service first consults the TTL cache, then
//! makes sure at most one aggregation round runs per query fingerprint at a
//! time. Concurrent callers for the same fingerprint attach to the in-flight
//! round and all receive its outcome.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use farebeam_storage::CandidateStorage;
use farebeam_types::{
	AggregationMetadata, CachedCandidates, CandidateSet, QuerySpec, StorageError,
};

use crate::aggregator::AggregatorTrait;

/// Errors the search service surfaces to the API layer
#[derive(Debug, Error)]
pub enum SearchError {
	#[error(transparent)]
	Storage(#[from] StorageError),

	/// The round this caller attached to failed in the leading caller
	#[error("coalesced search round failed: {message}")]
	Coalesced { message: String },

	#[error("no cached results for fingerprint {fingerprint}")]
	NotCached { fingerprint: String },
}

/// Outcome of a search: the candidate set plus how it was obtained
#[derive(Debug, Clone)]
pub struct SearchOutcome {
	pub candidates: CandidateSet,
	pub metadata: AggregationMetadata,
	pub from_cache: bool,
}

/// Trait for the search service, mockable at the API seam
#[async_trait]
pub trait SearchServiceTrait: Send + Sync {
	/// Resolve a normalized query to a candidate set, via cache or aggregation
	async fn search(&self, query: &QuerySpec) -> Result<SearchOutcome, SearchError>;

	/// Fetch an already-cached candidate set by query fingerprint
	async fn cached_candidates(&self, fingerprint: &str) -> Result<SearchOutcome, SearchError>;
}

type RoundSender = broadcast::Sender<Result<SearchOutcome, String>>;

/// A caller's role in the single-flight protocol for one fingerprint
enum RoundRole {
	Leader(RoundSender),
	Waiter(broadcast::Receiver<Result<SearchOutcome, String>>),
}

/// Search service combining the result cache with the aggregator.
///
/// Coalescing is per query fingerprint: the first caller to miss the cache
/// becomes the leader and runs the aggregation round, later callers subscribe
/// to the leader's broadcast channel instead of starting their own round.
pub struct SearchService {
	aggregator: Arc<dyn AggregatorTrait>,
	storage: Arc<dyn CandidateStorage>,
	cache_ttl: ChronoDuration,
	in_flight: DashMap<String, RoundSender>,
}

/// Removes the in-flight entry when the leading round ends, including when
/// the leader future is dropped mid-round. Dropping the map's sender wakes
/// waiters with a closed-channel error and they fall back to the cache.
struct InFlightGuard<'a> {
	map: &'a DashMap<String, RoundSender>,
	fingerprint: &'a str,
}

impl Drop for InFlightGuard<'_> {
	fn drop(&mut self) {
		self.map.remove(self.fingerprint);
	}
}

impl SearchService {
	pub fn new(
		aggregator: Arc<dyn AggregatorTrait>,
		storage: Arc<dyn CandidateStorage>,
		cache_ttl: ChronoDuration,
	) -> Self {
		Self {
			aggregator,
			storage,
			cache_ttl,
			in_flight: DashMap::new(),
		}
	}

	/// Whether a round's outcome is worth memoizing for the TTL.
	///
	/// Rounds where every queried supplier failed are not cached, so a
	/// transient full outage is retried on the next request instead of
	/// being served as an empty set until expiry.
	fn is_cacheable(metadata: &AggregationMetadata) -> bool {
		metadata.suppliers_succeeded > 0 || metadata.suppliers_queried == 0
	}

	async fn cache_lookup(&self, fingerprint: &str) -> Result<Option<SearchOutcome>, SearchError> {
		let cached = self.storage.get_candidates(fingerprint).await?;
		Ok(cached.map(|entry| SearchOutcome {
			candidates: entry.candidates,
			metadata: entry.metadata,
			from_cache: true,
		}))
	}

	/// Run one aggregation round as the leader for this fingerprint
	async fn lead_round(
		&self,
		query: &QuerySpec,
		fingerprint: &str,
		tx: RoundSender,
	) -> Result<SearchOutcome, SearchError> {
		let _guard = InFlightGuard {
			map: &self.in_flight,
			fingerprint,
		};

		let (candidates, metadata) = self.aggregator.fetch_offers(query).await;
		let outcome = SearchOutcome {
			candidates,
			metadata,
			from_cache: false,
		};

		if Self::is_cacheable(&outcome.metadata) {
			let entry = CachedCandidates {
				candidates: outcome.candidates.clone(),
				metadata: outcome.metadata.clone(),
				expires_at: Utc::now() + self.cache_ttl,
			};
			if let Err(e) = self.storage.put_candidates(entry).await {
				// A failed cache write degrades to per-request aggregation
				warn!("Cache write failed for {}: {}", fingerprint, e);
			}
		} else {
			debug!(
				"Not caching round for {}: {}/{} suppliers succeeded",
				fingerprint, outcome.metadata.suppliers_succeeded, outcome.metadata.suppliers_queried
			);
		}

		// Waiters that subscribed before this send receive the outcome; late
		// arrivals see the channel closed and re-check the cache
		let _ = tx.send(Ok(outcome.clone()));
		Ok(outcome)
	}
}

#[async_trait]
impl SearchServiceTrait for SearchService {
	async fn search(&self, query: &QuerySpec) -> Result<SearchOutcome, SearchError> {
		let fingerprint = query.fingerprint();

		loop {
			if let Some(outcome) = self.cache_lookup(&fingerprint).await? {
				debug!("Cache hit for {}", fingerprint);
				return Ok(outcome);
			}

			// Join the in-flight round for this fingerprint or become its
			// leader. The map guard must not be held across an await.
			let role = match self.in_flight.entry(fingerprint.clone()) {
				Entry::Occupied(entry) => RoundRole::Waiter(entry.get().subscribe()),
				Entry::Vacant(entry) => {
					let (tx, _) = broadcast::channel(1);
					entry.insert(tx.clone());
					RoundRole::Leader(tx)
				},
			};

			let mut rx = match role {
				RoundRole::Leader(tx) => {
					info!("Leading aggregation round for {}", fingerprint);
					return self.lead_round(query, &fingerprint, tx).await;
				},
				RoundRole::Waiter(rx) => rx,
			};

			debug!("Coalescing onto in-flight round for {}", fingerprint);
			match rx.recv().await {
				Ok(Ok(outcome)) => {
					return Ok(SearchOutcome {
						from_cache: true,
						..outcome
					});
				},
				Ok(Err(message)) => return Err(SearchError::Coalesced { message }),
				// Leader dropped without broadcasting; re-check the cache and
				// take over the round if it is still missing
				Err(broadcast::error::RecvError::Closed)
				| Err(broadcast::error::RecvError::Lagged(_)) => continue,
			}
		}
	}

	async fn cached_candidates(&self, fingerprint: &str) -> Result<SearchOutcome, SearchError> {
		match self.cache_lookup(fingerprint).await? {
			Some(outcome) => Ok(outcome),
			None => Err(SearchError::NotCached {
				fingerprint: fingerprint.to_string(),
			}),
		}
	}
}
