//! Core aggregation service logic

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::time::{timeout, timeout_at, Duration};
use tracing::{debug, info, warn};

use farebeam_adapters::AdapterRegistry;
use farebeam_storage::SupplierStorage;
use farebeam_types::{
	AdapterError, AggregationMetadata, CandidateSet, DroppedDuplicate, Offer, QuerySpec, Supplier,
	SupplierError, SupplierFailure, SupplierRuntimeConfig, TravelVertical,
};

/// Per-supplier outcome of one aggregation round
enum RoundOutcome {
	Success {
		supplier_id: String,
		offers: Vec<Offer>,
		elapsed_ms: u64,
	},
	Failure {
		supplier_id: String,
		error: AdapterError,
	},
}

/// Trait for the aggregation service, mockable at the API seam
#[async_trait]
pub trait AggregatorTrait: Send + Sync {
	/// Fan a query out to all suppliers of its vertical and merge the results
	async fn fetch_offers(&self, query: &QuerySpec) -> (CandidateSet, AggregationMetadata);

	/// Perform health checks on all registered suppliers
	async fn health_check_all(&self) -> HashMap<String, bool>;
}

/// Service for aggregating offers from multiple suppliers
pub struct AggregatorService {
	suppliers: HashMap<String, Supplier>,
	adapter_registry: Arc<AdapterRegistry>,
	per_supplier_timeout_ms: u64,
	global_timeout_ms: u64,
	supplier_store: Option<Arc<dyn SupplierStorage>>,
}

impl AggregatorService {
	/// Create a new aggregator service with pre-configured adapters
	pub fn new(
		suppliers: Vec<Supplier>,
		adapter_registry: Arc<AdapterRegistry>,
		per_supplier_timeout_ms: u64,
		global_timeout_ms: u64,
	) -> Self {
		let mut supplier_map = HashMap::new();
		for supplier in suppliers {
			supplier_map.insert(supplier.supplier_id.clone(), supplier);
		}

		Self {
			suppliers: supplier_map,
			adapter_registry,
			per_supplier_timeout_ms,
			global_timeout_ms,
			supplier_store: None,
		}
	}

	/// Attach a supplier store so per-round metrics are written back
	pub fn with_supplier_store(mut self, store: Arc<dyn SupplierStorage>) -> Self {
		self.supplier_store = Some(store);
		self
	}

	/// Validate that all suppliers reference a registered adapter
	pub fn validate_suppliers(&self) -> Result<(), SupplierError> {
		for supplier in self.suppliers.values() {
			if self.adapter_registry.get(&supplier.adapter_id).is_none() {
				return Err(SupplierError::UnknownAdapter {
					supplier_id: supplier.supplier_id.clone(),
					adapter_id: supplier.adapter_id.clone(),
				});
			}
		}
		Ok(())
	}

	/// Active suppliers serving the given vertical
	fn suppliers_for(&self, vertical: TravelVertical) -> Vec<&Supplier> {
		self.suppliers
			.values()
			.filter(|s| s.vertical == vertical && s.is_active())
			.collect()
	}

	/// Merge per-supplier offer lists, deduplicating by offer fingerprint.
	///
	/// When two offers fingerprint-match the cheaper one wins; the loser's
	/// supplier and price are recorded for audit.
	fn merge_offers(offers: Vec<Offer>, set: &mut CandidateSet) {
		let mut by_fingerprint: HashMap<String, usize> = HashMap::new();

		for offer in offers {
			let fingerprint = offer.fingerprint();
			match by_fingerprint.get(&fingerprint) {
				Some(&idx) => {
					let kept = &set.offers[idx];
					if offer.price < kept.price {
						set.dropped_duplicates.push(DroppedDuplicate {
							fingerprint,
							supplier_id: kept.supplier_id.clone(),
							price: kept.price,
						});
						set.offers[idx] = offer;
					} else {
						set.dropped_duplicates.push(DroppedDuplicate {
							fingerprint,
							supplier_id: offer.supplier_id.clone(),
							price: offer.price,
						});
					}
				},
				None => {
					by_fingerprint.insert(fingerprint, set.offers.len());
					set.offers.push(offer);
				},
			}
		}
	}

	/// Best-effort metrics writeback; failures are logged, never propagated
	async fn record_metrics(&self, outcomes: &[RoundOutcome], timed_out: &[String]) {
		let Some(store) = &self.supplier_store else {
			return;
		};

		for outcome in outcomes {
			let (supplier_id, update): (&str, Box<dyn Fn(&mut Supplier) + Send>) = match outcome {
				RoundOutcome::Success {
					supplier_id,
					elapsed_ms,
					..
				} => {
					let elapsed = *elapsed_ms;
					(
						supplier_id,
						Box::new(move |s: &mut Supplier| {
							s.metrics.record_success(elapsed);
							s.last_seen = Some(chrono::Utc::now());
						}),
					)
				},
				RoundOutcome::Failure {
					supplier_id, error, ..
				} => {
					let timed_out = error.is_timeout();
					(
						supplier_id,
						Box::new(move |s: &mut Supplier| s.metrics.record_failure(timed_out)),
					)
				},
			};

			match store.get_supplier(supplier_id).await {
				Ok(Some(mut supplier)) => {
					update(&mut supplier);
					if let Err(e) = store.update_supplier(supplier).await {
						debug!("Metrics writeback failed for {}: {}", supplier_id, e);
					}
				},
				Ok(None) => {},
				Err(e) => debug!("Metrics lookup failed for {}: {}", supplier_id, e),
			}
		}

		for supplier_id in timed_out {
			if let Ok(Some(mut supplier)) = store.get_supplier(supplier_id).await {
				supplier.metrics.record_failure(true);
				if let Err(e) = store.update_supplier(supplier).await {
					debug!("Metrics writeback failed for {}: {}", supplier_id, e);
				}
			}
		}
	}
}

#[async_trait]
impl AggregatorTrait for AggregatorService {
	/// Fetch offers concurrently from all suppliers of the query's vertical.
	///
	/// Waits until all adapters complete or the global deadline elapses,
	/// whichever comes first. Outcomes that arrived before the deadline are
	/// kept; only the still-unfinished adapter calls are abandoned and their
	/// late results discarded. An empty [`CandidateSet`] is a valid outcome,
	/// failures are reported via the metadata instead.
	async fn fetch_offers(&self, query: &QuerySpec) -> (CandidateSet, AggregationMetadata) {
		let vertical = query.vertical();
		let suppliers = self.suppliers_for(vertical);
		let fingerprint = query.fingerprint();
		let started = Instant::now();

		info!(
			"Aggregating {} offers from {} suppliers for {}",
			vertical,
			suppliers.len(),
			fingerprint
		);

		let queried: Vec<String> = suppliers
			.iter()
			.map(|s| s.supplier_id.clone())
			.collect();

		// Outcomes are fanned in over a channel so that results from suppliers
		// that finished before the global deadline survive the cutoff.
		let (outcome_tx, mut outcome_rx) = mpsc::channel::<RoundOutcome>(queried.len().max(1));

		for supplier in suppliers {
			let query = query.clone();
			let supplier = supplier.clone();
			let adapter_registry = Arc::clone(&self.adapter_registry);
			let outcome_tx = outcome_tx.clone();
			let per_supplier_timeout =
				Duration::from_millis(supplier.timeout_ms.min(self.per_supplier_timeout_ms));

			tokio::spawn(async move {
				let supplier_id = supplier.supplier_id.clone();
				debug!("Starting offer fetch from supplier {}", supplier_id);

				let adapter = match adapter_registry.get(&supplier.adapter_id) {
					Some(adapter) => adapter,
					None => {
						warn!(
							"No adapter found for supplier {} (adapter_id: {})",
							supplier_id, supplier.adapter_id
						);
						let _ = outcome_tx
							.send(RoundOutcome::Failure {
								supplier_id,
								error: AdapterError::NotFound {
									adapter_id: supplier.adapter_id.clone(),
								},
							})
							.await;
						return;
					},
				};

				let config = SupplierRuntimeConfig::from(&supplier);
				let call_started = Instant::now();
				let result = timeout(per_supplier_timeout, adapter.fetch_offers(&query, &config))
					.await
					.unwrap_or(Err(AdapterError::Timeout {
						timeout_ms: per_supplier_timeout.as_millis() as u64,
					}));

				let outcome = match result {
					Ok(offers) => {
						let elapsed_ms = call_started.elapsed().as_millis() as u64;
						info!(
							"Supplier {} returned {} offers in {}ms",
							supplier_id,
							offers.len(),
							elapsed_ms
						);
						RoundOutcome::Success {
							supplier_id,
							offers,
							elapsed_ms,
						}
					},
					Err(error) => {
						warn!("Supplier {} returned error: {}", supplier_id, error);
						RoundOutcome::Failure { supplier_id, error }
					},
				};
				let _ = outcome_tx.send(outcome).await;
			});
		}
		drop(outcome_tx);

		// Drain outcomes until every supplier reported or the global deadline
		// elapses; whatever arrived in time is kept either way.
		let deadline =
			tokio::time::Instant::now() + Duration::from_millis(self.global_timeout_ms);
		let mut outcomes: Vec<RoundOutcome> = Vec::with_capacity(queried.len());
		let mut deadline_hit = false;

		loop {
			match timeout_at(deadline, outcome_rx.recv()).await {
				Ok(Some(outcome)) => outcomes.push(outcome),
				Ok(None) => break,
				Err(_) => {
					warn!(
						"Global aggregation deadline reached after {}ms with {}/{} suppliers reported",
						self.global_timeout_ms,
						outcomes.len(),
						queried.len()
					);
					deadline_hit = true;
					break;
				},
			}
		}

		let mut set = CandidateSet::new(fingerprint);
		let mut failed_suppliers = Vec::new();
		let mut timed_out_suppliers = Vec::new();
		let mut succeeded = 0usize;
		let mut responded: Vec<&str> = Vec::new();

		let mut collected: Vec<Offer> = Vec::new();
		for outcome in &outcomes {
			match outcome {
				RoundOutcome::Success {
					supplier_id,
					offers,
					..
				} => {
					succeeded += 1;
					responded.push(supplier_id);
					collected.extend(offers.iter().cloned());
				},
				RoundOutcome::Failure { supplier_id, error } => {
					responded.push(supplier_id);
					if error.is_timeout() {
						timed_out_suppliers.push(supplier_id.clone());
					} else {
						failed_suppliers.push(SupplierFailure {
							supplier_id: supplier_id.clone(),
							reason: error.to_string(),
						});
					}
				},
			}
		}

		// Suppliers cut off by the global deadline never produced an outcome
		let deadline_cut: Vec<String> = queried
			.iter()
			.filter(|id| !responded.iter().any(|r| *r == id.as_str()))
			.cloned()
			.collect();
		timed_out_suppliers.extend(deadline_cut.iter().cloned());

		Self::merge_offers(collected, &mut set);

		let metadata = AggregationMetadata {
			total_duration_ms: started.elapsed().as_millis() as u64,
			per_supplier_timeout_ms: self.per_supplier_timeout_ms,
			global_timeout_ms: self.global_timeout_ms,
			suppliers_queried: queried.len(),
			suppliers_succeeded: succeeded,
			failed_suppliers,
			timed_out_suppliers,
			deadline_hit,
		};

		info!(
			"Aggregation completed: {} offers from {}/{} suppliers ({} duplicates dropped)",
			set.len(),
			metadata.suppliers_succeeded,
			metadata.suppliers_queried,
			set.dropped_duplicates.len()
		);

		self.record_metrics(&outcomes, &deadline_cut).await;

		(set, metadata)
	}

	/// Perform health checks on all suppliers
	async fn health_check_all(&self) -> HashMap<String, bool> {
		let mut results = HashMap::new();

		for (supplier_id, supplier) in &self.suppliers {
			if let Some(adapter) = self.adapter_registry.get(&supplier.adapter_id) {
				let config = SupplierRuntimeConfig::from(supplier);
				match adapter.health_check(&config).await {
					Ok(is_healthy) => {
						results.insert(supplier_id.to_string(), is_healthy);
					},
					Err(_) => {
						results.insert(supplier_id.to_string(), false);
					},
				}
			} else {
				results.insert(supplier_id.to_string(), false);
			}
		}

		results
	}
}
