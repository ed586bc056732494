//! Single-slot search request coordination.
//!
//! The coordinator owns at most one outstanding catalog request. Issuing a
//! new request cancels the previous one, and every issued search takes a
//! fresh generation so that a completion from an older one can never be
//! reported as visible, whatever order the tasks run or the network answers
//! in.

use std::sync::Arc;

use marquee_catalog::{Catalog, MovieSummary};
use parking_lot::Mutex;

use crate::cache::ResultCache;
use crate::error::SearchError;
use crate::query::Query;
use crate::token::{GenerationClock, GenerationToken};

/// Result list shared between the cache and the render sink.
pub type SearchResults = Arc<[MovieSummary]>;

/// Cache handle shared by the coordinator and direct cache consumers.
pub type SharedCache = Arc<Mutex<ResultCache<SearchResults>>>;

/// Where a ready result list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
	Cache,
	Network,
}

/// Successful completion of [`SearchCoordinator::search`].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
	/// Results for the newest search; safe to render.
	Ready {
		query: Query,
		results: SearchResults,
		source: ResultSource,
	},
	/// A newer search was issued first. Nothing should be rendered.
	Superseded { query: Query },
}

/// A search issued by [`SearchCoordinator::begin`], completed by
/// [`SearchCoordinator::run`].
#[derive(Debug)]
pub struct SearchTicket {
	query: Query,
	generation: u64,
	work: TicketWork,
}

#[derive(Debug)]
enum TicketWork {
	Cached(SearchResults),
	Fetch(GenerationToken),
}

impl SearchTicket {
	pub fn query(&self) -> &Query {
		&self.query
	}

	/// Returns true if completing the ticket goes to the network.
	pub fn is_fetch(&self) -> bool {
		matches!(self.work, TicketWork::Fetch(_))
	}
}

#[derive(Debug)]
struct PendingRequest {
	query: Query,
	token: GenerationToken,
}

/// Owns the single in-flight search and the query cache.
pub struct SearchCoordinator {
	catalog: Arc<dyn Catalog>,
	cache: SharedCache,
	pending: Mutex<Option<PendingRequest>>,
	clock: GenerationClock,
}

impl std::fmt::Debug for SearchCoordinator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SearchCoordinator")
			.field("pending", &self.pending_query())
			.field("generation", &self.clock.current())
			.finish_non_exhaustive()
	}
}

impl SearchCoordinator {
	/// Creates a coordinator with a private cache of `capacity` entries.
	pub fn new(catalog: Arc<dyn Catalog>, capacity: usize) -> Self {
		Self::with_cache(catalog, Arc::new(Mutex::new(ResultCache::new(capacity))))
	}

	/// Creates a coordinator over an existing cache.
	pub fn with_cache(catalog: Arc<dyn Catalog>, cache: SharedCache) -> Self {
		Self {
			catalog,
			cache,
			pending: Mutex::new(None),
			clock: GenerationClock::new(),
		}
	}

	pub fn cache(&self) -> &SharedCache {
		&self.cache
	}

	/// Returns cached results for `raw` without issuing anything.
	pub fn cached(&self, raw: &str) -> Option<SearchResults> {
		self.cache.lock().get(&Query::new(raw)).cloned()
	}

	/// Query of the request currently in flight, if any.
	pub fn pending_query(&self) -> Option<Query> {
		self.pending.lock().as_ref().map(|p| p.query.clone())
	}

	pub fn is_in_flight(&self) -> bool {
		self.pending.lock().is_some()
	}

	/// Cancels the in-flight request and invalidates every earlier search.
	///
	/// Returns true if a request was in flight.
	pub fn cancel_pending(&self) -> bool {
		self.clock.next();
		let previous = self.pending.lock().take();
		match previous {
			Some(previous) => {
				previous.token.cancel();
				tracing::debug!(query = %previous.query, "search.cancel");
				true
			}
			None => false,
		}
	}

	/// Searches the catalog, serving repeated queries from the cache.
	///
	/// Equivalent to [`begin`](Self::begin) followed by [`run`](Self::run).
	pub async fn search(&self, raw: &str) -> Result<SearchOutcome, SearchError> {
		let ticket = self.begin(raw)?;
		self.run(ticket).await
	}

	/// Issues a search without waiting for it.
	///
	/// The search takes its generation here, so issue order alone decides
	/// which search is visible, however the returned tickets are scheduled.
	/// A cache hit is resolved now and leaves any in-flight request alone,
	/// though that request can no longer become visible. A miss cancels the
	/// in-flight request and takes its place.
	pub fn begin(&self, raw: &str) -> Result<SearchTicket, SearchError> {
		let query = Query::new(raw);
		if query.is_empty() {
			return Err(SearchError::EmptyQuery);
		}
		let generation = self.clock.next();

		let hit = self.cache.lock().get(&query).cloned();
		if let Some(results) = hit {
			tracing::debug!(query = %query, generation, hits = results.len(), "search.cache_hit");
			return Ok(SearchTicket {
				query,
				generation,
				work: TicketWork::Cached(results),
			});
		}

		self.catalog.check_credentials()?;

		let token = GenerationToken::new(generation);
		let previous = self.pending.lock().replace(PendingRequest {
			query: query.clone(),
			token: token.clone(),
		});
		if let Some(previous) = previous {
			previous.token.cancel();
			tracing::debug!(superseded = %previous.query, by = %query, "search.cancel");
		}
		tracing::debug!(query = %query, generation, "search.issue");

		Ok(SearchTicket {
			query,
			generation,
			work: TicketWork::Fetch(token),
		})
	}

	/// Completes an issued search.
	///
	/// Completions that lost to a newer search, successful or not, are
	/// reported as [`SearchOutcome::Superseded`].
	pub async fn run(&self, ticket: SearchTicket) -> Result<SearchOutcome, SearchError> {
		let SearchTicket { query, generation, work } = ticket;
		let token = match work {
			TicketWork::Cached(results) => {
				if !self.clock.is_current(generation) {
					tracing::debug!(query = %query, generation, "search.superseded");
					return Ok(SearchOutcome::Superseded { query });
				}
				return Ok(SearchOutcome::Ready {
					query,
					results,
					source: ResultSource::Cache,
				});
			}
			TicketWork::Fetch(token) => token,
		};

		let response = tokio::select! {
			biased;
			_ = token.cancelled() => None,
			response = self.catalog.search(query.text()) => Some(response),
		};
		self.release(generation);

		let Some(response) = response else {
			tracing::debug!(query = %query, generation, "search.superseded");
			return Ok(SearchOutcome::Superseded { query });
		};

		match response {
			Ok(results) => {
				let results: SearchResults = results.into();
				self.cache.lock().put(&query, Arc::clone(&results));
				if !self.clock.is_current(generation) {
					tracing::debug!(query = %query, generation, "search.superseded");
					return Ok(SearchOutcome::Superseded { query });
				}
				tracing::debug!(query = %query, generation, hits = results.len(), "search.ready");
				Ok(SearchOutcome::Ready {
					query,
					results,
					source: ResultSource::Network,
				})
			}
			Err(error) => {
				if !self.clock.is_current(generation) {
					tracing::debug!(query = %query, generation, %error, "search.superseded");
					return Ok(SearchOutcome::Superseded { query });
				}
				tracing::warn!(query = %query, %error, "search.failed");
				Err(error.into())
			}
		}
	}

	/// Clears the pending slot if it still belongs to `generation`.
	fn release(&self, generation: u64) {
		let mut pending = self.pending.lock();
		if pending.as_ref().is_some_and(|p| p.token.generation() == generation) {
			pending.take();
		}
	}
}
