#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use marquee_catalog::{Catalog, CatalogError, Feed, MovieDetails, MovieId, MovieSummary, RequestKind};
use marquee_search::{MemoryHistory, SessionEvent, Session};
use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;

/// Request observed by [`ScriptedCatalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
	Search(String),
	Details(MovieId),
	Feed(Feed),
}

#[derive(Default)]
struct Script {
	search_delay: HashMap<String, Duration>,
	failing_searches: HashSet<String>,
	detail_delay: HashMap<MovieId, Duration>,
	failing_details: HashSet<MovieId>,
	empty_feeds: HashSet<Feed>,
	failing_feeds: HashSet<Feed>,
	missing_key: bool,
}

/// In-process catalog with scripted latency and failures.
///
/// Searches answer with [`results_for`], details with [`details_for`], and
/// feeds with fifteen entries each. Latency uses Tokio time, so tests run
/// with paused time.
#[derive(Default)]
pub struct ScriptedCatalog {
	script: Mutex<Script>,
	calls: Mutex<Vec<Call>>,
}

impl ScriptedCatalog {
	pub fn new() -> Arc<Self> {
		let _ = tracing_subscriber::fmt().with_test_writer().try_init();
		Arc::new(Self::default())
	}

	pub fn delay_search(&self, query: &str, delay: Duration) {
		self.script.lock().search_delay.insert(query.to_string(), delay);
	}

	pub fn fail_search(&self, query: &str) {
		self.script.lock().failing_searches.insert(query.to_string());
	}

	pub fn delay_details(&self, id: u64, delay: Duration) {
		self.script.lock().detail_delay.insert(MovieId(id), delay);
	}

	pub fn fail_details(&self, id: u64) {
		self.script.lock().failing_details.insert(MovieId(id));
	}

	pub fn empty_feed(&self, feed: Feed) {
		self.script.lock().empty_feeds.insert(feed);
	}

	pub fn fail_feed(&self, feed: Feed) {
		self.script.lock().failing_feeds.insert(feed);
	}

	pub fn set_missing_key(&self, missing: bool) {
		self.script.lock().missing_key = missing;
	}

	pub fn calls(&self) -> Vec<Call> {
		self.calls.lock().clone()
	}

	pub fn search_calls(&self) -> Vec<String> {
		self.calls
			.lock()
			.iter()
			.filter_map(|call| match call {
				Call::Search(query) => Some(query.clone()),
				_ => None,
			})
			.collect()
	}

	pub fn detail_calls(&self) -> Vec<MovieId> {
		self.calls
			.lock()
			.iter()
			.filter_map(|call| match call {
				Call::Details(id) => Some(*id),
				_ => None,
			})
			.collect()
	}

	fn record(&self, call: Call) {
		self.calls.lock().push(call);
	}
}

async fn pause(delay: Option<Duration>) {
	if let Some(delay) = delay {
		tokio::time::sleep(delay).await;
	}
}

#[async_trait]
impl Catalog for ScriptedCatalog {
	fn check_credentials(&self) -> Result<(), CatalogError> {
		if self.script.lock().missing_key {
			return Err(CatalogError::MissingCredential);
		}
		Ok(())
	}

	async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, CatalogError> {
		self.record(Call::Search(query.to_string()));
		let (delay, fails) = {
			let script = self.script.lock();
			(script.search_delay.get(query).copied(), script.failing_searches.contains(query))
		};
		pause(delay).await;
		if fails {
			return Err(CatalogError::Status {
				kind: RequestKind::Search,
				status: 500,
			});
		}
		Ok(results_for(query))
	}

	async fn details(&self, id: MovieId) -> Result<MovieDetails, CatalogError> {
		self.record(Call::Details(id));
		let (delay, fails) = {
			let script = self.script.lock();
			(script.detail_delay.get(&id).copied(), script.failing_details.contains(&id))
		};
		pause(delay).await;
		if fails {
			return Err(CatalogError::Status {
				kind: RequestKind::Details,
				status: 404,
			});
		}
		Ok(details_for(id))
	}

	async fn feed(&self, feed: Feed) -> Result<Vec<MovieSummary>, CatalogError> {
		self.record(Call::Feed(feed));
		let (empty, fails) = {
			let script = self.script.lock();
			(script.empty_feeds.contains(&feed), script.failing_feeds.contains(&feed))
		};
		if fails {
			return Err(CatalogError::Status {
				kind: RequestKind::Feed,
				status: 503,
			});
		}
		if empty {
			return Ok(Vec::new());
		}
		let base = match feed {
			Feed::Trending => 100,
			Feed::Popular => 200,
			Feed::TopRated => 300,
			Feed::Upcoming => 400,
		};
		Ok((0..15).map(|i| movie(base + i, &format!("{} {i}", feed.title()))).collect())
	}
}

pub fn movie(id: u64, title: &str) -> MovieSummary {
	MovieSummary {
		id: MovieId(id),
		title: title.to_string(),
		poster_path: None,
		backdrop_path: None,
		overview: None,
		release_date: None,
	}
}

/// Deterministic answer for a search of `query`.
pub fn results_for(query: &str) -> Vec<MovieSummary> {
	let seed = query.len() as u64 * 10;
	vec![movie(seed + 1, &format!("{query} (1)")), movie(seed + 2, &format!("{query} (2)"))]
}

pub fn details_for(id: MovieId) -> MovieDetails {
	MovieDetails {
		id,
		title: Some(format!("Movie {id}")),
		runtime: Some(120),
		..MovieDetails::default()
	}
}

/// Collects every event already sent.
pub fn drain(rx: &mut UnboundedReceiver<SessionEvent>) -> Vec<SessionEvent> {
	let mut events = Vec::new();
	while let Ok(event) = rx.try_recv() {
		events.push(event);
	}
	events
}

/// Delivers queued history changes to the session, as a browser delivers
/// `popstate`.
pub fn deliver_navigation(session: &mut Session<MemoryHistory>) {
	let changes = session.view_mut().host_mut().take_changes();
	for change in changes {
		session.navigated(change);
	}
}

/// Lets spawned tasks run and advances paused time by `ms`.
pub async fn advance(ms: u64) {
	tokio::time::sleep(Duration::from_millis(ms)).await;
}
