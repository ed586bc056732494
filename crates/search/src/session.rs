//! Session wiring: input → debounce → coordinator → events, plus the view.

use std::sync::Arc;

use marquee_catalog::{Catalog, MovieId};
use marquee_config::SearchConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::coordinator::{SearchCoordinator, SearchOutcome};
use crate::debounce::DebounceGate;
use crate::event::{EventSink, SessionEvent};
use crate::history::{NavigationChange, NavigationHost};
use crate::home::load_home;
use crate::query::Query;
use crate::task::{TaskClass, spawn};
use crate::view::{ViewController, ViewState};

/// One search page session.
///
/// Operations take effect immediately; their outcomes arrive on the event
/// receiver returned by [`Session::new`]. Every method that starts background
/// work must be called within a Tokio runtime.
pub struct Session<H> {
	coordinator: Arc<SearchCoordinator>,
	gate: DebounceGate<String>,
	view: ViewController<H>,
	catalog: Arc<dyn Catalog>,
	events: EventSink,
	home_seed: Option<u64>,
}

impl<H> std::fmt::Debug for Session<H> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Session")
			.field("coordinator", &self.coordinator)
			.field("gate", &self.gate)
			.field("view", &self.view.state())
			.finish_non_exhaustive()
	}
}

impl<H: NavigationHost> Session<H> {
	pub fn new(config: &SearchConfig, catalog: Arc<dyn Catalog>, host: H) -> (Self, UnboundedReceiver<SessionEvent>) {
		let (events, rx) = EventSink::channel();
		let coordinator = Arc::new(SearchCoordinator::new(Arc::clone(&catalog), config.cache_capacity));

		let gate = {
			let coordinator = Arc::clone(&coordinator);
			let events = events.clone();
			let min_chars = config.min_chars;
			DebounceGate::new(config.debounce(), move |text: String| {
				live_follow_up(&coordinator, &events, min_chars, &text);
			})
		};
		let view = ViewController::new(host, Arc::clone(&catalog), events.clone());

		let session = Self {
			coordinator,
			gate,
			view,
			catalog,
			events,
			home_seed: None,
		};
		(session, rx)
	}

	pub fn coordinator(&self) -> &Arc<SearchCoordinator> {
		&self.coordinator
	}

	pub fn view(&self) -> &ViewController<H> {
		&self.view
	}

	pub fn view_mut(&mut self) -> &mut ViewController<H> {
		&mut self.view
	}

	pub fn state(&self) -> ViewState {
		self.view.state()
	}

	/// Live input: the latest text is searched once typing settles.
	pub fn input(&self, text: impl Into<String>) {
		self.gate.notify(text.into());
	}

	/// Explicit submission: searches now and shows the results view.
	///
	/// Disarms any pending live follow-up. Returns false, doing nothing,
	/// when the trimmed text is empty.
	pub fn submit(&mut self, text: &str) -> bool {
		let query = Query::new(text);
		if query.is_empty() {
			return false;
		}
		self.gate.cancel();
		self.view.show_results();
		tracing::debug!(query = %query, "session.submit");
		issue_search(&self.coordinator, &self.events, query, false);
		true
	}

	pub fn open_detail(&mut self, id: MovieId) {
		self.view.open_detail(id);
	}

	pub fn close_detail(&mut self) {
		self.view.close_detail();
	}

	/// Forwards a host navigation notification to the view.
	pub fn navigated(&mut self, change: NavigationChange) {
		self.view.navigated(change);
	}

	/// Returns to the home view.
	pub fn show_home(&mut self) {
		self.view.show_home();
	}

	/// Seeds the movie-of-the-day pick so home loads are reproducible.
	pub fn set_home_seed(&mut self, seed: u64) {
		self.home_seed = Some(seed);
	}

	/// Loads the home rows, emitting `Home` or `HomeFailed`.
	pub fn load_home(&self) {
		let catalog = Arc::clone(&self.catalog);
		let events = self.events.clone();
		let mut rng = match self.home_seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_entropy(),
		};
		spawn(TaskClass::Home, async move {
			match load_home(catalog.as_ref(), &mut rng).await {
				Ok(feed) => events.emit(SessionEvent::Home(Arc::new(feed))),
				Err(error) => {
					tracing::warn!(%error, "home.failed");
					events.emit(SessionEvent::HomeFailed {
						message: format!("Home load error: {error}"),
					});
				}
			}
		});
	}
}

impl<H> Drop for Session<H> {
	fn drop(&mut self) {
		self.gate.cancel();
		self.coordinator.cancel_pending();
		self.view.cancel_detail();
	}
}

/// Debounced follow-up for live input.
fn live_follow_up(coordinator: &Arc<SearchCoordinator>, events: &EventSink, min_chars: usize, text: &str) {
	let query = Query::new(text);
	if query.char_len() < min_chars {
		coordinator.cancel_pending();
		events.emit(SessionEvent::ResultsCleared);
		return;
	}
	issue_search(coordinator, events, query, true);
}

/// Issues `query` now and completes it on a search task.
fn issue_search(coordinator: &Arc<SearchCoordinator>, events: &EventSink, query: Query, live: bool) {
	let ticket = match coordinator.begin(query.text()) {
		Ok(ticket) => ticket,
		Err(error) => {
			events.emit(SessionEvent::SearchFailed {
				query,
				message: error.message(),
			});
			return;
		}
	};
	if ticket.is_fetch() {
		events.emit(SessionEvent::Searching {
			query: ticket.query().clone(),
			live,
		});
	}

	let query = ticket.query().clone();
	let coordinator = Arc::clone(coordinator);
	let events = events.clone();
	spawn(TaskClass::Search, async move {
		match coordinator.run(ticket).await {
			Ok(SearchOutcome::Ready { query, results, source }) => {
				events.emit(SessionEvent::Results { query, results, source });
			}
			Ok(SearchOutcome::Superseded { .. }) => {}
			Err(error) => events.emit(SessionEvent::SearchFailed {
				query,
				message: error.message(),
			}),
		}
	});
}
