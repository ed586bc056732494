//! Supersedable detail fetch for the overlay.

use std::sync::Arc;

use marquee_catalog::{Catalog, MovieId};
use parking_lot::Mutex;

use crate::event::{EventSink, SessionEvent};
use crate::task::{TaskClass, spawn};
use crate::token::{GenerationClock, GenerationToken};

/// Loads at most one detail record at a time.
///
/// A new load, or [`cancel`](Self::cancel), cancels the previous fetch;
/// a completion that is no longer the newest is dropped.
pub(crate) struct DetailLoader {
	catalog: Arc<dyn Catalog>,
	clock: GenerationClock,
	pending: Arc<Mutex<Option<GenerationToken>>>,
	events: EventSink,
}

impl DetailLoader {
	pub fn new(catalog: Arc<dyn Catalog>, events: EventSink) -> Self {
		Self {
			catalog,
			clock: GenerationClock::new(),
			pending: Arc::new(Mutex::new(None)),
			events,
		}
	}

	pub fn is_loading(&self) -> bool {
		self.pending.lock().as_ref().is_some_and(|token| !token.is_cancelled())
	}

	/// Starts fetching `id`, emitting `DetailLoading` now and `Detail` or
	/// `DetailFailed` on completion.
	pub fn load(&self, id: MovieId) {
		let token = GenerationToken::new(self.clock.next());
		let generation = token.generation();
		let previous = self.pending.lock().replace(token.clone());
		if let Some(previous) = previous {
			previous.cancel();
			tracing::debug!(superseded = previous.generation(), "detail.cancel");
		}
		self.events.emit(SessionEvent::DetailLoading { id });

		if let Err(error) = self.catalog.check_credentials() {
			release(&self.pending, generation);
			tracing::warn!(%id, %error, "detail.failed");
			self.events.emit(SessionEvent::DetailFailed {
				id,
				message: format!("Error: {error}"),
			});
			return;
		}

		let catalog = Arc::clone(&self.catalog);
		let clock = self.clock.clone();
		let pending = Arc::clone(&self.pending);
		let events = self.events.clone();
		tracing::debug!(%id, generation, "detail.issue");
		spawn(TaskClass::Detail, async move {
			let response = tokio::select! {
				biased;
				_ = token.cancelled() => return,
				response = catalog.details(id) => response,
			};
			release(&pending, generation);
			if !clock.is_current(generation) {
				tracing::debug!(%id, generation, "detail.superseded");
				return;
			}

			match response {
				Ok(details) => events.emit(SessionEvent::Detail { details: Arc::new(details) }),
				Err(error) => {
					tracing::warn!(%id, %error, "detail.failed");
					events.emit(SessionEvent::DetailFailed {
						id,
						message: format!("Error: {error}"),
					});
				}
			}
		});
	}

	/// Cancels the in-flight fetch, if any, and drops any late completion.
	pub fn cancel(&self) -> bool {
		self.clock.next();
		let previous = self.pending.lock().take();
		match previous {
			Some(token) => {
				token.cancel();
				tracing::debug!(generation = token.generation(), "detail.cancel");
				true
			}
			None => false,
		}
	}
}

fn release(pending: &Mutex<Option<GenerationToken>>, generation: u64) {
	let mut pending = pending.lock();
	if pending.as_ref().is_some_and(|t| t.generation() == generation) {
		pending.take();
	}
}
