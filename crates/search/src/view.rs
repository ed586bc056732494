//! Active view tracking, synchronized with navigation history.

use std::sync::Arc;

use marquee_catalog::{Catalog, MovieId};

use crate::detail::DetailLoader;
use crate::event::{EventSink, SessionEvent};
use crate::history::{HistoryEntry, NavigationChange, NavigationHost};

/// The view the render sink should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewState {
	#[default]
	Home,
	Results,
	/// Detail overlay for one movie, drawn over the view beneath it.
	DetailOverlay(MovieId),
}

impl ViewState {
	pub fn is_overlay(self) -> bool {
		matches!(self, Self::DetailOverlay(_))
	}

	pub fn overlay_id(self) -> Option<MovieId> {
		match self {
			Self::DetailOverlay(id) => Some(id),
			_ => None,
		}
	}
}

/// State machine over [`ViewState`].
///
/// Opening a detail overlay pushes a history entry carrying an overlay
/// marker, so the host's back action closes it. Closing goes through the
/// host when the active entry is such an overlay entry; the host's change
/// notification, delivered to [`navigated`](Self::navigated), then performs
/// the transition.
pub struct ViewController<H> {
	state: ViewState,
	/// View shown beneath the overlay; never an overlay itself.
	underlay: ViewState,
	host: H,
	details: DetailLoader,
	events: EventSink,
}

impl<H> ViewController<H> {
	pub fn state(&self) -> ViewState {
		self.state
	}

	/// View that closing the overlay returns to.
	pub fn underlay(&self) -> ViewState {
		self.underlay
	}

	pub fn host(&self) -> &H {
		&self.host
	}

	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	pub fn is_detail_loading(&self) -> bool {
		self.details.is_loading()
	}

	pub(crate) fn cancel_detail(&self) -> bool {
		self.details.cancel()
	}
}

impl<H: NavigationHost> ViewController<H> {
	pub(crate) fn new(host: H, catalog: Arc<dyn Catalog>, events: EventSink) -> Self {
		Self {
			state: ViewState::Home,
			underlay: ViewState::Home,
			host,
			details: DetailLoader::new(catalog, events.clone()),
			events,
		}
	}

	/// Home → Results on a search submission. With an overlay open, the
	/// results become the view it closes to.
	pub fn show_results(&mut self) {
		self.set_underlay(ViewState::Results);
	}

	pub fn show_home(&mut self) {
		self.set_underlay(ViewState::Home);
	}

	/// Pushes an overlay history entry, shows the overlay and loads its record.
	///
	/// Must be called within a Tokio runtime.
	pub fn open_detail(&mut self, id: MovieId) {
		self.host.push(HistoryEntry::overlay(id));
		self.transition(ViewState::DetailOverlay(id));
		self.details.load(id);
	}

	/// Closes the overlay.
	///
	/// When the active history entry is an overlay entry this only asks the
	/// host to go back; otherwise the overlay is dismissed directly.
	pub fn close_detail(&mut self) {
		if !self.state.is_overlay() {
			return;
		}
		if self.host.current().is_some_and(|entry| entry.overlay.is_some()) {
			tracing::debug!(state = ?self.state, "view.close_via_history");
			self.host.back();
		} else {
			self.dismiss_overlay();
		}
	}

	/// Applies a host-originated change of the active history entry.
	///
	/// Must be called within a Tokio runtime.
	pub fn navigated(&mut self, change: NavigationChange) {
		match change.overlay {
			Some(marker) => {
				self.transition(ViewState::DetailOverlay(marker.id));
				self.details.load(marker.id);
			}
			None => self.dismiss_overlay(),
		}
	}

	fn set_underlay(&mut self, view: ViewState) {
		self.underlay = view;
		if !self.state.is_overlay() {
			self.transition(view);
		}
	}

	fn dismiss_overlay(&mut self) {
		if self.state.is_overlay() {
			self.details.cancel();
			self.transition(self.underlay);
		}
	}

	fn transition(&mut self, next: ViewState) {
		if self.state == next {
			return;
		}
		tracing::debug!(from = ?self.state, to = ?next, "view.transition");
		self.state = next;
		self.events.emit(SessionEvent::ViewChanged(next));
	}
}
