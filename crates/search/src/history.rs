//! Navigation history seam.
//!
//! The session never owns the host's history. It pushes overlay entries and
//! asks the host to go back, and the host reports every change of the active
//! entry through [`ViewController::navigated`](crate::ViewController::navigated).

use std::collections::VecDeque;

use marquee_catalog::MovieId;

/// Marker carried by history entries that represent an open detail overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayMarker {
	pub id: MovieId,
}

/// One navigation history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
	pub url: String,
	pub overlay: Option<OverlayMarker>,
}

impl HistoryEntry {
	/// A plain entry without an overlay marker.
	pub fn page(url: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			overlay: None,
		}
	}

	/// A shareable entry for the detail overlay of `id`.
	pub fn overlay(id: MovieId) -> Self {
		Self {
			url: format!("movie.html?id={id}"),
			overlay: Some(OverlayMarker { id }),
		}
	}
}

/// Notification that the active history entry changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationChange {
	/// Overlay marker of the newly active entry, if it has one.
	pub overlay: Option<OverlayMarker>,
}

/// Host-side navigation history.
pub trait NavigationHost: Send {
	/// Pushes a new entry and makes it active. Emits no change notification.
	fn push(&mut self, entry: HistoryEntry);

	/// Navigates one entry back. The host later reports the resulting
	/// [`NavigationChange`].
	fn back(&mut self);

	/// The active entry.
	fn current(&self) -> Option<&HistoryEntry>;
}

/// In-memory history stack with a cursor.
///
/// Pushing truncates forward entries. `back` and `forward` move the cursor
/// and queue a [`NavigationChange`] for the embedder to deliver, as a
/// browser delivers `popstate` after the current task finishes.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
	entries: Vec<HistoryEntry>,
	cursor: usize,
	changes: VecDeque<NavigationChange>,
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new("index.html")
	}
}

impl MemoryHistory {
	pub fn new(initial_url: impl Into<String>) -> Self {
		Self {
			entries: vec![HistoryEntry::page(initial_url)],
			cursor: 0,
			changes: VecDeque::new(),
		}
	}

	/// Total number of entries, including forward entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn entries(&self) -> &[HistoryEntry] {
		&self.entries
	}

	pub fn can_go_back(&self) -> bool {
		self.cursor > 0
	}

	pub fn can_go_forward(&self) -> bool {
		self.cursor + 1 < self.entries.len()
	}

	/// Moves one entry forward, queueing a change notification.
	pub fn forward(&mut self) {
		if self.can_go_forward() {
			self.cursor += 1;
			self.queue_change();
		}
	}

	/// Takes the queued change notifications, oldest first.
	pub fn take_changes(&mut self) -> Vec<NavigationChange> {
		self.changes.drain(..).collect()
	}

	fn queue_change(&mut self) {
		let overlay = self.entries[self.cursor].overlay;
		self.changes.push_back(NavigationChange { overlay });
	}
}

impl NavigationHost for MemoryHistory {
	fn push(&mut self, entry: HistoryEntry) {
		self.entries.truncate(self.cursor + 1);
		self.entries.push(entry);
		self.cursor = self.entries.len() - 1;
	}

	fn back(&mut self) {
		if self.can_go_back() {
			self.cursor -= 1;
			self.queue_change();
		}
	}

	fn current(&self) -> Option<&HistoryEntry> {
		self.entries.get(self.cursor)
	}
}
