//! Typed boundary between the session core and its render sink.

use std::sync::Arc;

use marquee_catalog::{MovieDetails, MovieId};
use tokio::sync::mpsc;

use crate::coordinator::{ResultSource, SearchResults};
use crate::home::HomeFeed;
use crate::query::Query;
use crate::view::ViewState;

/// Everything the render sink needs to paint.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
	/// The active view changed.
	ViewChanged(ViewState),
	/// A catalog search was issued; show a loading state.
	Searching { query: Query, live: bool },
	/// Results of the newest search.
	Results {
		query: Query,
		results: SearchResults,
		source: ResultSource,
	},
	/// The query became too short; clear the result area.
	ResultsCleared,
	/// The newest search failed.
	SearchFailed { query: Query, message: String },
	/// A detail overlay opened and its record is loading.
	DetailLoading { id: MovieId },
	/// Detail record for the open overlay.
	Detail { details: Arc<MovieDetails> },
	/// The detail fetch for the open overlay failed.
	DetailFailed { id: MovieId, message: String },
	/// Home rows loaded.
	Home(Arc<HomeFeed>),
	/// Home rows failed to load.
	HomeFailed { message: String },
}

impl SessionEvent {
	pub const fn name(&self) -> &'static str {
		match self {
			Self::ViewChanged(_) => "view_changed",
			Self::Searching { .. } => "searching",
			Self::Results { .. } => "results",
			Self::ResultsCleared => "results_cleared",
			Self::SearchFailed { .. } => "search_failed",
			Self::DetailLoading { .. } => "detail_loading",
			Self::Detail { .. } => "detail",
			Self::DetailFailed { .. } => "detail_failed",
			Self::Home(_) => "home",
			Self::HomeFailed { .. } => "home_failed",
		}
	}
}

/// Sending half of the session event channel.
#[derive(Debug, Clone)]
pub struct EventSink {
	tx: mpsc::UnboundedSender<SessionEvent>,
}

impl EventSink {
	pub fn channel() -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
		let (tx, rx) = mpsc::unbounded_channel();
		(Self { tx }, rx)
	}

	/// Sends `event`. A closed render sink is not an error.
	pub fn emit(&self, event: SessionEvent) {
		tracing::trace!(event = event.name(), "session.emit");
		let _ = self.tx.send(event);
	}
}
