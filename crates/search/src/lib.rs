//! Incremental movie search session.
//!
//! Live input goes through a [`DebounceGate`] into a [`SearchCoordinator`]
//! that keeps a single request in flight and serves repeated queries from a
//! bounded FIFO [`ResultCache`]. A [`ViewController`] tracks which view is
//! shown and keeps the detail overlay in step with a [`NavigationHost`].
//! [`Session`] wires these together and reports outcomes as
//! [`SessionEvent`]s.

pub mod cache;
pub mod coordinator;
pub mod debounce;
mod detail;
mod error;
mod event;
pub mod history;
pub mod home;
mod query;
mod session;
mod task;
mod token;
pub mod view;

pub use cache::{DEFAULT_CAPACITY, ResultCache};
pub use coordinator::{ResultSource, SearchCoordinator, SearchOutcome, SearchResults, SearchTicket, SharedCache};
pub use debounce::{DEFAULT_DELAY, DebounceGate};
pub use error::SearchError;
pub use event::{EventSink, SessionEvent};
pub use history::{HistoryEntry, MemoryHistory, NavigationChange, NavigationHost, OverlayMarker};
pub use home::{FeedRow, HomeFeed, ROW_LIMIT, load_home};
pub use query::Query;
pub use session::Session;
pub use task::TaskClass;
pub use view::{ViewController, ViewState};
