use std::future::Future;

use tokio::task::JoinHandle;

/// Kinds of background work spawned by a session, used for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskClass {
	/// Debounce timer waiting for input to settle.
	Debounce,
	/// Live or submitted search request.
	Search,
	/// Detail fetch for an open overlay.
	Detail,
	/// Home feed load.
	Home,
}

impl TaskClass {
	pub(crate) const fn as_str(self) -> &'static str {
		match self {
			Self::Debounce => "debounce",
			Self::Search => "search",
			Self::Detail => "detail",
			Self::Home => "home",
		}
	}
}

/// Spawns a session task on the current Tokio runtime.
///
/// # Panics
///
/// Panics when called outside a Tokio runtime.
pub(crate) fn spawn<F>(class: TaskClass, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	tracing::trace!(task_class = class.as_str(), "task.spawn");
	tokio::spawn(fut)
}
