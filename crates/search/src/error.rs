use marquee_catalog::CatalogError;
use thiserror::Error;

/// Failures reported by [`SearchCoordinator::search`](crate::SearchCoordinator::search).
///
/// Supersession is not an error; it is reported as
/// [`SearchOutcome::Superseded`](crate::SearchOutcome::Superseded).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
	/// The query was empty after trimming.
	#[error("enter a title to search")]
	EmptyQuery,

	/// The catalog rejected or failed the request.
	#[error(transparent)]
	Catalog(#[from] CatalogError),
}

impl SearchError {
	/// Inline message shown in place of results.
	pub fn message(&self) -> String {
		format!("Error: {self}")
	}
}
