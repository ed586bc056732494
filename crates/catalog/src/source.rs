use async_trait::async_trait;

use crate::error::Result;
use crate::model::{MovieDetails, MovieId, MovieSummary};

/// Curated lists shown on the home view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feed {
	Trending,
	Popular,
	TopRated,
	Upcoming,
}

impl Feed {
	/// All feeds in home-row order.
	pub const ALL: [Feed; 4] = [Feed::Trending, Feed::Popular, Feed::TopRated, Feed::Upcoming];

	/// Endpoint path relative to the catalog base URL.
	pub const fn path(self) -> &'static str {
		match self {
			Self::Trending => "trending/movie/week",
			Self::Popular => "movie/popular",
			Self::TopRated => "movie/top_rated",
			Self::Upcoming => "movie/upcoming",
		}
	}

	/// Row heading shown above the feed.
	pub const fn title(self) -> &'static str {
		match self {
			Self::Trending => "Trending",
			Self::Popular => "Popular",
			Self::TopRated => "Top Rated",
			Self::Upcoming => "Upcoming",
		}
	}
}

/// Read-only access to a remote movie catalog.
///
/// Implementations must be cancel-safe: dropping a returned future abandons
/// the request without side effects.
#[async_trait]
pub trait Catalog: Send + Sync {
	/// Fails fast when the catalog cannot authenticate. Called before any
	/// request is issued so a missing key never reaches the network.
	fn check_credentials(&self) -> Result<()> {
		Ok(())
	}

	/// Free-text movie search.
	async fn search(&self, query: &str) -> Result<Vec<MovieSummary>>;

	/// Extended record for one movie, including credits and videos.
	async fn details(&self, id: MovieId) -> Result<MovieDetails>;

	/// One of the curated home feeds.
	async fn feed(&self, feed: Feed) -> Result<Vec<MovieSummary>>;
}
