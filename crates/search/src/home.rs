use marquee_catalog::{Catalog, CatalogError, Feed, MovieSummary};
use rand::Rng;
use rand::seq::SliceRandom;

/// Maximum entries shown per home row.
pub const ROW_LIMIT: usize = 12;

/// One titled row of the home view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRow {
	pub feed: Feed,
	pub movies: Vec<MovieSummary>,
}

impl FeedRow {
	pub fn title(&self) -> &'static str {
		self.feed.title()
	}
}

/// Content of the home view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeFeed {
	/// Featured movie: first trending entry, else first popular entry.
	pub hero: Option<MovieSummary>,
	/// Random pick from the whole popular feed.
	pub movie_of_day: Option<MovieSummary>,
	/// Rows in [`Feed::ALL`] order.
	pub rows: Vec<FeedRow>,
}

impl HomeFeed {
	pub fn row(&self, feed: Feed) -> Option<&FeedRow> {
		self.rows.iter().find(|row| row.feed == feed)
	}
}

/// Fetches all home feeds concurrently. Any failure fails the whole load.
///
/// `rng` picks the movie of the day.
pub async fn load_home<R: Rng + Send>(catalog: &dyn Catalog, rng: &mut R) -> Result<HomeFeed, CatalogError> {
	catalog.check_credentials()?;
	let (trending, popular, top_rated, upcoming) = tokio::try_join!(
		catalog.feed(Feed::Trending),
		catalog.feed(Feed::Popular),
		catalog.feed(Feed::TopRated),
		catalog.feed(Feed::Upcoming),
	)?;

	let hero = trending.first().or_else(|| popular.first()).cloned();
	let movie_of_day = popular.choose(rng).cloned();
	let rows = Feed::ALL
		.into_iter()
		.zip([trending, popular, top_rated, upcoming])
		.map(|(feed, mut movies)| {
			movies.truncate(ROW_LIMIT);
			FeedRow { feed, movies }
		})
		.collect();

	tracing::debug!(
		hero = hero.as_ref().map(|m| m.title.as_str()),
		movie_of_day = movie_of_day.as_ref().map(|m| m.title.as_str()),
		"home.loaded"
	);
	Ok(HomeFeed {
		hero,
		movie_of_day,
		rows,
	})
}
