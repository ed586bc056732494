//! Records returned by the catalog endpoints.
//!
//! Only the fields the session and its render sink use are modeled; unknown
//! fields are ignored and absent or `null` optional fields deserialize to
//! `None`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Catalog identifier of a movie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl fmt::Display for MovieId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

impl FromStr for MovieId {
	type Err = std::num::ParseIntError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		s.trim().parse().map(Self)
	}
}

impl From<u64> for MovieId {
	fn from(id: u64) -> Self {
		Self(id)
	}
}

/// One entry of a search result or feed list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
	pub id: MovieId,
	#[serde(default)]
	pub title: String,
	#[serde(default)]
	pub poster_path: Option<String>,
	#[serde(default)]
	pub backdrop_path: Option<String>,
	#[serde(default)]
	pub overview: Option<String>,
	#[serde(default)]
	pub release_date: Option<String>,
}

/// Extended record returned by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieDetails {
	pub id: MovieId,
	pub title: Option<String>,
	/// Alternate title field used by some records instead of `title`.
	pub name: Option<String>,
	pub tagline: Option<String>,
	pub overview: Option<String>,
	pub poster_path: Option<String>,
	pub release_date: Option<String>,
	/// Running time in minutes.
	pub runtime: Option<u32>,
	pub genres: Vec<Genre>,
	pub credits: Option<Credits>,
	pub videos: Option<VideoList>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
	#[serde(default)]
	pub id: u64,
	pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credits {
	pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
	pub name: String,
	#[serde(default)]
	pub character: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoList {
	pub results: Vec<Video>,
}

/// Related media link, e.g. a trailer hosted on YouTube.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
	pub key: String,
	#[serde(default)]
	pub site: String,
	#[serde(rename = "type", default)]
	pub kind: String,
}

/// Paged list envelope. Only the `results` array is used; a missing or
/// `null` array reads as empty.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Page<T> {
	pub results: Option<Vec<T>>,
}

impl<T> Page<T> {
	pub fn into_results(self) -> Vec<T> {
		self.results.unwrap_or_default()
	}
}
