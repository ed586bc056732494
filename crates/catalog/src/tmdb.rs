//! HTTP client for The Movie Database REST API.

use async_trait::async_trait;
use marquee_config::CatalogConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{CatalogError, RequestKind, Result};
use crate::model::{MovieDetails, MovieId, MovieSummary, Page};
use crate::source::{Catalog, Feed};

/// Extra records embedded in a detail response.
const DETAIL_APPENDS: &str = "videos,credits";

/// [`Catalog`] backed by the TMDB v3 API.
#[derive(Clone)]
pub struct TmdbClient {
	http: Client,
	base: Url,
	api_key: Option<String>,
	language: String,
	include_adult: bool,
}

impl std::fmt::Debug for TmdbClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TmdbClient")
			.field("base", &self.base.as_str())
			.field("has_key", &self.api_key.is_some())
			.field("language", &self.language)
			.finish()
	}
}

impl TmdbClient {
	/// Creates a client from catalog settings.
	///
	/// A missing API key is not an error here; every request fails with
	/// [`CatalogError::MissingCredential`] instead.
	pub fn new(config: &CatalogConfig) -> Result<Self> {
		let http = Client::builder()
			.timeout(config.timeout())
			.build()
			.map_err(|e| CatalogError::Setup(e.to_string()))?;

		Ok(Self {
			http,
			base: parse_base(&config.base_url)?,
			api_key: config.api_key().map(str::to_owned),
			language: config.language.clone(),
			include_adult: config.include_adult,
		})
	}

	fn api_key(&self) -> Result<&str> {
		self.api_key.as_deref().ok_or(CatalogError::MissingCredential)
	}

	fn endpoint(&self, path: &str) -> Result<Url> {
		let mut url = self.base.join(path).map_err(|e| CatalogError::InvalidBaseUrl(e.to_string()))?;
		url.query_pairs_mut()
			.append_pair("api_key", self.api_key()?)
			.append_pair("language", &self.language);
		Ok(url)
	}

	/// Builds the search URL for `query`.
	pub fn search_url(&self, query: &str) -> Result<Url> {
		let mut url = self.endpoint("search/movie")?;
		url.query_pairs_mut()
			.append_pair("query", query)
			.append_pair("include_adult", if self.include_adult { "true" } else { "false" });
		Ok(url)
	}

	/// Builds the detail URL for `id`, embedding videos and credits.
	pub fn details_url(&self, id: MovieId) -> Result<Url> {
		let mut url = self.endpoint(&format!("movie/{id}"))?;
		url.query_pairs_mut().append_pair("append_to_response", DETAIL_APPENDS);
		Ok(url)
	}

	/// Builds the URL of a home feed.
	pub fn feed_url(&self, feed: Feed) -> Result<Url> {
		self.endpoint(feed.path())
	}

	async fn get_json<T: DeserializeOwned>(&self, kind: RequestKind, url: Url) -> Result<T> {
		tracing::debug!(kind = kind.as_str(), path = url.path(), "catalog.request");

		let response = self.http.get(url).send().await.map_err(|e| CatalogError::Transport {
			kind,
			message: e.without_url().to_string(),
		})?;

		let status = response.status();
		if !status.is_success() {
			tracing::warn!(kind = kind.as_str(), status = status.as_u16(), "catalog.status");
			return Err(CatalogError::Status {
				kind,
				status: status.as_u16(),
			});
		}

		let body = response.bytes().await.map_err(|e| CatalogError::Transport {
			kind,
			message: e.without_url().to_string(),
		})?;
		decode(kind, &body)
	}
}

fn parse_base(raw: &str) -> Result<Url> {
	let mut base = Url::parse(raw).map_err(|e| CatalogError::InvalidBaseUrl(format!("{raw}: {e}")))?;
	if base.cannot_be_a_base() {
		return Err(CatalogError::InvalidBaseUrl(raw.to_string()));
	}
	// `join` replaces the last segment unless the path ends in a slash.
	if !base.path().ends_with('/') {
		let path = format!("{}/", base.path());
		base.set_path(&path);
	}
	Ok(base)
}

pub(crate) fn decode<T: DeserializeOwned>(kind: RequestKind, body: &[u8]) -> Result<T> {
	serde_json::from_slice(body).map_err(|e| CatalogError::Decode {
		kind,
		message: e.to_string(),
	})
}

#[async_trait]
impl Catalog for TmdbClient {
	fn check_credentials(&self) -> Result<()> {
		self.api_key().map(|_| ())
	}

	async fn search(&self, query: &str) -> Result<Vec<MovieSummary>> {
		let url = self.search_url(query)?;
		let page: Page<MovieSummary> = self.get_json(RequestKind::Search, url).await?;
		Ok(page.into_results())
	}

	async fn details(&self, id: MovieId) -> Result<MovieDetails> {
		let url = self.details_url(id)?;
		self.get_json(RequestKind::Details, url).await
	}

	async fn feed(&self, feed: Feed) -> Result<Vec<MovieSummary>> {
		let url = self.feed_url(feed)?;
		let page: Page<MovieSummary> = self.get_json(RequestKind::Feed, url).await?;
		Ok(page.into_results())
	}
}
