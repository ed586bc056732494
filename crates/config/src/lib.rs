//! Configuration for the marquee search session.
//!
//! Configuration is written in TOML and split into two tables:
//!
//! ```toml
//! [catalog]
//! api-key = "..."
//! base-url = "https://api.themoviedb.org/3"
//! image-base = "https://image.tmdb.org/t/p/w500"
//! language = "en-US"
//! include-adult = false
//! timeout-secs = 30
//!
//! [search]
//! cache-capacity = 120
//! debounce-ms = 300
//! min-chars = 2
//! ```
//!
//! Every key is optional. [`Config::discover`] looks for `marquee.local.toml`
//! and then `marquee.toml` in a directory; the first file found is used. The
//! `TMDB_API_KEY` environment variable overrides the file's API key.

pub mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

pub use error::{ConfigError, Result};
use serde::Deserialize;
use url::Url;

/// Environment variable that overrides [`CatalogConfig::api_key`].
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// File names checked by [`Config::discover`], in priority order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["marquee.local.toml", "marquee.toml"];

/// Parsed session configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Remote catalog settings.
	pub catalog: CatalogConfig,
	/// Live search tuning.
	pub search: SearchConfig,
}

/// Settings for the remote movie catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct CatalogConfig {
	/// API key sent with every request. Requests fail fast without one.
	pub api_key: Option<String>,
	/// Base URL of the REST API.
	pub base_url: String,
	/// Prefix prepended to poster and backdrop paths.
	pub image_base: String,
	/// Language tag sent with every request.
	pub language: String,
	/// Whether adult titles are included in search results.
	pub include_adult: bool,
	/// Per-request timeout in seconds.
	pub timeout_secs: u64,
}

impl Default for CatalogConfig {
	fn default() -> Self {
		Self {
			api_key: None,
			base_url: "https://api.themoviedb.org/3".to_string(),
			image_base: "https://image.tmdb.org/t/p/w500".to_string(),
			language: "en-US".to_string(),
			include_adult: false,
			timeout_secs: 30,
		}
	}
}

impl CatalogConfig {
	/// Returns the configured key, treating blank strings as absent.
	pub fn api_key(&self) -> Option<&str> {
		self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
	}

	/// Returns the request timeout.
	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_secs)
	}
}

/// Tuning for debounced live search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SearchConfig {
	/// Maximum number of cached queries.
	pub cache_capacity: usize,
	/// Quiet period before a live search fires, in milliseconds.
	pub debounce_ms: u64,
	/// Minimum trimmed query length that issues a request.
	pub min_chars: usize,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self {
			cache_capacity: 120,
			debounce_ms: 300,
			min_chars: 2,
		}
	}
}

impl SearchConfig {
	/// Returns the debounce delay.
	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}
}

impl Config {
	/// Parses configuration from a TOML string and validates it.
	pub fn parse(input: &str) -> Result<Self> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Loads configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let config = Self::parse(&content)?;
		tracing::debug!(path = %path.display(), "config.loaded");
		Ok(config)
	}

	/// Loads the first config file found in `dir`, falling back to defaults.
	///
	/// The `TMDB_API_KEY` environment variable is applied afterwards.
	pub fn discover(dir: impl AsRef<Path>) -> Result<Self> {
		let mut config = match Self::find_file(dir.as_ref()) {
			Some(path) => Self::load(path)?,
			None => {
				tracing::debug!(dir = %dir.as_ref().display(), "config.defaults");
				Self::default()
			}
		};
		config.apply_env();
		Ok(config)
	}

	/// Returns the highest-priority config file present in `dir`.
	pub fn find_file(dir: &Path) -> Option<PathBuf> {
		CONFIG_FILE_NAMES.iter().map(|name| dir.join(name)).find(|path| path.is_file())
	}

	/// Applies overrides from the process environment.
	pub fn apply_env(&mut self) {
		self.apply_env_with(|name| std::env::var(name).ok());
	}

	/// Applies overrides using a custom variable lookup.
	pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
		if let Some(key) = lookup(API_KEY_ENV).filter(|key| !key.trim().is_empty()) {
			tracing::debug!(var = API_KEY_ENV, "config.env_override");
			self.catalog.api_key = Some(key);
		}
	}

	/// Checks values that deserialize but cannot be used.
	pub fn validate(&self) -> Result<()> {
		for (field, value) in [("base-url", &self.catalog.base_url), ("image-base", &self.catalog.image_base)] {
			Url::parse(value).map_err(|e| ConfigError::Invalid(format!("{field} {value:?}: {e}")))?;
		}
		if self.catalog.timeout_secs == 0 {
			return Err(ConfigError::Invalid("timeout-secs must be greater than zero".into()));
		}
		if self.search.debounce_ms == 0 {
			return Err(ConfigError::Invalid("debounce-ms must be greater than zero".into()));
		}
		if self.search.cache_capacity == 0 {
			return Err(ConfigError::Invalid("cache-capacity must be greater than zero".into()));
		}
		Ok(())
	}
}
