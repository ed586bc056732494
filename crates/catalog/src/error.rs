//! Catalog error taxonomy.

use thiserror::Error;

/// Which endpoint a request targeted, used in failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
	Search,
	Details,
	Feed,
}

impl RequestKind {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Search => "Search",
			Self::Details => "Details",
			Self::Feed => "Feed",
		}
	}
}

impl std::fmt::Display for RequestKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Errors returned by [`Catalog`](crate::Catalog) implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
	/// No API key is configured. Raised before any network activity.
	#[error("API key not found; set catalog.api-key or TMDB_API_KEY")]
	MissingCredential,

	/// The request could not be sent or the connection failed.
	#[error("{kind} request failed: {message}")]
	Transport { kind: RequestKind, message: String },

	/// The server answered with a non-success status.
	#[error("{kind} request failed (status {status})")]
	Status { kind: RequestKind, status: u16 },

	/// The response body did not match the expected shape.
	#[error("{kind} response could not be read: {message}")]
	Decode { kind: RequestKind, message: String },

	/// The configured base URL cannot address an endpoint.
	#[error("invalid catalog base URL: {0}")]
	InvalidBaseUrl(String),

	/// The HTTP client could not be constructed.
	#[error("HTTP client setup failed: {0}")]
	Setup(String),
}

impl CatalogError {
	/// Returns true for failures caused by the network or the server.
	pub fn is_transport(&self) -> bool {
		matches!(self, Self::Transport { .. } | Self::Status { .. })
	}
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
